//! The buffer registry (spec §4.4): an ordered list of buffers with a
//! geometrically-growing capacity (delegated to `Vec`'s own growth), plus
//! the close-neighbor rule for picking the next active buffer.

use core_state::Buffer;

pub struct Registry {
    buffers: Vec<Buffer>,
    active: usize,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            buffers: Vec::with_capacity(4),
            active: 0,
        }
    }

    pub fn open(&mut self, buffer: Buffer) -> usize {
        self.buffers.push(buffer);
        self.active = self.buffers.len() - 1;
        self.active
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn set_active(&mut self, idx: usize) {
        if idx < self.buffers.len() {
            self.active = idx;
        }
    }

    pub fn active(&self) -> &Buffer {
        &self.buffers[self.active]
    }

    pub fn active_mut(&mut self) -> &mut Buffer {
        &mut self.buffers[self.active]
    }

    pub fn get(&self, idx: usize) -> Option<&Buffer> {
        self.buffers.get(idx)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Buffer> {
        self.buffers.get_mut(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Buffer> {
        self.buffers.iter()
    }

    /// Close the buffer at `idx`. Prefers the previous index as the new
    /// active buffer; if the last buffer was closed, the new last becomes
    /// active. Returns `None` if the registry is now empty — the caller
    /// must exit the process (spec §4.4).
    pub fn close(&mut self, idx: usize) -> Option<usize> {
        if idx >= self.buffers.len() {
            return Some(self.active);
        }
        self.buffers.remove(idx);
        if self.buffers.is_empty() {
            return None;
        }
        self.active = idx.saturating_sub(1).min(self.buffers.len() - 1);
        Some(self.active)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closing_middle_buffer_prefers_previous() {
        let mut r = Registry::new();
        r.open(Buffer::with_file_name("a"));
        r.open(Buffer::with_file_name("b"));
        r.open(Buffer::with_file_name("c"));
        let active = r.close(1).unwrap();
        assert_eq!(active, 0);
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn closing_last_buffer_selects_new_last() {
        let mut r = Registry::new();
        r.open(Buffer::with_file_name("a"));
        r.open(Buffer::with_file_name("b"));
        let active = r.close(1).unwrap();
        assert_eq!(active, 0);
    }

    #[test]
    fn closing_only_buffer_signals_exit() {
        let mut r = Registry::new();
        r.open(Buffer::with_file_name("a"));
        assert!(r.close(0).is_none());
    }
}

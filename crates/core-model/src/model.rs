//! The top-level editor model: buffer registry plus split layout.

use core_state::{Buffer, Registers};

use crate::layout::{compute_geometry, Layout, SelfSplitViewports, SplitGeometry};
use crate::registry::Registry;

pub struct Model {
    pub registry: Registry,
    pub layout: Layout,
    pub split_percent: u8,
    pub self_split: SelfSplitViewports,
    pub registers: Registers,
}

impl Model {
    pub fn new() -> Self {
        let mut registry = Registry::new();
        registry.open(Buffer::new());
        Self {
            registry,
            layout: Layout::Single { buffer: 0 },
            split_percent: 50,
            self_split: SelfSplitViewports::default(),
            registers: Registers::new(),
        }
    }

    pub fn geometry(&self, term_width: u16) -> SplitGeometry {
        compute_geometry(term_width, &self.layout, self.split_percent)
    }

    /// `:split`: show two distinct buffers side by side.
    pub fn split(&mut self, other_buffer: usize) {
        self.layout = Layout::TwoPane {
            left: self.registry.active_index(),
            right: other_buffer,
        };
    }

    /// Self-split: the active buffer shown through two independent
    /// viewports.
    pub fn self_split(&mut self) {
        self.layout = Layout::SelfSplit {
            buffer: self.registry.active_index(),
        };
        self.self_split = SelfSplitViewports::default();
    }

    pub fn close_split(&mut self) {
        self.layout = Layout::Single {
            buffer: self.registry.active_index(),
        };
    }

    /// Open a new buffer and switch to it; returns its registry index.
    /// Replaces `Layout::Single`'s tracked buffer (spec: `:tabnew`).
    pub fn open_tab(&mut self, buffer: Buffer) -> usize {
        let idx = self.registry.open(buffer);
        self.layout = Layout::Single { buffer: idx };
        idx
    }

    /// Close the active buffer. Returns `false` if the process should now
    /// exit (the last buffer was closed).
    pub fn close_active(&mut self) -> bool {
        match self.registry.close(self.registry.active_index()) {
            Some(new_active) => {
                self.layout = Layout::Single { buffer: new_active };
                true
            }
            None => false,
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closing_last_buffer_signals_exit() {
        let mut m = Model::new();
        assert!(!m.close_active());
    }

    #[test]
    fn split_then_close_returns_to_single() {
        let mut m = Model::new();
        let other = m.registry.open(Buffer::new());
        m.split(other);
        assert!(m.layout.is_split());
        m.close_split();
        assert!(!m.layout.is_split());
    }
}

//! The line: a mutable sequence of [`Cell`]s with inherited lexer state
//! (§3, §4.1).

use crate::cell::Cell;
use crate::width::codepoint_width;

/// Gutter revision-bar classification (§3, §4.5, §6 git adapter).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RevStatus {
    #[default]
    Unchanged,
    Added,
    ModifiedUnsaved,
    ModifiedCommitted,
    DeletedAbove,
    ModifiedAndDeletedAbove,
}

const INITIAL_CAPACITY: usize = 8;

#[derive(Clone, Debug)]
pub struct Line {
    cells: Vec<Cell>,
    /// Syntax state inherited at the start of this line; 0 = clean.
    pub istate: i32,
    pub is_current: bool,
    pub rev_status: RevStatus,
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

impl Line {
    pub fn new() -> Self {
        Self {
            cells: Vec::with_capacity(INITIAL_CAPACITY),
            istate: 0,
            is_current: false,
            rev_status: RevStatus::Unchanged,
        }
    }

    pub fn from_str(s: &str) -> Self {
        let mut line = Self::new();
        for cp in s.chars() {
            line.cells.push(Cell::new(cp));
        }
        line.recompute_widths(8);
        line
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn cell(&self, offset: usize) -> Option<&Cell> {
        self.cells.get(offset)
    }

    /// Render this line's code points back to a `String` (no trailing
    /// newline). Used for save and for syntax re-lexing.
    pub fn to_text(&self) -> String {
        self.cells.iter().map(|c| c.codepoint).collect()
    }

    /// Insert `cell` at `offset`. Contract: `offset` in `[0, len]`.
    pub fn insert(&mut self, offset: usize, cell: Cell) {
        let offset = offset.min(self.cells.len());
        self.cells.insert(offset, cell);
        self.rev_status = promote_unsaved(self.rev_status);
    }

    /// Remove the cell before `offset` (canonical backspace semantics). A
    /// no-op at `offset == 0`. At `offset == len` this removes the final
    /// cell (spec §9 resolution of the `line_delete` ambiguity).
    ///
    /// Returns the removed cell, if any.
    pub fn delete(&mut self, offset: usize) -> Option<Cell> {
        if offset == 0 || self.cells.is_empty() {
            return None;
        }
        let idx = (offset - 1).min(self.cells.len() - 1);
        let removed = self.cells.remove(idx);
        self.rev_status = promote_unsaved(self.rev_status);
        Some(removed)
    }

    /// Overwrite the cell at `offset`, returning the cell that was there.
    pub fn replace(&mut self, offset: usize, cell: Cell) -> Option<Cell> {
        let slot = self.cells.get_mut(offset)?;
        let old = *slot;
        *slot = cell;
        self.rev_status = promote_unsaved(self.rev_status);
        Some(old)
    }

    /// Truncate to the first `len` cells, discarding the rest.
    pub fn truncate(&mut self, len: usize) {
        self.cells.truncate(len);
    }

    /// Append a cell without the usual rev-status promotion; used by
    /// `LineStore::split_line`/`merge_lines`, which manage rev-status at the
    /// store level.
    pub(crate) fn push_cell(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.istate = 0;
    }

    /// Recompute cached display widths for every cell, honoring `tabstop`.
    /// A tab's width is the distance to the next stop from its current
    /// column, not a fixed value; everything else uses its intrinsic
    /// codepoint width.
    pub fn recompute_widths(&mut self, tabstop: u8) {
        let tabstop = tabstop.max(1);
        let mut col: u32 = 0;
        for cell in self.cells.iter_mut() {
            if cell.codepoint == '\t' {
                let stop = tabstop as u32;
                let w = stop - (col % stop);
                cell.width = w.min(crate::width::MAX_CELL_WIDTH as u32) as u8;
            } else {
                cell.width = codepoint_width(cell.codepoint);
            }
            col += cell.width as u32;
        }
    }
}

fn promote_unsaved(status: RevStatus) -> RevStatus {
    match status {
        RevStatus::Unchanged | RevStatus::Added => RevStatus::ModifiedUnsaved,
        RevStatus::ModifiedCommitted | RevStatus::DeletedAbove => {
            RevStatus::ModifiedAndDeletedAbove
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_at_len_and_zero_succeed() {
        let mut l = Line::from_str("bc");
        l.insert(0, Cell::new('a'));
        assert_eq!(l.to_text(), "abc");
        l.insert(l.len(), Cell::new('d'));
        assert_eq!(l.to_text(), "abcd");
    }

    #[test]
    fn delete_at_zero_is_noop() {
        let mut l = Line::from_str("abc");
        assert!(l.delete(0).is_none());
        assert_eq!(l.to_text(), "abc");
    }

    #[test]
    fn delete_at_len_removes_final_cell() {
        let mut l = Line::from_str("abc");
        let removed = l.delete(l.len()).unwrap();
        assert_eq!(removed.codepoint, 'c');
        assert_eq!(l.to_text(), "ab");
    }

    #[test]
    fn delete_is_backspace_semantics() {
        let mut l = Line::from_str("abc");
        let removed = l.delete(2).unwrap(); // cell before offset 2 -> index 1 ('b')
        assert_eq!(removed.codepoint, 'b');
        assert_eq!(l.to_text(), "ac");
    }

    #[test]
    fn tab_width_depends_on_column() {
        let mut l = Line::from_str("a\tbc\td");
        l.recompute_widths(4);
        // col after 'a' = 1, tab -> width 3 (to col 4)
        assert_eq!(l.cell(1).unwrap().width, 3);
        // col after a,tab(3),b,c = 1+3+1+1 = 6, tab -> width 2 (to col 8)
        assert_eq!(l.cell(4).unwrap().width, 2);
    }
}

//! Mode → key → action dispatch (spec §4.7): a small trie per mode,
//! resolving a pending-key buffer into a symbolic `Action` that
//! `core-actions` then interprets against a `Buffer`.

pub mod action;
pub mod tables;
pub mod trie;

use core_state::Mode;

pub use action::{Action, Direction, KeyPattern, MappingSpec, SelectionKind};
pub use trie::{MappingTrie, Resolution};

pub struct Keymap {
    normal: MappingTrie,
    insert_replace: MappingTrie,
    line_selection: MappingTrie,
    char_col_selection: MappingTrie,
    col_insert: MappingTrie,
}

impl Keymap {
    pub fn new() -> Self {
        Self {
            normal: MappingTrie::build(tables::normal_mode_specs()),
            insert_replace: MappingTrie::build(tables::insert_or_replace_mode_specs()),
            line_selection: MappingTrie::build(tables::line_selection_mode_specs()),
            char_col_selection: MappingTrie::build(tables::char_or_col_selection_mode_specs()),
            col_insert: MappingTrie::build(tables::col_insert_mode_specs()),
        }
    }

    fn trie_for(&self, mode: Mode) -> &MappingTrie {
        match mode {
            Mode::Normal => &self.normal,
            Mode::Insert | Mode::Replace => &self.insert_replace,
            Mode::LineSelection => &self.line_selection,
            Mode::CharSelection | Mode::ColSelection => &self.char_col_selection,
            Mode::ColInsert => &self.col_insert,
        }
    }

    /// Resolve the pending-key buffer for `mode`. In INSERT/REPLACE/
    /// COL_INSERT, any byte the mode's table doesn't claim (i.e. not
    /// `ESC`) is a literal character to insert, so `FallbackLiteral`
    /// from those modes is the common case, not an error.
    pub fn resolve(&self, mode: Mode, buffer: &[char]) -> Resolution {
        self.trie_for(mode).resolve(buffer)
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn normal_mode_dd_is_delete_line() {
        let km = Keymap::new();
        let buf: Vec<char> = "dd".chars().collect();
        assert_eq!(
            km.resolve(Mode::Normal, &buf),
            Resolution::Matched { consumed: 2, action: Action::DeleteLine, ambiguous: false }
        );
    }

    #[test]
    fn insert_mode_plain_char_falls_back_to_literal() {
        let km = Keymap::new();
        let buf: Vec<char> = "q".chars().collect();
        assert_eq!(km.resolve(Mode::Insert, &buf), Resolution::FallbackLiteral('q'));
    }

    #[test]
    fn insert_mode_esc_is_matched() {
        let km = Keymap::new();
        let buf: Vec<char> = "\u{1b}".chars().collect();
        assert_eq!(
            km.resolve(Mode::Insert, &buf),
            Resolution::Matched { consumed: 1, action: Action::Escape, ambiguous: false }
        );
    }

    #[test]
    fn replace_char_r_x_in_normal_mode() {
        let km = Keymap::new();
        let buf: Vec<char> = "rx".chars().collect();
        assert_eq!(
            km.resolve(Mode::Normal, &buf),
            Resolution::Matched { consumed: 2, action: Action::ReplaceChar('\0'), ambiguous: false }
        );
    }
}

//! Editor modes (spec §4.7).

/// One of the editor's seven modes. Transitions between them are driven by
/// `core-keymap`/`core-actions`; this crate only stores the current value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
    Replace,
    LineSelection,
    CharSelection,
    ColSelection,
    ColInsert,
}

impl Mode {
    pub fn is_selection(self) -> bool {
        matches!(self, Mode::LineSelection | Mode::CharSelection | Mode::ColSelection)
    }

    pub fn is_insert_like(self) -> bool {
        matches!(self, Mode::Insert | Mode::Replace | Mode::ColInsert)
    }

    /// The status-line/command-line label (`-- INSERT --` etc.).
    pub fn label(self) -> &'static str {
        match self {
            Mode::Normal => "",
            Mode::Insert => "-- INSERT --",
            Mode::Replace => "-- REPLACE --",
            Mode::LineSelection => "-- LINE --",
            Mode::CharSelection => "-- VISUAL --",
            Mode::ColSelection => "-- COL --",
            Mode::ColInsert => "-- COL INSERT --",
        }
    }
}

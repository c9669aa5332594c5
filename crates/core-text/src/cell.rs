//! The styled cell: one Unicode scalar plus its cached display width and
//! paint flags (spec §3).

use bitflags::bitflags;

/// Syntax highlighting class painted onto a cell by the lexer (§4.3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum SyntaxClass {
    None = 0,
    Keyword,
    String,
    Comment,
    Type,
    Pragma,
    Numeral,
    String2,
    DiffPlus,
    DiffMinus,
    Notice,
    Bold,
    Link,
    Escape,
}

impl Default for SyntaxClass {
    fn default() -> Self {
        SyntaxClass::None
    }
}

bitflags! {
    /// The two orthogonal bits layered on top of [`SyntaxClass`]: selection
    /// (visual-mode highlight, paren match) and live search-match highlight.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
    pub struct CellFlags: u8 {
        const SELECT = 0b0000_0001;
        const SEARCH = 0b0000_0010;
    }
}

/// One styled, editable position: a code point, its cached terminal-cell
/// width, its syntax class, and the `SELECT`/`SEARCH` overlay bits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub codepoint: char,
    pub width: u8,
    pub class: SyntaxClass,
    pub flags: CellFlags,
}

impl Cell {
    /// A plain, unstyled cell for `cp`. Width is computed without tab
    /// context; callers inserting into a line must run tab recomputation
    /// afterward (see `line::recompute_widths`).
    pub fn new(cp: char) -> Self {
        Self {
            codepoint: cp,
            width: crate::width::codepoint_width(cp),
            class: SyntaxClass::None,
            flags: CellFlags::empty(),
        }
    }

    pub fn is_selected(&self) -> bool {
        self.flags.contains(CellFlags::SELECT)
    }

    pub fn is_search_match(&self) -> bool {
        self.flags.contains(CellFlags::SEARCH)
    }

    pub fn set_selected(&mut self, on: bool) {
        self.flags.set(CellFlags::SELECT, on);
    }

    pub fn set_search_match(&mut self, on: bool) {
        self.flags.set(CellFlags::SEARCH, on);
    }

    pub fn clear_class(&mut self) {
        self.class = SyntaxClass::None;
    }
}

//! Cell-to-terminal-text rendering rules and the SGR palette (spec §4.5).
//!
//! Two concerns are kept separate, as in the teacher's style layer: *which
//! glyph* a cell prints as (tab expansion, control-character escapes, the
//! high-codepoint bracket fallback) versus *what color* it prints in
//! (syntax class, `SELECT`/`SEARCH` overlay, current-line background).

use core_text::{Cell, SyntaxClass};
use unicode_width::UnicodeWidthChar;

pub const RESET: &str = "\x1b[0m";

/// Reverse video, used for the `SELECT` palette (visual-mode highlight,
/// paren match).
const SELECT_SGR: &str = "\x1b[7m";
/// Black-on-yellow, used for `SEARCH` matches and notice-class cells.
const SEARCH_SGR: &str = "\x1b[30;43m";
/// Dim, used for the trailing-space marker.
const DIM_SGR: &str = "\x1b[2m";
/// Alternate background for the current line, layered under the
/// syntax-class foreground.
const CURRENT_LINE_BG: &str = "\x1b[48;5;236m";

/// Foreground SGR fragment for one [`SyntaxClass`]. `None` means "use the
/// terminal's default foreground".
fn syntax_sgr(class: SyntaxClass) -> Option<&'static str> {
    match class {
        SyntaxClass::None => None,
        SyntaxClass::Keyword => Some("\x1b[34m"),
        SyntaxClass::String | SyntaxClass::String2 => Some("\x1b[32m"),
        SyntaxClass::Comment => Some("\x1b[90m"),
        SyntaxClass::Type => Some("\x1b[36m"),
        SyntaxClass::Pragma => Some("\x1b[35m"),
        SyntaxClass::Numeral => Some("\x1b[31m"),
        SyntaxClass::DiffPlus => Some("\x1b[32m"),
        SyntaxClass::DiffMinus => Some("\x1b[31m"),
        SyntaxClass::Notice => Some("\x1b[33m"),
        SyntaxClass::Bold => Some("\x1b[1m"),
        SyntaxClass::Link => Some("\x1b[4;34m"),
        SyntaxClass::Escape => Some("\x1b[35m"),
    }
}

/// The SGR prefix to print before a cell's glyph, per spec §4.5's
/// palette rules: `SELECT` wins over syntax class, `SEARCH`/notice wins
/// over a plain syntax color, and the current line's alternate
/// background is layered under whichever foreground was chosen.
pub fn sgr_prefix(cell: &Cell, is_current_line: bool) -> String {
    let mut out = String::new();
    if is_current_line {
        out.push_str(CURRENT_LINE_BG);
    }
    if cell.is_selected() {
        out.push_str(SELECT_SGR);
    } else if cell.is_search_match() || cell.class == SyntaxClass::Notice {
        out.push_str(SEARCH_SGR);
    } else if let Some(fg) = syntax_sgr(cell.class) {
        out.push_str(fg);
    }
    out
}

/// A trailing space at end of line (spec §4.5): dim `·` instead of a
/// plain blank.
pub fn trailing_space_glyph() -> String {
    format!("{DIM_SGR}·{RESET}")
}

/// Fill the rest of a current line's row past its last cell with the
/// alternate background, so the highlight reaches the pane's right edge
/// rather than stopping at end-of-text.
pub fn current_line_fill(width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    format!("{CURRENT_LINE_BG}{}{RESET}", " ".repeat(width))
}

/// Render one cell's codepoint as display text, independent of color:
/// tab expansion, control-character/`DEL`/C1-range escapes, `0xA0`, and
/// the bracketed fallback for codepoints the terminal can't render.
pub fn render_glyph(cell: &Cell, unicode: bool) -> String {
    let cp = cell.codepoint;
    if cp == '\t' {
        return render_tab(cell.width.max(1) as usize, unicode);
    }
    let code = cp as u32;
    if code < 0x20 {
        return format!("^{}", char::from_u32(code + 0x40).unwrap_or('?'));
    }
    if code == 0x7f {
        return "^?".to_string();
    }
    if (0x80..=0x9f).contains(&code) {
        return format!("<{code:02x}>");
    }
    if code == 0xa0 {
        return "_".to_string();
    }
    if UnicodeWidthChar::width(cp).is_none() {
        return if code > 0xffff {
            format!("[U+{code:06X}]")
        } else {
            format!("[U+{code:04X}]")
        };
    }
    cp.to_string()
}

fn render_tab(width: usize, unicode: bool) -> String {
    let (lead, fill) = if unicode { ('»', '·') } else { ('>', '-') };
    let mut s = String::with_capacity(width);
    s.push(lead);
    for _ in 1..width {
        s.push(fill);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::{Cell, CellFlags};

    #[test]
    fn control_characters_escape_as_caret_notation() {
        let cell = Cell::new('\u{1}');
        assert_eq!(render_glyph(&cell, true), "^A");
        let del = Cell::new('\u{7f}');
        assert_eq!(render_glyph(&del, true), "^?");
    }

    #[test]
    fn c1_range_renders_as_hex_bracket() {
        let cell = Cell::new('\u{85}');
        assert_eq!(render_glyph(&cell, true), "<85>");
    }

    #[test]
    fn nbsp_renders_as_underscore() {
        let cell = Cell::new('\u{a0}');
        assert_eq!(render_glyph(&cell, true), "_");
    }

    #[test]
    fn tab_expands_with_unicode_or_ascii_fill() {
        let mut cell = Cell::new('\t');
        cell.width = 4;
        assert_eq!(render_glyph(&cell, true), "»···");
        assert_eq!(render_glyph(&cell, false), ">---");
    }

    #[test]
    fn plain_ascii_renders_itself() {
        let cell = Cell::new('x');
        assert_eq!(render_glyph(&cell, true), "x");
    }

    #[test]
    fn select_palette_wins_over_syntax_class() {
        let mut cell = Cell::new('x');
        cell.class = SyntaxClass::Keyword;
        cell.flags = CellFlags::SELECT;
        assert_eq!(sgr_prefix(&cell, false), SELECT_SGR);
    }

    #[test]
    fn search_palette_wins_over_plain_syntax_color() {
        let mut cell = Cell::new('x');
        cell.class = SyntaxClass::Keyword;
        cell.flags = CellFlags::SEARCH;
        assert_eq!(sgr_prefix(&cell, false), SEARCH_SGR);
    }

    #[test]
    fn current_line_fill_pads_with_background() {
        let s = current_line_fill(3);
        assert!(s.starts_with(CURRENT_LINE_BG));
        assert!(s.contains("   "));
    }

    #[test]
    fn current_line_background_layers_under_foreground() {
        let mut cell = Cell::new('x');
        cell.class = SyntaxClass::Keyword;
        let sgr = sgr_prefix(&cell, true);
        assert!(sgr.starts_with(CURRENT_LINE_BG));
        assert!(sgr.contains("34"));
    }
}

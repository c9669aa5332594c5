//! Unified-diff lexer. Each line's class is fully determined by its first
//! character, so `istate` is always `0`.

use core_text::{Cell, SyntaxClass};

use crate::primitives::paint_class;
use crate::Syntax;

pub struct DiffSyntax;

impl Syntax for DiffSyntax {
    fn name(&self) -> &'static str {
        "diff"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["diff", "patch"]
    }

    fn prefers_spaces(&self) -> bool {
        true
    }

    fn highlight_line(&self, cells: &mut [Cell], _istate: i32) -> i32 {
        highlight(cells)
    }
}

pub(crate) fn highlight(cells: &mut [Cell]) -> i32 {
    let len = cells.len();
    match cells.first().map(|c| c.codepoint) {
        Some('@') if cells.get(1).map(|c| c.codepoint) == Some('@') => {
            paint_class(cells, 0, len, SyntaxClass::Notice);
        }
        Some('+') => paint_class(cells, 0, len, SyntaxClass::DiffPlus),
        Some('-') => paint_class(cells, 0, len, SyntaxClass::DiffMinus),
        Some('d') if starts_with(cells, "diff ") => paint_class(cells, 0, len, SyntaxClass::Bold),
        Some('i') if starts_with(cells, "index ") => {
            paint_class(cells, 0, len, SyntaxClass::Comment)
        }
        _ => {}
    }
    0
}

fn starts_with(cells: &[Cell], prefix: &str) -> bool {
    prefix
        .chars()
        .enumerate()
        .all(|(i, c)| cells.get(i).map(|cell| cell.codepoint) == Some(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::Line;

    #[test]
    fn plus_minus_and_hunk_header() {
        let mut plus = Line::from_str("+added line");
        highlight(plus.cells_mut());
        assert_eq!(plus.cells()[0].class, SyntaxClass::DiffPlus);

        let mut minus = Line::from_str("-removed line");
        highlight(minus.cells_mut());
        assert_eq!(minus.cells()[0].class, SyntaxClass::DiffMinus);

        let mut hunk = Line::from_str("@@ -1,3 +1,4 @@");
        highlight(hunk.cells_mut());
        assert_eq!(hunk.cells()[0].class, SyntaxClass::Notice);
    }
}

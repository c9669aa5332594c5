//! Python lexer. `istate`: `0` clean, `1` inside a `"""` string, `2` inside
//! a `'''` string. Kept under 5 states so it fits below the `py` nest base
//! of `5` used by [`crate::lang::markdown`].

use core_text::{Cell, SyntaxClass};

use crate::primitives::{match_keyword, paint_c_numeral, paint_class};
use crate::Syntax;

const KEYWORDS: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif",
    "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda",
    "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with", "yield", "None",
    "True", "False",
];

pub struct PythonSyntax;

impl Syntax for PythonSyntax {
    fn name(&self) -> &'static str {
        "python"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["py", "pyw"]
    }

    fn prefers_spaces(&self) -> bool {
        true
    }

    fn highlight_line(&self, cells: &mut [Cell], istate: i32) -> i32 {
        highlight(cells, istate)
    }
}

pub(crate) fn highlight(cells: &mut [Cell], istate: i32) -> i32 {
    let mut i = 0;
    let mut state = istate;

    if state == 1 || state == 2 {
        let delim = if state == 1 { '"' } else { '\'' };
        let (len, closed) = scan_triple(cells, 0, delim);
        paint_class(cells, 0, len, SyntaxClass::String);
        i = len;
        if closed {
            state = 0;
        } else {
            return state;
        }
    }

    while i < cells.len() {
        let c = cells[i].codepoint;
        if c == '#' {
            paint_class(cells, i, cells.len() - i, SyntaxClass::Comment);
            return 0;
        }
        if (c == '"' || c == '\'') && is_triple(cells, i, c) {
            let (len, closed) = scan_triple(cells, i + 3, c);
            paint_class(cells, i, len + 3, SyntaxClass::String);
            i += len + 3;
            if !closed {
                return if c == '"' { 1 } else { 2 };
            }
            continue;
        }
        if c == '"' || c == '\'' {
            let len = scan_simple_string(cells, i, c);
            paint_class(cells, i, len, SyntaxClass::String);
            i += len;
            continue;
        }
        if c.is_ascii_digit() {
            if let Some(len) = paint_c_numeral(cells, i) {
                i += len;
                continue;
            }
        }
        if let Some(len) = match_keyword(cells, i, KEYWORDS) {
            paint_class(cells, i, len, SyntaxClass::Keyword);
            i += len;
            continue;
        }
        i += 1;
    }
    0
}

fn is_triple(cells: &[Cell], i: usize, delim: char) -> bool {
    cells.get(i).map(|c| c.codepoint) == Some(delim)
        && cells.get(i + 1).map(|c| c.codepoint) == Some(delim)
        && cells.get(i + 2).map(|c| c.codepoint) == Some(delim)
}

/// Scan from `i` (just past the opening `"""`/`'''`) for the closing
/// triple-quote. Returns `(cells_consumed, closed)`.
fn scan_triple(cells: &[Cell], i: usize, delim: char) -> (usize, bool) {
    let mut j = i;
    while j < cells.len() {
        if is_triple(cells, j, delim) {
            return (j - i + 3, true);
        }
        j += 1;
    }
    (cells.len() - i, false)
}

fn scan_simple_string(cells: &[Cell], i: usize, delim: char) -> usize {
    let mut j = i + 1;
    while j < cells.len() {
        if cells[j].codepoint == '\\' {
            j += 2;
            continue;
        }
        if cells[j].codepoint == delim {
            j += 1;
            break;
        }
        j += 1;
    }
    j - i
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::Line;

    #[test]
    fn triple_quoted_string_spans_lines() {
        let mut l1 = Line::from_str("x = \"\"\"start of");
        let s1 = highlight(l1.cells_mut(), 0);
        assert_eq!(s1, 1);

        let mut l2 = Line::from_str("a docstring\"\"\"");
        let s2 = highlight(l2.cells_mut(), s1);
        assert_eq!(s2, 0);
    }

    #[test]
    fn keyword_and_comment() {
        let mut l = Line::from_str("def f():  # comment");
        highlight(l.cells_mut(), 0);
        assert_eq!(l.cells()[0].class, SyntaxClass::Keyword);
        let hash = l.to_text().find('#').unwrap();
        assert_eq!(l.cells()[hash].class, SyntaxClass::Comment);
    }
}

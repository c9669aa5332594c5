//! JSON lexer. Strings, numbers, and object keys never legally span a
//! line break, so this lexer has no continuation states: `istate` is
//! always `0`.

use core_text::{Cell, SyntaxClass};

use crate::primitives::{match_keyword, paint_c_numeral, paint_class};
use crate::Syntax;

const LITERALS: &[&str] = &["true", "false", "null"];

pub struct JsonSyntax;

impl Syntax for JsonSyntax {
    fn name(&self) -> &'static str {
        "json"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    fn prefers_spaces(&self) -> bool {
        true
    }

    fn highlight_line(&self, cells: &mut [Cell], _istate: i32) -> i32 {
        highlight(cells)
    }
}

pub(crate) fn highlight(cells: &mut [Cell]) -> i32 {
    let mut i = 0;
    while i < cells.len() {
        let c = cells[i].codepoint;
        if c == '"' {
            let len = scan_string(cells, i);
            // A key (string immediately followed by `:`) paints differently
            // from a value string.
            let is_key = cells
                .get(skip_ws(cells, i + len))
                .map(|c| c.codepoint)
                .unwrap_or(' ')
                == ':';
            paint_class(
                cells,
                i,
                len,
                if is_key {
                    SyntaxClass::Pragma
                } else {
                    SyntaxClass::String
                },
            );
            i += len;
            continue;
        }
        if c.is_ascii_digit() || (c == '-' && cells.get(i + 1).is_some_and(|c| c.codepoint.is_ascii_digit())) {
            let start = i;
            if c == '-' {
                i += 1;
            }
            if let Some(len) = paint_c_numeral(cells, i) {
                i += len;
                paint_class(cells, start, i - start, SyntaxClass::Numeral);
                continue;
            }
            i = start;
        }
        if let Some(len) = match_keyword(cells, i, LITERALS) {
            paint_class(cells, i, len, SyntaxClass::Keyword);
            i += len;
            continue;
        }
        i += 1;
    }
    0
}

fn scan_string(cells: &[Cell], i: usize) -> usize {
    let mut j = i + 1;
    while j < cells.len() {
        if cells[j].codepoint == '\\' {
            j += 2;
            continue;
        }
        if cells[j].codepoint == '"' {
            j += 1;
            break;
        }
        j += 1;
    }
    j - i
}

fn skip_ws(cells: &[Cell], mut i: usize) -> usize {
    while cells.get(i).is_some_and(|c| c.codepoint.is_whitespace()) {
        i += 1;
    }
    i
}

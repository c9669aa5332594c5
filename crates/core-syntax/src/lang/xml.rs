//! XML lexer. `istate`: `0` clean, `1` inside `<!-- -->`, `2` inside an
//! unterminated start/end tag, `3`/`4` inside a double-/single-quoted
//! attribute value within an unterminated tag.

use core_text::{Cell, SyntaxClass};

use crate::primitives::paint_class;
use crate::Syntax;

const CLEAN: i32 = 0;
const COMMENT: i32 = 1;
const TAG: i32 = 2;
const TAG_DQ: i32 = 3;
const TAG_SQ: i32 = 4;

pub struct XmlSyntax;

impl Syntax for XmlSyntax {
    fn name(&self) -> &'static str {
        "xml"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["xml", "html", "htm", "svg"]
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

    loop {
        match state {
            COMMENT => {
                let start = i;
                while i < cells.len() {
                    if cells[i].codepoint == '-'
                        && cells.get(i + 1).map(|c| c.codepoint) == Some('-')
                        && cells.get(i + 2).map(|c| c.codepoint) == Some('>')
                    {
                        i += 3;
                        state = CLEAN;
                        break;
                    }
                    i += 1;
                }
                paint_class(cells, start, i - start, SyntaxClass::Comment);
                if state == COMMENT {
                    return COMMENT;
                }
            }
            TAG_DQ | TAG_SQ => {
                let quote = if state == TAG_DQ { '"' } else { '\'' };
                let start = i;
                while i < cells.len() && cells[i].codepoint != quote {
                    i += 1;
                }
                if i < cells.len() {
                    i += 1;
                    state = TAG;
                }
                paint_class(cells, start, i - start, SyntaxClass::String);
                if state != TAG {
                    return state;
                }
            }
            TAG => {
                let start = i;
                while i < cells.len() {
                    let c = cells[i].codepoint;
                    if c == '>' {
                        i += 1;
                        paint_class(cells, start, i - start, SyntaxClass::Type);
                        state = CLEAN;
                        break;
                    }
                    if c == '"' {
                        paint_class(cells, start, i - start, SyntaxClass::Type);
                        i += 1;
                        state = TAG_DQ;
                        break;
                    }
                    if c == '\'' {
                        paint_class(cells, start, i - start, SyntaxClass::Type);
                        i += 1;
                        state = TAG_SQ;
                        break;
                    }
                    i += 1;
                }
                if i >= cells.len() {
                    paint_class(cells, start, i - start, SyntaxClass::Type);
                    return TAG;
                }
                if state == TAG_DQ || state == TAG_SQ {
                    continue;
                }
            }
            _ => {
                if i >= cells.len() {
                    return CLEAN;
                }
                if cells[i].codepoint == '<'
                    && cells.get(i + 1).map(|c| c.codepoint) == Some('!')
                    && cells.get(i + 2).map(|c| c.codepoint) == Some('-')
                    && cells.get(i + 3).map(|c| c.codepoint) == Some('-')
                {
                    let start = i;
                    i += 4;
                    state = COMMENT;
                    paint_class(cells, start, i - start, SyntaxClass::Comment);
                    continue;
                }
                if cells[i].codepoint == '<' {
                    state = TAG;
                    continue;
                }
                i += 1;
            }
        }
        if i >= cells.len() {
            return state;
        }
    }
}

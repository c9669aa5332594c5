//! Bash lexer. `istate` is a base-10 digit stack: each decimal digit is a
//! quoting-context code (`1` single-quote, `2` double-quote, `3` backtick,
//! `4` `$(...)`), most-significant digit innermost. This lets quoting
//! nest to any depth without a fixed-width encoding.

use core_text::{Cell, SyntaxClass};

use crate::primitives::{match_keyword, paint_class};
use crate::Syntax;

const KEYWORDS: &[&str] = &[
    "if", "then", "else", "elif", "fi", "for", "while", "until", "do", "done", "case", "esac",
    "function", "local", "export", "return", "in", "select", "time",
];

const SINGLE: u8 = 1;
const DOUBLE: u8 = 2;
const BACKTICK: u8 = 3;
const SUBSHELL: u8 = 4;

pub struct BashSyntax;

impl Syntax for BashSyntax {
    fn name(&self) -> &'static str {
        "bash"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["sh", "bash"]
    }

    fn prefers_spaces(&self) -> bool {
        true
    }

    fn highlight_line(&self, cells: &mut [Cell], istate: i32) -> i32 {
        highlight(cells, istate)
    }
}

fn decode(mut state: i32) -> Vec<u8> {
    let mut stack = Vec::new();
    while state > 0 {
        stack.push((state % 10) as u8);
        state /= 10;
    }
    stack.reverse();
    stack
}

fn encode(stack: &[u8]) -> i32 {
    stack.iter().fold(0, |acc, &d| acc * 10 + d as i32)
}

pub(crate) fn highlight(cells: &mut [Cell], istate: i32) -> i32 {
    let mut stack = decode(istate);
    let mut i = 0;

    while i < cells.len() {
        match stack.last().copied() {
            Some(SINGLE) => {
                cells[i].class = SyntaxClass::String;
                if cells[i].codepoint == '\'' {
                    stack.pop();
                }
                i += 1;
            }
            Some(DOUBLE) => {
                cells[i].class = SyntaxClass::String;
                let c = cells[i].codepoint;
                if c == '\\' {
                    if i + 1 < cells.len() {
                        cells[i + 1].class = SyntaxClass::Escape;
                    }
                    i += 2;
                    continue;
                }
                if c == '"' {
                    stack.pop();
                    i += 1;
                    continue;
                }
                if c == '`' {
                    stack.push(BACKTICK);
                    i += 1;
                    continue;
                }
                if c == '$' && cells.get(i + 1).map(|c| c.codepoint) == Some('(') {
                    stack.push(SUBSHELL);
                    i += 2;
                    continue;
                }
                i += 1;
            }
            Some(BACKTICK) => {
                cells[i].class = SyntaxClass::String2;
                if cells[i].codepoint == '`' {
                    stack.pop();
                }
                i += 1;
            }
            Some(SUBSHELL) => {
                let c = cells[i].codepoint;
                if c == ')' {
                    stack.pop();
                    i += 1;
                    continue;
                }
                if c == '\'' {
                    stack.push(SINGLE);
                    i += 1;
                    continue;
                }
                if c == '"' {
                    stack.push(DOUBLE);
                    i += 1;
                    continue;
                }
                i += 1;
            }
            None => {
                let c = cells[i].codepoint;
                if c == '#' {
                    paint_class(cells, i, cells.len() - i, SyntaxClass::Comment);
                    return encode(&stack);
                }
                if c == '\'' {
                    stack.push(SINGLE);
                    cells[i].class = SyntaxClass::String;
                    i += 1;
                    continue;
                }
                if c == '"' {
                    stack.push(DOUBLE);
                    cells[i].class = SyntaxClass::String;
                    i += 1;
                    continue;
                }
                if c == '`' {
                    stack.push(BACKTICK);
                    cells[i].class = SyntaxClass::String2;
                    i += 1;
                    continue;
                }
                if c == '$' && cells.get(i + 1).map(|c| c.codepoint) == Some('(') {
                    stack.push(SUBSHELL);
                    i += 2;
                    continue;
                }
                if let Some(len) = match_keyword(cells, i, KEYWORDS) {
                    paint_class(cells, i, len, SyntaxClass::Keyword);
                    i += len;
                    continue;
                }
                i += 1;
            }
        }
    }
    encode(&stack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::Line;

    #[test]
    fn single_quote_spans_lines() {
        let mut l1 = Line::from_str("echo 'start of");
        let s1 = highlight(l1.cells_mut(), 0);
        assert_eq!(s1, 1);
        let mut l2 = Line::from_str("a multi-line string'");
        let s2 = highlight(l2.cells_mut(), s1);
        assert_eq!(s2, 0);
    }

    #[test]
    fn nested_subshell_in_double_quote() {
        let mut l = Line::from_str(r#"x="$(echo hi)""#);
        let s = highlight(l.cells_mut(), 0);
        assert_eq!(s, 0);
    }

    #[test]
    fn keyword_paints() {
        let mut l = Line::from_str("if true; then");
        highlight(l.cells_mut(), 0);
        assert_eq!(l.cells()[0].class, SyntaxClass::Keyword);
    }
}

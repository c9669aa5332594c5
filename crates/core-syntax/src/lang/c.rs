//! C/C++ lexer. `istate` is a plain on/off flag: `0` clean, `1` inside a
//! `/* */` block comment (no nesting, matching plain C semantics; compare
//! [`crate::lang::rust`], which nests).

use core_text::{Cell, SyntaxClass};

use crate::primitives::{
    match_keyword, paint_c_char, paint_c_comment, paint_c_comment_continuation, paint_c_numeral,
    paint_c_string,
};
use crate::Syntax;

const KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "case", "default", "break", "continue",
    "return", "goto", "sizeof", "typedef", "struct", "union", "enum", "static", "const",
    "volatile", "extern", "inline", "void", "char", "short", "int", "long", "float", "double",
    "signed", "unsigned", "auto", "register",
];

const PRAGMAS: &[&str] = &["#include", "#define", "#ifdef", "#ifndef", "#endif", "#if", "#else", "#pragma"];

pub struct CSyntax;

impl Syntax for CSyntax {
    fn name(&self) -> &'static str {
        "c"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["c", "h", "cc", "cpp", "cxx", "hpp"]
    }

    fn prefers_spaces(&self) -> bool {
        false
    }

    fn highlight_line(&self, cells: &mut [Cell], istate: i32) -> i32 {
        highlight(cells, istate)
    }
}

pub(crate) fn highlight(cells: &mut [Cell], istate: i32) -> i32 {
    let mut i = 0;
    let mut state = istate;

    if state == 1 {
        let (len, finished) = paint_c_comment_continuation(cells);
        i = len;
        state = if finished { 0 } else { 1 };
        if i >= cells.len() {
            return state;
        }
    }

    while i < cells.len() {
        let c = cells[i].codepoint;
        if c == '/' && cells.get(i + 1).map(|c| c.codepoint) == Some('/') {
            crate::primitives::paint_class(cells, i, cells.len() - i, SyntaxClass::Comment);
            return 0;
        }
        if let Some((len, finished)) = paint_c_comment(cells, i) {
            i += len;
            state = if finished { 0 } else { 1 };
            continue;
        }
        if i == 0 && c == '#' {
            if let Some(len) = match_keyword(cells, i, PRAGMAS) {
                crate::primitives::paint_class(cells, i, len, SyntaxClass::Pragma);
                i += len;
                continue;
            }
        }
        if let Some(len) = paint_c_string(cells, i) {
            i += len;
            continue;
        }
        if let Some(len) = paint_c_char(cells, i) {
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
            crate::primitives::paint_class(cells, i, len, SyntaxClass::Keyword);
            i += len;
            continue;
        }
        i += 1;
    }
    state
}

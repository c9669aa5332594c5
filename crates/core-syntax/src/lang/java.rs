//! Java lexer. Shares the C family's flat on/off block-comment flag
//! (`istate`: `0` clean, `1` inside `/* */`); see [`crate::lang::c`].

use core_text::{Cell, SyntaxClass};

use crate::primitives::{
    match_keyword, paint_c_char, paint_c_comment, paint_c_comment_continuation, paint_c_numeral,
    paint_c_string, paint_class,
};
use crate::Syntax;

const KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while", "true", "false", "null",
];

pub struct JavaSyntax;

impl Syntax for JavaSyntax {
    fn name(&self) -> &'static str {
        "java"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["java"]
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
        if c == '@' {
            let mut j = i + 1;
            while cells.get(j).is_some_and(|c| c.codepoint.is_alphanumeric()) {
                j += 1;
            }
            paint_class(cells, i, j - i, SyntaxClass::Pragma);
            i = j;
            continue;
        }
        if c == '/' && cells.get(i + 1).map(|c| c.codepoint) == Some('/') {
            paint_class(cells, i, cells.len() - i, SyntaxClass::Comment);
            return 0;
        }
        if let Some((len, finished)) = paint_c_comment(cells, i) {
            i += len;
            state = if finished { 0 } else { 1 };
            continue;
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
            paint_class(cells, i, len, SyntaxClass::Keyword);
            i += len;
            continue;
        }
        i += 1;
    }
    state
}

//! Markdown lexer. Composes the other per-language lexers for fenced code
//! blocks via a `nest(lang, base)` trampoline: entering a fence maps
//! `istate` into the inner language's disjoint state range, and every
//! re-entry subtracts the base before calling the inner lexer and adds it
//! back before returning. This is the engine's only multi-language
//! composition (spec §4.3).
//!
//! State-base table (must stay exactly as given): `{c:2, py:5, java:8,
//! json:10, xml:11, make:16, diff:17, rust:18}`.

use core_text::{Cell, SyntaxClass};

use crate::lang::{c, diff, java, json, make, python, rust, xml};
use crate::primitives::paint_class;
use crate::Syntax;

const CLEAN: i32 = 0;
const FENCE_PLAIN: i32 = 1;
const C_BASE: i32 = 2;
const PY_BASE: i32 = 5;
const JAVA_BASE: i32 = 8;
const JSON_BASE: i32 = 10;
const XML_BASE: i32 = 11;
const MAKE_BASE: i32 = 16;
const DIFF_BASE: i32 = 17;
const RUST_BASE: i32 = 18;

pub struct MarkdownSyntax;

impl Syntax for MarkdownSyntax {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["md", "markdown"]
    }

    fn prefers_spaces(&self) -> bool {
        true
    }

    fn highlight_line(&self, cells: &mut [Cell], istate: i32) -> i32 {
        highlight(cells, istate)
    }
}

fn json_inner(cells: &mut [Cell], _state: i32) -> i32 {
    json::highlight(cells)
}

fn make_inner(cells: &mut [Cell], _state: i32) -> i32 {
    make::highlight(cells)
}

fn diff_inner(cells: &mut [Cell], _state: i32) -> i32 {
    diff::highlight(cells)
}

/// Resolve the base + inner highlighter for a fence-open language tag.
fn fence_lang(tag: &str) -> Option<(i32, fn(&mut [Cell], i32) -> i32)> {
    match tag {
        "c" | "h" | "cpp" | "c++" => Some((C_BASE, c::highlight)),
        "py" | "python" => Some((PY_BASE, python::highlight)),
        "java" => Some((JAVA_BASE, java::highlight)),
        "json" => Some((JSON_BASE, json_inner)),
        "xml" | "html" => Some((XML_BASE, xml::highlight)),
        "make" | "makefile" => Some((MAKE_BASE, make_inner)),
        "diff" | "patch" => Some((DIFF_BASE, diff_inner)),
        "rust" | "rs" => Some((RUST_BASE, rust::highlight)),
        _ => None,
    }
}

/// Resolve the base + inner highlighter that owns a given absolute
/// `istate`, by finding the largest base not exceeding it. Each
/// language's own state range is known to fit below the next base (see
/// each `lang/*.rs` module doc comment).
fn resolve(state: i32) -> (i32, fn(&mut [Cell], i32) -> i32) {
    if state >= RUST_BASE {
        (RUST_BASE, rust::highlight)
    } else if state >= DIFF_BASE {
        (DIFF_BASE, diff_inner)
    } else if state >= MAKE_BASE {
        (MAKE_BASE, make_inner)
    } else if state >= XML_BASE {
        (XML_BASE, xml::highlight)
    } else if state >= JSON_BASE {
        (JSON_BASE, json_inner)
    } else if state >= JAVA_BASE {
        (JAVA_BASE, java::highlight)
    } else if state >= PY_BASE {
        (PY_BASE, python::highlight)
    } else {
        (C_BASE, c::highlight)
    }
}

/// `nest`: translate an absolute markdown `istate` into the inner
/// language's own state space, call it, and translate the result back.
fn nest(cells: &mut [Cell], istate: i32) -> i32 {
    let (base, inner) = resolve(istate);
    base + inner(cells, istate - base)
}

/// A line consisting of (optionally indented) ``` ``` `` followed by an
/// optional language tag. Returns the tag (possibly empty).
fn fence_tag(cells: &[Cell]) -> Option<String> {
    let mut i = 0;
    while cells.get(i).map(|c| c.codepoint) == Some(' ') && i < 3 {
        i += 1;
    }
    for _ in 0..3 {
        if cells.get(i).map(|c| c.codepoint) != Some('`') {
            return None;
        }
        i += 1;
    }
    let tag: String = cells[i..].iter().map(|c| c.codepoint).collect();
    Some(tag.trim().to_lowercase())
}

pub(crate) fn highlight(cells: &mut [Cell], istate: i32) -> i32 {
    if istate != CLEAN {
        if let Some(tag) = fence_tag(cells) {
            if tag.is_empty() {
                paint_class(cells, 0, cells.len(), SyntaxClass::Notice);
                return CLEAN;
            }
        }
        if istate == FENCE_PLAIN {
            return FENCE_PLAIN;
        }
        return nest(cells, istate);
    }

    if let Some(tag) = fence_tag(cells) {
        paint_class(cells, 0, cells.len(), SyntaxClass::Notice);
        return match fence_lang(&tag) {
            Some((base, _)) => base,
            None => FENCE_PLAIN,
        };
    }

    highlight_inline(cells);
    CLEAN
}

fn highlight_inline(cells: &mut [Cell]) {
    let heading_level = cells.iter().take_while(|c| c.codepoint == '#').count();
    if heading_level > 0 && heading_level <= 6 && cells.get(heading_level).map(|c| c.codepoint) == Some(' ')
    {
        paint_class(cells, 0, cells.len(), SyntaxClass::Bold);
        return;
    }
    if cells.first().map(|c| c.codepoint) == Some('>') {
        paint_class(cells, 0, cells.len(), SyntaxClass::Comment);
        return;
    }

    let mut i = 0;
    while i < cells.len() {
        let c = cells[i].codepoint;
        if c == '`' {
            let mut j = i + 1;
            while j < cells.len() && cells[j].codepoint != '`' {
                j += 1;
            }
            if j < cells.len() {
                j += 1;
            }
            paint_class(cells, i, j - i, SyntaxClass::String);
            i = j;
            continue;
        }
        if c == '*' && cells.get(i + 1).map(|c| c.codepoint) == Some('*') {
            if let Some(end) = find_close(cells, i + 2, "**") {
                paint_class(cells, i, end + 2 - i, SyntaxClass::Bold);
                i = end + 2;
                continue;
            }
        }
        if c == '[' {
            if let Some(close_bracket) = find_char(cells, i + 1, ']') {
                if cells.get(close_bracket + 1).map(|c| c.codepoint) == Some('(') {
                    if let Some(close_paren) = find_char(cells, close_bracket + 2, ')') {
                        paint_class(cells, i, close_paren + 1 - i, SyntaxClass::Link);
                        i = close_paren + 1;
                        continue;
                    }
                }
            }
        }
        i += 1;
    }
}

fn find_char(cells: &[Cell], from: usize, target: char) -> Option<usize> {
    (from..cells.len()).find(|&j| cells[j].codepoint == target)
}

fn find_close(cells: &[Cell], from: usize, marker: &str) -> Option<usize> {
    let marker_len = marker.chars().count();
    let mut j = from;
    while j + marker_len <= cells.len() {
        if marker
            .chars()
            .enumerate()
            .all(|(k, c)| cells[j + k].codepoint == c)
        {
            return Some(j);
        }
        j += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::Line;

    #[test]
    fn fenced_c_block_nests_and_closes() {
        let mut open = Line::from_str("```c");
        let s1 = highlight(open.cells_mut(), CLEAN);
        assert_eq!(s1, C_BASE);

        let mut body = Line::from_str("int x; /* unterminated");
        let s2 = highlight(body.cells_mut(), s1);
        // inner C state 1 (unterminated comment) lands at base + 1
        assert_eq!(s2, C_BASE + 1);
        assert_eq!(body.cells()[0].class, SyntaxClass::Keyword);

        let mut close = Line::from_str("```");
        let s3 = highlight(close.cells_mut(), s2);
        assert_eq!(s3, CLEAN);
    }

    #[test]
    fn heading_and_inline_code() {
        let mut h = Line::from_str("# Title");
        highlight(h.cells_mut(), CLEAN);
        assert_eq!(h.cells()[0].class, SyntaxClass::Bold);

        let mut l = Line::from_str("see `code` here");
        highlight(l.cells_mut(), CLEAN);
        let tick = l.to_text().find('`').unwrap();
        assert_eq!(l.cells()[tick].class, SyntaxClass::String);
    }

    #[test]
    fn link_syntax() {
        let mut l = Line::from_str("a [link](http://example.com) here");
        highlight(l.cells_mut(), CLEAN);
        assert_eq!(l.cells()[2].class, SyntaxClass::Link);
    }
}

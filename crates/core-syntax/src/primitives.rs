//! Small, directly-called painting primitives shared by every per-language
//! lexer (spec §4.3).

use core_text::{Cell, SyntaxClass};

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// If `cells[i..]` begins a full match of one of `keywords`, bounded by a
/// non-word character on both sides, return how many cells it spans.
/// Does not paint; callers combine this with [`paint_class`].
pub fn match_keyword(cells: &[Cell], i: usize, keywords: &[&str]) -> Option<usize> {
    if i > 0 && is_word_char(cells[i - 1].codepoint) {
        return None;
    }
    for kw in keywords {
        let kw_len = kw.chars().count();
        if i + kw_len > cells.len() {
            continue;
        }
        let matches = kw
            .chars()
            .enumerate()
            .all(|(k, c)| cells[i + k].codepoint == c);
        if !matches {
            continue;
        }
        let next_is_word = cells
            .get(i + kw_len)
            .map(|c| is_word_char(c.codepoint))
            .unwrap_or(false);
        if !next_is_word {
            return Some(kw_len);
        }
    }
    None
}

/// Paint `len` cells starting at `i` with `class`.
pub fn paint_class(cells: &mut [Cell], i: usize, len: usize, class: SyntaxClass) {
    for cell in &mut cells[i..(i + len).min(cells.len())] {
        cell.class = class;
    }
}

/// A string delimited by `quote` with no escape handling at all (shell
/// single-quoted strings, simple markup quoting). Unterminated at EOL just
/// paints to the end of the line. Returns the number of cells consumed, if
/// `cells[i]` is the opening quote.
pub fn paint_simple_string(cells: &mut [Cell], i: usize, quote: char) -> Option<usize> {
    if cells.get(i)?.codepoint != quote {
        return None;
    }
    let mut j = i + 1;
    while j < cells.len() {
        if cells[j].codepoint == quote {
            j += 1;
            break;
        }
        j += 1;
    }
    let len = j - i;
    paint_class(cells, i, len, SyntaxClass::String);
    Some(len)
}

/// A C-family double-quoted string: `\xHH`, `\NNN`, `\n`, `\r`, `\\`, and a
/// bare `\<anything>` are painted in the escape class; everything else in
/// the string class. Unterminated at EOL paints to EOL. Returns the number
/// of cells consumed, if `cells[i]` is `"`.
pub fn paint_c_string(cells: &mut [Cell], i: usize) -> Option<usize> {
    if cells.get(i)?.codepoint != '"' {
        return None;
    }
    cells[i].class = SyntaxClass::String;
    let mut j = i + 1;
    while j < cells.len() {
        let c = cells[j].codepoint;
        if c == '\\' {
            let esc_len = escape_len(cells, j);
            paint_class(cells, j, esc_len, SyntaxClass::Escape);
            j += esc_len;
            continue;
        }
        cells[j].class = SyntaxClass::String;
        if c == '"' {
            j += 1;
            break;
        }
        j += 1;
    }
    Some(j - i)
}

/// Length of the escape sequence starting at `cells[j]` (which must be
/// `\\`): `\xHH` (up to 2 hex digits), `\NNN` (up to 3 octal digits), or a
/// single escaped character.
fn escape_len(cells: &[Cell], j: usize) -> usize {
    let next = cells.get(j + 1).map(|c| c.codepoint);
    match next {
        Some('x') => {
            let mut k = j + 2;
            let mut n = 0;
            while n < 2 && cells.get(k).is_some_and(|c| c.codepoint.is_ascii_hexdigit()) {
                k += 1;
                n += 1;
            }
            k - j
        }
        Some(d) if d.is_digit(8) => {
            let mut k = j + 1;
            let mut n = 0;
            while n < 3 && cells.get(k).is_some_and(|c| c.codepoint.is_digit(8)) {
                k += 1;
                n += 1;
            }
            k - j
        }
        Some(_) => 2,
        None => 1,
    }
}

/// A single-quoted C char literal, possibly a multibyte escape
/// (`'a'`, `'\n'`, `'\x41'`). Returns the number of cells consumed, if
/// `cells[i]` is `'`.
pub fn paint_c_char(cells: &mut [Cell], i: usize) -> Option<usize> {
    if cells.get(i)?.codepoint != '\'' {
        return None;
    }
    let mut j = i + 1;
    if cells.get(j).map(|c| c.codepoint) == Some('\\') {
        let esc_len = escape_len(cells, j);
        j += esc_len;
    } else if j < cells.len() {
        j += 1;
    }
    if cells.get(j).map(|c| c.codepoint) == Some('\'') {
        j += 1;
    }
    let len = j - i;
    paint_class(cells, i, len, SyntaxClass::String2);
    Some(len)
}

/// A `/* ... */` block comment starting at `cells[i]` (which must be
/// `/*`). Runs until `*/` or EOL. Returns `(len, finished)`; `finished` is
/// false if the comment ran off the end of the line (caller should set
/// continuation state to `1`, or increment nesting depth for Rust).
pub fn paint_c_comment(cells: &mut [Cell], i: usize) -> Option<(usize, bool)> {
    if cells.get(i).map(|c| c.codepoint) != Some('/') || cells.get(i + 1).map(|c| c.codepoint) != Some('*')
    {
        return None;
    }
    let (len, finished) = scan_comment_body(cells, i);
    paint_class(cells, i, len, SyntaxClass::Comment);
    Some((len, finished))
}

/// Continue painting a block comment already in progress from column 0.
/// Returns `(len, finished)`.
pub fn paint_c_comment_continuation(cells: &mut [Cell]) -> (usize, bool) {
    let (len, finished) = scan_comment_body(cells, 0);
    paint_class(cells, 0, len, SyntaxClass::Comment);
    (len, finished)
}

fn scan_comment_body(cells: &[Cell], i: usize) -> (usize, bool) {
    let mut j = i;
    while j < cells.len() {
        if cells[j].codepoint == '*' && cells.get(j + 1).map(|c| c.codepoint) == Some('/') {
            return (j + 2 - i, true);
        }
        j += 1;
    }
    (cells.len() - i, false)
}

/// A numeral at `cells[i]`: hex (`0x...`), octal (`0...`), or decimal with
/// an optional fractional part and a `[fFuUlL]*` suffix. Returns the
/// number of cells consumed, if `cells[i]` is an ASCII digit.
pub fn paint_c_numeral(cells: &mut [Cell], i: usize) -> Option<usize> {
    if !cells.get(i)?.codepoint.is_ascii_digit() {
        return None;
    }
    let mut j = i + 1;
    if cells[i].codepoint == '0' && cells.get(j).map(|c| c.codepoint) == Some('x') {
        j += 1;
        while cells.get(j).is_some_and(|c| c.codepoint.is_ascii_hexdigit()) {
            j += 1;
        }
    } else {
        while cells.get(j).is_some_and(|c| c.codepoint.is_ascii_digit()) {
            j += 1;
        }
        if cells.get(j).map(|c| c.codepoint) == Some('.') {
            j += 1;
            while cells.get(j).is_some_and(|c| c.codepoint.is_ascii_digit()) {
                j += 1;
            }
        }
    }
    while cells
        .get(j)
        .is_some_and(|c| matches!(c.codepoint, 'f' | 'F' | 'u' | 'U' | 'l' | 'L'))
    {
        j += 1;
    }
    let len = j - i;
    paint_class(cells, i, len, SyntaxClass::Numeral);
    Some(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::Line;

    fn cells_of(s: &str) -> Vec<Cell> {
        Line::from_str(s).cells().to_vec()
    }

    #[test]
    fn match_keyword_respects_boundaries() {
        let cells = cells_of("return returning");
        assert_eq!(match_keyword(&cells, 0, &["return"]), Some(6));
        assert_eq!(match_keyword(&cells, 7, &["return"]), None);
    }

    #[test]
    fn c_string_paints_escapes_distinctly() {
        let mut cells = cells_of(r#""a\nb""#);
        let len = paint_c_string(&mut cells, 0).unwrap();
        assert_eq!(len, 6);
        assert_eq!(cells[2].class, SyntaxClass::Escape);
        assert_eq!(cells[3].class, SyntaxClass::Escape);
        assert_eq!(cells[1].class, SyntaxClass::String);
    }

    #[test]
    fn c_comment_unterminated_reports_not_finished() {
        let mut cells = cells_of("/* hanging");
        let (len, finished) = paint_c_comment(&mut cells, 0).unwrap();
        assert_eq!(len, cells.len());
        assert!(!finished);
    }

    #[test]
    fn numeral_hex_and_suffix() {
        let mut cells = cells_of("0xFFu");
        assert_eq!(paint_c_numeral(&mut cells, 0), Some(5));
        let mut cells2 = cells_of("3.14f");
        assert_eq!(paint_c_numeral(&mut cells2, 0), Some(5));
    }
}

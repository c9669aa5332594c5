//! Paste semantics for the process-global yank register (spec §4.7):
//! a line-yank splices whole lines in; a range-yank splices character
//! cells into the current line (or across lines, for a multi-line
//! visual yank).

use core_state::{Buffer, Yank};

pub fn paste_after(buffer: &mut Buffer, yank: &Yank) {
    match yank {
        Yank::Lines(lines) => paste_lines(buffer, buffer.line_no, lines),
        Yank::Range(lines) => paste_range(buffer, buffer.col_no, lines),
    }
}

pub fn paste_before(buffer: &mut Buffer, yank: &Yank) {
    match yank {
        Yank::Lines(lines) => paste_lines(buffer, buffer.line_no - 1, lines),
        Yank::Range(lines) => paste_range(buffer, buffer.col_no.saturating_sub(1).max(1), lines),
    }
}

/// Insert whole lines starting immediately after 0-based index `at`.
fn paste_lines(buffer: &mut Buffer, at: usize, lines: &[core_text::Line]) {
    for (i, line) in lines.iter().enumerate() {
        buffer.add_line(at + i);
        buffer.replace_line(at + i, line);
    }
    buffer.line_no = at + 1;
    buffer.col_no = 1;
}

/// Splice a sub-line yank into the current line at 1-based column `at`
/// (the cell offset is `at - 1` cursor-relative, i.e. one past the
/// character the column number names).
fn paste_range(buffer: &mut Buffer, at: usize, lines: &[core_text::Line]) {
    let line_idx = buffer.line_no - 1;
    let col = at.saturating_sub(1);
    let Some(first) = lines.first() else { return };

    if lines.len() == 1 {
        for (i, cell) in first.cells().iter().enumerate() {
            buffer.insert(line_idx, col + i, cell.codepoint);
        }
        buffer.col_no = col + first.len();
        return;
    }

    buffer.split_line(line_idx, col);
    for (i, cell) in first.cells().iter().enumerate() {
        buffer.insert(line_idx, col + i, cell.codepoint);
    }
    for (i, line) in lines[1..].iter().enumerate() {
        buffer.add_line(line_idx + 1 + i);
        buffer.replace_line(line_idx + 1 + i, line);
    }
    buffer.line_no = line_idx + lines.len();
    buffer.col_no = 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::Line;

    #[test]
    fn paste_after_lines_inserts_below_cursor() {
        let mut buffer = Buffer::new();
        for (i, cp) in "first".chars().enumerate() {
            buffer.insert(0, i, cp);
        }
        let yank = Yank::Lines(vec![Line::from_str("second")]);
        paste_after(&mut buffer, &yank);
        assert_eq!(buffer.line_count(), 2);
        assert_eq!(buffer.lines.get(1).unwrap().to_text(), "second");
        assert_eq!(buffer.line_no, 2);
    }

    #[test]
    fn paste_before_lines_inserts_above_cursor() {
        let mut buffer = Buffer::new();
        for (i, cp) in "first".chars().enumerate() {
            buffer.insert(0, i, cp);
        }
        let yank = Yank::Lines(vec![Line::from_str("zero")]);
        paste_before(&mut buffer, &yank);
        assert_eq!(buffer.lines.get(0).unwrap().to_text(), "zero");
        assert_eq!(buffer.lines.get(1).unwrap().to_text(), "first");
    }

    #[test]
    fn paste_after_range_splices_into_current_line() {
        let mut buffer = Buffer::new();
        for (i, cp) in "ac".chars().enumerate() {
            buffer.insert(0, i, cp);
        }
        buffer.col_no = 1;
        let yank = Yank::Range(vec![Line::from_str("b")]);
        paste_after(&mut buffer, &yank);
        assert_eq!(buffer.current_line().to_text(), "abc");
    }
}

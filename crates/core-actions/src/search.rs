//! Incremental search (spec §4.8): smart-case substring search with a
//! live `SEARCH`-flag highlight over every match in the buffer.

use core_state::Buffer;
use core_text::CellFlags;

/// Vim-style smart case: any uppercase letter in the needle makes the
/// search case-sensitive; an all-lowercase needle matches case-insensitively.
fn smart_case_eq(a: char, b: char, sensitive: bool) -> bool {
    if sensitive {
        a == b
    } else {
        a.to_lowercase().eq(b.to_lowercase())
    }
}

fn is_sensitive(needle: &[char]) -> bool {
    needle.iter().any(|c| c.is_uppercase())
}

fn line_text(buffer: &Buffer, idx: usize) -> Vec<char> {
    buffer
        .lines
        .get(idx)
        .map(|l| l.cells().iter().map(|c| c.codepoint).collect())
        .unwrap_or_default()
}

fn match_at(hay: &[char], needle: &[char], start: usize, sensitive: bool) -> bool {
    if start + needle.len() > hay.len() {
        return false;
    }
    hay[start..start + needle.len()]
        .iter()
        .zip(needle)
        .all(|(a, b)| smart_case_eq(*a, *b, sensitive))
}

/// Search forward from just after the cursor, wrapping to the top of
/// the buffer. Returns the 1-based `(line, col)` of the match start.
pub fn find_forward(buffer: &Buffer, needle: &[char]) -> Option<(usize, usize)> {
    if needle.is_empty() {
        return None;
    }
    let sensitive = is_sensitive(needle);
    let total = buffer.line_count();
    let start_line = buffer.line_no - 1;
    let start_col = buffer.col_no; // search strictly after the cursor

    for offset in 0..=total {
        let li = (start_line + offset) % total;
        let hay = line_text(buffer, li);
        let from = if offset == 0 { start_col } else { 0 };
        for col in from..hay.len() {
            if match_at(&hay, needle, col, sensitive) {
                return Some((li + 1, col + 1));
            }
        }
    }
    None
}

/// Search backward from just before the cursor, wrapping to the end of
/// the buffer.
pub fn find_backward(buffer: &Buffer, needle: &[char]) -> Option<(usize, usize)> {
    if needle.is_empty() {
        return None;
    }
    let sensitive = is_sensitive(needle);
    let total = buffer.line_count();
    let start_line = buffer.line_no - 1;
    let start_col = buffer.col_no.saturating_sub(1);

    for offset in 0..=total {
        let li = (start_line + total - offset) % total;
        let hay = line_text(buffer, li);
        let upper = if offset == 0 { start_col.min(hay.len()) } else { hay.len() };
        for col in (0..upper).rev() {
            if match_at(&hay, needle, col, sensitive) {
                return Some((li + 1, col + 1));
            }
        }
    }
    None
}

/// Paint `SEARCH` flags onto every match of `needle` across the whole
/// buffer (called whenever the needle changes, per spec's live-highlight
/// behavior).
pub fn mark_matches(buffer: &mut Buffer, needle: &[char]) {
    clear_matches(buffer);
    if needle.is_empty() {
        return;
    }
    let sensitive = is_sensitive(needle);
    let total = buffer.line_count();
    for li in 0..total {
        let hay = line_text(buffer, li);
        let mut col = 0;
        while col < hay.len() {
            if match_at(&hay, needle, col, sensitive) {
                if let Some(l) = buffer.lines.get_mut(li) {
                    for cell in l.cells_mut()[col..col + needle.len()].iter_mut() {
                        cell.flags.insert(CellFlags::SEARCH);
                    }
                }
                col += needle.len();
            } else {
                col += 1;
            }
        }
    }
}

pub fn clear_matches(buffer: &mut Buffer) {
    for idx in 0..buffer.line_count() {
        if let Some(l) = buffer.lines.get_mut(idx) {
            for cell in l.cells_mut() {
                cell.flags.remove(CellFlags::SEARCH);
            }
        }
    }
}

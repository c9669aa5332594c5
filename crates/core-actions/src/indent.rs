//! Tab/Shift-Tab indent and unindent over a line range (spec §4.7,
//! LINE_SELECTION mode).

use core_state::Buffer;

/// Insert one indent unit (a tab, or `tabstop` spaces if `use_spaces`)
/// at the start of every line in the 1-based inclusive range.
pub fn indent_range(buffer: &mut Buffer, from_line: usize, to_line: usize) {
    let (lo, hi) = (from_line.min(to_line), from_line.max(to_line));
    for line in lo..=hi {
        let idx = line - 1;
        if buffer.use_spaces {
            for i in 0..buffer.tabstop as usize {
                buffer.insert(idx, i, ' ');
            }
        } else {
            buffer.insert(idx, 0, '\t');
        }
    }
}

/// Remove up to one indent unit from the start of every line in the
/// 1-based inclusive range: a leading tab, or up to `tabstop` leading
/// spaces, whichever the line actually starts with.
pub fn unindent_range(buffer: &mut Buffer, from_line: usize, to_line: usize) {
    let (lo, hi) = (from_line.min(to_line), from_line.max(to_line));
    for line in lo..=hi {
        let idx = line - 1;
        let Some(l) = buffer.lines.get(idx) else { continue };
        if l.is_empty() {
            continue;
        }
        if l.cell(0).map(|c| c.codepoint) == Some('\t') {
            buffer.delete(idx, 1);
            continue;
        }
        let mut removed = 0usize;
        while removed < buffer.tabstop as usize {
            let Some(l) = buffer.lines.get(idx) else { break };
            if l.cell(0).map(|c| c.codepoint) != Some(' ') {
                break;
            }
            buffer.delete(idx, 1);
            removed += 1;
        }
    }
}

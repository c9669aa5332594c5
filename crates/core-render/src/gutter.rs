//! The one-column revision-status bar and the line-number field next to
//! it (spec §4.5).

use core_text::RevStatus;

pub const GUTTER_WIDTH: u16 = 1;

/// SGR background for the gutter cell's `rev_status` (spec §6: green
/// added, blue modified, red deletion-above bar, combined red+blue when
/// a deletion and modification meet on the same line).
pub fn gutter_sgr(status: RevStatus) -> &'static str {
    match status {
        RevStatus::Unchanged => "",
        RevStatus::Added => "\x1b[42m",
        RevStatus::ModifiedUnsaved | RevStatus::ModifiedCommitted => "\x1b[44m",
        RevStatus::DeletedAbove => "\x1b[41m",
        RevStatus::ModifiedAndDeletedAbove => "\x1b[41;44m",
    }
}

/// Width of the right-aligned line-number field: `max(2, ceil(log10(n)) + 1)`.
pub fn line_number_width(line_count: usize) -> usize {
    let n = line_count.max(1) as f64;
    let digits = n.log10().ceil() as usize;
    (digits + 1).max(2)
}

/// Format a 1-based line number into a right-aligned field of the given
/// width, or blank if this screen row has no corresponding buffer line.
pub fn format_line_number(line_no: Option<usize>, width: usize) -> String {
    match line_no {
        Some(n) => format!("{n:>width$}"),
        None => " ".repeat(width),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_grows_with_line_count() {
        assert_eq!(line_number_width(1), 2);
        assert_eq!(line_number_width(9), 2);
        assert_eq!(line_number_width(10), 2);
        assert_eq!(line_number_width(11), 3);
        assert_eq!(line_number_width(100), 3);
    }

    #[test]
    fn format_pads_to_width() {
        assert_eq!(format_line_number(Some(7), 3), "  7");
        assert_eq!(format_line_number(None, 3), "   ");
    }

    #[test]
    fn deleted_and_modified_combine() {
        assert_eq!(gutter_sgr(RevStatus::ModifiedAndDeletedAbove), "\x1b[41;44m");
    }
}

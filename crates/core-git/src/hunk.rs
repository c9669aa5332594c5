//! Parsing of unified-diff `@@` hunk headers and translating them into
//! per-line `rev_status` annotations (spec §6 git adapter).

use core_text::{LineStore, RevStatus};

/// One `@@ -from[,fromCount] +to[,toCount] @@` header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hunk {
    pub from_start: usize,
    pub from_count: usize,
    pub to_start: usize,
    pub to_count: usize,
}

/// Parse every `@@` header out of a `git diff -U0` body; non-header lines
/// (the actual `+`/`-` content, which `-U0` keeps minimal) are ignored.
pub fn parse_hunks(diff: &str) -> Vec<Hunk> {
    diff.lines().filter_map(parse_header).collect()
}

fn parse_header(line: &str) -> Option<Hunk> {
    let rest = line.strip_prefix("@@ -")?;
    let (from_part, rest) = rest.split_once(' ')?;
    let rest = rest.strip_prefix('+')?;
    let to_part = rest.split(" @@").next()?;
    let (from_start, from_count) = parse_range(from_part);
    let (to_start, to_count) = parse_range(to_part);
    Some(Hunk {
        from_start,
        from_count,
        to_start,
        to_count,
    })
}

fn parse_range(s: &str) -> (usize, usize) {
    match s.split_once(',') {
        Some((a, b)) => (a.parse().unwrap_or(0), b.parse().unwrap_or(0)),
        None => (s.parse().unwrap_or(0), 1),
    }
}

/// Paint `rev_status` onto `lines` for each hunk: green added, blue
/// modified, a deletion bar above the next line, or the combined
/// red+blue status when a deletion and a modification meet at the same
/// line (spec §6).
pub fn annotate(lines: &mut LineStore, hunks: &[Hunk]) {
    for h in hunks {
        if h.to_count == 0 {
            mark_deleted_above(lines, h.to_start);
            continue;
        }
        let status = if h.from_count == 0 {
            RevStatus::Added
        } else {
            RevStatus::ModifiedCommitted
        };
        for i in 0..h.to_count {
            if let Some(line) = lines.get_mut(h.to_start - 1 + i) {
                line.rev_status = status;
            }
        }
        if h.from_count > h.to_count {
            // The deletion lands right after the last modified line, so
            // the two statuses combine on that same line rather than the
            // next one.
            mark_deleted_above(lines, h.to_start + h.to_count - 2);
        }
    }
}

fn mark_deleted_above(lines: &mut LineStore, to_start: usize) {
    if let Some(line) = lines.get_mut(to_start) {
        line.rev_status = match line.rev_status {
            RevStatus::Added | RevStatus::ModifiedCommitted => RevStatus::ModifiedAndDeletedAbove,
            _ => RevStatus::DeletedAbove,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::Cell;

    fn store_of(n: usize) -> LineStore {
        let mut s = LineStore::new();
        for i in 1..n {
            s.add_line(i);
        }
        for i in 0..n {
            s.get_mut(i).unwrap().insert(0, Cell::new('x'));
        }
        s
    }

    #[test]
    fn parses_addition_and_modification_headers() {
        let diff = "@@ -1,0 +2,3 @@\n@@ -10,2 +12,2 @@\n";
        let hunks = parse_hunks(diff);
        assert_eq!(hunks.len(), 2);
        assert_eq!(hunks[0], Hunk { from_start: 1, from_count: 0, to_start: 2, to_count: 3 });
        assert_eq!(hunks[1], Hunk { from_start: 10, from_count: 2, to_start: 12, to_count: 2 });
    }

    #[test]
    fn annotate_paints_added_and_modified() {
        let mut store = store_of(5);
        let hunks = vec![
            Hunk { from_start: 1, from_count: 0, to_start: 1, to_count: 2 },
            Hunk { from_start: 5, from_count: 1, to_start: 4, to_count: 1 },
        ];
        annotate(&mut store, &hunks);
        assert_eq!(store.get(0).unwrap().rev_status, RevStatus::Added);
        assert_eq!(store.get(1).unwrap().rev_status, RevStatus::Added);
        assert_eq!(store.get(3).unwrap().rev_status, RevStatus::ModifiedCommitted);
    }

    #[test]
    fn deletion_only_hunk_marks_next_line() {
        let mut store = store_of(5);
        let hunks = vec![Hunk { from_start: 3, from_count: 2, to_start: 2, to_count: 0 }];
        annotate(&mut store, &hunks);
        assert_eq!(store.get(2).unwrap().rev_status, RevStatus::DeletedAbove);
    }

    #[test]
    fn combined_modification_and_deletion() {
        let mut store = store_of(5);
        let hunks = vec![Hunk { from_start: 1, from_count: 3, to_start: 1, to_count: 1 }];
        annotate(&mut store, &hunks);
        assert_eq!(store.get(0).unwrap().rev_status, RevStatus::ModifiedAndDeletedAbove);
    }
}

//! The cascade rule (spec §4.3): after recomputing a line, if the
//! terminal state differs from the next line's cached `istate`, write the
//! new state and recompute that line too. Implemented iteratively; the
//! spec's recursion is bounded by line count, which an iterative walk
//! respects without risking stack depth.

use core_text::LineStore;

use crate::Syntax;

/// Recompute highlighting starting at line `from`, cascading forward for
/// as long as the inherited state keeps changing. Returns the indices of
/// every line actually touched, for renderer invalidation.
pub fn recompute(store: &mut LineStore, syntax: &dyn Syntax, from: usize) -> Vec<usize> {
    let mut touched = Vec::new();
    let mut i = from;
    let mut istate = if i == 0 {
        0
    } else {
        store.get(i - 1).map(|l| l.istate).unwrap_or(0)
    };

    while i < store.len() {
        let next_state = {
            let line = match store.get_mut(i) {
                Some(l) => l,
                None => break,
            };
            line.istate = istate;
            syntax.highlight_line(line.cells_mut(), istate)
        };
        touched.push(i);

        let differs = store
            .get(i + 1)
            .map(|next| next.istate != next_state)
            .unwrap_or(false);

        istate = next_state;
        i += 1;
        if !differs {
            break;
        }
    }
    touched
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::{Cell, LineStore};

    #[test]
    fn cascades_until_state_stabilizes() {
        let mut store = LineStore::new();
        for cp in "/* start".chars() {
            let len = store.get(0).unwrap().len();
            store.get_mut(0).unwrap().insert(len, Cell::new(cp));
        }
        store.add_line(1);
        for cp in "still going".chars() {
            let len = store.get(1).unwrap().len();
            store.get_mut(1).unwrap().insert(len, Cell::new(cp));
        }
        store.add_line(2);
        for cp in "end */ trailing".chars() {
            let len = store.get(2).unwrap().len();
            store.get_mut(2).unwrap().insert(len, Cell::new(cp));
        }
        store.add_line(3);
        for cp in "clean line".chars() {
            let len = store.get(3).unwrap().len();
            store.get_mut(3).unwrap().insert(len, Cell::new(cp));
        }

        let touched = recompute(&mut store, &crate::lang::c::CSyntax, 0);
        assert_eq!(touched, vec![0, 1, 2]);
        assert_eq!(store.get(0).unwrap().istate, 0);
        assert_eq!(store.get(1).unwrap().istate, 1);
        assert_eq!(store.get(2).unwrap().istate, 1);
        assert_eq!(store.get(3).unwrap().istate, 0);
    }

    #[test]
    fn stops_immediately_when_next_state_unchanged() {
        let mut store = LineStore::new();
        for cp in "int x = 1;".chars() {
            let len = store.get(0).unwrap().len();
            store.get_mut(0).unwrap().insert(len, Cell::new(cp));
        }
        store.add_line(1);
        let touched = recompute(&mut store, &crate::lang::c::CSyntax, 0);
        assert_eq!(touched, vec![0]);
    }
}

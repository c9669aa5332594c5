//! Wiring the git adapter (`core-git`) into a registered buffer's
//! `rev_status` (spec §6: run on open and on save).

use std::path::Path;

use core_state::Buffer;

/// Run `git diff -U0` against `path` and paint the resulting hunks onto
/// `buffer`'s lines. A failure (no repo, untracked file) just leaves the
/// buffer unannotated; it is not a user-visible error.
pub fn annotate_from_head(buffer: &mut Buffer, path: &Path) {
    let diff = match core_git::diff_against_head(path) {
        Ok(diff) => diff,
        Err(err) => {
            tracing::debug!(error = %err, path = %path.display(), "git diff unavailable");
            return;
        }
    };
    let hunks = core_git::parse_hunks(&diff);
    core_git::annotate(&mut buffer.lines, &hunks);
}

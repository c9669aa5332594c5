//! The git change-bar adapter (spec §1, §6): an external collaborator
//! that runs `git diff -U0` synchronously and hands back parsed hunks for
//! `rev_status` painting. Only the parsed output contract is in the core;
//! the subprocess call itself is a thin boundary.

pub mod hunk;

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};

pub use hunk::{annotate, parse_hunks, Hunk};

/// Run `git diff -U0 -- <path>` against the file's committed state and
/// return the raw diff text. Spec §5: "the only place the editor blocks
/// for external work"; read synchronously to completion.
pub fn diff_against_head(path: &Path) -> Result<String> {
    let output = Command::new("git")
        .arg("diff")
        .arg("-U0")
        .arg("--")
        .arg(path)
        .output()
        .with_context(|| format!("running git diff for {}", path.display()))?;

    if !output.status.success() {
        // Not a git repo, or the file isn't tracked: no annotation, not
        // an error the user needs to see.
        return Ok(String::new());
    }
    String::from_utf8(output.stdout).context("git diff output was not valid UTF-8")
}

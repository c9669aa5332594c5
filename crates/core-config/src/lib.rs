//! Persistent editor configuration (spec §6): the `~/.bimrc` settings
//! file, the `~/.biminfo` cursor cache, and the `@N`/SGR color grammar
//! shared by both the rc file's `theme=` key and syntax palettes.

pub mod biminfo;
pub mod rcfile;
pub mod theme;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

pub use biminfo::BimInfo;
pub use rcfile::RcFile;
pub use theme::{Color, ColorSpec};

/// Resolved paths + loaded state for one editor session's configuration.
pub struct Config {
    pub rc: RcFile,
    pub biminfo: BimInfo,
    rc_path: Option<PathBuf>,
    biminfo_path: Option<PathBuf>,
}

impl Config {
    /// Locate `~/.bimrc` and `~/.biminfo` via `dirs::home_dir()` and load
    /// whatever exists; a missing home directory or missing files yield
    /// defaults rather than an error, matching the teacher's "config is
    /// optional" stance.
    pub fn discover() -> Self {
        let Some(home) = dirs::home_dir() else {
            warn!("no home directory; using default configuration");
            return Self { rc: RcFile::default(), biminfo: BimInfo::default(), rc_path: None, biminfo_path: None };
        };
        Self::load_from(&home.join(".bimrc"), &home.join(".biminfo"))
    }

    pub fn load_from(rc_path: &Path, biminfo_path: &Path) -> Self {
        let rc = match std::fs::read_to_string(rc_path) {
            Ok(text) => RcFile::parse(&text),
            Err(_) => RcFile::default(),
        };
        let biminfo = BimInfo::load(biminfo_path).unwrap_or_else(|e| {
            warn!(error = %e, "failed to read biminfo, starting empty");
            BimInfo::default()
        });
        debug!(rc = %rc_path.display(), biminfo = %biminfo_path.display(), "configuration loaded");
        Self {
            rc,
            biminfo,
            rc_path: Some(rc_path.to_path_buf()),
            biminfo_path: Some(biminfo_path.to_path_buf()),
        }
    }

    /// Look up the cached cursor position for an absolute file path.
    pub fn cursor_for(&self, absolute_path: &str) -> Option<(usize, usize)> {
        self.biminfo.get(absolute_path)
    }

    /// Record a file's cursor position, to be persisted on `save()`.
    pub fn record_cursor(&mut self, absolute_path: impl Into<String>, line: usize, col: usize) {
        self.biminfo.set(absolute_path, line, col);
    }

    /// Write `~/.biminfo` back out, if a path was resolved at discovery
    /// time. A `Config` built without a home directory silently no-ops,
    /// since there is nowhere to write.
    pub fn save(&self) -> Result<()> {
        match &self.biminfo_path {
            Some(path) => self.biminfo.save(path).with_context(|| format!("saving {}", path.display())),
            None => Ok(()),
        }
    }

    pub fn rc_path(&self) -> Option<&Path> {
        self.rc_path.as_deref()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { rc: RcFile::default(), biminfo: BimInfo::default(), rc_path: None, biminfo_path: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_from_missing_files_yields_defaults() {
        let dir = tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join(".bimrc"), &dir.path().join(".biminfo"));
        assert_eq!(cfg.rc, RcFile::default());
        assert_eq!(cfg.cursor_for("/tmp/x.c"), None);
    }

    #[test]
    fn record_cursor_then_save_round_trips() {
        let dir = tempdir().unwrap();
        let rc_path = dir.path().join(".bimrc");
        let biminfo_path = dir.path().join(".biminfo");
        std::fs::write(&rc_path, "splitpercent=40\n").unwrap();
        let mut cfg = Config::load_from(&rc_path, &biminfo_path);
        assert_eq!(cfg.rc.splitpercent, 40);
        cfg.record_cursor("/tmp/y.c", 3, 9);
        cfg.save().unwrap();

        let reloaded = Config::load_from(&rc_path, &biminfo_path);
        assert_eq!(reloaded.cursor_for("/tmp/y.c"), Some((3, 9)));
    }

    #[test]
    fn default_config_save_is_a_no_op() {
        let cfg = Config::default();
        assert!(cfg.save().is_ok());
    }
}

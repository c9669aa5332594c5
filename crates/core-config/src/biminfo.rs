//! `~/.biminfo` (spec §6): a per-file cursor cache. Each record is a
//! fixed-width line so it can be rewritten in place without touching the
//! rest of the file: `>` + absolute path + space + a 20-wide line number
//! + space + a 20-wide column number.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

const HEADER: &str = "\
# This is a biminfo file.
# This file is autogenerated and will be rewritten on quit.
# Do not edit manually.
";

const NUMBER_WIDTH: usize = 20;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BimInfo {
    entries: BTreeMap<String, (usize, usize)>,
}

impl BimInfo {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Ok(Self::parse(&text))
    }

    pub fn parse(text: &str) -> Self {
        let mut entries = BTreeMap::new();
        for line in text.lines() {
            let Some(rest) = line.strip_prefix('>') else { continue };
            let rest = rest.trim_end();
            if rest.len() < NUMBER_WIDTH * 2 + 2 {
                continue;
            }
            let split_at = rest.len() - NUMBER_WIDTH * 2 - 1;
            let (path_part, nums) = rest.split_at(split_at);
            let path_part = path_part.trim_end();
            let nums = &nums[1..];
            let Some((line_str, col_str)) = nums.split_once(' ') else { continue };
            let (Ok(line_no), Ok(col_no)) =
                (line_str.trim().parse::<usize>(), col_str.trim().parse::<usize>())
            else {
                continue;
            };
            entries.insert(path_part.to_string(), (line_no, col_no));
        }
        Self { entries }
    }

    pub fn get(&self, path: &str) -> Option<(usize, usize)> {
        self.entries.get(path).copied()
    }

    pub fn set(&mut self, path: impl Into<String>, line: usize, col: usize) {
        self.entries.insert(path.into(), (line, col));
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let mut out = String::from(HEADER);
        for (file, (line, col)) in &self.entries {
            out.push('>');
            out.push_str(file);
            out.push(' ');
            out.push_str(&format!("{line:<width$}", width = NUMBER_WIDTH));
            out.push(' ');
            out.push_str(&format!("{col:<width$}", width = NUMBER_WIDTH));
            out.push('\n');
        }
        debug!(entries = self.entries.len(), path = %path.display(), "writing biminfo");
        fs::write(path, out).with_context(|| format!("writing {}", path.display()))
    }
}

//! `~/.bimrc` (spec §6): line-oriented `key[=value]`, `#` starts a
//! comment. A bare key with no `=value` is shorthand for `key=true`.

use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub struct RcFile {
    pub theme: Option<String>,
    pub history: bool,
    pub padding: u16,
    pub hlparen: bool,
    pub hlcurrent: bool,
    pub splitpercent: u8,
    pub shiftscrolling: bool,
    pub scrollamount: u16,
    pub git: bool,
    pub colorgutter: bool,
}

impl Default for RcFile {
    fn default() -> Self {
        Self {
            theme: None,
            history: true,
            padding: 0,
            hlparen: true,
            hlcurrent: true,
            splitpercent: 50,
            shiftscrolling: false,
            scrollamount: 5,
            git: true,
            colorgutter: true,
        }
    }
}

fn parse_bool(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(v) => !matches!(v, "0" | "false" | "no"),
    }
}

impl RcFile {
    pub fn parse(text: &str) -> Self {
        let mut rc = Self::default();
        for (lineno, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = match line.split_once('=') {
                Some((k, v)) => (k.trim(), Some(v.trim())),
                None => (line, None),
            };
            match key {
                "theme" => rc.theme = value.map(str::to_string),
                "history" => rc.history = parse_bool(value),
                "padding" => rc.padding = value.and_then(|v| v.parse().ok()).unwrap_or(rc.padding),
                "hlparen" => rc.hlparen = parse_bool(value),
                "hlcurrent" => rc.hlcurrent = parse_bool(value),
                "splitpercent" => {
                    rc.splitpercent = value.and_then(|v| v.parse().ok()).unwrap_or(rc.splitpercent)
                }
                "shiftscrolling" => rc.shiftscrolling = parse_bool(value),
                "scrollamount" => {
                    rc.scrollamount = value.and_then(|v| v.parse().ok()).unwrap_or(rc.scrollamount)
                }
                "git" => rc.git = parse_bool(value),
                "colorgutter" => rc.colorgutter = parse_bool(value),
                other => warn!(line = lineno + 1, key = other, "unknown .bimrc key"),
            }
        }
        rc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_file_is_empty() {
        let rc = RcFile::parse("");
        assert_eq!(rc, RcFile::default());
    }

    #[test]
    fn bare_key_means_true() {
        let rc = RcFile::parse("hlparen\n");
        assert!(rc.hlparen);
    }

    #[test]
    fn key_equals_value_overrides_numeric_defaults() {
        let rc = RcFile::parse("splitpercent=30\nscrollamount=2\n");
        assert_eq!(rc.splitpercent, 30);
        assert_eq!(rc.scrollamount, 2);
    }

    #[test]
    fn false_like_values_disable_a_flag() {
        let rc = RcFile::parse("git=0\ncolorgutter=false\n");
        assert!(!rc.git);
        assert!(!rc.colorgutter);
    }

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        let rc = RcFile::parse("# a comment\n\ntheme=ocean\n");
        assert_eq!(rc.theme.as_deref(), Some("ocean"));
    }
}

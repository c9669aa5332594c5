//! Per-`$TERM` capability table (spec §C, §6). Real terminals lie about
//! what they support; bim keeps a small denylist keyed on `$TERM` rather
//! than trusting terminfo.

/// Feature flags a terminal either has or doesn't. All default to `true`
/// (full-featured); a `$TERM` entry below flips the ones it lacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerminalCapabilities {
    pub altscreen: bool,
    pub scroll_region: bool,
    pub mouse: bool,
    pub unicode: bool,
    pub bright: bool,
    pub hideshow: bool,
    pub syntax: bool,
    pub history: bool,
    pub title: bool,
    pub bce: bool,
    /// 256-color support; false implies `true_color` is also false.
    pub color_256: bool,
    pub true_color: bool,
    pub italic: bool,
}

impl Default for TerminalCapabilities {
    fn default() -> Self {
        Self {
            altscreen: true,
            scroll_region: true,
            mouse: true,
            unicode: true,
            bright: true,
            hideshow: true,
            syntax: true,
            history: true,
            title: true,
            bce: true,
            color_256: true,
            true_color: true,
            italic: true,
        }
    }
}

impl TerminalCapabilities {
    /// Inspect `$TERM` and apply the matching denylist entry, if any.
    pub fn detect() -> Self {
        let term = std::env::var("TERM").unwrap_or_default();
        Self::for_term(&term)
    }

    pub fn for_term(term: &str) -> Self {
        let mut caps = Self::default();
        match term {
            "linux" => {
                caps.scroll_region = false;
            }
            "cons25" => {
                caps.hideshow = false;
                caps.altscreen = false;
                caps.mouse = false;
                caps.unicode = false;
                caps.bright = false;
            }
            "sortix" => {
                caps.title = false;
            }
            "tmux" | "tmux-256color" => {
                caps.scroll_region = false;
                caps.bce = false;
            }
            "screen" | "screen-256color" => {
                caps.true_color = false;
                caps.italic = false;
            }
            "toaru-vga" => {
                caps.color_256 = false;
                caps.true_color = false;
            }
            _ => {}
        }
        caps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linux_console_loses_scroll_region_only() {
        let caps = TerminalCapabilities::for_term("linux");
        assert!(!caps.scroll_region);
        assert!(caps.mouse);
    }

    #[test]
    fn cons25_loses_most_modern_features() {
        let caps = TerminalCapabilities::for_term("cons25");
        assert!(!caps.hideshow);
        assert!(!caps.altscreen);
        assert!(!caps.mouse);
        assert!(!caps.unicode);
        assert!(!caps.bright);
        assert!(caps.title);
    }

    #[test]
    fn tmux_loses_scroll_region_and_bce() {
        let caps = TerminalCapabilities::for_term("tmux");
        assert!(!caps.scroll_region);
        assert!(!caps.bce);
        assert!(caps.true_color);
    }

    #[test]
    fn screen_loses_true_color_and_italic() {
        let caps = TerminalCapabilities::for_term("screen");
        assert!(!caps.true_color);
        assert!(!caps.italic);
        assert!(caps.color_256);
    }

    #[test]
    fn unknown_term_keeps_everything() {
        let caps = TerminalCapabilities::for_term("xterm-256color");
        assert_eq!(caps, TerminalCapabilities::default());
    }
}

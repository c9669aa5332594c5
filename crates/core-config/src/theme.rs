//! Color string grammar used by `theme=` entries and syntax palettes
//! (spec §6): either `@N` for one of the 18 named ANSI slots (0-7 normal,
//! 8-9 default fg/bg, 10-17 bright variants of 0-7), or a raw SGR tail
//! (`5;N` 256-color, `2;R;G;B` direct color) with an optional trailing
//! `;1` (bold) or `;4` (underline).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpec {
    Named(u8),
    Indexed256(u8),
    TrueColor(u8, u8, u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub spec: ColorSpec,
    pub bold: bool,
    pub underline: bool,
}

impl Color {
    pub fn parse(s: &str) -> Option<Color> {
        let s = s.trim();
        if let Some(rest) = s.strip_prefix('@') {
            let n: u8 = rest.parse().ok()?;
            if n > 17 {
                return None;
            }
            return Some(Color { spec: ColorSpec::Named(n), bold: false, underline: false });
        }
        let parts: Vec<&str> = s.split(';').collect();
        match parts.as_slice() {
            ["5", n, tail @ ..] => {
                let n: u8 = n.parse().ok()?;
                let (bold, underline) = parse_tail(tail);
                Some(Color { spec: ColorSpec::Indexed256(n), bold, underline })
            }
            ["2", r, g, b, tail @ ..] => {
                let r: u8 = r.parse().ok()?;
                let g: u8 = g.parse().ok()?;
                let b: u8 = b.parse().ok()?;
                let (bold, underline) = parse_tail(tail);
                Some(Color { spec: ColorSpec::TrueColor(r, g, b), bold, underline })
            }
            _ => None,
        }
    }

    /// Render as the `fg;bg` SGR parameter pair, per the named-slot to
    /// 3x/9x (fg) or 4x/10x (bg) conversion spec §6 describes.
    pub fn sgr_fg(&self) -> String {
        match self.spec {
            ColorSpec::Named(n) => named_fg(n),
            ColorSpec::Indexed256(n) => format!("38;5;{n}"),
            ColorSpec::TrueColor(r, g, b) => format!("38;2;{r};{g};{b}"),
        }
    }

    pub fn sgr_bg(&self) -> String {
        match self.spec {
            ColorSpec::Named(n) => named_bg(n),
            ColorSpec::Indexed256(n) => format!("48;5;{n}"),
            ColorSpec::TrueColor(r, g, b) => format!("48;2;{r};{g};{b}"),
        }
    }
}

fn parse_tail(tail: &[&str]) -> (bool, bool) {
    let mut bold = false;
    let mut underline = false;
    for t in tail {
        match *t {
            "1" => bold = true,
            "4" => underline = true,
            _ => {}
        }
    }
    (bold, underline)
}

fn named_fg(n: u8) -> String {
    match n {
        0..=7 => format!("3{n}"),
        8 | 9 => "39".to_string(),
        10..=17 => format!("9{}", n - 10),
        _ => "39".to_string(),
    }
}

fn named_bg(n: u8) -> String {
    match n {
        0..=7 => format!("4{n}"),
        8 | 9 => "49".to_string(),
        10..=17 => format!("10{}", n - 10),
        _ => "49".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_slot_parses() {
        let c = Color::parse("@3").unwrap();
        assert_eq!(c.spec, ColorSpec::Named(3));
        assert_eq!(c.sgr_fg(), "33");
        assert_eq!(c.sgr_bg(), "43");
    }

    #[test]
    fn bright_named_slot_maps_to_9x_10x() {
        let c = Color::parse("@12").unwrap();
        assert_eq!(c.sgr_fg(), "92");
        assert_eq!(c.sgr_bg(), "102");
    }

    #[test]
    fn indexed_256_with_bold_tail() {
        let c = Color::parse("5;202;1").unwrap();
        assert_eq!(c.spec, ColorSpec::Indexed256(202));
        assert!(c.bold);
        assert!(!c.underline);
        assert_eq!(c.sgr_fg(), "38;5;202");
    }

    #[test]
    fn truecolor_with_underline_tail() {
        let c = Color::parse("2;10;20;30;4").unwrap();
        assert_eq!(c.spec, ColorSpec::TrueColor(10, 20, 30));
        assert!(c.underline);
        assert_eq!(c.sgr_bg(), "48;2;10;20;30");
    }

    #[test]
    fn out_of_range_named_slot_rejected() {
        assert!(Color::parse("@18").is_none());
    }

    #[test]
    fn garbage_input_rejected() {
        assert!(Color::parse("not-a-color").is_none());
    }
}

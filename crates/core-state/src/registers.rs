//! The yank register (spec §3, §4.7, §5: "process-global... switching
//! buffers does not clear it"). One slot, two shapes: a whole-line yank
//! (`dd`/`yy`) or a partial-range yank (`dw`, visual-mode `y`). Replacing
//! a yank frees the previous one.

use core_text::Line;

#[derive(Clone, Debug)]
pub enum Yank {
    /// Whole lines, pasted with `p`/`P` as new lines before/after the
    /// cursor line.
    Lines(Vec<Line>),
    /// A sub-line range, pasted by splitting the current line at the
    /// cursor and splicing the yanked text in.
    Range(Vec<Line>),
}

#[derive(Default)]
pub struct Registers {
    yank: Option<Yank>,
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, yank: Yank) {
        self.yank = Some(yank);
    }

    pub fn get(&self) -> Option<&Yank> {
        self.yank.as_ref()
    }

    pub fn clear(&mut self) {
        self.yank = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replacing_a_yank_drops_the_previous_one() {
        let mut regs = Registers::new();
        regs.set(Yank::Lines(vec![Line::from_str("a")]));
        regs.set(Yank::Range(vec![Line::from_str("b")]));
        match regs.get().unwrap() {
            Yank::Range(lines) => assert_eq!(lines[0].to_text(), "b"),
            Yank::Lines(_) => panic!("expected the range yank to have replaced the line yank"),
        }
    }
}

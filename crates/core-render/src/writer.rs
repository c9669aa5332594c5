//! Terminal output abstraction (spec §5: "only one component writes to
//! the terminal; buffer all writes... flushed at end of event"). Mirrors
//! the teacher's command-queue writer almost directly, with `Print`
//! carrying pre-composed SGR+glyph text instead of plain strings.

use anyhow::Result;
use crossterm::{cursor::MoveTo, queue, style::Print, terminal::Clear, terminal::ClearType};
use std::io::Write;

#[derive(Debug)]
enum Command {
    MoveTo(u16, u16),
    ClearLine,
    Print(String),
}

/// Accumulates terminal commands for one frame (or one selective
/// redraw) and flushes them in a single write, per spec §5's "no mixed
/// SGR sequences" requirement.
#[derive(Debug, Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    /// Number of buffered commands; used by callers that want to assert a
    /// frame produced output without flushing it.
    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }

    /// Clear the current line; caller must have already moved to column 0
    /// of the target row.
    pub fn clear_line(&mut self) {
        self.cmds.push(Command::ClearLine);
    }

    pub fn print(&mut self, s: impl Into<String>) {
        let s = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }

    pub fn flush(self, out: &mut impl Write) -> Result<()> {
        for cmd in self.cmds {
            match cmd {
                Command::MoveTo(x, y) => queue!(out, MoveTo(x, y))?,
                Command::ClearLine => queue!(out, Clear(ClearType::CurrentLine))?,
                Command::Print(s) => queue!(out, Print(s))?,
            }
        }
        out.flush()?;
        Ok(())
    }
}

//! Terminal backend abstraction, crossterm implementation, capability
//! probing, and signal handling.

use anyhow::Result;
use crossterm::{
    cursor::Hide,
    cursor::Show,
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use std::io::stdout;

pub mod capabilities;
pub mod signals;

pub use capabilities::TerminalCapabilities;
pub use signals::{SignalEvent, SignalWatcher};

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
}

pub struct CrosstermBackend {
    entered: bool,
    caps: TerminalCapabilities,
}

/// RAII guard ensuring terminal state restoration even if the caller
/// early-returns or panics (spec §5: "MUST ensure the terminal is
/// restored... on any abnormal exit").
pub struct TerminalGuard<'a> {
    backend: &'a mut CrosstermBackend,
    active: bool,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self {
            entered: false,
            caps: TerminalCapabilities::detect(),
        }
    }

    pub fn capabilities(&self) -> &TerminalCapabilities {
        &self.caps
    }

    /// Enter and return a guard that will leave on drop.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        self.enter()?;
        Ok(TerminalGuard {
            backend: self,
            active: true,
        })
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode()?;
            if self.caps.altscreen {
                execute!(stdout(), EnterAlternateScreen)?;
            }
            if self.caps.hideshow {
                execute!(stdout(), Hide)?;
            }
            self.entered = true;
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            if self.caps.hideshow {
                execute!(stdout(), Show)?;
            }
            if self.caps.altscreen {
                execute!(stdout(), LeaveAlternateScreen)?;
            }
            disable_raw_mode()?;
            self.entered = false;
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        if self.caps.title {
            execute!(stdout(), SetTitle(title))?;
        }
        Ok(())
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

impl Drop for TerminalGuard<'_> {
    fn drop(&mut self) {
        if self.active {
            let _ = self.backend.leave();
        }
    }
}

//! SIGWINCH/SIGTSTP/SIGCONT handling (spec §5). bim is single-threaded;
//! the main loop polls `SignalWatcher` once per iteration rather than
//! installing async signal handlers that would need to touch editor
//! state from a signal context.

use anyhow::Result;
use signal_hook::consts::{SIGCONT, SIGTSTP, SIGWINCH};
use signal_hook::iterator::Signals;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignalEvent {
    /// Terminal was resized; the caller should re-query dimensions and
    /// recompute layout geometry.
    WindowResized,
    /// `Ctrl-Z`: suspend. The caller should leave the terminal (restore
    /// cooked mode) before returning control to the shell.
    Suspend,
    /// Resumed from suspend (`fg`). The caller should re-enter the
    /// terminal and force a full redraw.
    Resumed,
}

pub struct SignalWatcher {
    signals: Signals,
}

impl SignalWatcher {
    pub fn new() -> Result<Self> {
        let signals = Signals::new([SIGWINCH, SIGTSTP, SIGCONT])?;
        Ok(Self { signals })
    }

    /// Drain all signals received since the last poll. Non-blocking.
    pub fn poll(&mut self) -> Vec<SignalEvent> {
        self.signals
            .pending()
            .filter_map(|signal| match signal {
                SIGWINCH => Some(SignalEvent::WindowResized),
                SIGTSTP => Some(SignalEvent::Suspend),
                SIGCONT => Some(SignalEvent::Resumed),
                _ => None,
            })
            .collect()
    }
}

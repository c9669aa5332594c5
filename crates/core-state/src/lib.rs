//! Per-buffer editing state (spec §3): modes, the buffer itself, and the
//! process-global yank register.

pub mod buffer;
pub mod mode;
pub mod registers;

pub use buffer::{Buffer, EditStats, Selection};
pub use mode::Mode;
pub use registers::{Registers, Yank};

//! Interprets resolved `core_keymap::Action`s against a `core-model::Model`
//! (spec §4.7, §4.8): motions, mode transitions, edits, undo/redo, the
//! command line, search, paste, indent, and paren matching.

pub mod dispatcher;
pub mod indent;
pub mod io_ops;
pub mod paren;
pub mod paste;
pub mod search;

pub use core_keymap::{Action, Direction, SelectionKind};
pub use dispatcher::{dispatch, CommandError, DispatchOutcome, EditorContext, ParsedCommand, Prompt};

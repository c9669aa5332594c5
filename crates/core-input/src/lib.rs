//! Terminal byte stream decoding (spec §4.6): UTF-8, escape/CSI parsing,
//! and X10 mouse packets, normalized into `InputEvent`.

pub mod decoder;
pub mod keytoken;

pub use decoder::InputDecoder;
pub use keytoken::{Direction, InputEvent, MouseButton, MouseEvent, MouseEventKind, NavEvent};

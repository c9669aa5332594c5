//! Line buffer model (spec §3, §4.1): styled cells, lines, and the
//! line-indexed store that holds them.

pub mod cell;
pub mod line;
pub mod store;
pub mod width;

pub use cell::{Cell, CellFlags, SyntaxClass};
pub use line::{Line, RevStatus};
pub use store::LineStore;
pub use width::{codepoint_width, MAX_CELL_WIDTH};

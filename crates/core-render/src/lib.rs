//! The renderer (spec §4.5): turns a [`core_model::Model`] plus a small
//! per-frame context into terminal output. Painting is split into the
//! same layers the editor model already has — cell glyph/color rules
//! (`style`), the gutter and line-number field (`gutter`), scroll state
//! (`viewport`), status/command-line text (`status`) — and a buffered
//! terminal writer (`writer`) so a frame's escape sequences reach the
//! terminal in one write. `render_engine` assembles the layers into full
//! and selective redraws.

pub mod gutter;
pub mod render_engine;
pub mod status;
pub mod style;
pub mod viewport;
pub mod writer;

pub use render_engine::{FrameContext, RenderEngine};
pub use status::{CommandLine, StatusContext, StatusSegment};
pub use viewport::Viewport;
pub use writer::Writer;

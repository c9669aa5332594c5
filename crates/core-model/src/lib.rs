//! The buffer registry and split-layout model (spec §4.4).

pub mod git_integration;
pub mod layout;
pub mod model;
pub mod registry;

pub use git_integration::annotate_from_head;
pub use layout::{Focus, Layout, LayoutRegion, SelfSplitViewports, SplitGeometry};
pub use model::Model;
pub use registry::Registry;

//! PresentationML package handling.
//!
//! Covers the presentation-level pieces of the pipeline: loading a template
//! package, enumerating its slide layouts in master order, inspecting layout
//! shapes, and generating new slide parts.

pub mod format;
pub mod layout;
pub mod package;
pub mod shape;
pub mod slide;

pub use format::ImageFormat;
pub use layout::{SlideLayout, select_layout};
pub use package::TemplatePackage;
pub use shape::LayoutShape;
pub use slide::{Align, SlideBuilder, TextStyle};

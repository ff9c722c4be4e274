//! The slide composition engine.
//!
//! Everything that decides where an element lands on a slide lives here:
//! the injected coordinate configuration, anchor resolution against the
//! template layout, aspect-preserving image placement, the colorway grid,
//! the artwork stack, and the per-product orchestrator.

pub mod anchors;
pub mod artwork;
pub mod colorway;
pub mod composer;
pub mod placer;
pub mod product;
pub mod spec;

pub use anchors::{AnchorResolver, LayoutAnchors};
pub use artwork::ArtworkStacker;
pub use colorway::{ColorwayLayout, ColorwayLayoutEngine, ColorwayPlacement, circled_ordinal};
pub use composer::{PPTX_MIME, SlideComposer};
pub use placer::{ImagePlacer, TargetDim};
pub use product::{ArtworkDisplayMode, ArtworkRef, ColorwayItem, ProductRecord, parse_hex_color};
pub use spec::{ColorwaySpec, SheetSpec, TextSpec};

//! Specdeck - a product spec-sheet deck generator for OOXML presentations
//!
//! This library turns structured per-product records (name, code, main photo,
//! logo, artworks, colorway swatches) into a multi-slide `.pptx` document, one
//! slide per product, with every element placed at exact physical coordinates
//! against a brand's print-ready template.
//!
//! # Architecture
//!
//! - `opc`: Open Packaging Conventions plumbing, with pack URIs,
//!   relationships, content types, and the ZIP physical package.
//! - `pptx`: the presentation package, covering template loading, slide
//!   layout selection, and slide XML generation.
//! - `compose`: the composition engine, with anchor resolution,
//!   aspect-preserving image placement, the colorway grid, the artwork
//!   stack, and the per-product slide composer.
//! - `assets`: collaborator seams for asset bytes and artwork display
//!   modes, with filesystem-backed reference implementations.
//!
//! # Example
//!
//! ```no_run
//! use specdeck::assets::{DirAssetResolver, JsonModeLookup};
//! use specdeck::compose::{ProductRecord, SheetSpec, SlideComposer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let template = std::fs::read("template.pptx")?;
//! let assets = DirAssetResolver::new("assets");
//! let modes = JsonModeLookup::from_path("assets/artworks/_meta.json");
//!
//! let product = ProductRecord::new("HEADWEAR", "BKFTM1581");
//! let composer = SlideComposer::new(SheetSpec::default());
//! let pptx = composer.compose(&template, &[product], &assets, &modes)?;
//!
//! std::fs::write("overview.pptx", pptx)?;
//! # Ok(())
//! # }
//! ```

/// Shared primitives: error types, unit conversions, XML text helpers.
pub mod common;

/// OPC (Open Packaging Conventions) package plumbing.
///
/// Provides the container-level pieces of a `.pptx` file: part names,
/// relationships, `[Content_Types].xml`, and ZIP read/write.
pub mod opc;

/// PresentationML package handling: template loading, layouts, slide XML.
pub mod pptx;

/// The slide composition engine.
pub mod compose;

/// Collaborator interfaces for asset bytes and artwork display modes.
pub mod assets;

// Re-export commonly used types for convenience
pub use assets::{ArtworkModeLookup, AssetKind, AssetResolver};
pub use common::{Error, Result};
pub use compose::{ColorwayItem, PPTX_MIME, ProductRecord, SheetSpec, SlideComposer};

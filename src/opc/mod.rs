//! Open Packaging Conventions (OPC) plumbing.
//!
//! A `.pptx` file is a ZIP archive of parts wired together by relationship
//! files and a `[Content_Types].xml` manifest. This module provides the
//! container-level pieces: validated part names, relationship collections,
//! the content-type manifest, and the physical ZIP reader/writer.

pub mod constants;
pub mod content_types;
pub mod packuri;
pub mod phys;
pub mod rel;

pub use content_types::ContentTypes;
pub use packuri::PackURI;
pub use phys::{PhysPkgReader, PhysPkgWriter};
pub use rel::{Relationship, Relationships};

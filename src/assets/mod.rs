//! Collaborator seams for asset storage.
//!
//! The composer never touches the filesystem or network itself: logo and
//! artwork bytes come through `AssetResolver`, and per-artwork display
//! modes through `ArtworkModeLookup`. Both must look idempotent and
//! side-effect-free from the composer's point of view; caching and remote
//! synchronization are the implementation's own concern.
//!
//! Filesystem-backed reference implementations are provided so the crate
//! is usable without the excluded service layers.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use tracing::debug;

use crate::compose::product::ArtworkDisplayMode;

/// Asset category, mapping to a storage subdirectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Logo,
    Artwork,
}

impl AssetKind {
    /// Storage subdirectory for this kind.
    pub fn subdir(&self) -> &'static str {
        match self {
            Self::Logo => "logos",
            Self::Artwork => "artworks",
        }
    }
}

/// Supplies asset bytes by kind and name.
///
/// `None` means "not found" and is always recoverable: the affected slide
/// element is skipped, never the batch.
pub trait AssetResolver {
    fn resolve(&self, kind: AssetKind, name: &str) -> Option<Bytes>;
}

/// Supplies the display mode for an artwork asset key.
///
/// Missing keys resolve to `ArtworkDisplayMode::Default`.
pub trait ArtworkModeLookup {
    fn mode_for(&self, asset_key: &str) -> ArtworkDisplayMode;
}

/// Filesystem asset store: `<root>/logos/<name>`, `<root>/artworks/<name>`.
#[derive(Debug, Clone)]
pub struct DirAssetResolver {
    root: PathBuf,
}

impl DirAssetResolver {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }
}

impl AssetResolver for DirAssetResolver {
    fn resolve(&self, kind: AssetKind, name: &str) -> Option<Bytes> {
        // Asset names are plain file names; anything path-like is rejected
        if Path::new(name).file_name().map(|f| f != name).unwrap_or(true) {
            debug!(name, "rejected non-plain asset name");
            return None;
        }
        let path = self.root.join(kind.subdir()).join(name);
        match std::fs::read(&path) {
            Ok(data) => Some(Bytes::from(data)),
            Err(err) => {
                debug!(path = %path.display(), %err, "asset not readable");
                None
            }
        }
    }
}

/// In-memory asset store, mainly for tests and embedded use.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetResolver {
    assets: HashMap<(AssetKind, String), Bytes>,
}

impl MemoryAssetResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: AssetKind, name: &str, data: Bytes) {
        self.assets.insert((kind, name.to_string()), data);
    }
}

impl AssetResolver for MemoryAssetResolver {
    fn resolve(&self, kind: AssetKind, name: &str) -> Option<Bytes> {
        self.assets.get(&(kind, name.to_string())).cloned()
    }
}

/// Display-mode lookup backed by a persisted JSON object mapping asset
/// file names to mode strings.
///
/// A missing or malformed document yields an empty mapping; unknown mode
/// strings normalize to `Default`. Neither degradation raises an error.
#[derive(Debug, Clone, Default)]
pub struct JsonModeLookup {
    modes: HashMap<String, ArtworkDisplayMode>,
}

impl JsonModeLookup {
    /// Load from a JSON file on disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match std::fs::read(path.as_ref()) {
            Ok(data) => Self::from_json_bytes(&data),
            Err(err) => {
                debug!(path = %path.as_ref().display(), %err, "no artwork mode document");
                Self::default()
            }
        }
    }

    /// Parse a JSON document of `{ "<asset file name>": "<mode>" }`.
    pub fn from_json_bytes(data: &[u8]) -> Self {
        let modes: HashMap<String, ArtworkDisplayMode> = match serde_json::from_slice(data) {
            Ok(map) => map,
            Err(err) => {
                debug!(%err, "malformed artwork mode document");
                HashMap::new()
            }
        };
        Self { modes }
    }
}

impl ArtworkModeLookup for JsonModeLookup {
    fn mode_for(&self, asset_key: &str) -> ArtworkDisplayMode {
        self.modes.get(asset_key).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_json_mode_lookup() {
        let doc = br#"{"flower.png": "horizontal", "tag.png": "small", "odd.png": "banner"}"#;
        let lookup = JsonModeLookup::from_json_bytes(doc);
        assert_eq!(lookup.mode_for("flower.png"), ArtworkDisplayMode::Horizontal);
        assert_eq!(lookup.mode_for("tag.png"), ArtworkDisplayMode::Small);
        // Unknown mode strings and missing keys both fall back
        assert_eq!(lookup.mode_for("odd.png"), ArtworkDisplayMode::Default);
        assert_eq!(lookup.mode_for("absent.png"), ArtworkDisplayMode::Default);
    }

    #[test]
    fn test_malformed_mode_document_is_empty() {
        let lookup = JsonModeLookup::from_json_bytes(b"not json at all");
        assert_eq!(lookup.mode_for("anything"), ArtworkDisplayMode::Default);
    }

    #[test]
    fn test_dir_resolver_reads_and_misses() {
        let dir = tempfile::tempdir().unwrap();
        let logos = dir.path().join("logos");
        std::fs::create_dir_all(&logos).unwrap();
        let mut f = std::fs::File::create(logos.join("brand.png")).unwrap();
        f.write_all(b"png-bytes").unwrap();

        let resolver = DirAssetResolver::new(dir.path());
        assert_eq!(
            resolver.resolve(AssetKind::Logo, "brand.png").as_deref(),
            Some(b"png-bytes".as_slice())
        );
        assert!(resolver.resolve(AssetKind::Logo, "missing.png").is_none());
        assert!(resolver.resolve(AssetKind::Artwork, "brand.png").is_none());
    }

    #[test]
    fn test_dir_resolver_rejects_path_names() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = DirAssetResolver::new(dir.path());
        assert!(resolver.resolve(AssetKind::Logo, "../secrets.png").is_none());
        assert!(resolver.resolve(AssetKind::Logo, "a/b.png").is_none());
    }
}

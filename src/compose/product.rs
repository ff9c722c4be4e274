//! Product record types: the input one slide is composed from.

use bytes::Bytes;

/// One product to render as one slide.
///
/// Immutable once handed to the composer; built by the input layer per
/// generation request and discarded after the slide is composed.
#[derive(Debug, Clone, Default)]
pub struct ProductRecord {
    /// Season heading, e.g. "25FW MAINLAND" (omitted when empty)
    pub season_label: Option<String>,
    /// Hex color override for the season heading, e.g. "#987147"
    pub season_color: Option<String>,
    /// Category heading, e.g. "HEADWEAR"
    pub category_name: String,
    /// Product code; required and non-empty
    pub code: String,
    /// Recommended retail price, rendered as "RRP : {value}"
    pub rrp: Option<String>,
    /// Main product photo
    pub main_image: Option<Bytes>,
    /// Logo asset key, or the sentinel "none"
    pub logo_name: Option<String>,
    /// Artwork asset keys, in stacking order
    pub artworks: Vec<ArtworkRef>,
    /// Colorway swatches, in display order
    pub colorways: Vec<ColorwayItem>,
}

impl ProductRecord {
    pub fn new(category_name: &str, code: &str) -> Self {
        Self {
            category_name: category_name.to_string(),
            code: code.to_string(),
            ..Self::default()
        }
    }

    /// The logo asset key, with the "none" sentinel and empty values
    /// filtered out.
    pub(crate) fn logo_key(&self) -> Option<&str> {
        let name = self.logo_name.as_deref()?.trim();
        if name.is_empty() || name.eq_ignore_ascii_case("none") {
            None
        } else {
            Some(name)
        }
    }
}

/// Reference to an artwork asset.
#[derive(Debug, Clone)]
pub struct ArtworkRef {
    pub asset_key: String,
}

impl ArtworkRef {
    pub fn new(asset_key: &str) -> Self {
        Self {
            asset_key: asset_key.to_string(),
        }
    }
}

/// One product color variant: a swatch image and a display name.
#[derive(Debug, Clone, Default)]
pub struct ColorwayItem {
    pub image: Option<Bytes>,
    /// Free text; uppercased for display
    pub name: String,
}

impl ColorwayItem {
    pub fn new(name: &str) -> Self {
        Self {
            image: None,
            name: name.to_string(),
        }
    }

    pub fn with_image(name: &str, image: Bytes) -> Self {
        Self {
            image: Some(image),
            name: name.to_string(),
        }
    }
}

/// Sizing policy for an artwork asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArtworkDisplayMode {
    /// Portrait: fixed height, aspect-preserved width
    #[default]
    Default,
    /// Fixed (wider) width, aspect-preserved height
    Horizontal,
    /// Narrow fixed width, aspect-preserved height
    Small,
}

impl ArtworkDisplayMode {
    /// Parse a persisted mode string. Unknown or invalid values normalize
    /// to `Default`.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "horizontal" => Self::Horizontal,
            "small" => Self::Small,
            _ => Self::Default,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Horizontal => "horizontal",
            Self::Small => "small",
        }
    }
}

// The persisted mode document maps asset names to free-form strings;
// normalization happens during deserialization so a stray value can never
// fail the whole document.
impl<'de> serde::Deserialize<'de> for ArtworkDisplayMode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Parse a "#RRGGBB" color into six normalized hex digits.
///
/// The leading '#' is optional; anything that is not exactly six hex digits
/// yields `None` so the caller falls back to its spec default.
pub fn parse_hex_color(hex: &str) -> Option<String> {
    let v = hex.trim().trim_start_matches('#');
    if v.len() != 6 || !v.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    Some(v.to_ascii_uppercase())
}

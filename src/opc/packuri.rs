//! The PackURI value type for part names within an OPC package.

use crate::common::{Error, Result};

/// A part name within an OPC package.
///
/// PackURIs always begin with a forward slash and use forward slashes as
/// path separators, following the OPC specification. They provide access to
/// components like the base URI (directory), filename, extension, and the
/// numeric index of tuple part names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackURI {
    /// The full pack URI string (e.g., "/ppt/slides/slide1.xml")
    uri: String,
}

impl PackURI {
    /// Create a new PackURI from a string.
    ///
    /// Fails if the URI does not begin with a forward slash.
    pub fn new<S: Into<String>>(uri: S) -> Result<Self> {
        let uri = uri.into();
        if !uri.starts_with('/') {
            return Err(Error::InvalidPackUri(format!(
                "must begin with slash, got '{uri}'"
            )));
        }
        Ok(PackURI { uri })
    }

    /// Create a PackURI from a ZIP member name (no leading slash).
    pub fn from_membername(name: &str) -> Result<Self> {
        Self::new(format!("/{name}"))
    }

    /// Translate a relative reference (like "../slideLayouts/slideLayout1.xml")
    /// onto a base URI (like "/ppt/slides") to produce an absolute PackURI.
    pub fn from_rel_ref(base_uri: &str, relative_ref: &str) -> Result<Self> {
        let joined = if base_uri.ends_with('/') {
            format!("{base_uri}{relative_ref}")
        } else {
            format!("{base_uri}/{relative_ref}")
        };
        Self::new(Self::normalize_path(&joined))
    }

    /// The directory portion, e.g. "/ppt/slides" for "/ppt/slides/slide1.xml".
    pub fn base_uri(&self) -> &str {
        match self.uri.rfind('/') {
            Some(0) | None => "/",
            Some(pos) => &self.uri[..pos],
        }
    }

    /// The filename portion, e.g. "slide1.xml" for "/ppt/slides/slide1.xml".
    pub fn filename(&self) -> &str {
        match self.uri.rfind('/') {
            Some(pos) => &self.uri[pos + 1..],
            None => "",
        }
    }

    /// The extension, without the leading period.
    pub fn ext(&self) -> &str {
        match self.filename().rfind('.') {
            Some(pos) => &self.filename()[pos + 1..],
            None => "",
        }
    }

    /// The numeric suffix of tuple part names.
    ///
    /// Returns 21 for "/ppt/slides/slide21.xml" and None for
    /// "/ppt/presentation.xml".
    pub fn idx(&self) -> Option<u32> {
        let filename = self.filename();
        let stem = match filename.rfind('.') {
            Some(pos) => &filename[..pos],
            None => filename,
        };
        let digits_at = stem.find(|c: char| c.is_ascii_digit())?;
        let suffix = &stem[digits_at..];
        if digits_at == 0 || !suffix.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        suffix.parse().ok()
    }

    /// The ZIP member name for this part (URI with leading slash stripped).
    pub fn membername(&self) -> &str {
        &self.uri[1..]
    }

    /// The relative reference from a base URI to this part.
    ///
    /// For example, "/ppt/slideLayouts/slideLayout1.xml" relative to
    /// "/ppt/slides" is "../slideLayouts/slideLayout1.xml".
    pub fn relative_ref(&self, base_uri: &str) -> String {
        if base_uri == "/" {
            return self.membername().to_string();
        }

        let from_parts: Vec<&str> = base_uri.split('/').filter(|s| !s.is_empty()).collect();
        let to_parts: Vec<&str> = self.uri.split('/').filter(|s| !s.is_empty()).collect();

        let common = from_parts
            .iter()
            .zip(to_parts.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let mut result = String::new();
        for _ in common..from_parts.len() {
            result.push_str("../");
        }
        for (i, part) in to_parts.iter().enumerate().skip(common) {
            if i > common {
                result.push('/');
            }
            result.push_str(part);
        }
        result
    }

    /// The PackURI of the .rels part corresponding to this part.
    ///
    /// For example, "/ppt/_rels/presentation.xml.rels" for
    /// "/ppt/presentation.xml", or "/_rels/.rels" for the package itself.
    pub fn rels_uri(&self) -> Result<PackURI> {
        let base_uri = self.base_uri();
        let rels_filename = format!("{}.rels", self.filename());
        if base_uri == "/" {
            Self::new(format!("/_rels/{rels_filename}"))
        } else {
            Self::new(format!("{base_uri}/_rels/{rels_filename}"))
        }
    }

    /// The full URI string.
    pub fn as_str(&self) -> &str {
        &self.uri
    }

    /// Resolve "." and ".." segments.
    fn normalize_path(path: &str) -> String {
        let mut parts: Vec<&str> = vec![""];
        for part in path.split('/') {
            match part {
                "" | "." => {}
                ".." => {
                    if parts.len() > 1 {
                        parts.pop();
                    }
                }
                _ => parts.push(part),
            }
        }
        if parts.len() == 1 {
            return "/".to_string();
        }
        parts.join("/")
    }
}

/// The package pseudo-partname, representing the package itself.
pub const PACKAGE_URI: &str = "/";

/// The URI for the [Content_Types].xml part.
pub const CONTENT_TYPES_URI: &str = "/[Content_Types].xml";

impl std::fmt::Display for PackURI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.uri)
    }
}

impl AsRef<str> for PackURI {
    fn as_ref(&self) -> &str {
        &self.uri
    }
}

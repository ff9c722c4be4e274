//! Slide layout model and the layout selection policy.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::common::Result;
use crate::opc::PackURI;
use crate::pptx::shape::{LayoutShape, collect_sp_subtrees};

/// Display names accepted by the third selection tier, lowercased.
const DISPLAY_NAME_ALLOWLIST: &[&str] = &["hb title / content", "custom"];

/// A slide layout part from the template.
#[derive(Debug, Clone)]
pub struct SlideLayout {
    /// Part name, e.g. "/ppt/slideLayouts/slideLayout2.xml"
    partname: PackURI,
    /// The `matchingName` attribute of `p:sldLayout`
    matching_name: Option<String>,
    /// The display name from `p:cSld@name`
    name: Option<String>,
    /// Top-level text shapes on the layout
    shapes: Vec<LayoutShape>,
}

impl SlideLayout {
    /// Parse a slide layout part.
    pub fn from_xml(partname: PackURI, xml: &[u8]) -> Result<Self> {
        let mut matching_name = None;
        let mut name = None;

        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);
        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    match e.local_name().as_ref() {
                        b"sldLayout" => {
                            for attr in e.attributes().flatten() {
                                if attr.key.as_ref() == b"matchingName" {
                                    matching_name =
                                        Some(String::from_utf8_lossy(&attr.value).into_owned());
                                }
                            }
                        }
                        b"cSld" => {
                            for attr in e.attributes().flatten() {
                                if attr.key.as_ref() == b"name" {
                                    name = Some(String::from_utf8_lossy(&attr.value).into_owned());
                                }
                            }
                        }
                        _ => {}
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(crate::common::Error::Xml(e.to_string())),
                _ => {}
            }
        }

        let shapes = collect_sp_subtrees(xml)?;

        Ok(Self {
            partname,
            matching_name,
            name,
            shapes,
        })
    }

    #[inline]
    pub fn partname(&self) -> &PackURI {
        &self.partname
    }

    /// The internal `matchingName` attribute, if any.
    pub fn matching_name(&self) -> Option<&str> {
        self.matching_name.as_deref()
    }

    /// The display name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The layout's top-level text shapes.
    pub fn shapes_mut(&mut self) -> &mut [LayoutShape] {
        &mut self.shapes
    }

    fn matching_name_normalized(&self) -> Option<String> {
        self.matching_name
            .as_deref()
            .map(|s| s.trim().to_lowercase())
    }

    fn name_normalized(&self) -> Option<String> {
        self.name.as_deref().map(|s| s.trim().to_lowercase())
    }
}

/// Pick the layout new slides are built from.
///
/// Ordered fallback, each tier tried across all layouts before the next:
/// 1. `matchingName` equals "default"
/// 2. `matchingName` equals "title"
/// 3. display name in the fixed allowlist
/// 4. the second layout if the template has one, else the first
///
/// Returns `None` only when the template has no layouts at all.
pub fn select_layout(layouts: &[SlideLayout]) -> Option<usize> {
    for target in ["default", "title"] {
        if let Some(i) = layouts
            .iter()
            .position(|l| l.matching_name_normalized().as_deref() == Some(target))
        {
            return Some(i);
        }
    }

    if let Some(i) = layouts.iter().position(|l| {
        l.name_normalized()
            .is_some_and(|n| DISPLAY_NAME_ALLOWLIST.contains(&n.as_str()))
    }) {
        return Some(i);
    }

    match layouts.len() {
        0 => None,
        1 => Some(0),
        _ => Some(1),
    }
}

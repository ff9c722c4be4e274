//! Anchor resolution against the template layout.
//!
//! The template marks regions with small label shapes ("RRP", "COLORWAY",
//! ...). Scanning for them is a heuristic, not a guarantee: a template
//! whose labels were renamed simply resolves no anchor and the composer
//! falls back to its fixed coordinates. That silent degradation is policy,
//! not an error.

use crate::common::unit::Bounds;
use crate::pptx::layout::SlideLayout;

/// Anchor bounding boxes found on the chosen layout.
///
/// Computed once per compose call and shared read-only across every slide
/// in the batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutAnchors {
    pub rrp_label: Option<Bounds>,
    pub color_label: Option<Bounds>,
    pub logo_label: Option<Bounds>,
    pub artwork_label: Option<Bounds>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnchorSlot {
    Rrp,
    Color,
    Logo,
    Artwork,
}

/// One scan rule: a token that flags a shape, and the slot its bounding
/// box fills.
struct AnchorRule {
    token: &'static str,
    slot: AnchorSlot,
}

impl AnchorRule {
    fn matches(&self, shape_text_upper: &str) -> bool {
        shape_text_upper.contains(self.token)
    }
}

/// Scans layout shapes for recognizable label text.
pub struct AnchorResolver {
    /// Evaluated in order; the first matching shape per slot wins
    rules: Vec<AnchorRule>,
}

impl AnchorResolver {
    pub fn new() -> Self {
        Self {
            rules: vec![
                AnchorRule {
                    token: "RRP",
                    slot: AnchorSlot::Rrp,
                },
                AnchorRule {
                    token: "COLORWAY",
                    slot: AnchorSlot::Color,
                },
                AnchorRule {
                    token: "LOGO",
                    slot: AnchorSlot::Logo,
                },
                AnchorRule {
                    token: "ARTWORK",
                    slot: AnchorSlot::Artwork,
                },
            ],
        }
    }

    /// Scan every text-bearing shape on the layout and fill the anchor
    /// slots. A shape may satisfy several rules; a slot keeps its first
    /// match.
    pub fn resolve(&self, layout: &mut SlideLayout) -> LayoutAnchors {
        let mut anchors = LayoutAnchors::default();

        for shape in layout.shapes_mut() {
            let text = shape.text().to_uppercase();
            if text.is_empty() {
                continue;
            }
            for rule in &self.rules {
                if !rule.matches(&text) {
                    continue;
                }
                let slot = match rule.slot {
                    AnchorSlot::Rrp => &mut anchors.rrp_label,
                    AnchorSlot::Color => &mut anchors.color_label,
                    AnchorSlot::Logo => &mut anchors.logo_label,
                    AnchorSlot::Artwork => &mut anchors.artwork_label,
                };
                if slot.is_none() {
                    *slot = Some(shape.bounds());
                }
            }
        }

        anchors
    }
}

impl Default for AnchorResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opc::PackURI;

    fn layout_with_shapes(shapes: &[(&str, i64, i64)]) -> SlideLayout {
        let mut body = String::new();
        for (text, x, y) in shapes {
            body.push_str(&format!(
                concat!(
                    r#"<p:sp><p:spPr><a:xfrm><a:off x="{x}" y="{y}"/>"#,
                    r#"<a:ext cx="360000" cy="180000"/></a:xfrm></p:spPr>"#,
                    r#"<p:txBody><a:p><a:r><a:t>{t}</a:t></a:r></a:p></p:txBody></p:sp>"#
                ),
                x = x,
                y = y,
                t = text
            ));
        }
        let xml = format!(
            r#"<p:sldLayout xmlns:p="x" xmlns:a="y"><p:cSld><p:spTree>{body}</p:spTree></p:cSld></p:sldLayout>"#
        );
        SlideLayout::from_xml(
            PackURI::new("/ppt/slideLayouts/slideLayout1.xml").unwrap(),
            xml.as_bytes(),
        )
        .unwrap()
    }

    #[test]
    fn test_resolves_case_insensitive_substrings() {
        let mut layout = layout_with_shapes(&[
            ("rrp : eur", 100, 200),
            ("Colorway options", 300, 400),
        ]);
        let anchors = AnchorResolver::new().resolve(&mut layout);
        assert_eq!(anchors.rrp_label.map(|b| (b.x, b.y)), Some((100, 200)));
        assert_eq!(anchors.color_label.map(|b| (b.x, b.y)), Some((300, 400)));
        assert!(anchors.logo_label.is_none());
        assert!(anchors.artwork_label.is_none());
    }

    #[test]
    fn test_first_match_wins_per_slot() {
        let mut layout =
            layout_with_shapes(&[("RRP", 1, 1), ("RRP AGAIN", 2, 2), ("LOGO", 3, 3)]);
        let anchors = AnchorResolver::new().resolve(&mut layout);
        assert_eq!(anchors.rrp_label.map(|b| b.x), Some(1));
        assert_eq!(anchors.logo_label.map(|b| b.x), Some(3));
    }

    #[test]
    fn test_one_shape_may_fill_several_slots() {
        let mut layout = layout_with_shapes(&[("LOGO / ARTWORK", 7, 8)]);
        let anchors = AnchorResolver::new().resolve(&mut layout);
        assert_eq!(anchors.logo_label.map(|b| b.x), Some(7));
        assert_eq!(anchors.artwork_label.map(|b| b.x), Some(7));
    }

    #[test]
    fn test_unlabeled_layout_resolves_nothing() {
        let mut layout = layout_with_shapes(&[("Title", 0, 0)]);
        let anchors = AnchorResolver::new().resolve(&mut layout);
        assert!(anchors.rrp_label.is_none());
        assert!(anchors.color_label.is_none());
    }
}

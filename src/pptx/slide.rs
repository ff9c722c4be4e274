//! Slide XML generation.
//!
//! `SlideBuilder` accumulates text boxes and pictures with exact EMU
//! placement and emits the `p:sld` part. Picture relationship IDs are
//! supplied at save time by the package, which owns the slide's `.rels`.

use std::fmt::Write as FmtWrite;

use crate::common::Result;
use crate::common::unit::{Bounds, pt_to_centipoints};
use crate::common::xml::escape_xml;
use crate::pptx::format::ImageFormat;

/// Paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    fn attr(self) -> &'static str {
        match self {
            Align::Left => "l",
            Align::Center => "ctr",
            Align::Right => "r",
        }
    }
}

/// Text styling for a generated text box.
///
/// `tight_frame` reproduces the template's measured text boxes: zero insets,
/// top anchor, no word wrap, no auto-size, single line spacing with no
/// paragraph spacing. Plain frames keep the renderer defaults.
#[derive(Debug, Clone, Default)]
pub struct TextStyle {
    /// Typeface, applied to the latin, east-asian and complex-script slots
    pub font: Option<String>,
    /// Font size in points
    pub size_pt: Option<f64>,
    pub bold: bool,
    /// Text color as six hex digits, no '#'
    pub color_hex: Option<String>,
    pub align: Align,
    pub tight_frame: bool,
}

impl TextStyle {
    /// Style for a measured spec text box.
    pub fn spec(font: &str, size_pt: f64, bold: bool, color_hex: &str) -> Self {
        Self {
            font: Some(font.to_string()),
            size_pt: Some(size_pt),
            bold,
            color_hex: Some(color_hex.to_string()),
            align: Align::Left,
            tight_frame: true,
        }
    }

    /// Plain text box with only an alignment.
    pub fn plain(align: Align) -> Self {
        Self {
            align,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
enum ShapeXml {
    TextBox {
        text: String,
        bounds: Bounds,
        style: TextStyle,
    },
    Picture {
        data: Vec<u8>,
        format: ImageFormat,
        bounds: Bounds,
        description: String,
    },
}

/// A slide under construction.
#[derive(Debug, Clone)]
pub struct SlideBuilder {
    /// Slide ID used in the presentation's `p:sldIdLst`
    slide_id: u32,
    shapes: Vec<ShapeXml>,
}

impl SlideBuilder {
    pub(crate) fn new(slide_id: u32) -> Self {
        Self {
            slide_id,
            shapes: Vec::new(),
        }
    }

    #[inline]
    pub fn slide_id(&self) -> u32 {
        self.slide_id
    }

    /// Add a text box at the given bounds.
    pub fn add_text_box(&mut self, text: &str, bounds: Bounds, style: TextStyle) {
        self.shapes.push(ShapeXml::TextBox {
            text: text.to_string(),
            bounds,
            style,
        });
    }

    /// Add a picture at the given bounds.
    ///
    /// The bytes become a media part when the package is saved.
    pub fn add_picture(
        &mut self,
        data: Vec<u8>,
        format: ImageFormat,
        bounds: Bounds,
        description: &str,
    ) {
        self.shapes.push(ShapeXml::Picture {
            data,
            format,
            bounds,
            description: description.to_string(),
        });
    }

    /// The number of shapes added so far.
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// The image blobs on this slide, in shape order.
    pub(crate) fn images(&self) -> Vec<(&[u8], ImageFormat)> {
        self.shapes
            .iter()
            .filter_map(|s| match s {
                ShapeXml::Picture { data, format, .. } => Some((data.as_slice(), *format)),
                _ => None,
            })
            .collect()
    }

    /// Generate the `p:sld` part XML.
    ///
    /// `image_rel_ids` carries one rId per picture, in shape order.
    pub(crate) fn to_xml(&self, image_rel_ids: &[String]) -> Result<String> {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(
            r#"<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" "#,
        );
        xml.push_str(r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#);
        xml.push_str(
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
        );

        xml.push_str("<p:cSld>");
        xml.push_str("<p:spTree>");

        // Group shape properties (required)
        xml.push_str("<p:nvGrpSpPr>");
        xml.push_str(r#"<p:cNvPr id="1" name=""/>"#);
        xml.push_str("<p:cNvGrpSpPr/>");
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvGrpSpPr>");
        xml.push_str("<p:grpSpPr>");
        xml.push_str("<a:xfrm>");
        xml.push_str(r#"<a:off x="0" y="0"/>"#);
        xml.push_str(r#"<a:ext cx="0" cy="0"/>"#);
        xml.push_str(r#"<a:chOff x="0" y="0"/>"#);
        xml.push_str(r#"<a:chExt cx="0" cy="0"/>"#);
        xml.push_str("</a:xfrm>");
        xml.push_str("</p:grpSpPr>");

        // IDs: 1 is the group shape, user shapes start at 2
        let mut image_counter = 0usize;
        for (i, shape) in self.shapes.iter().enumerate() {
            let shape_id = (i + 2) as u32;
            match shape {
                ShapeXml::TextBox {
                    text,
                    bounds,
                    style,
                } => write_text_box(&mut xml, shape_id, text, *bounds, style)?,
                ShapeXml::Picture {
                    bounds,
                    description,
                    ..
                } => {
                    let rel_id = image_rel_ids
                        .get(image_counter)
                        .map(|s| s.as_str())
                        .unwrap_or("rIdImagePlaceholder");
                    image_counter += 1;
                    write_picture(&mut xml, shape_id, *bounds, description, rel_id)?;
                }
            }
        }

        xml.push_str("</p:spTree>");
        xml.push_str("</p:cSld>");
        xml.push_str(r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>"#);
        xml.push_str("</p:sld>");

        Ok(xml)
    }
}

fn write_xfrm(xml: &mut String, bounds: Bounds) -> Result<()> {
    xml.push_str("<a:xfrm>");
    write!(xml, r#"<a:off x="{}" y="{}"/>"#, bounds.x, bounds.y)?;
    write!(xml, r#"<a:ext cx="{}" cy="{}"/>"#, bounds.cx, bounds.cy)?;
    xml.push_str("</a:xfrm>");
    Ok(())
}

fn write_text_box(
    xml: &mut String,
    shape_id: u32,
    text: &str,
    bounds: Bounds,
    style: &TextStyle,
) -> Result<()> {
    xml.push_str("<p:sp>");
    xml.push_str("<p:nvSpPr>");
    write!(
        xml,
        r#"<p:cNvPr id="{shape_id}" name="Text Box {shape_id}"/>"#
    )?;
    xml.push_str(r#"<p:cNvSpPr txBox="1"/>"#);
    xml.push_str("<p:nvPr/>");
    xml.push_str("</p:nvSpPr>");

    xml.push_str("<p:spPr>");
    write_xfrm(xml, bounds)?;
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
    xml.push_str("</p:spPr>");

    xml.push_str("<p:txBody>");
    if style.tight_frame {
        xml.push_str(r#"<a:bodyPr wrap="none" lIns="0" tIns="0" rIns="0" bIns="0" anchor="t"/>"#);
    } else {
        xml.push_str(r#"<a:bodyPr wrap="square" rtlCol="0"/>"#);
    }
    xml.push_str("<a:lstStyle/>");
    xml.push_str("<a:p>");

    if style.align != Align::Left || style.tight_frame {
        write!(xml, r#"<a:pPr algn="{}">"#, style.align.attr())?;
        if style.tight_frame {
            xml.push_str(r#"<a:lnSpc><a:spcPct val="100000"/></a:lnSpc>"#);
            xml.push_str(r#"<a:spcBef><a:spcPts val="0"/></a:spcBef>"#);
            xml.push_str(r#"<a:spcAft><a:spcPts val="0"/></a:spcAft>"#);
        }
        xml.push_str("</a:pPr>");
    }

    xml.push_str("<a:r>");
    xml.push_str(r#"<a:rPr lang="en-US" dirty="0""#);
    if let Some(size) = style.size_pt {
        write!(xml, r#" sz="{}""#, pt_to_centipoints(size))?;
    }
    if style.bold {
        xml.push_str(r#" b="1""#);
    }
    xml.push('>');
    if let Some(ref color) = style.color_hex {
        write!(
            xml,
            r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
            escape_xml(color)
        )?;
    }
    if let Some(ref font) = style.font {
        let face = escape_xml(font);
        write!(xml, r#"<a:latin typeface="{face}"/>"#)?;
        write!(xml, r#"<a:ea typeface="{face}"/>"#)?;
        write!(xml, r#"<a:cs typeface="{face}"/>"#)?;
    }
    xml.push_str("</a:rPr>");
    write!(xml, "<a:t>{}</a:t>", escape_xml(text))?;
    xml.push_str("</a:r>");
    xml.push_str("</a:p>");
    xml.push_str("</p:txBody>");
    xml.push_str("</p:sp>");
    Ok(())
}

fn write_picture(
    xml: &mut String,
    shape_id: u32,
    bounds: Bounds,
    description: &str,
    rel_id: &str,
) -> Result<()> {
    xml.push_str("<p:pic>");
    xml.push_str("<p:nvPicPr>");
    write!(
        xml,
        r#"<p:cNvPr id="{shape_id}" name="Picture {shape_id}" descr="{}"/>"#,
        escape_xml(description)
    )?;
    xml.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr>"#);
    xml.push_str("<p:nvPr/>");
    xml.push_str("</p:nvPicPr>");

    xml.push_str("<p:blipFill>");
    write!(xml, r#"<a:blip r:embed="{rel_id}"/>"#)?;
    xml.push_str("<a:stretch><a:fillRect/></a:stretch>");
    xml.push_str("</p:blipFill>");

    xml.push_str("<p:spPr>");
    write_xfrm(xml, bounds)?;
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
    xml.push_str("</p:spPr>");
    xml.push_str("</p:pic>");
    Ok(())
}

//! Layout shape inspection.
//!
//! A layout's `p:sp` elements are held as raw XML subtrees and parsed
//! lazily for the two things anchor resolution needs: the concatenated run
//! text and the `a:xfrm` bounding box.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::common::Result;
use crate::common::unit::Bounds;
use crate::common::xml::unescape_xml;

/// A text-bearing shape on a slide layout.
#[derive(Debug, Clone)]
pub struct LayoutShape {
    /// Raw XML bytes for this shape (`<p:sp>...</p:sp>`)
    xml_bytes: Vec<u8>,
    /// Concatenated run text (cached)
    text: Option<String>,
    /// Position and size (cached)
    bounds: Option<Bounds>,
}

impl LayoutShape {
    /// Create a new LayoutShape from the raw bytes of a `p:sp` subtree.
    pub fn new(xml_bytes: Vec<u8>) -> Self {
        Self {
            xml_bytes,
            text: None,
            bounds: None,
        }
    }

    /// Concatenated text of every `a:t` run in the shape, trimmed.
    pub fn text(&mut self) -> &str {
        if self.text.is_none() {
            self.text = Some(extract_run_text(&self.xml_bytes));
        }
        self.text.as_deref().unwrap()
    }

    /// The shape's bounding box from its first `a:xfrm` element.
    ///
    /// Shapes without an explicit transform (placeholders inheriting from
    /// the master) report a zero bounds.
    pub fn bounds(&mut self) -> Bounds {
        if self.bounds.is_none() {
            self.bounds = Some(parse_xfrm(&self.xml_bytes));
        }
        self.bounds.unwrap()
    }

    /// Raw XML bytes of the subtree.
    #[inline]
    pub fn xml_bytes(&self) -> &[u8] {
        &self.xml_bytes
    }
}

/// Collect the raw subtrees of every `p:sp` element in a part.
pub fn collect_sp_subtrees(xml: &[u8]) -> Result<Vec<LayoutShape>> {
    let mut reader = Reader::from_reader(xml);
    let mut shapes = Vec::new();

    loop {
        let pos_before = reader.buffer_position() as usize;
        match reader.read_event() {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"sp" => {
                reader.read_to_end(e.name())?;
                let pos_after = reader.buffer_position() as usize;
                shapes.push(LayoutShape::new(xml[pos_before..pos_after].to_vec()));
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(crate::common::Error::Xml(e.to_string())),
            _ => {}
        }
    }

    Ok(shapes)
}

fn extract_run_text(xml: &[u8]) -> String {
    let mut reader = Reader::from_reader(xml);
    let mut text = String::new();
    let mut in_t = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"t" => in_t = true,
            Ok(Event::End(ref e)) if e.local_name().as_ref() == b"t" => in_t = false,
            Ok(Event::Text(ref t)) if in_t => {
                text.push_str(&unescape_xml(&String::from_utf8_lossy(t)));
            }
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
    }

    text.trim().to_string()
}

fn parse_xfrm(xml: &[u8]) -> Bounds {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut bounds = Bounds::default();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                match e.local_name().as_ref() {
                    b"off" => {
                        for attr in e.attributes().flatten() {
                            let value: i64 = std::str::from_utf8(&attr.value)
                                .ok()
                                .and_then(|s| s.parse().ok())
                                .unwrap_or(0);
                            match attr.key.as_ref() {
                                b"x" => bounds.x = value,
                                b"y" => bounds.y = value,
                                _ => {}
                            }
                        }
                    }
                    b"ext" => {
                        for attr in e.attributes().flatten() {
                            let value: i64 = std::str::from_utf8(&attr.value)
                                .ok()
                                .and_then(|s| s.parse().ok())
                                .unwrap_or(0);
                            match attr.key.as_ref() {
                                b"cx" => bounds.cx = value,
                                b"cy" => bounds.cy = value,
                                _ => {}
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
    }

    bounds
}

#[cfg(test)]
mod tests {
    use super::*;

    const SP: &str = r#"<p:sp xmlns:p="x" xmlns:a="y">
        <p:spPr><a:xfrm><a:off x="914400" y="457200"/><a:ext cx="1828800" cy="914400"/></a:xfrm></p:spPr>
        <p:txBody><a:p><a:r><a:t>RRP : </a:t></a:r><a:r><a:t>EUR</a:t></a:r></a:p></p:txBody>
    </p:sp>"#;

    #[test]
    fn test_text_concatenates_runs() {
        let mut shape = LayoutShape::new(SP.as_bytes().to_vec());
        assert_eq!(shape.text(), "RRP : EUR");
    }

    #[test]
    fn test_bounds() {
        let mut shape = LayoutShape::new(SP.as_bytes().to_vec());
        let b = shape.bounds();
        assert_eq!(b, Bounds::new(914_400, 457_200, 1_828_800, 914_400));
    }

    #[test]
    fn test_collect_subtrees() {
        let xml = format!(r#"<p:spTree xmlns:p="x" xmlns:a="y">{SP}{SP}</p:spTree>"#);
        let shapes = collect_sp_subtrees(xml.as_bytes()).unwrap();
        assert_eq!(shapes.len(), 2);
    }

    #[test]
    fn test_shape_without_xfrm_is_zero() {
        let xml = br#"<p:sp><p:spPr/><p:txBody><a:p><a:r><a:t>COLORWAY</a:t></a:r></a:p></p:txBody></p:sp>"#;
        let mut shape = LayoutShape::new(xml.to_vec());
        assert_eq!(shape.bounds(), Bounds::default());
        assert_eq!(shape.text(), "COLORWAY");
    }
}

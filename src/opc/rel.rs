//! Relationship-related objects for OPC packages.
//!
//! Each part (and the package itself) may own a `.rels` file mapping
//! relationship IDs to target parts or external URLs.

use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::common::{Error, Result};
use crate::opc::packuri::PackURI;

/// A single relationship from a source part to a target.
#[derive(Debug, Clone)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,
    /// Relationship type URI
    reltype: String,
    /// Target reference - either a part URI relative to the source, or an
    /// external URL
    target_ref: String,
    /// Base URI for resolving relative references
    base_uri: String,
    /// Whether this is an external relationship
    is_external: bool,
}

impl Relationship {
    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }

    /// The absolute target partname for internal relationships.
    pub fn target_partname(&self) -> Result<PackURI> {
        if self.is_external {
            return Err(Error::InvalidPackUri(
                "cannot resolve partname of an external relationship".to_string(),
            ));
        }
        PackURI::from_rel_ref(&self.base_uri, &self.target_ref)
    }
}

/// Collection of relationships from a single source part.
#[derive(Debug, Clone)]
pub struct Relationships {
    /// Base URI for resolving relative references
    base_uri: String,
    /// Map of relationship ID to Relationship
    rels: HashMap<String, Relationship>,
}

impl Relationships {
    /// Create a new empty relationships collection.
    pub fn new<S: Into<String>>(base_uri: S) -> Self {
        Self {
            base_uri: base_uri.into(),
            rels: HashMap::new(),
        }
    }

    /// Parse a `.rels` part.
    ///
    /// `base_uri` is the directory of the source part the `.rels` belongs
    /// to (e.g. "/ppt" for "/ppt/_rels/presentation.xml.rels").
    pub fn from_xml(base_uri: &str, xml: &[u8]) -> Result<Self> {
        let mut rels = Self::new(base_uri);
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let mut r_id = None;
                    let mut reltype = None;
                    let mut target = None;
                    let mut external = false;
                    for attr in e.attributes().flatten() {
                        let value = String::from_utf8_lossy(&attr.value).into_owned();
                        match attr.key.as_ref() {
                            b"Id" => r_id = Some(value),
                            b"Type" => reltype = Some(value),
                            b"Target" => target = Some(value),
                            b"TargetMode" => external = value == "External",
                            _ => {}
                        }
                    }
                    if let (Some(r_id), Some(reltype), Some(target)) = (r_id, reltype, target) {
                        rels.add_relationship(reltype, target, r_id, external);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::Xml(e.to_string())),
                _ => {}
            }
        }

        Ok(rels)
    }

    /// Add a relationship with an explicit ID.
    pub fn add_relationship(
        &mut self,
        reltype: String,
        target_ref: String,
        r_id: String,
        is_external: bool,
    ) {
        let rel = Relationship {
            r_id: r_id.clone(),
            reltype,
            target_ref,
            base_uri: self.base_uri.clone(),
            is_external,
        };
        self.rels.insert(r_id, rel);
    }

    /// Get a relationship by its ID.
    #[inline]
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.get(r_id)
    }

    /// Get or add an internal relationship to a target, returning its rId.
    ///
    /// If a relationship of the given type to the target already exists,
    /// its ID is reused; otherwise a new one is created with the next
    /// available rId.
    pub fn get_or_add(&mut self, reltype: &str, target_ref: &str) -> String {
        for rel in self.rels.values() {
            if rel.reltype == reltype && rel.target_ref == target_ref && !rel.is_external {
                return rel.r_id.clone();
            }
        }
        let r_id = self.next_r_id();
        self.add_relationship(
            reltype.to_string(),
            target_ref.to_string(),
            r_id.clone(),
            false,
        );
        r_id
    }

    /// The next available relationship ID.
    ///
    /// Generates IDs in the "rId1", "rId2", ... format, filling gaps left by
    /// removed relationships.
    pub fn next_r_id(&self) -> String {
        let mut used: Vec<u32> = self
            .rels
            .keys()
            .filter_map(|r_id| r_id.strip_prefix("rId").and_then(|n| n.parse().ok()))
            .collect();
        used.sort_unstable();

        let mut next = 1u32;
        for &num in &used {
            match num.cmp(&next) {
                std::cmp::Ordering::Equal => next += 1,
                std::cmp::Ordering::Greater => break,
                std::cmp::Ordering::Less => {}
            }
        }
        format!("rId{next}")
    }

    /// All relationships of a given type.
    pub fn of_type<'a>(&'a self, reltype: &'a str) -> impl Iterator<Item = &'a Relationship> {
        self.rels.values().filter(move |rel| rel.reltype == reltype)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// Serialize to `.rels` XML, sorted by numeric rId for deterministic
    /// output.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(1024);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        xml.push('\n');

        let mut rels: Vec<&Relationship> = self.rels.values().collect();
        rels.sort_by_key(|rel| {
            rel.r_id
                .strip_prefix("rId")
                .and_then(|n| n.parse::<u32>().ok())
                .unwrap_or(u32::MAX)
        });

        for rel in rels {
            let target_mode = if rel.is_external {
                r#" TargetMode="External""#
            } else {
                ""
            };
            xml.push_str(&format!(
                r#"  <Relationship Id="{}" Type="{}" Target="{}"{}/>"#,
                crate::common::xml::escape_xml(&rel.r_id),
                crate::common::xml::escape_xml(&rel.reltype),
                crate::common::xml::escape_xml(&rel.target_ref),
                target_mode
            ));
            xml.push('\n');
        }

        xml.push_str("</Relationships>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opc::constants::rel_type;

    #[test]
    fn test_next_r_id_fills_gaps() {
        let mut rels = Relationships::new("/ppt");
        rels.add_relationship("t".into(), "a.xml".into(), "rId1".into(), false);
        rels.add_relationship("t".into(), "b.xml".into(), "rId3".into(), false);
        assert_eq!(rels.next_r_id(), "rId2");
    }

    #[test]
    fn test_get_or_add_reuses_existing() {
        let mut rels = Relationships::new("/ppt/slides");
        let a = rels.get_or_add(rel_type::IMAGE, "../media/image1.png");
        let b = rels.get_or_add(rel_type::IMAGE, "../media/image1.png");
        assert_eq!(a, b);
        let c = rels.get_or_add(rel_type::IMAGE, "../media/image2.png");
        assert_ne!(a, c);
    }

    #[test]
    fn test_parse_round_trip() {
        let mut rels = Relationships::new("/ppt");
        rels.add_relationship(
            rel_type::SLIDE.into(),
            "slides/slide1.xml".into(),
            "rId2".into(),
            false,
        );
        rels.add_relationship(
            rel_type::SLIDE_MASTER.into(),
            "slideMasters/slideMaster1.xml".into(),
            "rId1".into(),
            false,
        );

        let parsed = Relationships::from_xml("/ppt", rels.to_xml().as_bytes()).unwrap();
        assert_eq!(parsed.len(), 2);
        let slide = parsed.get("rId2").unwrap();
        assert_eq!(slide.reltype(), rel_type::SLIDE);
        assert_eq!(
            slide.target_partname().unwrap().as_str(),
            "/ppt/slides/slide1.xml"
        );
    }

    #[test]
    fn test_external_relationship_has_no_partname() {
        let mut rels = Relationships::new("/ppt");
        rels.add_relationship(
            "hyperlink".into(),
            "https://example.com".into(),
            "rId1".into(),
            true,
        );
        assert!(rels.get("rId1").unwrap().target_partname().is_err());
    }
}

//! The `[Content_Types].xml` manifest.
//!
//! Maps file extensions (Default entries) and individual part names
//! (Override entries) to content types. A template's manifest is parsed,
//! extended with entries for added slides and media, and written back out.

use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::common::xml::escape_xml;
use crate::common::{Error, Result};
use crate::opc::constants::content_type as ct;
use crate::opc::packuri::PackURI;

/// In-memory model of `[Content_Types].xml`.
#[derive(Debug, Clone)]
pub struct ContentTypes {
    /// Default content types by extension (lowercased)
    defaults: HashMap<String, String>,
    /// Override content types by partname
    overrides: HashMap<String, String>,
}

impl ContentTypes {
    /// A minimal manifest with the standard rels/xml defaults.
    pub fn new() -> Self {
        let mut defaults = HashMap::new();
        defaults.insert("rels".to_string(), ct::OPC_RELATIONSHIPS.to_string());
        defaults.insert("xml".to_string(), ct::XML.to_string());
        Self {
            defaults,
            overrides: HashMap::new(),
        }
    }

    /// Parse an existing `[Content_Types].xml` part.
    pub fn from_xml(xml: &[u8]) -> Result<Self> {
        let mut cti = Self {
            defaults: HashMap::new(),
            overrides: HashMap::new(),
        };
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    match e.local_name().as_ref() {
                        b"Default" => {
                            let mut ext = None;
                            let mut ctype = None;
                            for attr in e.attributes().flatten() {
                                let value = String::from_utf8_lossy(&attr.value).into_owned();
                                match attr.key.as_ref() {
                                    b"Extension" => ext = Some(value.to_ascii_lowercase()),
                                    b"ContentType" => ctype = Some(value),
                                    _ => {}
                                }
                            }
                            if let (Some(ext), Some(ctype)) = (ext, ctype) {
                                cti.defaults.insert(ext, ctype);
                            }
                        }
                        b"Override" => {
                            let mut part = None;
                            let mut ctype = None;
                            for attr in e.attributes().flatten() {
                                let value = String::from_utf8_lossy(&attr.value).into_owned();
                                match attr.key.as_ref() {
                                    b"PartName" => part = Some(value),
                                    b"ContentType" => ctype = Some(value),
                                    _ => {}
                                }
                            }
                            if let (Some(part), Some(ctype)) = (part, ctype) {
                                cti.overrides.insert(part, ctype);
                            }
                        }
                        _ => {}
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::Xml(e.to_string())),
                _ => {}
            }
        }

        Ok(cti)
    }

    /// Register a Default mapping for an extension.
    pub fn add_default(&mut self, ext: &str, content_type: &str) {
        self.defaults
            .insert(ext.to_ascii_lowercase(), content_type.to_string());
    }

    /// Register an Override mapping for a specific part.
    pub fn add_override(&mut self, partname: &PackURI, content_type: &str) {
        self.overrides
            .insert(partname.as_str().to_string(), content_type.to_string());
    }

    /// Look up the content type for a part, Override first, then the
    /// extension Default.
    pub fn content_type_for(&self, partname: &PackURI) -> Option<&str> {
        self.overrides
            .get(partname.as_str())
            .or_else(|| self.defaults.get(&partname.ext().to_ascii_lowercase()))
            .map(|s| s.as_str())
    }

    /// All part names carrying a given Override content type.
    pub fn parts_with_type<'a>(&'a self, content_type: &'a str) -> impl Iterator<Item = &'a str> {
        self.overrides
            .iter()
            .filter(move |(_, ct)| ct.as_str() == content_type)
            .map(|(part, _)| part.as_str())
    }

    /// Generate the XML for `[Content_Types].xml`, sorted for deterministic
    /// output.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(4096);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        );
        xml.push('\n');

        let mut exts: Vec<_> = self.defaults.keys().collect();
        exts.sort();
        for ext in exts {
            xml.push_str(&format!(
                r#"  <Default Extension="{}" ContentType="{}"/>"#,
                escape_xml(ext),
                escape_xml(&self.defaults[ext])
            ));
            xml.push('\n');
        }

        let mut partnames: Vec<_> = self.overrides.keys().collect();
        partnames.sort();
        for partname in partnames {
            xml.push_str(&format!(
                r#"  <Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(partname),
                escape_xml(&self.overrides[partname])
            ));
            xml.push('\n');
        }

        xml.push_str("</Types>");
        xml
    }
}

impl Default for ContentTypes {
    fn default() -> Self {
        Self::new()
    }
}

//! The template presentation package.
//!
//! `TemplatePackage` opens a template `.pptx`, exposes its slide layouts in
//! master order, and accumulates new slides. On save it appends the slide
//! parts, their relationships and media, extends the content-type manifest,
//! rewrites `presentation.xml`, and serializes the whole archive once.

use std::collections::HashMap;
use std::io::Cursor;

use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};

use crate::common::{Error, Result};
use crate::opc::constants::{content_type as ct, rel_type};
use crate::opc::packuri::CONTENT_TYPES_URI;
use crate::opc::{ContentTypes, PackURI, PhysPkgReader, PhysPkgWriter, Relationships};
use crate::pptx::layout::SlideLayout;
use crate::pptx::slide::SlideBuilder;

/// First slide ID value in a `p:sldIdLst`.
const MIN_SLIDE_ID: u32 = 256;

/// A template `.pptx` package with pending slides.
pub struct TemplatePackage {
    /// Parts in archive order
    parts: Vec<(String, Vec<u8>)>,
    /// Member name -> index into `parts`
    index: HashMap<String, usize>,
    content_types: ContentTypes,
    /// The main presentation part, e.g. "/ppt/presentation.xml"
    pres_uri: PackURI,
    pres_rels: Relationships,
    /// Slide layouts in master `sldLayoutIdLst` order
    layouts: Vec<SlideLayout>,
    /// Master part names, for watermark stripping
    master_uris: Vec<PackURI>,
    /// Number of slides already in the template
    existing_slide_count: usize,
    /// Highest slide ID already in use
    next_slide_id: u32,
    /// Slides waiting to be appended, with their layout index
    pending: Vec<(SlideBuilder, usize)>,
}

impl TemplatePackage {
    /// Open a template package from bytes.
    ///
    /// Fails if the archive is unreadable or the presentation structure
    /// (main part, masters, layouts) cannot be resolved.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let phys = PhysPkgReader::from_bytes(data)?;
        let mut parts = Vec::with_capacity(phys.len());
        let mut index = HashMap::with_capacity(phys.len());
        for (name, blob) in phys.members() {
            index.insert(name.to_string(), parts.len());
            parts.push((name.to_string(), blob.to_vec()));
        }

        fn blob_of<'a>(
            parts: &'a [(String, Vec<u8>)],
            index: &HashMap<String, usize>,
            uri: &PackURI,
        ) -> Result<&'a [u8]> {
            index
                .get(uri.membername())
                .map(|&i| parts[i].1.as_slice())
                .ok_or_else(|| Error::PartNotFound(uri.to_string()))
        }

        let content_types = ContentTypes::from_xml(blob_of(
            &parts,
            &index,
            &PackURI::new(CONTENT_TYPES_URI)?,
        )?)?;

        // Locate the main presentation part through the package rels
        let pkg_rels_uri = PackURI::new("/_rels/.rels")?;
        let pkg_rels = Relationships::from_xml("/", blob_of(&parts, &index, &pkg_rels_uri)?)?;
        let pres_uri = pkg_rels
            .of_type(rel_type::OFFICE_DOCUMENT)
            .next()
            .ok_or_else(|| Error::Template("no main presentation part".to_string()))?
            .target_partname()?;

        let pres_xml = blob_of(&parts, &index, &pres_uri)?;
        let pres_rels = Relationships::from_xml(
            pres_uri.base_uri(),
            blob_of(&parts, &index, &pres_uri.rels_uri()?)?,
        )?;

        // Masters in sldMasterIdLst order, layouts in each master's
        // sldLayoutIdLst order
        let master_rids = collect_id_list_rids(pres_xml, b"sldMasterIdLst")?;
        let mut master_uris = Vec::new();
        let mut layouts = Vec::new();
        for rid in &master_rids {
            let master_uri = pres_rels
                .get(rid)
                .ok_or_else(|| Error::Template(format!("unresolved master rel {rid}")))?
                .target_partname()?;
            let master_xml = blob_of(&parts, &index, &master_uri)?;
            let master_rels = Relationships::from_xml(
                master_uri.base_uri(),
                blob_of(&parts, &index, &master_uri.rels_uri()?)?,
            )?;
            for layout_rid in collect_id_list_rids(master_xml, b"sldLayoutIdLst")? {
                let layout_uri = master_rels
                    .get(&layout_rid)
                    .ok_or_else(|| {
                        Error::Template(format!("unresolved layout rel {layout_rid}"))
                    })?
                    .target_partname()?;
                layouts.push(SlideLayout::from_xml(
                    layout_uri.clone(),
                    blob_of(&parts, &index, &layout_uri)?,
                )?);
            }
            master_uris.push(master_uri);
        }
        if layouts.is_empty() {
            return Err(Error::Template("template has no slide layouts".to_string()));
        }

        let existing_ids = collect_slide_ids(pres_xml)?;
        let next_slide_id = existing_ids
            .iter()
            .copied()
            .max()
            .unwrap_or(MIN_SLIDE_ID - 1)
            .max(MIN_SLIDE_ID - 1)
            + 1;

        Ok(Self {
            parts,
            index,
            content_types,
            pres_uri,
            pres_rels,
            layouts,
            master_uris,
            existing_slide_count: existing_ids.len(),
            next_slide_id,
            pending: Vec::new(),
        })
    }

    /// Slide layouts in master order.
    pub fn layouts(&self) -> &[SlideLayout] {
        &self.layouts
    }

    pub fn layouts_mut(&mut self) -> &mut [SlideLayout] {
        &mut self.layouts
    }

    /// Number of slides the template already contains.
    pub fn existing_slide_count(&self) -> usize {
        self.existing_slide_count
    }

    /// Number of slides waiting to be appended.
    pub fn pending_slide_count(&self) -> usize {
        self.pending.len()
    }

    /// Clear the run text of any master or layout shape whose text contains
    /// one of `markers` (case-insensitive).
    ///
    /// Affected layout models are re-parsed so later shape inspection sees
    /// the cleared text.
    pub fn strip_vendor_watermarks(&mut self, markers: &[&str]) -> Result<()> {
        let targets: Vec<PackURI> = self
            .master_uris
            .iter()
            .cloned()
            .chain(self.layouts.iter().map(|l| l.partname().clone()))
            .collect();

        for uri in targets {
            let Some(&part_idx) = self.index.get(uri.membername()) else {
                continue;
            };
            if let Some(stripped) = strip_marked_shape_text(&self.parts[part_idx].1, markers)? {
                self.parts[part_idx].1 = stripped;
                if let Some(layout_idx) =
                    self.layouts.iter().position(|l| l.partname() == &uri)
                {
                    let reparsed =
                        SlideLayout::from_xml(uri.clone(), &self.parts[part_idx].1)?;
                    self.layouts[layout_idx] = reparsed;
                }
            }
        }
        Ok(())
    }

    /// Ensure `presentation.xml` carries a `p:hf` element with
    /// `sldNum="1"` so rendered decks show slide numbers.
    pub fn ensure_slide_number(&mut self) -> Result<()> {
        let pres_member = self.pres_uri.membername().to_string();
        let &part_idx = self
            .index
            .get(&pres_member)
            .ok_or_else(|| Error::PartNotFound(self.pres_uri.to_string()))?;
        let rewritten = rewrite_presentation_xml(&self.parts[part_idx].1, &[], true)?;
        self.parts[part_idx].1 = rewritten;
        Ok(())
    }

    /// Append a new slide built from the layout at `layout_index`.
    pub fn add_slide(&mut self, layout_index: usize) -> &mut SlideBuilder {
        let slide = SlideBuilder::new(self.next_slide_id);
        self.next_slide_id += 1;
        self.pending.push((slide, layout_index));
        &mut self.pending.last_mut().unwrap().0
    }

    /// Serialize the package with all pending slides appended.
    pub fn save(mut self) -> Result<Vec<u8>> {
        let mut slide_num = self.max_part_idx("ppt/slides/slide");
        let mut image_num = self.max_part_idx("ppt/media/image");

        let pending = std::mem::take(&mut self.pending);
        let mut new_parts: Vec<(String, Vec<u8>)> = Vec::new();
        let mut sld_id_entries: Vec<(u32, String)> = Vec::new();

        for (slide, layout_index) in &pending {
            let layout_uri = self
                .layouts
                .get(*layout_index)
                .ok_or_else(|| Error::Template(format!("no layout at index {layout_index}")))?
                .partname()
                .clone();

            slide_num += 1;
            let slide_uri = PackURI::new(format!("/ppt/slides/slide{slide_num}.xml"))?;
            let mut slide_rels = Relationships::new(slide_uri.base_uri());
            slide_rels.get_or_add(
                rel_type::SLIDE_LAYOUT,
                &layout_uri.relative_ref(slide_uri.base_uri()),
            );

            // Media parts, one per picture, rIds in shape order
            let mut image_rel_ids = Vec::new();
            for (data, format) in slide.images() {
                image_num += 1;
                let media_uri = PackURI::new(format!(
                    "/ppt/media/image{image_num}.{}",
                    format.extension()
                ))?;
                self.content_types
                    .add_default(format.extension(), format.mime_type());
                image_rel_ids.push(slide_rels.get_or_add(
                    rel_type::IMAGE,
                    &media_uri.relative_ref(slide_uri.base_uri()),
                ));
                new_parts.push((media_uri.membername().to_string(), data.to_vec()));
            }

            let slide_xml = slide.to_xml(&image_rel_ids)?;
            self.content_types.add_override(&slide_uri, ct::PML_SLIDE);
            new_parts.push((slide_uri.membername().to_string(), slide_xml.into_bytes()));
            new_parts.push((
                slide_uri.rels_uri()?.membername().to_string(),
                slide_rels.to_xml().into_bytes(),
            ));

            let pres_rid = self.pres_rels.get_or_add(
                rel_type::SLIDE,
                &slide_uri.relative_ref(self.pres_uri.base_uri()),
            );
            sld_id_entries.push((slide.slide_id(), pres_rid));
        }

        // Rewrite presentation.xml with the appended slide IDs
        let pres_member = self.pres_uri.membername().to_string();
        let &pres_idx = self
            .index
            .get(&pres_member)
            .ok_or_else(|| Error::PartNotFound(self.pres_uri.to_string()))?;
        self.parts[pres_idx].1 =
            rewrite_presentation_xml(&self.parts[pres_idx].1, &sld_id_entries, false)?;

        // Refresh the bookkeeping parts
        self.set_part(
            PackURI::new(CONTENT_TYPES_URI)?.membername(),
            self.content_types.to_xml().into_bytes(),
        );
        self.set_part(
            self.pres_uri.rels_uri()?.membername(),
            self.pres_rels.to_xml().into_bytes(),
        );

        // Existing parts keep their archive order; new parts are appended
        let mut writer = PhysPkgWriter::new();
        for (name, blob) in &self.parts {
            writer.write_member(name, blob)?;
        }
        for (name, blob) in &new_parts {
            writer.write_member(name, blob)?;
        }
        writer.finish()
    }

    fn set_part(&mut self, membername: &str, blob: Vec<u8>) {
        match self.index.get(membername) {
            Some(&i) => self.parts[i].1 = blob,
            None => {
                self.index
                    .insert(membername.to_string(), self.parts.len());
                self.parts.push((membername.to_string(), blob));
            }
        }
    }

    /// Highest numeric suffix among parts whose member name starts with
    /// `prefix` (e.g. "ppt/slides/slide").
    fn max_part_idx(&self, prefix: &str) -> u32 {
        self.parts
            .iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .filter_map(|(name, _)| {
                PackURI::from_membername(name)
                    .ok()
                    .and_then(|uri| uri.idx())
            })
            .max()
            .unwrap_or(0)
    }
}

/// Collect the `r:id` attributes of an ID list element
/// (`p:sldMasterIdLst` or `p:sldLayoutIdLst`), in document order.
fn collect_id_list_rids(xml: &[u8], list_local: &[u8]) -> Result<Vec<String>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut rids = Vec::new();
    let mut in_list = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == list_local => in_list = true,
            Ok(Event::End(ref e)) if e.local_name().as_ref() == list_local => in_list = false,
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) if in_list => {
                for attr in e.attributes().flatten() {
                    // qualified key "r:id"
                    if attr.key.as_ref() == b"r:id" {
                        rids.push(String::from_utf8_lossy(&attr.value).into_owned());
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e.to_string())),
            _ => {}
        }
    }

    Ok(rids)
}

/// Collect the numeric `id` attributes of the `p:sldIdLst` entries.
fn collect_slide_ids(xml: &[u8]) -> Result<Vec<u32>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut ids = Vec::new();
    let mut in_list = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"sldIdLst" => in_list = true,
            Ok(Event::End(ref e)) if e.local_name().as_ref() == b"sldIdLst" => in_list = false,
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if in_list && e.local_name().as_ref() == b"sldId" =>
            {
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"id" {
                        if let Ok(id) = String::from_utf8_lossy(&attr.value).parse() {
                            ids.push(id);
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e.to_string())),
            _ => {}
        }
    }

    Ok(ids)
}

/// Rewrite `presentation.xml`: append `(slide_id, rId)` entries to the
/// `p:sldIdLst` and, when `ensure_hf` is set, force a `p:hf` element with
/// `sldNum="1"`.
fn rewrite_presentation_xml(
    xml: &[u8],
    new_slides: &[(u32, String)],
    ensure_hf: bool,
) -> Result<Vec<u8>> {
    // Presence scan first so missing elements can be injected in one pass
    let mut has_sld_id_lst = false;
    let mut has_hf = false;
    let mut prefix = String::from("p");
    {
        let mut reader = Reader::from_reader(xml);
        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    match e.local_name().as_ref() {
                        b"sldIdLst" => has_sld_id_lst = true,
                        b"hf" => has_hf = true,
                        b"presentation" => {
                            let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                            if let Some((p, _)) = name.split_once(':') {
                                prefix = p.to_string();
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
    }

    let sld_id_name = format!("{prefix}:sldId");
    let sld_id_lst_name = format!("{prefix}:sldIdLst");
    let hf_name = format!("{prefix}:hf");

    let write_sld_ids = |writer: &mut Writer<Cursor<Vec<u8>>>| -> Result<()> {
        for (id, rid) in new_slides {
            let mut el = BytesStart::new(sld_id_name.as_str());
            el.push_attribute(Attribute::from(("id", id.to_string().as_str())));
            el.push_attribute(Attribute::from(("r:id", rid.as_str())));
            writer
                .write_event(Event::Empty(el))
                .map_err(|e| Error::Xml(e.to_string()))?;
        }
        Ok(())
    };

    let mut reader = Reader::from_reader(xml);
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    loop {
        let event = reader.read_event().map_err(|e| Error::Xml(e.to_string()))?;
        match event {
            Event::Eof => break,
            Event::End(ref e) if e.local_name().as_ref() == b"sldIdLst" => {
                write_sld_ids(&mut writer)?;
                writer
                    .write_event(event.borrow())
                    .map_err(|e| Error::Xml(e.to_string()))?;
            }
            Event::Empty(ref e) if e.local_name().as_ref() == b"sldIdLst" => {
                // Expand an empty list so entries can be appended
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                writer
                    .write_event(Event::Start(BytesStart::new(name.as_str())))
                    .map_err(|err| Error::Xml(err.to_string()))?;
                write_sld_ids(&mut writer)?;
                writer
                    .write_event(Event::End(quick_xml::events::BytesEnd::new(
                        name.as_str(),
                    )))
                    .map_err(|err| Error::Xml(err.to_string()))?;
            }
            Event::Empty(ref e) | Event::Start(ref e)
                if ensure_hf && e.local_name().as_ref() == b"hf" =>
            {
                let mut el = BytesStart::new(
                    String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                );
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() != b"sldNum" {
                        el.push_attribute(attr);
                    }
                }
                el.push_attribute(Attribute::from(("sldNum", "1")));
                let rebuilt = if matches!(event, Event::Empty(_)) {
                    Event::Empty(el)
                } else {
                    Event::Start(el)
                };
                writer
                    .write_event(rebuilt)
                    .map_err(|e| Error::Xml(e.to_string()))?;
            }
            Event::End(ref e)
                if e.local_name().as_ref() == b"sldMasterIdLst"
                    && !has_sld_id_lst
                    && !new_slides.is_empty() =>
            {
                writer
                    .write_event(event.borrow())
                    .map_err(|err| Error::Xml(err.to_string()))?;
                writer
                    .write_event(Event::Start(BytesStart::new(sld_id_lst_name.as_str())))
                    .map_err(|err| Error::Xml(err.to_string()))?;
                write_sld_ids(&mut writer)?;
                writer
                    .write_event(Event::End(quick_xml::events::BytesEnd::new(
                        sld_id_lst_name.as_str(),
                    )))
                    .map_err(|err| Error::Xml(err.to_string()))?;
            }
            Event::End(ref e)
                if ensure_hf && !has_hf && e.local_name().as_ref() == b"presentation" =>
            {
                let mut el = BytesStart::new(hf_name.as_str());
                el.push_attribute(Attribute::from(("sldNum", "1")));
                writer
                    .write_event(Event::Empty(el))
                    .map_err(|err| Error::Xml(err.to_string()))?;
                writer
                    .write_event(event.borrow())
                    .map_err(|err| Error::Xml(err.to_string()))?;
            }
            ref other => {
                writer
                    .write_event(other.borrow())
                    .map_err(|e| Error::Xml(e.to_string()))?;
            }
        }
    }

    Ok(writer.into_inner().into_inner())
}

/// Clear the run text of shapes containing any of `markers`.
///
/// Returns `None` when no shape matched (the part is unchanged).
fn strip_marked_shape_text(xml: &[u8], markers: &[&str]) -> Result<Option<Vec<u8>>> {
    let mut reader = Reader::from_reader(xml);
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    let mut changed = false;
    // Events buffered for the p:sp subtree currently being read
    let mut sp_buffer: Vec<Event<'static>> = Vec::new();
    let mut sp_depth = 0usize;
    let mut sp_text = String::new();

    let flush = |writer: &mut Writer<Cursor<Vec<u8>>>,
                 buffer: &mut Vec<Event<'static>>,
                 clear_text: bool|
     -> Result<()> {
        let mut in_t = false;
        for ev in buffer.drain(..) {
            match &ev {
                Event::Start(e) if e.local_name().as_ref() == b"t" => in_t = true,
                Event::End(e) if e.local_name().as_ref() == b"t" => in_t = false,
                Event::Text(_) if clear_text && in_t => continue,
                _ => {}
            }
            writer
                .write_event(ev)
                .map_err(|e| Error::Xml(e.to_string()))?;
        }
        Ok(())
    };

    loop {
        let event = reader.read_event().map_err(|e| Error::Xml(e.to_string()))?;
        if sp_depth > 0 {
            match &event {
                Event::Start(_) => sp_depth += 1,
                Event::End(_) => sp_depth -= 1,
                Event::Text(t) => {
                    // Only a:t text matters, but over-collecting is harmless
                    // for the substring check
                    sp_text.push_str(&String::from_utf8_lossy(t));
                }
                Event::Eof => {
                    return Err(Error::Xml("unterminated shape element".to_string()));
                }
                _ => {}
            }
            sp_buffer.push(event.into_owned());
            if sp_depth == 0 {
                let marked = {
                    let upper = sp_text.to_uppercase();
                    markers.iter().any(|m| upper.contains(m))
                };
                if marked {
                    changed = true;
                }
                flush(&mut writer, &mut sp_buffer, marked)?;
                sp_text.clear();
            }
            continue;
        }

        match event {
            Event::Eof => break,
            Event::Start(e) if e.local_name().as_ref() == b"sp" => {
                sp_depth = 1;
                sp_buffer.push(Event::Start(e).into_owned());
            }
            other => {
                writer
                    .write_event(other.borrow())
                    .map_err(|e| Error::Xml(e.to_string()))?;
            }
        }
    }

    if changed {
        Ok(Some(writer.into_inner().into_inner()))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRES: &str = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" "#,
        r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
        r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#,
        r#"<p:sldIdLst><p:sldId id="256" r:id="rId2"/></p:sldIdLst>"#,
        r#"<p:sldSz cx="12192000" cy="6858000"/>"#,
        r#"</p:presentation>"#
    );

    #[test]
    fn test_collect_slide_ids() {
        let ids = collect_slide_ids(PRES.as_bytes()).unwrap();
        assert_eq!(ids, vec![256]);
    }

    #[test]
    fn test_collect_master_rids() {
        let rids = collect_id_list_rids(PRES.as_bytes(), b"sldMasterIdLst").unwrap();
        assert_eq!(rids, vec!["rId1".to_string()]);
    }

    #[test]
    fn test_rewrite_appends_slide_ids() {
        let out = rewrite_presentation_xml(
            PRES.as_bytes(),
            &[(257, "rId7".to_string()), (258, "rId8".to_string())],
            false,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(r#"<p:sldId id="257" r:id="rId7"/>"#));
        assert!(text.contains(r#"<p:sldId id="258" r:id="rId8"/>"#));
        // Appended inside the list, after the existing entry
        let existing = text.find(r#"id="256""#).unwrap();
        let added = text.find(r#"id="257""#).unwrap();
        let close = text.find("</p:sldIdLst>").unwrap();
        assert!(existing < added && added < close);
    }

    #[test]
    fn test_rewrite_injects_hf() {
        let out = rewrite_presentation_xml(PRES.as_bytes(), &[], true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(r#"<p:hf sldNum="1"/>"#));
    }

    #[test]
    fn test_rewrite_overrides_existing_hf() {
        let pres = PRES.replace("</p:presentation>", r#"<p:hf sldNum="0" ftr="0"/></p:presentation>"#);
        let out = rewrite_presentation_xml(pres.as_bytes(), &[], true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(r#"sldNum="1""#));
        assert!(text.contains(r#"ftr="0""#));
        assert!(!text.contains(r#"sldNum="0""#));
    }

    #[test]
    fn test_rewrite_creates_missing_sld_id_lst() {
        let pres = PRES.replace(r#"<p:sldIdLst><p:sldId id="256" r:id="rId2"/></p:sldIdLst>"#, "");
        let out =
            rewrite_presentation_xml(pres.as_bytes(), &[(256, "rId9".to_string())], false)
                .unwrap();
        let text = String::from_utf8(out).unwrap();
        let masters = text.find("</p:sldMasterIdLst>").unwrap();
        let list = text.find("<p:sldIdLst>").unwrap();
        let size = text.find("<p:sldSz").unwrap();
        assert!(masters < list && list < size);
        assert!(text.contains(r#"<p:sldId id="256" r:id="rId9"/>"#));
    }

    #[test]
    fn test_strip_marked_shape_text() {
        let layout = concat!(
            r#"<p:sldLayout xmlns:p="x" xmlns:a="y"><p:cSld><p:spTree>"#,
            r#"<p:sp><p:txBody><a:p><a:r><a:t>Erstellt durch Vorlagenbauer</a:t></a:r></a:p></p:txBody></p:sp>"#,
            r#"<p:sp><p:txBody><a:p><a:r><a:t>COLORWAY</a:t></a:r></a:p></p:txBody></p:sp>"#,
            r#"</p:spTree></p:cSld></p:sldLayout>"#
        );
        let out = strip_marked_shape_text(layout.as_bytes(), &["VORLAGENBAUER", "ERSTELLT DURCH"])
            .unwrap()
            .expect("should be rewritten");
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("Vorlagenbauer"));
        assert!(text.contains("COLORWAY"));
        assert!(text.contains("<a:t></a:t>") || text.contains("<a:t/>"));
    }

    #[test]
    fn test_strip_without_match_is_none() {
        let layout = r#"<p:sldLayout><p:cSld><p:spTree><p:sp><p:txBody><a:p><a:r><a:t>RRP</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld></p:sldLayout>"#;
        assert!(
            strip_marked_shape_text(layout.as_bytes(), &["VORLAGENBAUER"])
                .unwrap()
                .is_none()
        );
    }
}

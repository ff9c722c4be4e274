//! Physical package access: the ZIP archive under an OPC package.
//!
//! Members are decompressed eagerly into an ordered list so a template can
//! be rewritten with its original member order preserved, which keeps
//! repeated runs byte-stable.

use std::collections::HashMap;
use std::io::{Cursor, Read, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::common::{Error, Result};
use crate::opc::packuri::PackURI;

/// Physical package reader over a ZIP-based OPC package.
pub struct PhysPkgReader {
    /// Members in archive order
    members: Vec<(String, Vec<u8>)>,
    /// Member name -> index into `members`
    index: HashMap<String, usize>,
}

impl PhysPkgReader {
    /// Open an OPC package from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(data))?;
        let mut members = Vec::with_capacity(archive.len());
        let mut index = HashMap::with_capacity(archive.len());

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            let mut blob = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut blob)?;
            index.insert(name.clone(), members.len());
            members.push((name, blob));
        }

        Ok(Self { members, index })
    }

    /// The binary content for a part.
    pub fn blob_for(&self, pack_uri: &PackURI) -> Result<&[u8]> {
        self.index
            .get(pack_uri.membername())
            .map(|&i| self.members[i].1.as_slice())
            .ok_or_else(|| Error::PartNotFound(pack_uri.to_string()))
    }

    /// Check if a specific member exists in the package.
    pub fn contains(&self, pack_uri: &PackURI) -> bool {
        self.index.contains_key(pack_uri.membername())
    }

    /// All member names, in archive order.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|(name, _)| name.as_str())
    }

    /// Members with their blobs, in archive order.
    pub fn members(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.members
            .iter()
            .map(|(name, blob)| (name.as_str(), blob.as_slice()))
    }

    /// The number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Physical package writer that serializes parts into an in-memory ZIP.
pub struct PhysPkgWriter {
    archive: ZipWriter<Cursor<Vec<u8>>>,
}

impl PhysPkgWriter {
    /// Create a new package writer that writes to memory.
    pub fn new() -> Self {
        Self {
            archive: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Write a part with Deflate compression.
    pub fn write(&mut self, pack_uri: &PackURI, blob: &[u8]) -> Result<()> {
        self.write_member(pack_uri.membername(), blob)
    }

    /// Write a raw member name with Deflate compression.
    pub fn write_member(&mut self, membername: &str, blob: &[u8]) -> Result<()> {
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        self.archive.start_file(membername, options)?;
        self.archive.write_all(blob)?;
        Ok(())
    }

    /// Finish writing and return the package bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        let cursor = self.archive.finish()?;
        Ok(cursor.into_inner())
    }
}

impl Default for PhysPkgWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut writer = PhysPkgWriter::new();
        let uri = PackURI::new("/ppt/presentation.xml").unwrap();
        writer.write(&uri, b"<p:presentation/>").unwrap();
        let data = writer.finish().unwrap();

        let reader = PhysPkgReader::from_bytes(&data).unwrap();
        assert!(reader.contains(&uri));
        assert_eq!(reader.blob_for(&uri).unwrap(), b"<p:presentation/>");
    }

    #[test]
    fn test_member_order_preserved() {
        let mut writer = PhysPkgWriter::new();
        let names = ["[Content_Types].xml", "_rels/.rels", "ppt/presentation.xml"];
        for name in names {
            writer.write_member(name, b"x").unwrap();
        }
        let data = writer.finish().unwrap();

        let reader = PhysPkgReader::from_bytes(&data).unwrap();
        let read_names: Vec<_> = reader.member_names().collect();
        assert_eq!(read_names, names);
    }

    #[test]
    fn test_missing_part() {
        let writer = PhysPkgWriter::new();
        let data = writer.finish().unwrap();
        let reader = PhysPkgReader::from_bytes(&data).unwrap();
        let uri = PackURI::new("/nope.xml").unwrap();
        assert!(matches!(
            reader.blob_for(&uri),
            Err(Error::PartNotFound(_))
        ));
    }
}

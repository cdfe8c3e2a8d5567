//! Provides a general interface to a physical OPC package (ZIP file).
//!
//! The reader inflates every member up front into an owned, ordered list, so
//! no borrow of the caller's buffer or open archive outlives `from_bytes`.
//! The writer lays members out in exactly the order they are written and pins
//! every timestamp, so identical input gives byte-identical archives.

use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

/// Compression applied to every member of a written package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// Deflate, as Office applications write.
    #[default]
    Deflated,
    /// No compression.
    Stored,
}

impl Compression {
    fn method(self) -> CompressionMethod {
        match self {
            Compression::Deflated => CompressionMethod::Deflated,
            Compression::Stored => CompressionMethod::Stored,
        }
    }
}

/// Options for writing packages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriterOptions {
    /// Compression used for every part.
    pub compression: Compression,
}

/// Physical package reader holding the inflated members of a ZIP archive.
pub struct PhysPkgReader {
    /// Members in archive order as (membername, contents)
    members: Vec<(String, Vec<u8>)>,
    /// Membername to position in `members`
    index: HashMap<String, usize>,
}

impl PhysPkgReader {
    /// Open a package from a byte slice.
    ///
    /// # Errors
    /// Returns [`OpcError::BadContainer`] when the buffer is empty, is not a
    /// ZIP archive, or holds a member that cannot be inflated.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Err(OpcError::BadContainer("empty buffer".to_string()));
        }

        let mut archive =
            ZipArchive::new(Cursor::new(data)).map_err(|e| OpcError::BadContainer(e.to_string()))?;

        let mut members = Vec::with_capacity(archive.len());
        let mut index = HashMap::with_capacity(archive.len());

        for i in 0..archive.len() {
            let mut file = archive
                .by_index(i)
                .map_err(|e| OpcError::BadContainer(e.to_string()))?;
            if file.is_dir() {
                continue;
            }

            let name = file.name().trim_start_matches('/').to_string();
            let mut blob = Vec::new();
            file.read_to_end(&mut blob)
                .map_err(|e| OpcError::BadContainer(format!("{}: {}", name, e)))?;

            // First occurrence wins for duplicated member names
            index.entry(name.clone()).or_insert(members.len());
            members.push((name, blob));
        }

        log::debug!("opened package with {} members", members.len());

        Ok(Self { members, index })
    }

    /// Get the contents of a member by name; a leading slash is ignored.
    #[inline]
    pub fn get(&self, membername: &str) -> Option<&[u8]> {
        let normalized = membername.trim_start_matches('/');
        self.index
            .get(normalized)
            .map(|&i| self.members[i].1.as_slice())
    }

    /// Get the binary content for a part by its PackURI.
    pub fn blob_for(&self, pack_uri: &PackURI) -> Result<&[u8]> {
        self.get(pack_uri.membername())
            .ok_or_else(|| OpcError::PartNotFound(pack_uri.to_string()))
    }

    /// Read a part as a UTF-8 string, replacing invalid sequences.
    pub fn read_string(&self, pack_uri: &PackURI) -> Result<String> {
        self.blob_for(pack_uri)
            .map(|blob| String::from_utf8_lossy(blob).into_owned())
    }

    /// Check if a specific member exists in the package.
    #[inline]
    pub fn contains(&self, pack_uri: &PackURI) -> bool {
        self.index.contains_key(pack_uri.membername())
    }

    /// List all member names in archive order (directories excluded).
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|(name, _)| name.as_str())
    }

    /// Iterate over (membername, contents) pairs in archive order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.members
            .iter()
            .map(|(name, blob)| (name.as_str(), blob.as_slice()))
    }

    /// Get the number of files in the package.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the package is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl std::fmt::Debug for PhysPkgReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhysPkgReader")
            .field("file_count", &self.members.len())
            .finish()
    }
}

/// Physical package writer for creating OPC packages in memory.
pub struct PhysPkgWriter {
    /// The underlying ZIP archive writer
    archive: ZipWriter<Cursor<Vec<u8>>>,
    /// Options applied to every member
    file_options: SimpleFileOptions,
    /// Number of members written so far
    written: usize,
}

impl PhysPkgWriter {
    /// Create a new package writer with default options.
    pub fn new() -> Self {
        Self::with_options(WriterOptions::default())
    }

    /// Create a new package writer with explicit options.
    pub fn with_options(options: WriterOptions) -> Self {
        let file_options = SimpleFileOptions::default()
            .compression_method(options.compression.method())
            .last_modified_time(DateTime::default());

        Self {
            archive: ZipWriter::new(Cursor::new(Vec::new())),
            file_options,
            written: 0,
        }
    }

    /// Write a part to the package.
    ///
    /// # Arguments
    /// * `pack_uri` - The PackURI for the part
    /// * `blob` - The binary content to write
    pub fn write(&mut self, pack_uri: &PackURI, blob: &[u8]) -> Result<()> {
        log::trace!("writing part {} ({} bytes)", pack_uri, blob.len());
        self.archive
            .start_file(pack_uri.membername(), self.file_options)?;
        self.archive.write_all(blob)?;
        self.written += 1;
        Ok(())
    }

    /// Number of parts written so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.written
    }

    /// Check if no part has been written yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.written == 0
    }

    /// Finish writing and return the package bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        let written = self.written;
        let cursor = self.archive.finish()?;
        let bytes = cursor.into_inner();
        log::debug!("finished package with {} parts, {} bytes", written, bytes.len());
        Ok(bytes)
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

    fn sample(options: WriterOptions) -> Vec<u8> {
        let mut writer = PhysPkgWriter::with_options(options);
        for (name, blob) in [
            ("/[Content_Types].xml", b"<Types/>".as_ref()),
            ("/_rels/.rels", b"<Relationships/>".as_ref()),
            ("/word/document.xml", b"<document/>".as_ref()),
        ] {
            writer.write(&PackURI::new(name).unwrap(), blob).unwrap();
        }
        assert_eq!(writer.len(), 3);
        writer.finish().unwrap()
    }

    #[test]
    fn test_round_trip() {
        let zip_data = sample(WriterOptions::default());
        let reader = PhysPkgReader::from_bytes(&zip_data).unwrap();

        let document = PackURI::new("/word/document.xml").unwrap();
        assert!(reader.contains(&document));
        assert_eq!(reader.blob_for(&document).unwrap(), b"<document/>");
        assert_eq!(reader.read_string(&document).unwrap(), "<document/>");
        assert_eq!(reader.len(), 3);
    }

    #[test]
    fn test_member_order_is_write_order() {
        let zip_data = sample(WriterOptions {
            compression: Compression::Stored,
        });
        let reader = PhysPkgReader::from_bytes(&zip_data).unwrap();
        let names: Vec<&str> = reader.member_names().collect();
        assert_eq!(names, ["[Content_Types].xml", "_rels/.rels", "word/document.xml"]);

        let (first, blob) = reader.entries().next().unwrap();
        assert_eq!(first, "[Content_Types].xml");
        assert_eq!(blob, b"<Types/>");
    }

    #[test]
    fn test_output_is_deterministic() {
        assert_eq!(sample(WriterOptions::default()), sample(WriterOptions::default()));
    }

    #[test]
    fn test_missing_part() {
        let zip_data = sample(WriterOptions::default());
        let reader = PhysPkgReader::from_bytes(&zip_data).unwrap();
        let missing = PackURI::new("/xl/workbook.xml").unwrap();
        assert!(matches!(reader.blob_for(&missing), Err(OpcError::PartNotFound(_))));
        assert!(reader.get("/word/document.xml").is_some());
    }

    #[test]
    fn test_bad_container() {
        assert!(matches!(
            PhysPkgReader::from_bytes(b""),
            Err(OpcError::BadContainer(_))
        ));
        assert!(matches!(
            PhysPkgReader::from_bytes(b"definitely not a zip archive"),
            Err(OpcError::BadContainer(_))
        ));
    }
}

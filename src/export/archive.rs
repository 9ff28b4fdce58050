//! In-memory zip archive of the exported site.

use std::io::{Cursor, Write};

use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Zip writer with fixed entry metadata, so the same input always yields the
/// same bytes.
pub struct SiteArchive {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    entries: Vec<String>,
}

impl SiteArchive {
    pub fn new() -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default())
            .unix_permissions(0o644);
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            options,
            entries: Vec::new(),
        }
    }

    /// Add one file. Paths use `/` separators and are relative to the archive
    /// root.
    pub fn add(&mut self, path: &str, contents: &[u8]) -> Result<(), ZipError> {
        self.writer.start_file(path, self.options)?;
        self.writer.write_all(contents)?;
        self.entries.push(path.to_owned());
        Ok(())
    }

    /// Entry paths in the order they were added.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Write the central directory and return the archive bytes.
    pub fn finish(self) -> Result<Vec<u8>, ZipError> {
        Ok(self.writer.finish()?.into_inner())
    }
}

impl Default for SiteArchive {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn build() -> Vec<u8> {
        let mut archive = SiteArchive::new();
        archive.add("index.html", b"<html></html>").unwrap();
        archive.add("src/style.css", b"body{}").unwrap();
        assert_eq!(archive.entries(), ["index.html", "src/style.css"]);
        archive.finish().unwrap()
    }

    #[test]
    fn entries_read_back() {
        let bytes = build();
        let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(zip.len(), 2);
        let mut css = String::new();
        zip.by_name("src/style.css")
            .unwrap()
            .read_to_string(&mut css)
            .unwrap();
        assert_eq!(css, "body{}");
    }

    #[test]
    fn output_is_deterministic() {
        assert_eq!(build(), build());
    }
}

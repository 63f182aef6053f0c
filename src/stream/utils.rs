//! The module includes extra utility tooling to help glue the zip archive and the part codec together
use crate::{errors::XlsxError, path::PackagePath};
use std::{
    collections::HashSet,
    io::{Read, Seek, Write},
};
use xlsxdoc_serde::XmlPart;
use zip::{result::ZipError, write::SimpleFileOptions, CompressionMethod, ZipArchive, ZipWriter};

/// Any source a package can be read from
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

/// Finds an archive entry by part path. Part names are case-insensitive and a leading
/// `/` is not part of the entry name.
// ported from calamine https://github.com/tafia/calamine/tree/master
pub(crate) fn entry_name<RS: Read + Seek>(
    zip: &ZipArchive<RS>,
    path: &PackagePath,
) -> Option<String> {
    let wanted = path.relative_path();
    zip.file_names()
        .find(|n| n.trim_start_matches('/').eq_ignore_ascii_case(&wanted))
        .map(str::to_owned)
}

/// Reads a whole archive entry, `None` when the package has no such part
pub(crate) fn read_entry<RS: Read + Seek>(
    zip: &mut ZipArchive<RS>,
    path: &PackagePath,
) -> Option<Result<Vec<u8>, XlsxError>> {
    let actual_path = entry_name(zip, path)?;
    match zip.by_name(&actual_path) {
        Ok(mut file) => {
            let mut buffer = Vec::with_capacity(file.size() as usize);
            Some(file.read_to_end(&mut buffer).map(|_| buffer).map_err(XlsxError::from))
        }
        Err(ZipError::FileNotFound) => None,
        Err(e) => Some(Err(XlsxError::Zip(e))),
    }
}

/// Decodes an archive entry into its part model
pub(crate) fn read_part<T: XmlPart, RS: Read + Seek>(
    zip: &mut ZipArchive<RS>,
    path: &PackagePath,
) -> Option<Result<T, XlsxError>> {
    let bytes = match read_entry(zip, path)? {
        Ok(bytes) => bytes,
        Err(e) => return Some(Err(e)),
    };
    Some(
        String::from_utf8(bytes)
            .map_err(XlsxError::from)
            .and_then(|xml| T::from_xml(&xml).map_err(XlsxError::from)),
    )
}

/// Writes package parts into a zip archive with one compression method for every entry,
/// refusing to write the same part name twice.
pub struct PackageWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    options: SimpleFileOptions,
    entries: HashSet<String>,
}

impl<W: Write + Seek> PackageWriter<W> {
    pub fn new(writer: W, compression: CompressionMethod) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            options: SimpleFileOptions::default().compression_method(compression),
            entries: HashSet::new(),
        }
    }

    /// Whether a part with this name was already written
    pub fn contains(&self, path: &PackagePath) -> bool {
        self.entries.contains(&path.relative_path().to_ascii_lowercase())
    }

    /// Writes raw bytes as the entry for `path`.
    /// Fails with [`XlsxError::EntryAlreadyExists`] if the part was written before.
    pub fn write_bytes(&mut self, path: &PackagePath, bytes: &[u8]) -> Result<(), XlsxError> {
        let name = path.relative_path();
        if !self.entries.insert(name.to_ascii_lowercase()) {
            return Err(XlsxError::EntryAlreadyExists(name));
        }
        self.zip.start_file(name, self.options)?;
        self.zip.write_all(bytes)?;
        Ok(())
    }

    /// Encodes a part model and writes it as the entry for `path`
    pub fn write_part<T: XmlPart>(
        &mut self,
        path: &PackagePath,
        part: &T,
    ) -> Result<(), XlsxError> {
        let xml = part.to_xml()?;
        self.write_bytes(path, xml.as_bytes())
    }

    /// Writes the central directory and hands back the underlying writer
    pub fn finish(self) -> Result<W, XlsxError> {
        Ok(self.zip.finish()?)
    }
}

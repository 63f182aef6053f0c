//! The module holds all logic to locate and decode the parts of a .xlsx package
pub mod content_types;
pub mod relationships;
pub mod shared_string_table;
pub mod sheet;

use super::utils::{entry_name, read_entry, read_part, PackageWriter};
use crate::{errors::XlsxError, path::PackagePath};
use content_types::ContentTypes;
use log::warn;
use relationships::{Relationships, SchemaType};
use shared_string_table::SharedStringTable;
use sheet::Worksheet;
use std::{
    collections::HashSet,
    fs::File,
    io::{BufReader, Cursor, Read, Seek, Write},
    path::Path,
};
use xlsxdoc_serde::{Comments, Styles, Workbook, XmlPart};
use zip::ZipArchive;

pub const ROOT_RELATIONSHIPS_PATH: &str = "_rels/.rels";
pub const CONTENT_TYPES_PATH: &str = "[Content_Types].xml";
pub const SHARED_STRINGS_PATH: &str = "xl/sharedStrings.xml";
pub const STYLES_PATH: &str = "xl/styles.xml";

/// Resolves a relationship `target` of the part at `source`. Targets starting with `/`
/// are package-absolute, all others are relative to the directory of `source`.
/// Targets of the package root are taken as they are.
pub fn resolve_target(source: &PackagePath, target: &str) -> PackagePath {
    if source.is_root() {
        return PackagePath::rooted(target);
    }
    let resolved = PackagePath::resolve(Some(&source.directory()), target);
    PackagePath::rooted(&resolved.relative_path())
}

/// Path of the comments part of a worksheet: `xl/worksheets/sheetN.xml` gives `xl/commentsN.xml`
pub fn comments_path(worksheet: &PackagePath) -> Result<PackagePath, XlsxError> {
    let unsupported = || XlsxError::UnsupportedWorksheetPath(worksheet.to_string());
    let relative = worksheet.relative_path();
    let number = relative
        .strip_prefix("xl/worksheets/sheet")
        .and_then(|rest| rest.strip_suffix(".xml"))
        .filter(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(unsupported)?;
    Ok(PackagePath::rooted(&format!("xl/comments{number}.xml")))
}

/// The `XlsxFile` is an opened .xlsx archive that parts are decoded from on demand
pub struct XlsxFile<RS> {
    zip: ZipArchive<RS>,
}

impl XlsxFile<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, XlsxError> {
        Self::new(BufReader::new(File::open(path)?))
    }
}

impl XlsxFile<Cursor<Vec<u8>>> {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, XlsxError> {
        Self::new(Cursor::new(bytes))
    }
}

impl<RS: Read + Seek> XlsxFile<RS> {
    pub fn new(reader: RS) -> Result<Self, XlsxError> {
        let zip = ZipArchive::new(reader).map_err(XlsxError::DataIsNotAnArchive)?;
        Ok(Self { zip })
    }

    pub fn contains(&self, path: &PackagePath) -> bool {
        entry_name(&self.zip, path).is_some()
    }

    pub fn entry_names(&self) -> Vec<String> {
        self.zip.file_names().map(str::to_owned).collect()
    }

    /// Raw bytes of a part, failing with [`XlsxError::PartNotFound`] if it is absent
    pub fn read_entry(&mut self, path: &PackagePath) -> Result<Vec<u8>, XlsxError> {
        read_entry(&mut self.zip, path)
            .unwrap_or_else(|| Err(XlsxError::PartNotFound(path.relative_path())))
    }

    /// Decodes a required part
    pub fn parse_entry<T: XmlPart>(&mut self, path: &PackagePath) -> Result<T, XlsxError> {
        read_part(&mut self.zip, path)
            .unwrap_or_else(|| Err(XlsxError::PartNotFound(path.relative_path())))
    }

    /// The package relationships in `_rels/.rels`
    pub fn parse_relationships(&mut self) -> Result<Relationships, XlsxError> {
        self.parse_entry::<xlsxdoc_serde::Relationships>(&PackagePath::new(ROOT_RELATIONSHIPS_PATH))
            .map(Relationships::from)
    }

    /// Every part the package relationships reach through `of`
    pub fn parse_paths(&mut self, of: &SchemaType) -> Result<Vec<PackagePath>, XlsxError> {
        let package = PackagePath::rooted("");
        Ok(self
            .parse_relationships()?
            .iter()
            .filter(|r| &r.relationship_type == of && !r.is_external())
            .map(|r| resolve_target(&package, &r.target))
            .collect())
    }

    /// The workbook parts, usually just `/xl/workbook.xml`
    pub fn parse_document_paths(&mut self) -> Result<Vec<PackagePath>, XlsxError> {
        self.parse_paths(&SchemaType::OfficeDocument)
    }

    /// `None` when the package has no stylesheet
    pub fn parse_styles(&mut self) -> Result<Option<Styles>, XlsxError> {
        read_part(&mut self.zip, &PackagePath::new(STYLES_PATH)).transpose()
    }

    /// An empty table when the package has no shared strings
    pub fn parse_shared_strings(&mut self) -> Result<SharedStringTable, XlsxError> {
        let strings: Option<xlsxdoc_serde::SharedStrings> =
            read_part(&mut self.zip, &PackagePath::new(SHARED_STRINGS_PATH)).transpose()?;
        Ok(strings.map(SharedStringTable::from).unwrap_or_default())
    }

    pub fn parse_workbook(&mut self, path: &PackagePath) -> Result<Workbook, XlsxError> {
        self.parse_entry(path)
    }

    pub fn parse_worksheet(&mut self, path: &PackagePath) -> Result<Worksheet, XlsxError> {
        self.parse_entry::<xlsxdoc_serde::Worksheet>(path)?.try_into()
    }

    /// The relationships of the part at `path`, read from its sibling `_rels/<name>.rels`
    pub fn parse_document_relationships(
        &mut self,
        path: &PackagePath,
    ) -> Result<(PackagePath, Relationships), XlsxError> {
        let relationships_path = path.relationships_path()?;
        let relationships = self.parse_entry::<xlsxdoc_serde::Relationships>(&relationships_path)?;
        Ok((path.clone(), relationships.into()))
    }

    /// Worksheet parts of every workbook, in relationship order
    pub fn parse_worksheet_paths(&mut self) -> Result<Vec<PackagePath>, XlsxError> {
        let mut paths = Vec::new();
        for document in self.parse_document_paths()? {
            let (_, relationships) = self.parse_document_relationships(&document)?;
            paths.extend(
                relationships
                    .paths(&SchemaType::Worksheet)
                    .into_iter()
                    .map(|target| resolve_target(&document, target)),
            );
        }
        Ok(paths)
    }

    /// Worksheet parts with their display names, in the tab order of each workbook
    pub fn parse_worksheet_paths_and_names(
        &mut self,
        workbooks: &[(PackagePath, Workbook)],
    ) -> Result<Vec<(PackagePath, String)>, XlsxError> {
        let mut sheets = Vec::new();
        for (document, workbook) in workbooks {
            let (_, relationships) = self.parse_document_relationships(document)?;
            for sheet in &workbook.sheets.items {
                match relationships.find(&sheet.relationship_id) {
                    Some(r) if r.relationship_type == SchemaType::Worksheet => {
                        sheets.push((resolve_target(document, &r.target), sheet.name.clone()))
                    }
                    // chartsheets and dialog sheets are copied through untouched
                    Some(_) => {}
                    None => warn!(
                        "sheet '{}' points at missing relationship {}",
                        sheet.name, sheet.relationship_id
                    ),
                }
            }
        }
        Ok(sheets)
    }

    /// Follows custom XML relationships out of `sources`, collecting the relationships of
    /// every custom XML part reached, however deep. A custom XML part without a
    /// relationships file is skipped.
    pub fn parse_custom_xml_relationships(
        &mut self,
        sources: &[(PackagePath, Relationships)],
    ) -> Result<Vec<(PackagePath, Relationships)>, XlsxError> {
        let mut found = Vec::new();
        let mut visited: HashSet<PackagePath> = sources.iter().map(|(p, _)| p.clone()).collect();
        let mut pending: Vec<PackagePath> = sources
            .iter()
            .flat_map(|(source, relationships)| custom_xml_targets(source, relationships))
            .collect();
        while let Some(part) = pending.pop() {
            if !visited.insert(part.clone()) {
                continue;
            }
            if !self.contains(&part.relationships_path()?) {
                warn!("custom xml part {part} has no relationships file");
                continue;
            }
            let (part, relationships) = self.parse_document_relationships(&part)?;
            pending.extend(custom_xml_targets(&part, &relationships));
            found.push((part, relationships));
        }
        Ok(found)
    }

    /// The comments of a worksheet
    pub fn parse_comments(&mut self, worksheet: &PackagePath) -> Result<Comments, XlsxError> {
        self.parse_entry(&comments_path(worksheet)?)
    }

    /// The source manifest, `None` if the package has none
    pub fn parse_content_types(&mut self) -> Result<Option<ContentTypes>, XlsxError> {
        let content_types: Option<xlsxdoc_serde::ContentTypes> =
            read_part(&mut self.zip, &PackagePath::new(CONTENT_TYPES_PATH)).transpose()?;
        Ok(content_types.map(ContentTypes::from))
    }

    /// Copies the part at `path` byte for byte into another package
    pub fn copy_entry<W: Write + Seek>(
        &mut self,
        path: &PackagePath,
        into: &mut PackageWriter<W>,
    ) -> Result<(), XlsxError> {
        let bytes = self.read_entry(path)?;
        into.write_bytes(path, &bytes)
    }
}

fn custom_xml_targets(source: &PackagePath, relationships: &Relationships) -> Vec<PackagePath> {
    relationships
        .iter()
        .filter(|r| r.relationship_type == SchemaType::CustomXml && !r.is_external())
        .map(|r| resolve_target(source, &r.target))
        .collect()
}

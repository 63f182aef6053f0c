//! The `XlsxDocument` aggregate: reading a package into memory and writing it back out
use crate::{
    errors::XlsxError,
    path::PackagePath,
    stream::{
        utils::{PackageWriter, ReadSeek},
        xlsx::{
            comments_path,
            content_types::{ContentType, ContentTypes},
            relationships::{Relationships, SchemaType},
            resolve_target,
            shared_string_table::SharedStringTable,
            sheet::Worksheet,
            XlsxFile, CONTENT_TYPES_PATH, ROOT_RELATIONSHIPS_PATH, SHARED_STRINGS_PATH, STYLES_PATH,
        },
    },
};
use log::{debug, warn};
use std::{
    collections::HashSet,
    fs::{File, OpenOptions},
    io::{BufReader, Cursor, ErrorKind, Read, Seek, Write},
    path::Path,
};
use xlsxdoc_serde::{self as wire, Comments, Styles, Workbook};
use zip::CompressionMethod;

/// How a document is written out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaveOptions {
    /// Used for every entry of the archive
    pub compression: CompressionMethod,
    /// Replace an existing file on save instead of failing
    pub overwrite: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            compression: CompressionMethod::Deflated,
            overwrite: false,
        }
    }
}

/// The `XlsxDocument` owns every part this crate models: workbooks, worksheets, the
/// relationship graph, styles and the shared string table. Parts it does not model stay
/// in the source archive and are copied through on save.
pub struct XlsxDocument {
    file: Option<XlsxFile<Box<dyn ReadSeek>>>,
    options: SaveOptions,
    pub(crate) relationships: Relationships,
    pub(crate) workbooks: Vec<(PackagePath, Workbook)>,
    pub(crate) worksheets: Vec<(PackagePath, Worksheet)>,
    pub(crate) document_relationships: Vec<(PackagePath, Relationships)>,
    pub(crate) styles: Option<Styles>,
    pub(crate) shared_strings: SharedStringTable,
    content_types: Option<ContentTypes>,
}

impl XlsxDocument {
    fn empty() -> Self {
        Self {
            file: None,
            options: SaveOptions::default(),
            relationships: Relationships::new(),
            workbooks: Vec::new(),
            worksheets: Vec::new(),
            document_relationships: Vec::new(),
            styles: None,
            shared_strings: SharedStringTable::standard(),
            content_types: None,
        }
    }

    /// A document with one workbook holding one empty worksheet named `Sheet1`
    pub fn new() -> Result<Self, XlsxError> {
        let mut document = Self::empty();
        let workbook = document.create_workbook("workbook");
        document.add_document_relationship(&workbook, SchemaType::Styles, "styles.xml");
        document.styles = Some(Styles::standard()?);
        document.create_worksheet("Sheet1", 0);
        Ok(document)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, XlsxError> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, XlsxError> {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Reads every modeled part up front. The archive stays open for copying the
    /// remaining parts on save.
    pub fn from_reader<RS: Read + Seek + 'static>(reader: RS) -> Result<Self, XlsxError> {
        let mut file = XlsxFile::new(Box::new(reader) as Box<dyn ReadSeek>)?;
        let relationships = file.parse_relationships()?;

        let mut workbooks = Vec::new();
        let mut document_relationships = Vec::new();
        for path in file.parse_document_paths()? {
            workbooks.push((path.clone(), file.parse_workbook(&path)?));
            document_relationships.push(file.parse_document_relationships(&path)?);
        }

        let mut worksheets = Vec::new();
        for (path, name) in file.parse_worksheet_paths_and_names(&workbooks)? {
            debug!("reading worksheet '{name}' from {path}");
            let worksheet = file.parse_worksheet(&path)?;
            if file.contains(&path.relationships_path()?) {
                document_relationships.push(file.parse_document_relationships(&path)?);
            }
            worksheets.push((path, worksheet));
        }

        let mut sources = document_relationships.clone();
        sources.push((PackagePath::rooted(""), relationships.clone()));
        let custom_xml = file.parse_custom_xml_relationships(&sources)?;
        document_relationships.extend(custom_xml);

        Ok(Self {
            styles: file.parse_styles()?,
            shared_strings: file.parse_shared_strings()?,
            content_types: file.parse_content_types()?,
            file: Some(file),
            options: SaveOptions::default(),
            relationships,
            workbooks,
            worksheets,
            document_relationships,
        })
    }

    pub fn with_options(mut self, options: SaveOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> SaveOptions {
        self.options
    }

    /// The package relationships
    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    pub fn workbooks(&self) -> &[(PackagePath, Workbook)] {
        &self.workbooks
    }

    pub fn worksheets(&self) -> &[(PackagePath, Worksheet)] {
        &self.worksheets
    }

    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index).map(|(_, sheet)| sheet)
    }

    /// Relationships of every part that has its own, custom XML parts included
    pub fn document_relationships(&self) -> &[(PackagePath, Relationships)] {
        &self.document_relationships
    }

    pub fn styles(&self) -> Option<&Styles> {
        self.styles.as_ref()
    }

    pub fn styles_mut(&mut self) -> Option<&mut Styles> {
        self.styles.as_mut()
    }

    pub fn shared_strings(&self) -> &SharedStringTable {
        &self.shared_strings
    }

    /// The manifest of the source package, `None` for a new document
    pub fn content_types(&self) -> Option<&ContentTypes> {
        self.content_types.as_ref()
    }

    /// The comments of the worksheet at `index`, `None` if it has none
    pub fn comments(&mut self, index: usize) -> Result<Option<Comments>, XlsxError> {
        let (Some((path, _)), Some(file)) = (self.worksheets.get(index), self.file.as_mut()) else {
            return Ok(None);
        };
        if !file.contains(&comments_path(path)?) {
            return Ok(None);
        }
        file.parse_comments(path).map(Some)
    }

    /// Writes the document to `path`. Fails with [`XlsxError::FileAlreadyExists`] unless
    /// the options allow overwriting. The archive is built in memory first, so a failure
    /// never leaves a partial file behind.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<(), XlsxError> {
        let bytes = self.to_bytes()?;
        let path = path.as_ref();
        let mut open = OpenOptions::new();
        open.write(true);
        if self.options.overwrite {
            open.create(true).truncate(true);
        } else {
            open.create_new(true);
        }
        let mut file = open.open(path).map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => XlsxError::FileAlreadyExists(path.to_path_buf()),
            _ => XlsxError::CouldNotCreateArchive {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        file.write_all(&bytes)?;
        Ok(())
    }

    pub fn to_bytes(&mut self) -> Result<Vec<u8>, XlsxError> {
        Ok(self.write_to(Cursor::new(Vec::new()))?.into_inner())
    }

    /// Writes the whole package into `writer` and hands it back
    pub fn write_to<W: Write + Seek>(&mut self, writer: W) -> Result<W, XlsxError> {
        let mut package = PackageWriter::new(writer, self.options.compression);
        let mut manifest = ContentTypes::standard();
        if let Some(source) = &self.content_types {
            for (extension, mime) in source.defaults() {
                manifest.add_default(extension, mime);
            }
        }

        package.write_part(
            &PackagePath::new(ROOT_RELATIONSHIPS_PATH),
            &wire::Relationships::from(&self.relationships),
        )?;

        let shared_string_cells: usize = self
            .worksheets
            .iter()
            .map(|(_, s)| s.shared_string_cells())
            .sum();
        let shared_strings = PackagePath::rooted(SHARED_STRINGS_PATH);
        let part = self.shared_strings.to_part(shared_string_cells as u32);
        package.write_part(&shared_strings, &part)?;
        manifest.add_override(&shared_strings, ContentType::SharedStrings);

        for (path, workbook) in &self.workbooks {
            let mut workbook = workbook.clone();
            workbook.ensure_properties();
            package.write_part(path, &workbook)?;
            manifest.add_override(path, ContentType::Workbook);
        }

        if let Some(styles) = &self.styles {
            let mut styles = styles.clone();
            styles.sync_counts();
            let path = PackagePath::rooted(STYLES_PATH);
            package.write_part(&path, &styles)?;
            manifest.add_override(&path, ContentType::Styles);
        }

        for (path, worksheet) in &self.worksheets {
            package.write_part(path, &wire::Worksheet::from(worksheet))?;
            manifest.add_override(path, ContentType::Worksheet);
        }

        let mut documents = self.document_relationships.clone();
        for (path, _) in &self.workbooks {
            match documents.iter_mut().find(|(p, _)| p == path) {
                Some((_, relationships)) => ensure_shared_strings(path, relationships),
                None => {
                    let mut relationships = Relationships::new();
                    ensure_shared_strings(path, &mut relationships);
                    documents.push((path.clone(), relationships));
                }
            }
        }
        let owned = documents
            .iter()
            .map(|(path, _)| path.relationships_path())
            .collect::<Result<HashSet<_>, _>>()?;
        let mut copy = CopyThrough {
            file: self.file.as_mut(),
            source_types: self.content_types.as_ref(),
            owned: &owned,
            package: &mut package,
            manifest: &mut manifest,
        };
        copy.copy_targets(&PackagePath::rooted(""), &self.relationships)?;
        for (path, relationships) in &documents {
            let part = wire::Relationships::from(relationships);
            copy.package.write_part(&path.relationships_path()?, &part)?;
            copy.copy_targets(path, relationships)?;
        }

        package.write_part(
            &PackagePath::new(CONTENT_TYPES_PATH),
            &wire::ContentTypes::from(&manifest),
        )?;
        package.finish()
    }
}

/// Target of the shared strings part as seen from the workbook at `workbook`
pub(crate) fn shared_strings_target(workbook: &PackagePath) -> String {
    if workbook.directory() == PackagePath::rooted("xl") {
        "sharedStrings.xml".into()
    } else {
        PackagePath::rooted(SHARED_STRINGS_PATH).to_string()
    }
}

/// Makes sure a workbook's relationships reach the shared strings part
pub(crate) fn ensure_shared_strings(workbook: &PackagePath, relationships: &mut Relationships) {
    if !relationships.contains_type(&SchemaType::SharedStrings) {
        relationships.add_relationship(SchemaType::SharedStrings, &shared_strings_target(workbook));
    }
}

/// Copies parts that have no model from the source archive, declaring a content type for each
struct CopyThrough<'a, W: Write + Seek> {
    file: Option<&'a mut XlsxFile<Box<dyn ReadSeek>>>,
    source_types: Option<&'a ContentTypes>,
    /// Relationship files written for their own part, never copied
    owned: &'a HashSet<PackagePath>,
    package: &'a mut PackageWriter<W>,
    manifest: &'a mut ContentTypes,
}

impl<W: Write + Seek> CopyThrough<'_, W> {
    /// Copies every internal target of `relationships` not written yet. Copied parts
    /// that carry relationships of their own take those along, recursively.
    fn copy_targets(
        &mut self,
        source: &PackagePath,
        relationships: &Relationships,
    ) -> Result<(), XlsxError> {
        let mut pending = vec![(source.clone(), relationships.clone())];
        while let Some((source, relationships)) = pending.pop() {
            for relationship in relationships.iter().filter(|r| !r.is_external()) {
                let part = resolve_target(&source, &relationship.target);
                if self.package.contains(&part) {
                    continue;
                }
                let Some(file) = self.file.as_deref_mut() else {
                    warn!("no source package to copy {part} from");
                    continue;
                };
                if !file.contains(&part) {
                    let id = &relationship.id;
                    warn!("relationship {id} of {source} points at missing part {part}");
                    continue;
                }
                file.copy_entry(&part, self.package)?;
                declare(self.manifest, self.source_types, &part, &relationship.relationship_type);

                let nested = part.relationships_path()?;
                if self.owned.contains(&nested)
                    || self.package.contains(&nested)
                    || !file.contains(&nested)
                {
                    continue;
                }
                let (part, relationships) = file.parse_document_relationships(&part)?;
                file.copy_entry(&nested, self.package)?;
                pending.push((part, relationships));
            }
        }
        Ok(())
    }
}

/// Picks the content type of a copied part: the source manifest's override first, then
/// the relationship type, then the extension defaults
fn declare(
    manifest: &mut ContentTypes,
    source_types: Option<&ContentTypes>,
    part: &PackagePath,
    relationship_type: &SchemaType,
) {
    if let Some(mime) = source_types.and_then(|types| types.override_for(part)) {
        manifest.add_override_mime(part, mime);
    } else if let Some(content_type) = ContentType::from_schema(relationship_type) {
        manifest.add_override(part, content_type);
    } else if manifest.resolve(part).is_none() {
        let unrecognized = XlsxError::UnrecognizedContentType {
            path: part.to_string(),
            relationship_type: relationship_type.uri(),
        };
        warn!("{unrecognized}");
    }
}

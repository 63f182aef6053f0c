//! The `[Content_Types].xml` manifest: one MIME type per part
use super::relationships::SchemaType;
use crate::path::PackagePath;
use xlsxdoc_serde::content::{self as wire, DefaultType, OverrideType};

/// MIME types of the parts this crate writes or recognizes by relationship type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Relationships,
    Xml,
    CoreProperties,
    ExtendedProperties,
    CustomProperties,
    CustomXmlProperties,
    Workbook,
    Worksheet,
    SharedStrings,
    Styles,
    Theme,
    Comments,
    Drawing,
    VmlDrawing,
    Chart,
    Table,
    CalcChain,
    PrinterSettings,
}

impl ContentType {
    pub fn mime(self) -> &'static str {
        match self {
            Self::Relationships => "application/vnd.openxmlformats-package.relationships+xml",
            Self::Xml => "application/xml",
            Self::CoreProperties => "application/vnd.openxmlformats-package.core-properties+xml",
            Self::ExtendedProperties => {
                "application/vnd.openxmlformats-officedocument.extended-properties+xml"
            }
            Self::CustomProperties => {
                "application/vnd.openxmlformats-officedocument.custom-properties+xml"
            }
            Self::CustomXmlProperties => {
                "application/vnd.openxmlformats-officedocument.customXmlProperties+xml"
            }
            Self::Workbook => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml",
            Self::Worksheet => "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml",
            Self::SharedStrings => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"
            }
            Self::Styles => "application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml",
            Self::Theme => "application/vnd.openxmlformats-officedocument.theme+xml",
            Self::Comments => "application/vnd.openxmlformats-officedocument.spreadsheetml.comments+xml",
            Self::Drawing => "application/vnd.openxmlformats-officedocument.drawing+xml",
            Self::VmlDrawing => "application/vnd.openxmlformats-officedocument.vmlDrawing",
            Self::Chart => "application/vnd.openxmlformats-officedocument.drawingml.chart+xml",
            Self::Table => "application/vnd.openxmlformats-officedocument.spreadsheetml.table+xml",
            Self::CalcChain => "application/vnd.openxmlformats-officedocument.spreadsheetml.calcChain+xml",
            Self::PrinterSettings => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.printerSettings"
            }
        }
    }

    /// Best-effort MIME type for a part reached through a relationship of this type.
    /// Images, hyperlinks and unknown types have none; they resolve through extension defaults.
    pub fn from_schema(schema: &SchemaType) -> Option<Self> {
        let content_type = match schema {
            SchemaType::OfficeDocument => Self::Workbook,
            SchemaType::Worksheet => Self::Worksheet,
            SchemaType::SharedStrings => Self::SharedStrings,
            SchemaType::Styles => Self::Styles,
            SchemaType::Theme => Self::Theme,
            SchemaType::PackageCoreProperties => Self::CoreProperties,
            SchemaType::ExtendedProperties => Self::ExtendedProperties,
            SchemaType::CustomProperties => Self::CustomProperties,
            SchemaType::CustomXml => Self::Xml,
            SchemaType::CustomXmlProperties => Self::CustomXmlProperties,
            SchemaType::Comments => Self::Comments,
            SchemaType::Drawing => Self::Drawing,
            SchemaType::VmlDrawing => Self::VmlDrawing,
            SchemaType::Chart => Self::Chart,
            SchemaType::Table => Self::Table,
            SchemaType::CalcChain => Self::CalcChain,
            SchemaType::PrinterSettings => Self::PrinterSettings,
            SchemaType::Image | SchemaType::Hyperlink | SchemaType::Unknown(_) => return None,
        };
        Some(content_type)
    }
}

/// Extension defaults every written package declares
const STANDARD_DEFAULTS: &[(&str, &str)] = &[
    ("xml", "application/xml"),
    ("rels", "application/vnd.openxmlformats-package.relationships+xml"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("bmp", "image/bmp"),
    ("gif", "image/gif"),
    ("tif", "image/tiff"),
    ("pdf", "application/pdf"),
    ("mov", "application/movie"),
    ("vml", "application/vnd.openxmlformats-officedocument.vmlDrawing"),
    ("xlsx", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
];

/// Extension defaults plus part-name overrides. An override always wins over the
/// default of its extension; part names compare case-insensitively.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentTypes {
    defaults: Vec<(String, String)>,
    overrides: Vec<(String, String)>,
}

impl ContentTypes {
    /// The manifest a new package starts with: the common extension defaults and no overrides
    pub fn standard() -> Self {
        Self {
            defaults: STANDARD_DEFAULTS
                .iter()
                .map(|(e, m)| (e.to_string(), m.to_string()))
                .collect(),
            overrides: Vec::new(),
        }
    }

    /// Declares a default unless the extension already has one
    pub fn add_default(&mut self, extension: &str, mime: &str) {
        if self.default_for(extension).is_none() {
            self.defaults.push((extension.to_owned(), mime.to_owned()));
        }
    }

    pub fn add_override(&mut self, part: &PackagePath, content_type: ContentType) {
        self.add_override_mime(part, content_type.mime());
    }

    /// Declares an override for `part`, replacing any earlier one for the same part
    pub fn add_override_mime(&mut self, part: &PackagePath, mime: &str) {
        let name = part.absolute_path();
        match self
            .overrides
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(&name))
        {
            Some(existing) => existing.1 = mime.to_owned(),
            None => self.overrides.push((name, mime.to_owned())),
        }
    }

    pub fn contains_override(&self, part: &PackagePath) -> bool {
        self.override_for(part).is_some()
    }

    pub fn override_for(&self, part: &PackagePath) -> Option<&str> {
        let name = part.absolute_path();
        self.overrides
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(&name))
            .map(|(_, m)| m.as_str())
    }

    pub fn default_for(&self, extension: &str) -> Option<&str> {
        self.defaults
            .iter()
            .find(|(e, _)| e.eq_ignore_ascii_case(extension))
            .map(|(_, m)| m.as_str())
    }

    /// The MIME type a consumer would assign to `part`
    pub fn resolve(&self, part: &PackagePath) -> Option<&str> {
        self.override_for(part)
            .or_else(|| part.extension().and_then(|e| self.default_for(e)))
    }

    /// Extension defaults in declaration order
    pub fn defaults(&self) -> impl Iterator<Item = (&str, &str)> {
        self.defaults.iter().map(|(e, m)| (e.as_str(), m.as_str()))
    }
}

impl From<wire::ContentTypes> for ContentTypes {
    fn from(content_types: wire::ContentTypes) -> Self {
        let mut manifest = Self::default();
        for default in content_types.defaults {
            manifest.add_default(&default.extension, &default.content_type);
        }
        for part in content_types.overrides {
            manifest.add_override_mime(&PackagePath::new(&part.part_name), &part.content_type);
        }
        manifest
    }
}

impl From<&ContentTypes> for wire::ContentTypes {
    fn from(manifest: &ContentTypes) -> Self {
        Self {
            defaults: manifest
                .defaults
                .iter()
                .map(|(extension, content_type)| DefaultType {
                    extension: extension.clone(),
                    content_type: content_type.clone(),
                })
                .collect(),
            overrides: manifest
                .overrides
                .iter()
                .map(|(part_name, content_type)| OverrideType {
                    part_name: part_name.clone(),
                    content_type: content_type.clone(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod content_types_unittests {
    use super::{ContentType, ContentTypes};
    use crate::{path::PackagePath, stream::xlsx::relationships::SchemaType};

    mod manifest_api {
        use super::*;

        #[test]
        fn test_standard_resolves_by_extension() {
            let manifest = ContentTypes::standard();
            let actual = manifest.resolve(&PackagePath::new("xl/_rels/workbook.xml.rels"));
            assert_eq!(actual, Some(ContentType::Relationships.mime()));
            let image = PackagePath::new("xl/media/image1.PNG");
            assert_eq!(manifest.resolve(&image), Some("image/png"));
            assert_eq!(manifest.resolve(&PackagePath::new("xl/embeddings/blob.bin")), None);
        }

        #[test]
        fn test_override_wins_over_default() {
            let mut manifest = ContentTypes::standard();
            let workbook = PackagePath::rooted("xl/workbook.xml");
            manifest.add_override(&workbook, ContentType::Workbook);
            assert_eq!(manifest.resolve(&workbook), Some(ContentType::Workbook.mime()));
            assert_eq!(
                manifest.resolve(&PackagePath::rooted("customXml/item1.xml")),
                Some("application/xml")
            );
        }

        #[test]
        fn test_override_is_unique_per_part() {
            let mut manifest = ContentTypes::standard();
            manifest.add_override(&PackagePath::new("xl/styles.xml"), ContentType::Xml);
            manifest.add_override(&PackagePath::rooted("XL/styles.xml"), ContentType::Styles);
            let wire: xlsxdoc_serde::ContentTypes = (&manifest).into();
            assert_eq!(wire.overrides.len(), 1);
            assert_eq!(wire.overrides[0].part_name, "/xl/styles.xml");
            assert_eq!(wire.overrides[0].content_type, ContentType::Styles.mime());
        }

        #[test]
        fn test_add_default_keeps_first() {
            let mut manifest = ContentTypes::standard();
            manifest.add_default("PNG", "image/x-png");
            manifest.add_default("bin", "application/vnd.ms-office.activeX");
            assert_eq!(manifest.default_for("png"), Some("image/png"));
            assert_eq!(manifest.default_for("bin"), Some("application/vnd.ms-office.activeX"));
        }
    }

    mod content_type {
        use super::*;

        #[test]
        fn test_from_schema() {
            let actual = ContentType::from_schema(&SchemaType::Worksheet);
            assert_eq!(actual, Some(ContentType::Worksheet));
            assert_eq!(ContentType::from_schema(&SchemaType::CustomXml), Some(ContentType::Xml));
            assert_eq!(ContentType::from_schema(&SchemaType::Image), None);
            assert_eq!(ContentType::from_schema(&SchemaType::Unknown("x".into())), None);
        }
    }
}

//! The relationship graph: typed edges from one package part to another
use xlsxdoc_serde::relationships as wire;

const OFFICE_DOCUMENT: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/";
const STRICT_OFFICE_DOCUMENT: &str = "http://purl.oclc.org/ooxml/officeDocument/relationships/";
const PACKAGE: &str = "http://schemas.openxmlformats.org/package/2006/relationships/";

/// The kind of part a relationship points at
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SchemaType {
    OfficeDocument,
    Worksheet,
    SharedStrings,
    Styles,
    Theme,
    PackageCoreProperties,
    ExtendedProperties,
    CustomProperties,
    CustomXml,
    CustomXmlProperties,
    Comments,
    Drawing,
    VmlDrawing,
    Image,
    Chart,
    Table,
    Hyperlink,
    CalcChain,
    PrinterSettings,
    /// Any other relationship type, kept verbatim
    Unknown(String),
}

/// Type suffixes under the office-document namespace
const OFFICE_DOCUMENT_TYPES: &[(&str, SchemaType)] = &[
    ("officeDocument", SchemaType::OfficeDocument),
    ("worksheet", SchemaType::Worksheet),
    ("sharedStrings", SchemaType::SharedStrings),
    ("styles", SchemaType::Styles),
    ("theme", SchemaType::Theme),
    ("extended-properties", SchemaType::ExtendedProperties),
    ("custom-properties", SchemaType::CustomProperties),
    ("customXml", SchemaType::CustomXml),
    ("customXmlProps", SchemaType::CustomXmlProperties),
    ("comments", SchemaType::Comments),
    ("drawing", SchemaType::Drawing),
    ("vmlDrawing", SchemaType::VmlDrawing),
    ("image", SchemaType::Image),
    ("chart", SchemaType::Chart),
    ("table", SchemaType::Table),
    ("hyperlink", SchemaType::Hyperlink),
    ("calcChain", SchemaType::CalcChain),
    ("printerSettings", SchemaType::PrinterSettings),
];

impl SchemaType {
    /// Maps a relationship type URI, transitional or strict, to its schema type
    pub fn from_uri(uri: &str) -> Self {
        if uri == format!("{PACKAGE}metadata/core-properties") {
            return Self::PackageCoreProperties;
        }
        uri.strip_prefix(OFFICE_DOCUMENT)
            .or_else(|| uri.strip_prefix(STRICT_OFFICE_DOCUMENT))
            .and_then(|suffix| {
                OFFICE_DOCUMENT_TYPES
                    .iter()
                    .find(|(name, _)| *name == suffix)
                    .map(|(_, kind)| kind.clone())
            })
            .unwrap_or_else(|| Self::Unknown(uri.to_owned()))
    }

    /// The transitional relationship type URI
    pub fn uri(&self) -> String {
        self.uri_in(OFFICE_DOCUMENT)
    }

    /// The strict relationship type URI. Package and unknown types have no strict form.
    pub fn strict_uri(&self) -> String {
        self.uri_in(STRICT_OFFICE_DOCUMENT)
    }

    fn uri_in(&self, namespace: &str) -> String {
        match self {
            Self::PackageCoreProperties => format!("{PACKAGE}metadata/core-properties"),
            Self::Unknown(uri) => uri.clone(),
            known => OFFICE_DOCUMENT_TYPES
                .iter()
                .find(|(_, kind)| kind == known)
                .map(|(name, _)| format!("{namespace}{name}"))
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    pub id: String,
    pub relationship_type: SchemaType,
    pub target: String,
    pub target_mode: Option<String>,
    /// Read from a strict URI and written back as one
    pub strict: bool,
}

impl Relationship {
    /// The type URI in the namespace the relationship was read with
    pub fn type_uri(&self) -> String {
        if self.strict {
            self.relationship_type.strict_uri()
        } else {
            self.relationship_type.uri()
        }
    }

    /// Targets outside the package (hyperlinks, linked files) are never parts
    pub fn is_external(&self) -> bool {
        self.target_mode
            .as_deref()
            .is_some_and(|mode| mode.eq_ignore_ascii_case("External"))
    }
}

/// An ordered list of relationships belonging to one part
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Relationships {
    items: Vec<Relationship>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an internal relationship with the id `rId<N+1>`, N being the current count.
    /// In a loaded file that id may already be taken, then the next free number is used.
    pub fn add_relationship(
        &mut self,
        relationship_type: SchemaType,
        target: &str,
    ) -> Relationship {
        let mut number = self.items.len() + 1;
        while self.find(&format!("rId{number}")).is_some() {
            number += 1;
        }
        let relationship = Relationship {
            id: format!("rId{number}"),
            relationship_type,
            target: target.to_owned(),
            target_mode: None,
            strict: false,
        };
        self.items.push(relationship.clone());
        relationship
    }

    /// Targets of every relationship of one type, in list order
    pub fn paths(&self, of: &SchemaType) -> Vec<&str> {
        self.items
            .iter()
            .filter(|r| &r.relationship_type == of)
            .map(|r| r.target.as_str())
            .collect()
    }

    pub fn find(&self, id: &str) -> Option<&Relationship> {
        self.items.iter().find(|r| r.id == id)
    }

    pub fn contains_type(&self, of: &SchemaType) -> bool {
        self.items.iter().any(|r| &r.relationship_type == of)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<wire::Relationships> for Relationships {
    fn from(relationships: wire::Relationships) -> Self {
        let items = relationships
            .items
            .into_iter()
            .map(|r| Relationship {
                relationship_type: SchemaType::from_uri(&r.relationship_type),
                strict: r.relationship_type.starts_with(STRICT_OFFICE_DOCUMENT),
                id: r.id,
                target: r.target,
                target_mode: r.target_mode,
            })
            .collect();
        Self { items }
    }
}

impl From<&Relationships> for wire::Relationships {
    fn from(relationships: &Relationships) -> Self {
        let items = relationships
            .items
            .iter()
            .map(|r| wire::Relationship {
                id: r.id.clone(),
                relationship_type: r.type_uri(),
                target: r.target.clone(),
                target_mode: r.target_mode.clone(),
            })
            .collect();
        Self { items }
    }
}

/// Implements [`XmlPart`] for a serde-described SpreadsheetML part
macro_rules! spreadsheet_part {
    ($ty:ty, $root:literal, $attributes:expr) => {
        impl $crate::XmlPart for $ty {
            const ROOT: &'static str = $root;
            const ROOT_ATTRIBUTES: &'static [(&'static str, &'static str)] = $attributes;

            fn from_xml(xml: &str) -> Result<Self, $crate::SchemaError> {
                $crate::decode($root, xml)
            }

            fn to_xml(&self) -> Result<String, $crate::SchemaError> {
                $crate::encode(self, $root, $attributes)
            }
        }
    };
}

pub mod comments;
pub mod content;
pub mod convert;
pub mod relationships;
pub mod shared;
pub mod sheet;
pub mod style;
pub mod workbook;
pub use comments::Comments;
pub use content::ContentTypes;
pub use relationships::Relationships;
pub use shared::SharedStrings;
pub use sheet::Worksheet;
pub use style::Styles;
pub use workbook::Workbook;

use quick_xml::{
    events::{BytesCData, Event},
    Reader, Writer,
};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Write;
use thiserror::Error;

// Common namespaces seen in first tag seen in excel files
pub const MAIN_NAMESPACE: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
pub const DOCUMENT_RELATIONSHIPS_NAMESPACE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub const PACKAGE_RELATIONSHIPS_NAMESPACE: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships";
pub const CONTENT_NAMESPACE: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
pub const MARKUP_COMPATIBILITY_NAMESPACE: &str =
    "http://schemas.openxmlformats.org/markup-compatibility/2006";
pub const X14AC_NAMESPACE: &str = "http://schemas.microsoft.com/office/spreadsheetml/2009/9/ac";
pub const X16R2_NAMESPACE: &str = "http://schemas.microsoft.com/office/spreadsheetml/2015/02/main";

/// Declaration written at the top of every SpreadsheetML part
pub const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Root attributes of parts that only live in the main namespace (shared strings, comments)
pub const BASE_ATTRIBUTES: &[(&str, &str)] = &[("xmlns", MAIN_NAMESPACE)];
/// Root attributes of parts that refer to other parts by relationship id
pub const DOCUMENT_ATTRIBUTES: &[(&str, &str)] = &[
    ("xmlns", MAIN_NAMESPACE),
    ("xmlns:r", DOCUMENT_RELATIONSHIPS_NAMESPACE),
];
/// Root attributes of the stylesheet, which declares the markup-compatibility extensions
pub const STYLES_ATTRIBUTES: &[(&str, &str)] = &[
    ("xmlns", MAIN_NAMESPACE),
    ("xmlns:mc", MARKUP_COMPATIBILITY_NAMESPACE),
    ("mc:Ignorable", "x14ac x16r2"),
    ("xmlns:x14ac", X14AC_NAMESPACE),
    ("xmlns:x16r2", X16R2_NAMESPACE),
];
pub const RELATIONSHIPS_ATTRIBUTES: &[(&str, &str)] = &[("xmlns", PACKAGE_RELATIONSHIPS_NAMESPACE)];
pub const CONTENT_TYPES_ATTRIBUTES: &[(&str, &str)] = &[("xmlns", CONTENT_NAMESPACE)];

/// Failures of the XML codec for a single part
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("failed to decode <{root}>: {message}")]
    Decode { root: &'static str, message: String },
    #[error("failed to encode <{root}>: {message}")]
    Encode { root: &'static str, message: String },
}

/// Schema descriptor of a package part: the root tag, the namespace attributes
/// the root must carry and how the part moves between bytes and its model.
pub trait XmlPart: Sized {
    const ROOT: &'static str;
    const ROOT_ATTRIBUTES: &'static [(&'static str, &'static str)];

    fn from_xml(xml: &str) -> Result<Self, SchemaError>;
    fn to_xml(&self) -> Result<String, SchemaError>;
}

pub trait PreprocessNamespace {
    /// Strips away the default namespace `xmlns=` from the first tag to enable yaserde to function properly
    fn strip_main_namespace(data: &str) -> String {
        let mut data = data.to_owned();
        for namespace in [
            MAIN_NAMESPACE,
            PACKAGE_RELATIONSHIPS_NAMESPACE,
            CONTENT_NAMESPACE,
        ] {
            data = data
                .replacen(&format!(r#"xmlns="{namespace}""#), "", 1)
                .replacen(&format!("xmlns='{namespace}'"), "", 1);
        }
        data
    }
}

/// Inserts `attributes` into the opening tag of `root`, the first element named `root`
/// after any prolog. Handles both `<root>` and `<root/>`.
pub fn with_root_attributes(xml: &str, root: &str, attributes: &[(&str, &str)]) -> String {
    let open = format!("<{root}");
    let mut search = 0;
    while let Some(found) = xml[search..].find(&open) {
        let end = search + found + open.len();
        match xml[end..].chars().next() {
            Some(c) if c == '>' || c == '/' || c.is_whitespace() => {
                let mut spliced = String::with_capacity(xml.len() + 256);
                spliced.push_str(&xml[..end]);
                for (name, value) in attributes {
                    let _ = write!(spliced, r#" {name}="{value}""#);
                }
                spliced.push_str(&xml[end..]);
                return spliced;
            }
            _ => search = end,
        }
    }
    xml.to_owned()
}

/// Decodes a SpreadsheetML part. Element and attribute names are matched on their
/// local name, so namespace prefixes in the source are transparent.
pub fn decode<T: DeserializeOwned>(root: &'static str, xml: &str) -> Result<T, SchemaError> {
    let fail = |message: String| SchemaError::Decode { root, message };
    let xml = preserve_text(xml.trim_start_matches('\u{feff}')).map_err(fail)?;
    quick_xml::de::from_str(&xml).map_err(|e| fail(e.to_string()))
}

/// Rewrites the content of every `<t>` element as CDATA. The deserializer trims
/// surrounding whitespace from text but never from CDATA, and `<t>` text is
/// significant to the last space.
fn preserve_text(xml: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Vec::with_capacity(xml.len() + xml.len() / 8));
    let mut in_text = false;
    loop {
        let event = reader.read_event().map_err(|e| e.to_string())?;
        match &event {
            Event::Start(e) => in_text = e.local_name().as_ref() == b"t",
            Event::End(_) => in_text = false,
            Event::Text(e) if in_text => {
                let text = e.unescape().map_err(|e| e.to_string())?;
                for section in BytesCData::escaped(&text) {
                    writer
                        .write_event(Event::CData(section))
                        .map_err(|e| e.to_string())?;
                }
                continue;
            }
            Event::Eof => break,
            _ => {}
        }
        writer.write_event(event).map_err(|e| e.to_string())?;
    }
    String::from_utf8(writer.into_inner()).map_err(|e| e.to_string())
}

/// Encodes a SpreadsheetML part under `root`, prefixed with [`XML_HEADER`]
pub fn encode<T: Serialize>(
    value: &T,
    root: &'static str,
    attributes: &[(&str, &str)],
) -> Result<String, SchemaError> {
    let body = quick_xml::se::to_string_with_root(root, value).map_err(|e| SchemaError::Encode {
        root,
        message: e.to_string(),
    })?;
    Ok(format!(
        "{XML_HEADER}\n{}",
        with_root_attributes(&body, root, attributes)
    ))
}

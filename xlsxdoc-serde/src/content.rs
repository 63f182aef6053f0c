use crate::{PreprocessNamespace, SchemaError, XmlPart, CONTENT_TYPES_ATTRIBUTES};
use yaserde::{YaDeserialize, YaSerialize};

/// The `[Content_Types].xml` manifest
#[derive(YaDeserialize, YaSerialize, Debug, Default, Clone, PartialEq)]
#[yaserde(rename = "Types")]
pub struct ContentTypes {
    #[yaserde(rename = "Default")]
    pub defaults: Vec<DefaultType>,
    #[yaserde(rename = "Override")]
    pub overrides: Vec<OverrideType>,
}

/// MIME type declared for every part with a given extension
#[derive(YaDeserialize, YaSerialize, Debug, Default, Clone, PartialEq)]
#[yaserde(rename = "Default")]
pub struct DefaultType {
    #[yaserde(rename = "Extension", attribute = true)]
    pub extension: String,
    #[yaserde(rename = "ContentType", attribute = true)]
    pub content_type: String,
}

/// MIME type declared for exactly one part
#[derive(YaDeserialize, YaSerialize, Debug, Default, Clone, PartialEq)]
#[yaserde(rename = "Override")]
pub struct OverrideType {
    #[yaserde(rename = "PartName", attribute = true)]
    pub part_name: String,
    #[yaserde(rename = "ContentType", attribute = true)]
    pub content_type: String,
}

impl PreprocessNamespace for ContentTypes {}

impl XmlPart for ContentTypes {
    const ROOT: &'static str = "Types";
    const ROOT_ATTRIBUTES: &'static [(&'static str, &'static str)] = CONTENT_TYPES_ATTRIBUTES;

    fn from_xml(xml: &str) -> Result<Self, SchemaError> {
        yaserde::de::from_str(&Self::strip_main_namespace(xml)).map_err(|message| {
            SchemaError::Decode {
                root: Self::ROOT,
                message,
            }
        })
    }

    fn to_xml(&self) -> Result<String, SchemaError> {
        let xml = yaserde::ser::to_string(self).map_err(|message| SchemaError::Encode {
            root: Self::ROOT,
            message,
        })?;
        Ok(crate::with_root_attributes(
            &xml,
            Self::ROOT,
            Self::ROOT_ATTRIBUTES,
        ))
    }
}

#[cfg(test)]
mod content_unittests {
    use super::ContentTypes;
    use crate::XmlPart;

    #[test]
    fn test_read_interleaved_entries() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Default Extension="xml" ContentType="application/xml"/></Types>"#;
        let actual = ContentTypes::from_xml(xml).unwrap();
        assert_eq!(actual.defaults.len(), 2);
        assert_eq!(actual.defaults[1].extension, "xml");
        assert_eq!(actual.overrides[0].part_name, "/xl/workbook.xml");
    }

    #[test]
    fn test_write_declares_namespace() {
        let actual = ContentTypes::default().to_xml().unwrap();
        assert!(actual.contains(
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types""#
        ));
    }
}

use crate::{PreprocessNamespace, SchemaError, XmlPart, RELATIONSHIPS_ATTRIBUTES};
use yaserde::{YaDeserialize, YaSerialize};

/// A `.rels` part: `_rels/.rels` or the sibling `_rels/<part>.rels` of any part
#[derive(YaDeserialize, YaSerialize, Debug, Default, Clone, PartialEq)]
#[yaserde(rename = "Relationships")]
pub struct Relationships {
    #[yaserde(rename = "Relationship")]
    pub items: Vec<Relationship>,
}

#[derive(YaDeserialize, YaSerialize, Debug, Default, Clone, PartialEq)]
#[yaserde(rename = "Relationship")]
pub struct Relationship {
    #[yaserde(rename = "Id", attribute = true)]
    pub id: String,
    #[yaserde(rename = "Type", attribute = true)]
    pub relationship_type: String,
    #[yaserde(rename = "Target", attribute = true)]
    pub target: String,
    #[yaserde(rename = "TargetMode", attribute = true)]
    pub target_mode: Option<String>,
}

impl PreprocessNamespace for Relationships {}

impl XmlPart for Relationships {
    const ROOT: &'static str = "Relationships";
    const ROOT_ATTRIBUTES: &'static [(&'static str, &'static str)] = RELATIONSHIPS_ATTRIBUTES;

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
mod relationships_unittests {
    use super::{Relationship, Relationships};
    use crate::XmlPart;

    const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com" TargetMode="External"/></Relationships>"#;

    #[test]
    fn test_read_relationships() {
        let actual = Relationships::from_xml(WORKBOOK_RELS).unwrap();
        assert_eq!(actual.items.len(), 3);
        assert_eq!(actual.items[1].id, "rId1");
        assert_eq!(actual.items[1].target, "worksheets/sheet1.xml");
        assert_eq!(actual.items[2].target_mode.as_deref(), Some("External"));
    }

    #[test]
    fn test_write_relationships_declares_namespace() {
        let rels = Relationships {
            items: vec![Relationship {
                id: "rId1".into(),
                relationship_type: "t".into(),
                target: "xl/workbook.xml".into(),
                target_mode: None,
            }],
        };
        let actual = rels.to_xml().unwrap();
        assert!(actual.contains(
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships""#
        ));
        assert!(!actual.contains("TargetMode"));
        assert_eq!(Relationships::from_xml(&actual).unwrap(), rels);
    }
}

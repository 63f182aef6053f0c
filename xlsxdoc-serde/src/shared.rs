use crate::{convert::bool_int, style::Color, BASE_ATTRIBUTES};
use serde::{Deserialize, Serialize};

/// The `xl/sharedStrings.xml` part
///
/// # XML Schema Mapping
/// ```xml
/// <complexType name="CT_Sst">
///     <sequence>
///         <element name="si" type="CT_Rst" minOccurs="0" maxOccurs="unbounded"/>
///     </sequence>
///     <attribute name="count" type="xsd:unsignedInt" use="optional"/>
///     <attribute name="uniqueCount" type="xsd:unsignedInt" use="optional"/>
/// </complexType>
/// ```
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct SharedStrings {
    #[serde(rename = "@count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(rename = "@uniqueCount", default, skip_serializing_if = "Option::is_none")]
    pub unique_count: Option<u32>,
    #[serde(rename = "si", default)]
    pub items: Vec<StringItem>,
}
spreadsheet_part!(SharedStrings, "sst", BASE_ATTRIBUTES);

/// A rich or plain string (`CT_Rst`), used by shared strings, inline strings and comments
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct StringItem {
    #[serde(rename = "t", default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Text>,
    #[serde(rename = "r", default)]
    pub runs: Vec<RichTextRun>,
}

impl StringItem {
    /// A plain string item
    pub fn plain(value: &str) -> Self {
        Self {
            text: Some(Text::new(value)),
            runs: Vec::new(),
        }
    }

    /// Plain text when present, otherwise the concatenated text of every run
    pub fn value(&self) -> String {
        match &self.text {
            Some(text) => text.value.clone(),
            None => self.runs.iter().map(|r| r.text.value.as_str()).collect(),
        }
    }

    pub fn is_rich(&self) -> bool {
        self.text.is_none() && !self.runs.is_empty()
    }
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Text {
    #[serde(
        rename(serialize = "@xml:space", deserialize = "@space"),
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub space: Option<String>,
    #[serde(rename = "$text", default)]
    pub value: String,
}

impl Text {
    /// Marks the text `preserve` when it begins or ends with whitespace
    pub fn new(value: &str) -> Self {
        let preserve =
            value.starts_with(char::is_whitespace) || value.ends_with(char::is_whitespace);
        Self {
            space: preserve.then(|| "preserve".to_owned()),
            value: value.to_owned(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct RichTextRun {
    #[serde(rename = "rPr", default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<RunProperties>,
    #[serde(rename = "t", default)]
    pub text: Text,
}

/// Run formatting (`CT_RPrElt`). Children may appear in any order.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct RunProperties {
    #[serde(rename = "rFont", default, skip_serializing_if = "Option::is_none")]
    pub font: Option<Val<String>>,
    #[serde(rename = "charset", default, skip_serializing_if = "Option::is_none")]
    pub charset: Option<Val<u32>>,
    #[serde(rename = "family", default, skip_serializing_if = "Option::is_none")]
    pub family: Option<Val<u32>>,
    #[serde(rename = "b", default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<Flag>,
    #[serde(rename = "i", default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<Flag>,
    #[serde(rename = "strike", default, skip_serializing_if = "Option::is_none")]
    pub strike: Option<Flag>,
    #[serde(rename = "color", default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(rename = "sz", default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Val<f64>>,
    #[serde(rename = "u", default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<OptionalVal<String>>,
    #[serde(rename = "vertAlign", default, skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<Val<String>>,
    #[serde(rename = "scheme", default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<Val<String>>,
}

/// An element whose only content is a required `val` attribute
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Val<T> {
    #[serde(rename = "@val")]
    pub val: T,
}

impl<T> Val<T> {
    pub fn new(val: T) -> Self {
        Self { val }
    }
}

/// An element with an optional `val` attribute, e.g. `<u/>` or `<u val="double"/>`
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct OptionalVal<T> {
    #[serde(rename = "@val", default, skip_serializing_if = "Option::is_none")]
    pub val: Option<T>,
}

/// A boolean property element: `<b/>` means on, `<b val="0"/>` means off
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Flag {
    #[serde(
        rename = "@val",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub val: Option<bool>,
}

impl Flag {
    pub fn is_on(&self) -> bool {
        self.val.unwrap_or(true)
    }
}

#[cfg(test)]
mod shared_unittests {
    use super::{SharedStrings, StringItem};
    use crate::XmlPart;

    const SST: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="3" uniqueCount="2"><si><t>Hello</t></si><si><r><rPr><b/><sz val="11"/><color theme="1"/><rFont val="Calibri"/><family val="2"/><scheme val="minor"/></rPr><t xml:space="preserve">Bold </t></r><r><t>tail</t></r></si></sst>"#;

    #[test]
    fn test_read_shared_strings() {
        let actual = SharedStrings::from_xml(SST).unwrap();
        assert_eq!(actual.count, Some(3));
        assert_eq!(actual.unique_count, Some(2));
        assert_eq!(actual.items[0].value(), "Hello");
        assert!(actual.items[1].is_rich());
        let properties = actual.items[1].runs[0].properties.as_ref().unwrap();
        assert!(properties.bold.as_ref().unwrap().is_on());
        assert_eq!(properties.font.as_ref().unwrap().val, "Calibri");
    }

    #[test]
    fn test_write_shared_strings() {
        let sst = SharedStrings {
            count: Some(1),
            unique_count: Some(1),
            items: vec![StringItem::plain(" padded")],
        };
        let actual = sst.to_xml().unwrap();
        assert!(actual.starts_with(crate::XML_HEADER));
        assert!(actual.contains(
            r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="1" uniqueCount="1">"#
        ));
        assert!(actual.contains(r#"<t xml:space="preserve"> padded</t>"#));
    }

    #[test]
    fn test_write_empty_shared_strings() {
        let sst = SharedStrings {
            unique_count: Some(0),
            ..Default::default()
        };
        let actual = sst.to_xml().unwrap();
        assert!(actual.contains(r#"uniqueCount="0"/>"#));
    }

    #[test]
    fn test_read_keeps_significant_whitespace() {
        let xml = r#"<sst><si><t xml:space="preserve">  indented</t></si><si><t xml:space="preserve"> </t></si><si><r><t>Bold</t></r><r><t xml:space="preserve"> tail </t></r></si></sst>"#;
        let actual = SharedStrings::from_xml(xml).unwrap();
        assert_eq!(actual.items[0].value(), "  indented");
        assert_eq!(actual.items[1].value(), " ");
        assert_eq!(actual.items[2].value(), "Bold tail ");
        assert_eq!(actual.items[0].text.as_ref().unwrap().space.as_deref(), Some("preserve"));
    }

    #[test]
    fn test_padded_text_survives_encoding() {
        let sst = SharedStrings {
            items: vec![StringItem::plain(" padded "), StringItem::plain("two  spaces")],
            ..Default::default()
        };
        let actual = SharedStrings::from_xml(&sst.to_xml().unwrap()).unwrap();
        assert_eq!(actual.items, sst.items);
    }
}

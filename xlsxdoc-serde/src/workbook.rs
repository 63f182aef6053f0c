use crate::{convert::bool_int, DOCUMENT_ATTRIBUTES};
use serde::{Deserialize, Serialize};

/// Theme version Excel 2016 and later stamp on new workbooks
pub const DEFAULT_THEME_VERSION: u32 = 164011;

/// The `xl/workbook.xml` part
///
/// # XML Schema Mapping
/// ```xml
/// <complexType name="CT_Workbook">
///     <sequence>
///         <element name="workbookPr" type="CT_WorkbookPr" minOccurs="0" maxOccurs="1"/>
///         <element name="bookViews" type="CT_BookViews" minOccurs="0" maxOccurs="1"/>
///         <element name="sheets" type="CT_Sheets" minOccurs="1" maxOccurs="1"/>
///         <element name="definedNames" type="CT_DefinedNames" minOccurs="0" maxOccurs="1"/>
///         <element name="calcPr" type="CT_CalcPr" minOccurs="0" maxOccurs="1"/>
///     </sequence>
/// </complexType>
/// ```
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Workbook {
    #[serde(rename = "workbookPr", default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<WorkbookProperties>,
    #[serde(rename = "bookViews", default, skip_serializing_if = "Option::is_none")]
    pub views: Option<BookViews>,
    #[serde(rename = "sheets", default)]
    pub sheets: Sheets,
    #[serde(rename = "definedNames", default, skip_serializing_if = "Option::is_none")]
    pub defined_names: Option<DefinedNames>,
    #[serde(rename = "calcPr", default, skip_serializing_if = "Option::is_none")]
    pub calculation: Option<CalculationProperties>,
}
spreadsheet_part!(Workbook, "workbook", DOCUMENT_ATTRIBUTES);

impl Workbook {
    /// Appends a sheet entry pointing at the worksheet part behind `relationship_id`
    pub fn add_sheet(&mut self, name: &str, relationship_id: &str) -> &Sheet {
        let id = self.sheets.items.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        self.sheets.items.push(Sheet {
            name: name.to_owned(),
            id,
            state: None,
            relationship_id: relationship_id.to_owned(),
        });
        &self.sheets.items[self.sheets.items.len() - 1]
    }

    /// Makes sure the properties spreadsheet applications rely on are present
    pub fn ensure_properties(&mut self) {
        let properties = self.properties.get_or_insert_with(Default::default);
        properties
            .default_theme_version
            .get_or_insert(DEFAULT_THEME_VERSION);
    }
}

/// `CT_WorkbookPr`
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct WorkbookProperties {
    #[serde(
        rename = "@date1904",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub date1904: Option<bool>,
    #[serde(
        rename = "@filterPrivacy",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub filter_privacy: Option<bool>,
    #[serde(rename = "@defaultThemeVersion", default, skip_serializing_if = "Option::is_none")]
    pub default_theme_version: Option<u32>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct BookViews {
    #[serde(rename = "workbookView", default)]
    pub items: Vec<WorkbookView>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct WorkbookView {
    #[serde(rename = "@xWindow", default, skip_serializing_if = "Option::is_none")]
    pub x_window: Option<i32>,
    #[serde(rename = "@yWindow", default, skip_serializing_if = "Option::is_none")]
    pub y_window: Option<i32>,
    #[serde(rename = "@windowWidth", default, skip_serializing_if = "Option::is_none")]
    pub window_width: Option<u32>,
    #[serde(rename = "@windowHeight", default, skip_serializing_if = "Option::is_none")]
    pub window_height: Option<u32>,
    #[serde(rename = "@firstSheet", default, skip_serializing_if = "Option::is_none")]
    pub first_sheet: Option<u32>,
    #[serde(rename = "@activeTab", default, skip_serializing_if = "Option::is_none")]
    pub active_tab: Option<u32>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Sheets {
    #[serde(rename = "sheet", default)]
    pub items: Vec<Sheet>,
}

/// A worksheet as listed in the workbook, in display order
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Sheet {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@sheetId")]
    pub id: u32,
    #[serde(rename = "@state", default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(rename(serialize = "@r:id", deserialize = "@id"))]
    pub relationship_id: String,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct DefinedNames {
    #[serde(rename = "definedName", default)]
    pub items: Vec<DefinedName>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct DefinedName {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@localSheetId", default, skip_serializing_if = "Option::is_none")]
    pub local_sheet_id: Option<u32>,
    #[serde(
        rename = "@hidden",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub hidden: Option<bool>,
    #[serde(rename = "$text", default)]
    pub formula: String,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct CalculationProperties {
    #[serde(rename = "@calcId", default, skip_serializing_if = "Option::is_none")]
    pub calc_id: Option<u32>,
    #[serde(
        rename = "@fullCalcOnLoad",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub full_calc_on_load: Option<bool>,
}

#[cfg(test)]
mod workbook_unittests {
    use super::{Workbook, DEFAULT_THEME_VERSION};
    use crate::XmlPart;

    const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><fileVersion appName="xl" lastEdited="4" lowestEdited="4" rupBuild="4505"/><workbookPr date1904="1"/><bookViews><workbookView xWindow="240" yWindow="15" windowWidth="16095" windowHeight="9660"/></bookViews><sheets><sheet name="Data" sheetId="1" r:id="rId1"/><sheet name="Hidden" sheetId="4" state="hidden" r:id="rId2"/></sheets><definedNames><definedName name="_xlnm.Print_Area" localSheetId="0">Data!$A$1:$B$2</definedName></definedNames><calcPr calcId="124519" fullCalcOnLoad="1"/></workbook>"#;

    #[test]
    fn test_read_workbook() {
        let book = Workbook::from_xml(WORKBOOK).unwrap();
        assert_eq!(book.properties.as_ref().unwrap().date1904, Some(true));
        assert_eq!(book.sheets.items.len(), 2);
        assert_eq!(book.sheets.items[1].relationship_id, "rId2");
        assert_eq!(book.sheets.items[1].state.as_deref(), Some("hidden"));
        assert_eq!(
            book.defined_names.as_ref().unwrap().items[0].formula,
            "Data!$A$1:$B$2"
        );
    }

    #[test]
    fn test_add_sheet_takes_next_free_id() {
        let mut book = Workbook::from_xml(WORKBOOK).unwrap();
        let sheet = book.add_sheet("New", "rId9");
        assert_eq!(sheet.id, 5);
        assert_eq!(sheet.relationship_id, "rId9");
    }

    #[test]
    fn test_write_workbook_with_theme_version() {
        let mut book = Workbook::from_xml(WORKBOOK).unwrap();
        book.ensure_properties();
        let actual = book.to_xml().unwrap();
        assert!(actual.contains(&format!(
            r#"<workbookPr date1904="1" defaultThemeVersion="{DEFAULT_THEME_VERSION}"/>"#
        )));
        assert!(actual.contains(r#"<sheet name="Data" sheetId="1" r:id="rId1"/>"#));
        assert_eq!(Workbook::from_xml(&actual).unwrap(), book);
    }
}

use crate::{convert::bool_int, shared::StringItem, style::Color, DOCUMENT_ATTRIBUTES};
use serde::{Deserialize, Serialize};

/// The `xl/worksheets/sheetN.xml` part as it appears on the wire
///
/// Rows and cells are kept in document order here; references are raw `ST_CellRef` text.
///
/// # XML Schema Mapping
/// Only the children kept on a round trip are listed, in schema order:
/// ```xml
/// <complexType name="CT_Worksheet">
///     <sequence>
///         <element name="sheetPr" type="CT_SheetPr" minOccurs="0" maxOccurs="1"/>
///         <element name="dimension" type="CT_SheetDimension" minOccurs="0" maxOccurs="1"/>
///         <element name="sheetViews" type="CT_SheetViews" minOccurs="0" maxOccurs="1"/>
///         <element name="sheetFormatPr" type="CT_SheetFormatPr" minOccurs="0" maxOccurs="1"/>
///         <element name="cols" type="CT_Cols" minOccurs="0" maxOccurs="unbounded"/>
///         <element name="sheetData" type="CT_SheetData" minOccurs="1" maxOccurs="1"/>
///         <element name="mergeCells" type="CT_MergeCells" minOccurs="0" maxOccurs="1"/>
///         <element name="pageMargins" type="CT_PageMargins" minOccurs="0" maxOccurs="1"/>
///         <element name="drawing" type="CT_Drawing" minOccurs="0" maxOccurs="1"/>
///         <element name="legacyDrawing" type="CT_LegacyDrawing" minOccurs="0" maxOccurs="1"/>
///         <element name="tableParts" type="CT_TableParts" minOccurs="0" maxOccurs="1"/>
///     </sequence>
/// </complexType>
/// ```
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Worksheet {
    #[serde(rename = "sheetPr", default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<SheetProperties>,
    #[serde(rename = "dimension", default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<Dimension>,
    #[serde(rename = "sheetViews", default, skip_serializing_if = "Option::is_none")]
    pub sheet_views: Option<SheetViews>,
    #[serde(rename = "sheetFormatPr", default, skip_serializing_if = "Option::is_none")]
    pub format_properties: Option<FormatProperties>,
    #[serde(rename = "cols", default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Columns>,
    #[serde(rename = "sheetData", default)]
    pub data: SheetData,
    #[serde(rename = "mergeCells", default, skip_serializing_if = "Option::is_none")]
    pub merge_cells: Option<MergeCells>,
    #[serde(rename = "pageMargins", default, skip_serializing_if = "Option::is_none")]
    pub page_margins: Option<PageMargins>,
    #[serde(rename = "drawing", default, skip_serializing_if = "Option::is_none")]
    pub drawing: Option<PartReference>,
    #[serde(rename = "legacyDrawing", default, skip_serializing_if = "Option::is_none")]
    pub legacy_drawing: Option<PartReference>,
    #[serde(rename = "tableParts", default, skip_serializing_if = "Option::is_none")]
    pub table_parts: Option<TableParts>,
}
spreadsheet_part!(Worksheet, "worksheet", DOCUMENT_ATTRIBUTES);

/// `CT_SheetPr`
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct SheetProperties {
    #[serde(rename = "@codeName", default, skip_serializing_if = "Option::is_none")]
    pub code_name: Option<String>,
    #[serde(
        rename = "@filterMode",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub filter_mode: Option<bool>,
    #[serde(rename = "tabColor", default, skip_serializing_if = "Option::is_none")]
    pub tab_color: Option<Color>,
    #[serde(rename = "outlinePr", default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<OutlineProperties>,
    #[serde(rename = "pageSetUpPr", default, skip_serializing_if = "Option::is_none")]
    pub page_setup: Option<PageSetUpProperties>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct OutlineProperties {
    #[serde(
        rename = "@summaryBelow",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub summary_below: Option<bool>,
    #[serde(
        rename = "@summaryRight",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub summary_right: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct PageSetUpProperties {
    #[serde(
        rename = "@autoPageBreaks",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub auto_page_breaks: Option<bool>,
    #[serde(
        rename = "@fitToPage",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub fit_to_page: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Dimension {
    #[serde(rename = "@ref")]
    pub reference: String,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct SheetViews {
    #[serde(rename = "sheetView", default)]
    pub items: Vec<SheetView>,
}

/// `CT_SheetView`
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct SheetView {
    #[serde(
        rename = "@tabSelected",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub tab_selected: Option<bool>,
    #[serde(
        rename = "@showGridLines",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub show_grid_lines: Option<bool>,
    #[serde(
        rename = "@showRowColHeaders",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub show_headers: Option<bool>,
    #[serde(
        rename = "@defaultGridColor",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub default_grid_color: Option<bool>,
    #[serde(rename = "@view", default, skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(rename = "@topLeftCell", default, skip_serializing_if = "Option::is_none")]
    pub top_left_cell: Option<String>,
    #[serde(rename = "@zoomScale", default, skip_serializing_if = "Option::is_none")]
    pub zoom_scale: Option<u32>,
    #[serde(rename = "@zoomScaleNormal", default, skip_serializing_if = "Option::is_none")]
    pub zoom_scale_normal: Option<u32>,
    #[serde(rename = "@workbookViewId")]
    pub workbook_view_id: u32,
    #[serde(rename = "pane", default, skip_serializing_if = "Option::is_none")]
    pub pane: Option<Pane>,
    #[serde(rename = "selection", default)]
    pub selections: Vec<Selection>,
}

/// `CT_Pane`, frozen or split panes of a view
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Pane {
    #[serde(rename = "@xSplit", default, skip_serializing_if = "Option::is_none")]
    pub x_split: Option<f64>,
    #[serde(rename = "@ySplit", default, skip_serializing_if = "Option::is_none")]
    pub y_split: Option<f64>,
    #[serde(rename = "@topLeftCell", default, skip_serializing_if = "Option::is_none")]
    pub top_left_cell: Option<String>,
    #[serde(rename = "@activePane", default, skip_serializing_if = "Option::is_none")]
    pub active_pane: Option<String>,
    #[serde(rename = "@state", default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Selection {
    #[serde(rename = "@pane", default, skip_serializing_if = "Option::is_none")]
    pub pane: Option<String>,
    #[serde(rename = "@activeCell", default, skip_serializing_if = "Option::is_none")]
    pub active_cell: Option<String>,
    #[serde(rename = "@sqref", default, skip_serializing_if = "Option::is_none")]
    pub sqref: Option<String>,
}

/// `CT_SheetFormatPr`
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct FormatProperties {
    #[serde(rename = "@baseColWidth", default, skip_serializing_if = "Option::is_none")]
    pub base_column_width: Option<u32>,
    #[serde(rename = "@defaultColWidth", default, skip_serializing_if = "Option::is_none")]
    pub default_column_width: Option<f64>,
    #[serde(rename = "@defaultRowHeight")]
    pub default_row_height: f64,
    #[serde(
        rename = "@customHeight",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub custom_height: Option<bool>,
    #[serde(rename = "@outlineLevelRow", default, skip_serializing_if = "Option::is_none")]
    pub outline_level_row: Option<u32>,
    #[serde(rename = "@outlineLevelCol", default, skip_serializing_if = "Option::is_none")]
    pub outline_level_column: Option<u32>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Columns {
    #[serde(rename = "col", default)]
    pub items: Vec<Column>,
}

/// A column definition (`CT_Col`) covering the inclusive span `min..=max`
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Column {
    #[serde(rename = "@min")]
    pub min: u32,
    #[serde(rename = "@max")]
    pub max: u32,
    #[serde(rename = "@width", default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(rename = "@style", default, skip_serializing_if = "Option::is_none")]
    pub style: Option<u32>,
    #[serde(
        rename = "@hidden",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub hidden: Option<bool>,
    #[serde(
        rename = "@bestFit",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub best_fit: Option<bool>,
    #[serde(
        rename = "@customWidth",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub custom_width: Option<bool>,
    #[serde(rename = "@outlineLevel", default, skip_serializing_if = "Option::is_none")]
    pub outline_level: Option<u32>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct SheetData {
    #[serde(rename = "row", default)]
    pub rows: Vec<Row>,
}

/// `CT_Row`
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Row {
    #[serde(rename = "@r", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<u32>,
    #[serde(rename = "@s", default, skip_serializing_if = "Option::is_none")]
    pub style: Option<u32>,
    #[serde(
        rename = "@customFormat",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub custom_format: Option<bool>,
    #[serde(rename = "@ht", default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(
        rename = "@hidden",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub hidden: Option<bool>,
    #[serde(
        rename = "@customHeight",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub custom_height: Option<bool>,
    #[serde(rename = "c", default)]
    pub cells: Vec<Cell>,
}

/// `CT_Cell`: `f`, `v` and `is` are child elements, everything else an attribute
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Cell {
    #[serde(rename = "@r", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(rename = "@s", default, skip_serializing_if = "Option::is_none")]
    pub style: Option<u32>,
    #[serde(rename = "@t", default, skip_serializing_if = "Option::is_none")]
    pub cell_type: Option<String>,
    #[serde(rename = "f", default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<Formula>,
    #[serde(rename = "v", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(rename = "is", default, skip_serializing_if = "Option::is_none")]
    pub inline_string: Option<StringItem>,
}

/// `CT_CellFormula`
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Formula {
    #[serde(rename = "@t", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(rename = "@ref", default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(rename = "@si", default, skip_serializing_if = "Option::is_none")]
    pub shared_index: Option<u32>,
    #[serde(rename = "$text", default)]
    pub text: String,
}

impl Formula {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            ..Default::default()
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct MergeCells {
    #[serde(rename = "@count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(rename = "mergeCell", default)]
    pub items: Vec<MergeCell>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct MergeCell {
    #[serde(rename = "@ref")]
    pub reference: String,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct PageMargins {
    #[serde(rename = "@left")]
    pub left: f64,
    #[serde(rename = "@right")]
    pub right: f64,
    #[serde(rename = "@top")]
    pub top: f64,
    #[serde(rename = "@bottom")]
    pub bottom: f64,
    #[serde(rename = "@header")]
    pub header: f64,
    #[serde(rename = "@footer")]
    pub footer: f64,
}

/// An element that only points at another part by relationship id (`r:id`)
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct PartReference {
    #[serde(rename(serialize = "@r:id", deserialize = "@id"))]
    pub id: String,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct TableParts {
    #[serde(rename = "@count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(rename = "tablePart", default)]
    pub items: Vec<PartReference>,
}

#[cfg(test)]
mod sheet_unittests {
    use super::{Cell, Row, SheetData, Worksheet};
    use crate::XmlPart;

    const SHEET: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:x14ac="http://schemas.microsoft.com/office/spreadsheetml/2009/9/ac"><sheetPr><tabColor theme="5"/><pageSetUpPr fitToPage="1"/></sheetPr><dimension ref="A1:B2"/><sheetViews><sheetView showGridLines="0" tabSelected="1" workbookViewId="0"><pane ySplit="1" topLeftCell="A2" activePane="bottomLeft" state="frozen"/><selection pane="bottomLeft" activeCell="B2" sqref="B2"/></sheetView></sheetViews><sheetFormatPr defaultRowHeight="15" x14ac:dyDescent="0.25"/><cols><col min="1" max="2" width="12.5" customWidth="1"/></cols><sheetData><row r="1" spans="1:2" ht="20" customHeight="1"><c r="A1" t="s"><v>0</v></c><c r="B1" s="1"><v>12.5</v></c></row><row r="2"><c r="A2"><f>B1*2</f><v>25</v></c><c r="B2" t="inlineStr"><is><t>inline</t></is></c></row></sheetData><mergeCells count="1"><mergeCell ref="C1:D1"/></mergeCells><pageMargins left="0.7" right="0.7" top="0.75" bottom="0.75" header="0.3" footer="0.3"/><legacyDrawing r:id="rId2"/></worksheet>"#;

    mod sheet_xml {
        use super::*;

        #[test]
        fn test_read_worksheet() {
            let sheet = Worksheet::from_xml(SHEET).unwrap();
            let properties = sheet.properties.as_ref().unwrap();
            assert_eq!(properties.tab_color.as_ref().unwrap().theme, Some(5));
            assert_eq!(properties.page_setup.as_ref().unwrap().fit_to_page, Some(true));
            let view = &sheet.sheet_views.as_ref().unwrap().items[0];
            assert_eq!(view.show_grid_lines, Some(false));
            assert_eq!(view.pane.as_ref().unwrap().state.as_deref(), Some("frozen"));
            assert_eq!(sheet.columns.as_ref().unwrap().items[0].width, Some(12.5));
            let rows = &sheet.data.rows;
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].height, Some(20.0));
            assert_eq!(rows[0].custom_height, Some(true));
            assert_eq!(rows[0].cells[0].cell_type.as_deref(), Some("s"));
            assert_eq!(rows[1].cells[0].formula.as_ref().unwrap().text, "B1*2");
            assert_eq!(
                rows[1].cells[1].inline_string.as_ref().unwrap().value(),
                "inline"
            );
            assert_eq!(sheet.legacy_drawing.as_ref().unwrap().id, "rId2");
        }

        #[test]
        fn test_write_worksheet() {
            let sheet = Worksheet::from_xml(SHEET).unwrap();
            let actual = sheet.to_xml().unwrap();
            assert!(actual.contains(r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships""#));
            assert!(actual.contains(r#"showGridLines="0""#));
            assert!(actual.contains(r#"<legacyDrawing r:id="rId2"/>"#));
            assert!(actual.contains(r#"<c r="A1" t="s"><v>0</v></c>"#));
            assert!(!actual.contains("dyDescent"));
            assert_eq!(Worksheet::from_xml(&actual).unwrap(), sheet);
        }

        #[test]
        fn test_write_empty_sheet_data() {
            let sheet = Worksheet {
                data: SheetData {
                    rows: vec![Row {
                        reference: Some(1),
                        cells: vec![Cell {
                            reference: Some("A1".into()),
                            value: Some("1".into()),
                            ..Default::default()
                        }],
                        ..Default::default()
                    }],
                },
                ..Default::default()
            };
            let actual = sheet.to_xml().unwrap();
            assert!(actual.contains(r#"<sheetData><row r="1"><c r="A1"><v>1</v></c></row></sheetData>"#));
            assert!(Worksheet::default().to_xml().unwrap().contains("<sheetData/>"));
        }
    }
}

use crate::{
    convert::bool_int,
    shared::{Flag, OptionalVal, Val},
    SchemaError, XmlPart, STYLES_ATTRIBUTES,
};
use serde::{Deserialize, Serialize};

/// The `xl/styles.xml` part
///
/// Responsible for the styling of the entire workbook such as number formats, fonts,
/// fills, borders and the cell formats (`xf`) cells and rows refer to by index.
///
/// # XML Schema Mapping
/// ```xml
/// <complexType name="CT_Stylesheet">
///     <sequence>
///         <element name="numFmts" type="CT_NumFmts" minOccurs="0" maxOccurs="1"/>
///         <element name="fonts" type="CT_Fonts" minOccurs="0" maxOccurs="1"/>
///         <element name="fills" type="CT_Fills" minOccurs="0" maxOccurs="1"/>
///         <element name="borders" type="CT_Borders" minOccurs="0" maxOccurs="1"/>
///         <element name="cellStyleXfs" type="CT_CellStyleXfs" minOccurs="0" maxOccurs="1"/>
///         <element name="cellXfs" type="CT_CellXfs" minOccurs="0" maxOccurs="1"/>
///         <element name="cellStyles" type="CT_CellStyles" minOccurs="0" maxOccurs="1"/>
///         <element name="dxfs" type="CT_Dxfs" minOccurs="0" maxOccurs="1"/>
///         <element name="tableStyles" type="CT_TableStyles" minOccurs="0" maxOccurs="1"/>
///         <element name="colors" type="CT_Colors" minOccurs="0" maxOccurs="1"/>
///         <element name="extLst" type="CT_ExtensionList" minOccurs="0" maxOccurs="1"/>
///     </sequence>
/// </complexType>
/// ```
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Styles {
    #[serde(rename = "numFmts", default, skip_serializing_if = "Option::is_none")]
    pub number_formats: Option<NumberFormats>,
    #[serde(rename = "fonts", default, skip_serializing_if = "Option::is_none")]
    pub fonts: Option<Fonts>,
    #[serde(rename = "fills", default, skip_serializing_if = "Option::is_none")]
    pub fills: Option<Fills>,
    #[serde(rename = "borders", default, skip_serializing_if = "Option::is_none")]
    pub borders: Option<Borders>,
    #[serde(rename = "cellStyleXfs", default, skip_serializing_if = "Option::is_none")]
    pub cell_style_formats: Option<CellFormats>,
    #[serde(rename = "cellXfs", default, skip_serializing_if = "Option::is_none")]
    pub cell_formats: Option<CellFormats>,
    #[serde(rename = "cellStyles", default, skip_serializing_if = "Option::is_none")]
    pub cell_styles: Option<CellStyles>,
    #[serde(rename = "dxfs", default, skip_serializing_if = "Option::is_none")]
    pub differential_formats: Option<DifferentialFormats>,
    #[serde(rename = "tableStyles", default, skip_serializing_if = "Option::is_none")]
    pub table_styles: Option<TableStyles>,
    #[serde(rename = "colors", default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Colors>,
}
spreadsheet_part!(Styles, "styleSheet", STYLES_ATTRIBUTES);

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct NumberFormats {
    #[serde(rename = "@count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(rename = "numFmt", default)]
    pub items: Vec<NumberFormat>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct NumberFormat {
    #[serde(rename = "@numFmtId")]
    pub id: u32,
    #[serde(rename = "@formatCode")]
    pub format_code: String,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Fonts {
    #[serde(rename = "@count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(rename = "font", default)]
    pub items: Vec<Font>,
}

/// `CT_Font`. Children may appear in any order.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Font {
    #[serde(rename = "b", default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<Flag>,
    #[serde(rename = "i", default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<Flag>,
    #[serde(rename = "strike", default, skip_serializing_if = "Option::is_none")]
    pub strike: Option<Flag>,
    #[serde(rename = "u", default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<OptionalVal<String>>,
    #[serde(rename = "vertAlign", default, skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<Val<String>>,
    #[serde(rename = "sz", default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Val<f64>>,
    #[serde(rename = "color", default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(rename = "name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Val<String>>,
    #[serde(rename = "family", default, skip_serializing_if = "Option::is_none")]
    pub family: Option<Val<u32>>,
    #[serde(rename = "charset", default, skip_serializing_if = "Option::is_none")]
    pub charset: Option<Val<u32>>,
    #[serde(rename = "scheme", default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<Val<String>>,
}

/// `CT_Color`: one of `rgb`, `theme`, `indexed` or `auto`, with an optional tint
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Color {
    #[serde(rename = "@auto", default, skip_serializing_if = "Option::is_none", with = "bool_int")]
    pub auto: Option<bool>,
    #[serde(rename = "@indexed", default, skip_serializing_if = "Option::is_none")]
    pub indexed: Option<u32>,
    #[serde(rename = "@rgb", default, skip_serializing_if = "Option::is_none")]
    pub rgb: Option<String>,
    #[serde(rename = "@theme", default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<u32>,
    #[serde(rename = "@tint", default, skip_serializing_if = "Option::is_none")]
    pub tint: Option<f64>,
}

impl Color {
    pub fn rgb(argb: &str) -> Self {
        Self {
            rgb: Some(argb.to_owned()),
            ..Default::default()
        }
    }

    pub fn theme(id: u32) -> Self {
        Self {
            theme: Some(id),
            ..Default::default()
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Fills {
    #[serde(rename = "@count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(rename = "fill", default)]
    pub items: Vec<Fill>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Fill {
    #[serde(rename = "patternFill", default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<PatternFill>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct PatternFill {
    #[serde(rename = "@patternType", default, skip_serializing_if = "Option::is_none")]
    pub pattern_type: Option<String>,
    #[serde(rename = "fgColor", default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<Color>,
    #[serde(rename = "bgColor", default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Borders {
    #[serde(rename = "@count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(rename = "border", default)]
    pub items: Vec<Border>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Border {
    #[serde(
        rename = "@diagonalUp",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub diagonal_up: Option<bool>,
    #[serde(
        rename = "@diagonalDown",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub diagonal_down: Option<bool>,
    #[serde(rename = "left", default, skip_serializing_if = "Option::is_none")]
    pub left: Option<BorderEdge>,
    #[serde(rename = "right", default, skip_serializing_if = "Option::is_none")]
    pub right: Option<BorderEdge>,
    #[serde(rename = "top", default, skip_serializing_if = "Option::is_none")]
    pub top: Option<BorderEdge>,
    #[serde(rename = "bottom", default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<BorderEdge>,
    #[serde(rename = "diagonal", default, skip_serializing_if = "Option::is_none")]
    pub diagonal: Option<BorderEdge>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct BorderEdge {
    #[serde(rename = "@style", default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(rename = "color", default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

/// Both `cellStyleXfs` and `cellXfs`
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct CellFormats {
    #[serde(rename = "@count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(rename = "xf", default)]
    pub items: Vec<Format>,
}

/// A cell format record (`CT_Xf`)
///
/// # XML Schema Mapping
/// ```xml
/// <complexType name="CT_Xf">
///     <sequence>
///         <element name="alignment" type="CT_CellAlignment" minOccurs="0" maxOccurs="1"/>
///         <element name="protection" type="CT_CellProtection" minOccurs="0" maxOccurs="1"/>
///     </sequence>
///     <attribute name="numFmtId" type="ST_NumFmtId" use="optional"/>
///     <attribute name="fontId" type="ST_FontId" use="optional"/>
///     <attribute name="fillId" type="ST_FillId" use="optional"/>
///     <attribute name="borderId" type="ST_BorderId" use="optional"/>
///     <attribute name="xfId" type="ST_CellStyleXfId" use="optional"/>
///     <attribute name="quotePrefix" type="xsd:boolean" use="optional" default="false"/>
///     <attribute name="applyNumberFormat" type="xsd:boolean" use="optional"/>
///     <attribute name="applyFont" type="xsd:boolean" use="optional"/>
///     <attribute name="applyFill" type="xsd:boolean" use="optional"/>
///     <attribute name="applyBorder" type="xsd:boolean" use="optional"/>
///     <attribute name="applyAlignment" type="xsd:boolean" use="optional"/>
///     <attribute name="applyProtection" type="xsd:boolean" use="optional"/>
/// </complexType>
/// ```
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Format {
    #[serde(rename = "@numFmtId", default, skip_serializing_if = "Option::is_none")]
    pub number_format_id: Option<u32>,
    #[serde(rename = "@fontId", default, skip_serializing_if = "Option::is_none")]
    pub font_id: Option<u32>,
    #[serde(rename = "@fillId", default, skip_serializing_if = "Option::is_none")]
    pub fill_id: Option<u32>,
    #[serde(rename = "@borderId", default, skip_serializing_if = "Option::is_none")]
    pub border_id: Option<u32>,
    #[serde(rename = "@xfId", default, skip_serializing_if = "Option::is_none")]
    pub format_id: Option<u32>,
    #[serde(
        rename = "@quotePrefix",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub quote_prefix: Option<bool>,
    #[serde(
        rename = "@applyNumberFormat",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub apply_number_format: Option<bool>,
    #[serde(
        rename = "@applyFont",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub apply_font: Option<bool>,
    #[serde(
        rename = "@applyFill",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub apply_fill: Option<bool>,
    #[serde(
        rename = "@applyBorder",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub apply_border: Option<bool>,
    #[serde(
        rename = "@applyAlignment",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub apply_alignment: Option<bool>,
    #[serde(
        rename = "@applyProtection",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub apply_protection: Option<bool>,
    #[serde(rename = "alignment", default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(rename = "protection", default, skip_serializing_if = "Option::is_none")]
    pub protection: Option<Protection>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Alignment {
    #[serde(rename = "@horizontal", default, skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<String>,
    #[serde(rename = "@vertical", default, skip_serializing_if = "Option::is_none")]
    pub vertical: Option<String>,
    #[serde(rename = "@textRotation", default, skip_serializing_if = "Option::is_none")]
    pub text_rotation: Option<u32>,
    #[serde(
        rename = "@wrapText",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub wrap_text: Option<bool>,
    #[serde(rename = "@indent", default, skip_serializing_if = "Option::is_none")]
    pub indent: Option<u32>,
    #[serde(
        rename = "@shrinkToFit",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub shrink_to_fit: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Protection {
    #[serde(
        rename = "@locked",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub locked: Option<bool>,
    #[serde(
        rename = "@hidden",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bool_int"
    )]
    pub hidden: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct CellStyles {
    #[serde(rename = "@count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(rename = "cellStyle", default)]
    pub items: Vec<CellStyle>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct CellStyle {
    #[serde(rename = "@name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "@xfId")]
    pub format_id: u32,
    #[serde(rename = "@builtinId", default, skip_serializing_if = "Option::is_none")]
    pub builtin_id: Option<u32>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct DifferentialFormats {
    #[serde(rename = "@count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(rename = "dxf", default)]
    pub items: Vec<DifferentialFormat>,
}

/// `CT_Dxf`, the partial format used by conditional formatting and tables
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct DifferentialFormat {
    #[serde(rename = "font", default, skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    #[serde(rename = "numFmt", default, skip_serializing_if = "Option::is_none")]
    pub number_format: Option<NumberFormat>,
    #[serde(rename = "fill", default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
    #[serde(rename = "alignment", default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(rename = "border", default, skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct TableStyles {
    #[serde(rename = "@count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(rename = "@defaultTableStyle", default, skip_serializing_if = "Option::is_none")]
    pub default_table_style: Option<String>,
    #[serde(rename = "@defaultPivotStyle", default, skip_serializing_if = "Option::is_none")]
    pub default_pivot_style: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Colors {
    #[serde(rename = "indexedColors", default, skip_serializing_if = "Option::is_none")]
    pub indexed: Option<IndexedColors>,
    #[serde(rename = "mruColors", default, skip_serializing_if = "Option::is_none")]
    pub most_recently_used: Option<MostRecentlyUsedColors>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct IndexedColors {
    #[serde(rename = "rgbColor", default)]
    pub items: Vec<Color>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct MostRecentlyUsedColors {
    #[serde(rename = "color", default)]
    pub items: Vec<Color>,
}

/// Format codes of the number formats every spreadsheet application knows
/// without a `numFmt` declaration, keyed by id.
const BUILTIN_NUMBER_FORMATS: &[(u32, &str)] = &[
    (0, "General"),
    (1, "0"),
    (2, "0.00"),
    (3, "#,##0"),
    (4, "#,##0.00"),
    (9, "0%"),
    (10, "0.00%"),
    (11, "0.00E+00"),
    (12, "# ?/?"),
    (13, "# ??/??"),
    (14, "mm-dd-yy"),
    (15, "d-mmm-yy"),
    (16, "d-mmm"),
    (17, "mmm-yy"),
    (18, "h:mm AM/PM"),
    (19, "h:mm:ss AM/PM"),
    (20, "h:mm"),
    (21, "h:mm:ss"),
    (22, "m/d/yy h:mm"),
    (37, "#,##0 ;(#,##0)"),
    (38, "#,##0 ;[Red](#,##0)"),
    (39, "#,##0.00;(#,##0.00)"),
    (40, "#,##0.00;[Red](#,##0.00)"),
    (45, "mm:ss"),
    (46, "[h]:mm:ss"),
    (47, "mmss.0"),
    (48, "##0.0E+0"),
    (49, "@"),
];

/// First id free for custom number formats
pub const FIRST_CUSTOM_NUMBER_FORMAT: u32 = 164;

const STANDARD_STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="2"><font><sz val="11"/><color theme="1"/><name val="Calibri"/><family val="2"/><scheme val="minor"/></font><font><b/><sz val="11"/><color theme="1"/><name val="Calibri"/><family val="2"/><scheme val="minor"/></font></fonts><fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="2"><border><left/><right/><top/><bottom/><diagonal/></border><border><left style="thin"><color indexed="64"/></left><right style="thin"><color indexed="64"/></right><top style="thin"><color indexed="64"/></top><bottom style="thin"><color indexed="64"/></bottom><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="4"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1"/><xf numFmtId="0" fontId="0" fillId="0" borderId="1" xfId="0" applyBorder="1"/><xf numFmtId="49" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1" applyAlignment="1"><alignment vertical="top" wrapText="1"/></xf></cellXfs><cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles><dxfs count="0"/><tableStyles count="0" defaultTableStyle="TableStyleMedium2" defaultPivotStyle="PivotStyleLight16"/></styleSheet>"#;

impl Styles {
    /// A minimal stylesheet: the default font, the two mandatory fills, an empty and a
    /// thin border, and cell formats for plain, bold, bordered and wrapped text.
    pub fn standard() -> Result<Self, SchemaError> {
        Self::from_xml(STANDARD_STYLES)
    }

    /// Format code for a number format id, custom declarations first, then the built-in table
    pub fn number_format_code(&self, id: u32) -> Option<&str> {
        self.number_formats
            .as_ref()
            .and_then(|formats| formats.items.iter().find(|f| f.id == id))
            .map(|f| f.format_code.as_str())
            .or_else(|| builtin_number_format(id))
    }

    pub fn font(&self, index: usize) -> Option<&Font> {
        self.fonts.as_ref()?.items.get(index)
    }

    pub fn fill(&self, index: usize) -> Option<&Fill> {
        self.fills.as_ref()?.items.get(index)
    }

    pub fn border(&self, index: usize) -> Option<&Border> {
        self.borders.as_ref()?.items.get(index)
    }

    pub fn cell_format(&self, index: usize) -> Option<&Format> {
        self.cell_formats.as_ref()?.items.get(index)
    }

    pub fn cell_style(&self, index: usize) -> Option<&CellStyle> {
        self.cell_styles.as_ref()?.items.get(index)
    }

    /// Adds a custom number format, reusing an existing declaration with the same code
    pub fn add_number_format(&mut self, format_code: &str) -> u32 {
        let formats = self.number_formats.get_or_insert_with(Default::default);
        if let Some(existing) = formats.items.iter().find(|f| f.format_code == format_code) {
            return existing.id;
        }
        let id = formats
            .items
            .iter()
            .map(|f| f.id + 1)
            .max()
            .unwrap_or(FIRST_CUSTOM_NUMBER_FORMAT)
            .max(FIRST_CUSTOM_NUMBER_FORMAT);
        formats.items.push(NumberFormat {
            id,
            format_code: format_code.to_owned(),
        });
        id
    }

    pub fn add_font(&mut self, font: Font) -> usize {
        push(&mut self.fonts.get_or_insert_with(Default::default).items, font)
    }

    pub fn add_fill(&mut self, fill: Fill) -> usize {
        push(&mut self.fills.get_or_insert_with(Default::default).items, fill)
    }

    pub fn add_border(&mut self, border: Border) -> usize {
        push(&mut self.borders.get_or_insert_with(Default::default).items, border)
    }

    /// Adds a cell format and returns the style id cells use to refer to it
    pub fn add_cell_format(&mut self, format: Format) -> usize {
        push(
            &mut self.cell_formats.get_or_insert_with(Default::default).items,
            format,
        )
    }

    /// Sets every `count` attribute to the length of its collection
    pub fn sync_counts(&mut self) {
        fn count<T>(items: &[T]) -> Option<u32> {
            u32::try_from(items.len()).ok()
        }
        if let Some(formats) = self.number_formats.as_mut() {
            formats.count = count(&formats.items);
        }
        if let Some(fonts) = self.fonts.as_mut() {
            fonts.count = count(&fonts.items);
        }
        if let Some(fills) = self.fills.as_mut() {
            fills.count = count(&fills.items);
        }
        if let Some(borders) = self.borders.as_mut() {
            borders.count = count(&borders.items);
        }
        if let Some(formats) = self.cell_style_formats.as_mut() {
            formats.count = count(&formats.items);
        }
        if let Some(formats) = self.cell_formats.as_mut() {
            formats.count = count(&formats.items);
        }
        if let Some(styles) = self.cell_styles.as_mut() {
            styles.count = count(&styles.items);
        }
        if let Some(formats) = self.differential_formats.as_mut() {
            formats.count = count(&formats.items);
        }
    }
}

fn push<T>(items: &mut Vec<T>, item: T) -> usize {
    items.push(item);
    items.len() - 1
}

/// Format code of a built-in number format
pub fn builtin_number_format(id: u32) -> Option<&'static str> {
    BUILTIN_NUMBER_FORMATS
        .iter()
        .find(|(builtin, _)| *builtin == id)
        .map(|(_, code)| *code)
}

//! The module holds the sparse grid of a worksheet: rows keyed by row number,
//! cells keyed by column, both iterated in ascending key order.
mod columns;
mod editing;

use super::shared_string_table::SharedStringTable;
use crate::{
    errors::XlsxError,
    reference::{CellReference, ColumnIndex, MAX_ROWS},
};
use std::collections::BTreeMap;
use xlsxdoc_serde::{
    shared::StringItem,
    sheet::{self as wire, Column, Formula},
};

/// The `CellType` denotes how the raw value of a cell is read
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CellType {
    /// Index into the shared string table
    SharedString,
    /// Text stored in the cell itself
    InlineString,
    #[default]
    Number,
    /// String result of a formula
    Formula,
    Boolean,
    Error,
    /// ISO 8601 date
    Date,
}

impl CellType {
    pub fn tag(self) -> &'static str {
        match self {
            CellType::SharedString => "s",
            CellType::InlineString => "inlineStr",
            CellType::Number => "n",
            CellType::Formula => "str",
            CellType::Boolean => "b",
            CellType::Error => "e",
            CellType::Date => "d",
        }
    }

    pub fn from_tag(tag: &str) -> Result<Self, XlsxError> {
        match tag {
            "s" => Ok(CellType::SharedString),
            "inlineStr" => Ok(CellType::InlineString),
            "n" => Ok(CellType::Number),
            "str" => Ok(CellType::Formula),
            "b" => Ok(CellType::Boolean),
            "e" => Ok(CellType::Error),
            "d" => Ok(CellType::Date),
            v => Err(XlsxError::InvalidCellType(v.into())),
        }
    }
}

/// A single cell. Owned by the row its reference points into.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub reference: CellReference,
    pub cell_type: CellType,
    /// Raw `<v>` payload
    pub value: Option<String>,
    pub style: Option<u32>,
    pub formula: Option<Formula>,
    pub inline_string: Option<StringItem>,
}

impl Cell {
    /// A cell pointing at shared string `index`
    pub fn shared_string(reference: CellReference, index: usize, style: Option<u32>) -> Self {
        Self {
            reference,
            cell_type: CellType::SharedString,
            value: Some(index.to_string()),
            style,
            formula: None,
            inline_string: None,
        }
    }

    pub fn number(reference: CellReference, value: f64) -> Self {
        Self {
            reference,
            cell_type: CellType::Number,
            value: Some(value.to_string()),
            style: None,
            formula: None,
            inline_string: None,
        }
    }

    /// Text of the cell. Shared strings are looked up, inline strings are flattened,
    /// every other type yields its raw value.
    pub fn string_value(&self, strings: &SharedStringTable) -> Option<String> {
        match self.cell_type {
            CellType::SharedString => self
                .value
                .as_deref()
                .and_then(|v| v.trim().parse::<usize>().ok())
                .and_then(|index| strings.get(index)),
            CellType::InlineString => self.inline_string.as_ref().map(StringItem::value),
            _ => self.value.clone(),
        }
    }
}

/// A row of cells. `reference` always equals the key the row is stored under.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub(crate) reference: u32,
    pub height: Option<f64>,
    pub custom_height: Option<bool>,
    pub style: Option<u32>,
    pub custom_format: Option<bool>,
    pub hidden: Option<bool>,
    cells: BTreeMap<ColumnIndex, Cell>,
}

impl Row {
    pub fn new(reference: u32) -> Self {
        Self {
            reference,
            ..Default::default()
        }
    }

    pub fn reference(&self) -> u32 {
        self.reference
    }

    /// Cells ordered by column
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    pub fn cell(&self, column: ColumnIndex) -> Option<&Cell> {
        self.cells.get(&column)
    }

    pub fn number_of_cells(&self) -> usize {
        self.cells.len()
    }

    /// Upserts `cell` at its column, moving it onto this row
    pub(crate) fn insert_cell(&mut self, mut cell: Cell) {
        cell.reference = cell.reference.with_row(self.reference);
        self.cells.insert(cell.reference.column, cell);
    }

    /// Re-keys the row and every cell in it
    pub(crate) fn set_reference(&mut self, reference: u32) {
        self.reference = reference;
        for cell in self.cells.values_mut() {
            cell.reference = cell.reference.with_row(reference);
        }
    }
}

/// The `Worksheet` is the in-memory model of one `xl/worksheets/sheetN.xml` part
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Worksheet {
    pub properties: Option<wire::SheetProperties>,
    pub sheet_views: Option<wire::SheetViews>,
    pub format_properties: Option<wire::FormatProperties>,
    /// Column width and style spans, ordered by `min`
    pub columns: Vec<Column>,
    pub(crate) data: BTreeMap<u32, Row>,
    pub merge_cells: Option<wire::MergeCells>,
    pub page_margins: Option<wire::PageMargins>,
    pub drawing: Option<wire::PartReference>,
    pub legacy_drawing: Option<wire::PartReference>,
    pub table_parts: Option<wire::TableParts>,
}

impl Worksheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows ordered by reference
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.data.values()
    }

    pub fn row(&self, reference: u32) -> Option<&Row> {
        self.data.get(&reference)
    }

    pub fn cell(&self, reference: CellReference) -> Option<&Cell> {
        self.data
            .get(&reference.row)
            .and_then(|r| r.cell(reference.column))
    }

    pub fn first_row(&self) -> Option<&Row> {
        self.data.values().next()
    }

    pub fn last_row(&self) -> Option<&Row> {
        self.data.values().next_back()
    }

    /// Reference of the last occupied row, 0 when the sheet is empty
    pub fn number_of_rows(&self) -> u32 {
        self.data.keys().next_back().copied().unwrap_or(0)
    }

    /// Number of cells holding a shared string reference
    pub fn shared_string_cells(&self) -> usize {
        self.rows()
            .flat_map(Row::cells)
            .filter(|c| c.cell_type == CellType::SharedString)
            .count()
    }

    /// Top-left and bottom-right corners of the occupied cells
    pub fn used_range(&self) -> Option<(CellReference, CellReference)> {
        let first_row = self.data.values().find(|r| r.number_of_cells() > 0)?.reference;
        let last_row = self
            .data
            .values()
            .rev()
            .find(|r| r.number_of_cells() > 0)?
            .reference;
        let first_column = self.data.values().filter_map(|r| r.cells.keys().next()).min()?;
        let last_column = self
            .data
            .values()
            .filter_map(|r| r.cells.keys().next_back())
            .max()?;
        Some((
            CellReference {
                column: *first_column,
                row: first_row,
            },
            CellReference {
                column: *last_column,
                row: last_row,
            },
        ))
    }

    /// The `<dimension ref>` of the occupied range
    pub fn dimension(&self) -> String {
        match self.used_range() {
            Some((start, end)) if start == end => start.to_string(),
            Some((start, end)) => format!("{start}:{end}"),
            None => "A1".into(),
        }
    }
}

fn decode_cell(cell: wire::Cell, row: u32, implied_column: u32) -> Result<Cell, XlsxError> {
    let reference = match cell.reference.as_deref() {
        Some(r) => CellReference::parse(r)?.with_row(row),
        None => CellReference::new(implied_column, row)
            .ok_or_else(|| XlsxError::InvalidReference(format!("{implied_column}:{row}")))?,
    };
    let cell_type = match cell.cell_type.as_deref() {
        Some(tag) => CellType::from_tag(tag)?,
        None => CellType::Number,
    };
    Ok(Cell {
        reference,
        cell_type,
        value: cell.value,
        style: cell.style,
        formula: cell.formula,
        inline_string: cell.inline_string,
    })
}

fn decode_row(row: wire::Row, implied_reference: u32) -> Result<Row, XlsxError> {
    let reference = row.reference.unwrap_or(implied_reference);
    if !(1..=MAX_ROWS).contains(&reference) {
        return Err(XlsxError::InvalidReference(reference.to_string()));
    }
    let mut decoded = Row {
        reference,
        height: row.height,
        custom_height: row.custom_height,
        style: row.style,
        custom_format: row.custom_format,
        hidden: row.hidden,
        cells: BTreeMap::new(),
    };
    let mut previous_column = 0;
    for cell in row.cells {
        let cell = decode_cell(cell, reference, previous_column + 1)?;
        previous_column = cell.reference.column.get();
        decoded.insert_cell(cell);
    }
    Ok(decoded)
}

impl TryFrom<wire::Worksheet> for Worksheet {
    type Error = XlsxError;

    fn try_from(sheet: wire::Worksheet) -> Result<Self, Self::Error> {
        let mut data = BTreeMap::new();
        let mut previous_row = 0;
        for row in sheet.data.rows {
            let row = decode_row(row, previous_row + 1)?;
            previous_row = row.reference;
            data.insert(row.reference, row);
        }
        Ok(Self {
            properties: sheet.properties,
            sheet_views: sheet.sheet_views,
            format_properties: sheet.format_properties,
            columns: sheet.columns.map(|c| c.items).unwrap_or_default(),
            data,
            merge_cells: sheet.merge_cells,
            page_margins: sheet.page_margins,
            drawing: sheet.drawing,
            legacy_drawing: sheet.legacy_drawing,
            table_parts: sheet.table_parts,
        })
    }
}

impl From<&Cell> for wire::Cell {
    fn from(cell: &Cell) -> Self {
        Self {
            reference: Some(cell.reference.to_string()),
            style: cell.style,
            // numbers are the schema default
            cell_type: (cell.cell_type != CellType::Number)
                .then(|| cell.cell_type.tag().to_owned()),
            formula: cell.formula.clone(),
            value: cell.value.clone(),
            inline_string: cell.inline_string.clone(),
        }
    }
}

impl From<&Row> for wire::Row {
    fn from(row: &Row) -> Self {
        Self {
            reference: Some(row.reference),
            style: row.style,
            custom_format: row.custom_format,
            height: row.height,
            hidden: row.hidden,
            custom_height: row.custom_height,
            cells: row.cells().map(wire::Cell::from).collect(),
        }
    }
}

impl From<&Worksheet> for wire::Worksheet {
    fn from(sheet: &Worksheet) -> Self {
        Self {
            properties: sheet.properties.clone(),
            dimension: Some(wire::Dimension {
                reference: sheet.dimension(),
            }),
            sheet_views: sheet.sheet_views.clone(),
            format_properties: sheet.format_properties.clone(),
            columns: (!sheet.columns.is_empty()).then(|| wire::Columns {
                items: sheet.columns.clone(),
            }),
            data: wire::SheetData {
                rows: sheet.rows().map(wire::Row::from).collect(),
            },
            merge_cells: sheet.merge_cells.clone(),
            page_margins: sheet.page_margins.clone(),
            drawing: sheet.drawing.clone(),
            legacy_drawing: sheet.legacy_drawing.clone(),
            table_parts: sheet.table_parts.clone(),
        }
    }
}

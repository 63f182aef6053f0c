//! Value updates and row insert/delete/shift on the sparse grid.
//!
//! Edits that target a row or column outside the grid are skipped with a warning.
//! Only a row shift that would leave the sheet is reported as an error.
use super::{Cell, CellType, Row, Worksheet};
use crate::{
    errors::XlsxError,
    reference::{CellReference, ColumnIndex, MAX_ROWS},
    stream::xlsx::shared_string_table::SharedStringTable,
};
use log::warn;
use std::ops::Range;

impl Worksheet {
    /// Upserts `cell` into the row its reference points at.
    /// A cell for a row that does not exist is dropped.
    pub fn apply_cell(&mut self, cell: Cell) {
        match self.data.get_mut(&cell.reference.row) {
            Some(row) => row.insert_cell(cell),
            None => warn!(
                "row {} does not exist, cell {} not applied",
                cell.reference.row, cell.reference
            ),
        }
    }

    /// Points the cell at `(row, column)` to the shared string `value`, creating the cell
    /// when the row has none at that column. An existing cell keeps its formula and,
    /// unless `style` is given, its style.
    pub fn update_cell_value(
        &mut self,
        row: u32,
        column: u32,
        value: &str,
        style: Option<u32>,
        strings: &mut SharedStringTable,
    ) {
        let Some(reference) = CellReference::new(column, row) else {
            warn!("cell ({column}, {row}) is outside the sheet, value not updated");
            return;
        };
        let Some(target) = self.data.get_mut(&row) else {
            warn!("row {row} does not exist, {reference} not updated");
            return;
        };
        let index = strings.add_string(value);
        match target.cells.get_mut(&reference.column) {
            Some(cell) => {
                cell.cell_type = CellType::SharedString;
                cell.value = Some(index.to_string());
                // an inline string is the previous value itself
                cell.inline_string = None;
                if style.is_some() {
                    cell.style = style;
                }
            }
            None => target.insert_cell(Cell::shared_string(reference, index, style)),
        }
    }

    /// Writes `values` into `row` on consecutive columns from `start_column`
    pub fn update_row_values<S: AsRef<str>>(
        &mut self,
        row: u32,
        start_column: u32,
        values: impl IntoIterator<Item = S>,
        strings: &mut SharedStringTable,
    ) {
        if !self.data.contains_key(&row) {
            warn!("row {row} does not exist, values not updated");
            return;
        }
        let start = start_column.max(1);
        for (offset, value) in values.into_iter().enumerate() {
            self.update_cell_value(row, start + offset as u32, value.as_ref(), None, strings);
        }
    }

    /// Writes `values` into `column` on consecutive rows from `start_row`,
    /// creating rows that do not exist yet
    pub fn update_column_values<S: AsRef<str>>(
        &mut self,
        column: u32,
        start_row: u32,
        values: impl IntoIterator<Item = S>,
        strings: &mut SharedStringTable,
    ) {
        if ColumnIndex::new(column).is_none() {
            warn!("column {column} is outside the sheet, values not updated");
            return;
        }
        let start = start_row.max(1);
        for (offset, value) in values.into_iter().enumerate() {
            let row = start + offset as u32;
            if row > MAX_ROWS {
                warn!("row {row} is outside the sheet, remaining values dropped");
                return;
            }
            self.data.entry(row).or_insert_with(|| Row::new(row));
            self.update_cell_value(row, column, value.as_ref(), None, strings);
        }
    }

    /// Inserts a row of shared-string cells at `index`, moving the row already there and
    /// every row below it down by one. `styles` pairs with `values` by position.
    ///
    /// Inserting past the last row leaves the rows in between absent.
    pub fn insert_row<S: AsRef<str>>(
        &mut self,
        index: u32,
        values: impl IntoIterator<Item = S>,
        height: Option<f64>,
        styles: &[Option<u32>],
        strings: &mut SharedStringTable,
    ) -> Result<(), XlsxError> {
        let index = index.max(1);
        if index > MAX_ROWS {
            return Err(XlsxError::RowsOutOfBounds { row: index, delta: 0 });
        }
        // shift first so the new row is never moved and a failed shift leaves no trace
        self.shift_rows(index..u32::MAX, 1)?;
        let mut row = Row::new(index);
        if height.is_some() {
            row.height = height;
            row.custom_height = Some(true);
        }
        for (offset, value) in values.into_iter().enumerate() {
            let Some(reference) = CellReference::new(offset as u32 + 1, index) else {
                warn!("row {index} is full, remaining values dropped");
                break;
            };
            let style = styles.get(offset).copied().flatten();
            let shared = strings.add_string(value.as_ref());
            row.insert_cell(Cell::shared_string(reference, shared, style));
        }
        self.data.insert(index, row);
        Ok(())
    }

    /// Appends a row right after the last occupied row
    pub fn add_row<S: AsRef<str>>(
        &mut self,
        values: impl IntoIterator<Item = S>,
        height: Option<f64>,
        styles: &[Option<u32>],
        strings: &mut SharedStringTable,
    ) -> Result<(), XlsxError> {
        self.insert_row(self.number_of_rows() + 1, values, height, styles, strings)
    }

    /// Removes every row in `rows` and moves the rows below the range up to close the gap
    pub fn delete_rows(&mut self, rows: Range<u32>) -> Result<(), XlsxError> {
        let start = rows.start.max(1);
        if start >= rows.end {
            return Ok(());
        }
        let deleted: Vec<u32> = self.data.range(start..rows.end).map(|(k, _)| *k).collect();
        for key in deleted {
            self.data.remove(&key);
        }
        self.shift_rows(rows.end..u32::MAX, -i64::from(rows.end - start))
    }

    /// Moves every row in `rows` by `delta` (positive is down), re-keying its cells.
    ///
    /// Fails without touching the grid if any row would land above row 1, below the
    /// last row of a sheet or on an occupied row outside `rows`.
    pub(crate) fn shift_rows(&mut self, rows: Range<u32>, delta: i64) -> Result<(), XlsxError> {
        if delta == 0 || rows.start >= rows.end {
            return Ok(());
        }
        let keys: Vec<u32> = self.data.range(rows.clone()).map(|(k, _)| *k).collect();
        let mut destinations = Vec::with_capacity(keys.len());
        for key in &keys {
            let destination = i64::from(*key) + delta;
            if destination < 1 || destination > i64::from(MAX_ROWS) {
                return Err(XlsxError::RowsOutOfBounds { row: *key, delta });
            }
            let destination = destination as u32;
            if !rows.contains(&destination) && self.data.contains_key(&destination) {
                return Err(XlsxError::RowCollision { row: *key, destination });
            }
            destinations.push(destination);
        }
        let moved: Vec<Row> = keys.iter().filter_map(|k| self.data.remove(k)).collect();
        for (mut row, destination) in moved.into_iter().zip(destinations) {
            row.set_reference(destination);
            self.data.insert(destination, row);
        }
        Ok(())
    }

    /// Style of each cell of the row at `position` in row order.
    ///
    /// With `columns`, one entry per column in the range, `None` where the row has
    /// no cell. Without, the styles of the row's cells in column order.
    pub fn styles_for_row(&self, position: usize, columns: Option<Range<u32>>) -> Vec<Option<u32>> {
        let Some(row) = self.data.values().nth(position) else {
            return Vec::new();
        };
        match columns {
            Some(range) => (range.start.max(1)..range.end)
                .map(|c| {
                    ColumnIndex::new(c)
                        .and_then(|column| row.cell(column))
                        .and_then(|cell| cell.style)
                })
                .collect(),
            None => row.cells().map(|c| c.style).collect(),
        }
    }
}

//! Column deletion. Row references never move here, only columns do.
use super::Worksheet;
use crate::reference::ColumnIndex;
use std::{collections::BTreeMap, ops::Range};
use xlsxdoc_serde::sheet::Column;

/// Splits one `<col>` span around the deleted columns `start..end`, renumbering
/// whatever lies past the range. Returns zero, one or two spans.
fn split_span(span: &Column, start: u32, end: u32) -> Vec<Column> {
    let width = end - start;
    let mut kept = Vec::with_capacity(2);
    if span.min < start {
        kept.push(Column {
            max: span.max.min(start - 1),
            ..span.clone()
        });
    }
    if span.max >= end {
        kept.push(Column {
            min: span.min.max(end) - width,
            max: span.max - width,
            ..span.clone()
        });
    }
    kept
}

impl Worksheet {
    /// Removes the columns in `columns` from every row and from the column
    /// definitions, moving everything to the right of the range left to close the gap
    pub fn delete_columns(&mut self, columns: Range<u32>) {
        let start = columns.start.max(1);
        if start >= columns.end {
            return;
        }
        let end = columns.end;
        let width = end - start;

        self.columns = self
            .columns
            .iter()
            .flat_map(|span| split_span(span, start, end))
            .collect();

        for row in self.data.values_mut() {
            let cells = std::mem::take(&mut row.cells);
            row.cells = cells
                .into_iter()
                .filter_map(|(column, mut cell)| {
                    let index = column.get();
                    if index < start {
                        return Some((column, cell));
                    }
                    if index < end {
                        return None;
                    }
                    let moved = ColumnIndex::new(index - width)?;
                    cell.reference = cell.reference.with_column(moved);
                    Some((moved, cell))
                })
                .collect::<BTreeMap<_, _>>();
        }
    }
}

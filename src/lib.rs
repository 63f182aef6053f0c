//! Read, edit and write OOXML spreadsheet packages (`.xlsx`)
//!
//! ```no_run
//! use xlsxdoc::XlsxDocument;
//!
//! let mut document = XlsxDocument::open("report.xlsx")?;
//! let index = document.worksheet_index("Summary").unwrap_or(0);
//! document
//!     .modify_worksheet(index, |sheet, strings| {
//!         sheet.insert_row(2, ["inserted", "row"], None, &[], strings)
//!     })
//!     .transpose()?;
//! document.save("report-edited.xlsx")?;
//! # Ok::<(), xlsxdoc::XlsxError>(())
//! ```
pub mod errors;
pub mod path;
pub mod reference;
pub mod stream;
mod workbook;
mod worksheet;

pub use errors::XlsxError;
pub use path::PackagePath;
pub use reference::{format_column, CellReference, ColumnIndex, MAX_COLUMNS, MAX_ROWS};
pub use stream::xlsx::{
    content_types::{ContentType, ContentTypes},
    relationships::{Relationship, Relationships, SchemaType},
    shared_string_table::SharedStringTable,
    sheet::{Cell, CellType, Row, Worksheet},
    XlsxFile,
};
pub use workbook::{SaveOptions, XlsxDocument};
pub use xlsxdoc_serde::{Comments, Styles, Workbook};
pub use zip::CompressionMethod;

use std::path::PathBuf;
use thiserror::Error;

/// Hierarchy of the entire crate's error types
#[derive(Error, Debug)]
pub enum XlsxError {
    #[error("invalid reference: {0}")]
    InvalidReference(String),
    #[error("invalid cell type: {0}")]
    InvalidCellType(String),
    /// A part path without a file name has no relationships file
    #[error("document path has no file name: {0}")]
    InvalidDocumentPath(String),
    #[error("worksheet path does not follow xl/worksheets/sheetN.xml: {0}")]
    UnsupportedWorksheetPath(String),
    #[error("open xml package requires '{0}' but part is not found")]
    PartNotFound(String),
    #[error("data is not a zip archive")]
    DataIsNotAnArchive(#[source] zip::result::ZipError),
    #[error("file already exists: {}", .0.display())]
    FileAlreadyExists(PathBuf),
    #[error("archive entry already exists: {0}")]
    EntryAlreadyExists(String),
    #[error("could not create archive at {}", .path.display())]
    CouldNotCreateArchive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Shifting row `row` by `delta` leaves the sheet
    #[error("rows out of bounds: row {row} can not be shifted by {delta}")]
    RowsOutOfBounds { row: u32, delta: i64 },
    /// Shifting row `row` would overwrite a row that is not moved itself
    #[error("row {row} can not be shifted onto occupied row {destination}")]
    RowCollision { row: u32, destination: u32 },
    /// Reported through the log while copying unknown parts, never fatal
    #[error("unrecognized content type ({relationship_type}) for part {path}")]
    UnrecognizedContentType {
        path: String,
        relationship_type: String,
    },

    /// The `xlsxdoc_serde` part codec error wrapper
    #[error(transparent)]
    Schema(#[from] xlsxdoc_serde::SchemaError),
    /// The `std::io` error wrapper
    #[error(transparent)]
    StdErr(#[from] std::io::Error),
    /// The `std::string` utf-8 error wrapper
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
    /// The `zip` crate error wrapper
    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
}

//! Cell and column references: `B12` ⇄ `(2, 12)`, `AA` ⇄ `27`
use crate::errors::XlsxError;
use std::{fmt, str::FromStr};

/// Max inclusive of cell columns allowed. Max letter column: `XFD`
pub const MAX_COLUMNS: u32 = 16_384;
/// Max inclusive of cell rows allowed
pub const MAX_ROWS: u32 = 1_048_576;

/// A 1-indexed column, `A` = 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnIndex(u32);

impl ColumnIndex {
    /// `None` outside `1..=16_384`
    pub fn new(index: u32) -> Option<Self> {
        (1..=MAX_COLUMNS).contains(&index).then_some(Self(index))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Reads the letters as a base-26 numeral whose digits run from `A` = 1 to `Z` = 26
    pub fn parse(letters: &str) -> Result<Self, XlsxError> {
        if letters.is_empty() || letters.len() > 3 {
            return Err(XlsxError::InvalidReference(letters.to_owned()));
        }
        let mut index = 0;
        for c in letters.bytes() {
            if !c.is_ascii_alphabetic() {
                return Err(XlsxError::InvalidReference(letters.to_owned()));
            }
            index = index * 26 + u32::from(c.to_ascii_uppercase() - b'A' + 1);
        }
        Self::new(index).ok_or_else(|| XlsxError::InvalidReference(letters.to_owned()))
    }

    pub fn letters(self) -> String {
        let mut letters = Vec::with_capacity(3);
        let mut number = self.0;
        while number > 0 {
            let remainder = ((number - 1) % 26) as u8;
            letters.push(b'A' + remainder);
            number = (number - 1) / 26;
        }
        letters.iter().rev().map(|b| *b as char).collect()
    }
}

impl fmt::Display for ColumnIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.letters())
    }
}

impl FromStr for ColumnIndex {
    type Err = XlsxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Letters of a column index, failing on `0` and anything past `XFD`
pub fn format_column(index: u32) -> Result<String, XlsxError> {
    ColumnIndex::new(index)
        .map(ColumnIndex::letters)
        .ok_or_else(|| XlsxError::InvalidReference(index.to_string()))
}

/// The address of a cell, both indices 1-indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellReference {
    pub column: ColumnIndex,
    pub row: u32,
}

impl CellReference {
    /// `None` when either index is outside the sheet
    pub fn new(column: u32, row: u32) -> Option<Self> {
        let column = ColumnIndex::new(column)?;
        (1..=MAX_ROWS).contains(&row).then_some(Self { column, row })
    }

    /// Splits leading letters from trailing digits
    pub fn parse(text: &str) -> Result<Self, XlsxError> {
        let invalid = || XlsxError::InvalidReference(text.to_owned());
        let split = text
            .find(|c: char| !c.is_ascii_alphabetic())
            .ok_or_else(invalid)?;
        let (letters, digits) = text.split_at(split);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let column = ColumnIndex::parse(letters).map_err(|_| invalid())?;
        let row = digits.parse::<u32>().map_err(|_| invalid())?;
        if !(1..=MAX_ROWS).contains(&row) {
            return Err(invalid());
        }
        Ok(Self { column, row })
    }

    /// The same column on another row
    pub fn with_row(self, row: u32) -> Self {
        Self { row, ..self }
    }

    pub fn with_column(self, column: ColumnIndex) -> Self {
        Self { column, ..self }
    }
}

impl fmt::Display for CellReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

impl FromStr for CellReference {
    type Err = XlsxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

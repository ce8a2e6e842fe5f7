//! Remote workbook primitives
//!
//! A workbook is a set of named sheets, each a grid of text cells with the
//! header in row 1. The primitives mirror what a hosted spreadsheet offers:
//! read everything, append rows, clear a sheet, write a range. None of them
//! are transactional across calls.

use serde::{Deserialize, Serialize};
use crate::error::{StoreError, Result};
use crate::utils::canonical_number;

/// How appended values are interpreted by the workbook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValueInputMode {
    /// Values are stored verbatim
    Raw,
    /// Values are parsed as if typed into the sheet (numbers are canonicalized)
    #[default]
    UserEntered,
}

impl ValueInputMode {
    /// Apply the input mode to one cell value
    pub fn apply(self, value: &str) -> String {
        match self {
            ValueInputMode::Raw => value.to_string(),
            ValueInputMode::UserEntered => {
                canonical_number(value).unwrap_or_else(|| value.to_string())
            }
        }
    }
}

impl std::str::FromStr for ValueInputMode {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RAW" => Ok(ValueInputMode::Raw),
            "USER_ENTERED" | "USERENTERED" => Ok(ValueInputMode::UserEntered),
            other => Err(StoreError::Config(format!("Unknown value input mode: {}", other))),
        }
    }
}

/// Zero-based cell position parsed from A1 notation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    /// Top-left cell of a sheet
    pub const ORIGIN: CellRef = CellRef { row: 0, col: 0 };

    /// Parse `A1`-style notation
    pub fn parse(a1: &str) -> Result<Self> {
        let a1 = a1.trim();
        let split = a1
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| StoreError::Validation(format!("Invalid cell reference: {}", a1)))?;
        let (letters, digits) = a1.split_at(split);

        if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(StoreError::Validation(format!("Invalid cell reference: {}", a1)));
        }

        let col = letters
            .chars()
            .fold(0usize, |acc, c| acc * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1))
            - 1;
        let row = digits
            .parse::<usize>()
            .ok()
            .filter(|r| *r >= 1)
            .ok_or_else(|| StoreError::Validation(format!("Invalid cell reference: {}", a1)))?
            - 1;

        Ok(CellRef { row, col })
    }
}

/// Primitives offered by the hosted spreadsheet
///
/// Implementations use interior mutability so that several sessions can hold
/// handles to the same workbook.
pub trait Workbook {
    /// True if the named sheet exists
    fn has_sheet(&self, sheet: &str) -> Result<bool>;

    /// Read every row of a sheet, header first, preserving row order
    fn read_all_values(&self, sheet: &str) -> Result<Vec<Vec<String>>>;

    /// Append rows after the last non-empty row in a single call
    fn append_rows(&self, sheet: &str, rows: &[Vec<String>], mode: ValueInputMode) -> Result<()>;

    /// Remove every cell from a sheet
    fn clear(&self, sheet: &str) -> Result<()>;

    /// Overwrite cells starting at `top_left` (A1 notation)
    fn write_range(&self, sheet: &str, top_left: &str, values: &[Vec<String>]) -> Result<()>;

    /// Create a sheet whose first row is `header`
    fn create_sheet(&self, sheet: &str, header: &[String]) -> Result<()>;
}

/// Drop trailing empty cells and trailing empty rows
pub(crate) fn trim_grid(mut grid: Vec<Vec<String>>) -> Vec<Vec<String>> {
    for row in grid.iter_mut() {
        while row.last().is_some_and(|c| c.is_empty()) {
            row.pop();
        }
    }
    while grid.last().is_some_and(|r| r.is_empty()) {
        grid.pop();
    }
    grid
}

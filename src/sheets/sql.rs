//! SQLite layout of the local workbook

/// SQL to create the sheet catalogue
pub const CREATE_SHEETS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS liftbook_sheets (
    name             TEXT NOT NULL PRIMARY KEY,
    create_timestamp TEXT
)
"#;

/// SQL to create the cell table (one row per non-empty cell)
pub const CREATE_CELLS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS liftbook_cells (
    sheet           TEXT NOT NULL,
    row_idx         INTEGER NOT NULL,
    col_idx         INTEGER NOT NULL,
    value           TEXT NOT NULL,
    PRIMARY KEY (sheet, row_idx, col_idx)
)
"#;

/// All table creation statements in order
pub const CREATE_ALL_TABLES: &[&str] = &[
    CREATE_SHEETS_TABLE,
    CREATE_CELLS_TABLE,
];

pub const SELECT_SHEET_EXISTS: &str =
    "SELECT COUNT(*) FROM liftbook_sheets WHERE name = ?";

pub const INSERT_SHEET: &str =
    "INSERT INTO liftbook_sheets (name, create_timestamp) VALUES (?, ?)";

pub const SELECT_CELLS: &str =
    "SELECT row_idx, col_idx, value FROM liftbook_cells WHERE sheet = ? ORDER BY row_idx, col_idx";

pub const SELECT_NEXT_ROW: &str =
    "SELECT COALESCE(MAX(row_idx) + 1, 0) FROM liftbook_cells WHERE sheet = ?";

pub const UPSERT_CELL: &str =
    "INSERT OR REPLACE INTO liftbook_cells (sheet, row_idx, col_idx, value) VALUES (?, ?, ?, ?)";

pub const DELETE_CELL: &str =
    "DELETE FROM liftbook_cells WHERE sheet = ? AND row_idx = ? AND col_idx = ?";

pub const DELETE_SHEET_CELLS: &str =
    "DELETE FROM liftbook_cells WHERE sheet = ?";

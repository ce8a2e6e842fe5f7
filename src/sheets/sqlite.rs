//! SQLite-backed workbook
//!
//! Stores sheets as sparse cells in a local database file. Each primitive is
//! its own statement batch, so `clear` followed by `write_range` keeps the same
//! non-atomic window a hosted spreadsheet has.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use chrono::Utc;
use rusqlite::{Connection, params};
use crate::error::{StoreError, Result};
use super::sql;
use super::workbook::{trim_grid, CellRef, ValueInputMode, Workbook};

/// Timestamp format used in the sheet catalogue
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Workbook stored in a SQLite file
#[derive(Debug)]
pub struct SqliteWorkbook {
    /// Path to the database file (None for in-memory)
    path: Option<PathBuf>,
    /// SQLite connection
    conn: Mutex<Connection>,
}

impl SqliteWorkbook {
    /// Open (or create) a workbook at the specified path
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::init(&conn)?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            conn: Mutex::new(conn),
        })
    }

    /// Open a throwaway in-memory workbook
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(&conn)?;
        Ok(Self {
            path: None,
            conn: Mutex::new(conn),
        })
    }

    fn init(conn: &Connection) -> Result<()> {
        for stmt in sql::CREATE_ALL_TABLES {
            conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Get the database path
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Connection("Workbook connection poisoned".to_string()))
    }

    fn ensure_sheet(conn: &Connection, sheet: &str) -> Result<()> {
        if Self::sheet_exists(conn, sheet)? {
            Ok(())
        } else {
            Err(StoreError::SheetNotFound(sheet.to_string()))
        }
    }

    fn sheet_exists(conn: &Connection, sheet: &str) -> Result<bool> {
        let count: i64 = conn.query_row(sql::SELECT_SHEET_EXISTS, params![sheet], |row| row.get(0))?;
        Ok(count > 0)
    }
}

impl Workbook for SqliteWorkbook {
    fn has_sheet(&self, sheet: &str) -> Result<bool> {
        let conn = self.connection()?;
        Self::sheet_exists(&conn, sheet)
    }

    fn read_all_values(&self, sheet: &str) -> Result<Vec<Vec<String>>> {
        let conn = self.connection()?;
        Self::ensure_sheet(&conn, sheet)?;

        let mut stmt = conn.prepare(sql::SELECT_CELLS)?;
        let cells = stmt.query_map(params![sheet], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?, row.get::<_, String>(2)?))
        })?;

        let mut grid: Vec<Vec<String>> = Vec::new();
        for cell in cells {
            let (row_idx, col_idx, value) = cell?;
            let (r, c) = (row_idx as usize, col_idx as usize);
            if grid.len() <= r {
                grid.resize_with(r + 1, Vec::new);
            }
            if grid[r].len() <= c {
                grid[r].resize(c + 1, String::new());
            }
            grid[r][c] = value;
        }

        Ok(trim_grid(grid))
    }

    fn append_rows(&self, sheet: &str, rows: &[Vec<String>], mode: ValueInputMode) -> Result<()> {
        let mut conn = self.connection()?;
        Self::ensure_sheet(&conn, sheet)?;

        let tx = conn.transaction()?;
        let start: i64 = tx.query_row(sql::SELECT_NEXT_ROW, params![sheet], |row| row.get(0))?;
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                let value = mode.apply(value);
                if value.is_empty() {
                    continue;
                }
                tx.execute(sql::UPSERT_CELL, params![sheet, start + r as i64, c as i64, value])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn clear(&self, sheet: &str) -> Result<()> {
        let conn = self.connection()?;
        Self::ensure_sheet(&conn, sheet)?;
        conn.execute(sql::DELETE_SHEET_CELLS, params![sheet])?;
        Ok(())
    }

    fn write_range(&self, sheet: &str, top_left: &str, values: &[Vec<String>]) -> Result<()> {
        let origin = CellRef::parse(top_left)?;
        let mut conn = self.connection()?;
        Self::ensure_sheet(&conn, sheet)?;

        let tx = conn.transaction()?;
        for (r, row) in values.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                let (row_idx, col_idx) = ((origin.row + r) as i64, (origin.col + c) as i64);
                if value.is_empty() {
                    tx.execute(sql::DELETE_CELL, params![sheet, row_idx, col_idx])?;
                } else {
                    tx.execute(sql::UPSERT_CELL, params![sheet, row_idx, col_idx, value])?;
                }
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn create_sheet(&self, sheet: &str, header: &[String]) -> Result<()> {
        let mut conn = self.connection()?;
        if Self::sheet_exists(&conn, sheet)? {
            return Err(StoreError::Persist(format!("Sheet already exists: {}", sheet)));
        }

        let tx = conn.transaction()?;
        let now = Utc::now().format(TIMESTAMP_FORMAT).to_string();
        tx.execute(sql::INSERT_SHEET, params![sheet, now])?;
        for (c, name) in header.iter().enumerate() {
            tx.execute(sql::UPSERT_CELL, params![sheet, 0i64, c as i64, name])?;
        }
        tx.commit()?;
        Ok(())
    }
}

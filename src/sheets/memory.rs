//! In-process workbook
//!
//! Clones share the same sheets, so each clone behaves like an independent
//! session talking to one hosted spreadsheet. Faults can be injected to
//! exercise the connection and persist error paths.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use crate::error::{StoreError, Result};
use super::workbook::{trim_grid, CellRef, ValueInputMode, Workbook};

/// Workbook call that can be made to fail once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailPoint {
    Read,
    Append,
    Clear,
    WriteRange,
    CreateSheet,
}

#[derive(Debug, Default)]
struct State {
    sheets: BTreeMap<String, Vec<Vec<String>>>,
    unreachable: bool,
    pending_failures: HashSet<FailPoint>,
}

/// Shared in-memory workbook
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    state: Arc<Mutex<State>>,
}

impl MemoryWorkbook {
    /// Create an empty workbook
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a sheet with raw rows (header first)
    pub fn insert_sheet(&self, sheet: &str, rows: Vec<Vec<String>>) {
        self.lock().sheets.insert(sheet.to_string(), rows);
    }

    /// Convenience for seeding a sheet from string slices
    pub fn seed(&self, sheet: &str, header: &[&str], rows: &[&[&str]]) {
        let mut grid = vec![header.iter().map(|s| s.to_string()).collect::<Vec<_>>()];
        grid.extend(rows.iter().map(|r| r.iter().map(|s| s.to_string()).collect()));
        self.insert_sheet(sheet, grid);
    }

    /// Remove a sheet entirely
    pub fn remove_sheet(&self, sheet: &str) {
        self.lock().sheets.remove(sheet);
    }

    /// Raw contents of a sheet, bypassing fault injection
    pub fn sheet_values(&self, sheet: &str) -> Option<Vec<Vec<String>>> {
        self.lock().sheets.get(sheet).cloned()
    }

    /// Simulate losing (or regaining) the connection to the store
    pub fn set_reachable(&self, reachable: bool) {
        self.lock().unreachable = !reachable;
    }

    /// Make the next call of the given kind fail
    pub fn fail_next(&self, point: FailPoint) {
        self.lock().pending_failures.insert(point);
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Lock the state and check reachability and injected faults
    fn begin(&self, point: FailPoint) -> Result<MutexGuard<'_, State>> {
        let mut state = self.lock();
        if state.unreachable {
            return Err(StoreError::Connection("workbook is unreachable".to_string()));
        }
        if state.pending_failures.remove(&point) {
            return Err(StoreError::Connection(format!("injected {:?} failure", point)));
        }
        Ok(state)
    }
}

fn sheet_mut<'a>(state: &'a mut State, sheet: &str) -> Result<&'a mut Vec<Vec<String>>> {
    state
        .sheets
        .get_mut(sheet)
        .ok_or_else(|| StoreError::SheetNotFound(sheet.to_string()))
}

impl Workbook for MemoryWorkbook {
    fn has_sheet(&self, sheet: &str) -> Result<bool> {
        Ok(self.begin(FailPoint::Read)?.sheets.contains_key(sheet))
    }

    fn read_all_values(&self, sheet: &str) -> Result<Vec<Vec<String>>> {
        let mut state = self.begin(FailPoint::Read)?;
        let grid = sheet_mut(&mut state, sheet)?.clone();
        Ok(trim_grid(grid))
    }

    fn append_rows(&self, sheet: &str, rows: &[Vec<String>], mode: ValueInputMode) -> Result<()> {
        let mut state = self.begin(FailPoint::Append)?;
        let grid = sheet_mut(&mut state, sheet)?;

        let trimmed = trim_grid(std::mem::take(grid));
        *grid = trimmed;
        grid.extend(
            rows.iter()
                .map(|row| row.iter().map(|v| mode.apply(v)).collect::<Vec<_>>()),
        );
        Ok(())
    }

    fn clear(&self, sheet: &str) -> Result<()> {
        let mut state = self.begin(FailPoint::Clear)?;
        sheet_mut(&mut state, sheet)?.clear();
        Ok(())
    }

    fn write_range(&self, sheet: &str, top_left: &str, values: &[Vec<String>]) -> Result<()> {
        let origin = CellRef::parse(top_left)?;
        let mut state = self.begin(FailPoint::WriteRange)?;
        let grid = sheet_mut(&mut state, sheet)?;

        for (r, row) in values.iter().enumerate() {
            let row_idx = origin.row + r;
            if grid.len() <= row_idx {
                grid.resize_with(row_idx + 1, Vec::new);
            }
            let target = &mut grid[row_idx];
            for (c, value) in row.iter().enumerate() {
                let col_idx = origin.col + c;
                if target.len() <= col_idx {
                    target.resize(col_idx + 1, String::new());
                }
                target[col_idx] = value.clone();
            }
        }
        Ok(())
    }

    fn create_sheet(&self, sheet: &str, header: &[String]) -> Result<()> {
        let mut state = self.begin(FailPoint::CreateSheet)?;
        if state.sheets.contains_key(sheet) {
            return Err(StoreError::Persist(format!("Sheet already exists: {}", sheet)));
        }
        state.sheets.insert(sheet.to_string(), vec![header.to_vec()]);
        Ok(())
    }
}

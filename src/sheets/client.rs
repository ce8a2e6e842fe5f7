//! Typed access to workbook sheets
//!
//! `StoreClient` turns the raw cell grid into header-addressed snapshots and
//! provides the three write primitives the record store is built on: append,
//! replace (clear then write) and lazy sheet creation. A short-lived snapshot
//! cache serves display reads; every write invalidates it.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use log::{debug, error, info, warn};
use crate::error::{StoreError, Result};
use super::workbook::{ValueInputMode, Workbook};

/// One record as a header -> value mapping
pub type Record = HashMap<String, String>;

/// Full in-memory copy of a sheet as of one read
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableSnapshot {
    /// Sheet name
    pub name: String,
    /// Header row (empty when the sheet has no cells at all)
    pub header: Vec<String>,
    /// Data rows in sheet order, blank rows dropped
    pub rows: Vec<Vec<String>>,
}

/// Borrowed view of one snapshot row
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    header: &'a [String],
    cells: &'a [String],
}

impl<'a> RowView<'a> {
    /// Cell for the named column, empty if absent
    pub fn get(&self, field: &str) -> &'a str {
        self.header
            .iter()
            .position(|h| h == field)
            .and_then(|idx| self.cells.get(idx))
            .map(|s| s.as_str())
            .unwrap_or("")
    }
}

impl TableSnapshot {
    /// Build a snapshot from raw values (row 1 is the header)
    pub fn from_values(name: &str, values: Vec<Vec<String>>) -> Self {
        let mut iter = values.into_iter();
        let header = iter
            .next()
            .map(|h| h.into_iter().map(|c| c.trim().to_string()).collect())
            .unwrap_or_default();
        let rows = iter
            .filter(|row| row.iter().any(|c| !c.trim().is_empty()))
            .collect();

        Self {
            name: name.to_string(),
            header,
            rows,
        }
    }

    /// Empty snapshot with a known header
    pub fn with_header(name: &str, header: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            header: header.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if there are no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column in the header
    pub fn column(&self, field: &str) -> Option<usize> {
        self.header.iter().position(|h| h == field)
    }

    /// Fail with a schema error if any of the columns is missing
    pub fn require_columns(&self, fields: &[&str]) -> Result<()> {
        let missing: Vec<&str> = fields
            .iter()
            .copied()
            .filter(|f| self.column(f).is_none())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(StoreError::Schema(format!(
                "Sheet '{}' missing required column(s): {}",
                self.name,
                missing.join(", ")
            )))
        }
    }

    /// Iterate rows as header-addressed views
    pub fn iter(&self) -> impl Iterator<Item = RowView<'_>> {
        self.rows.iter().map(|cells| RowView {
            header: &self.header,
            cells,
        })
    }

    /// Project rows to header -> value mappings
    pub fn records(&self) -> Vec<Record> {
        self.iter()
            .map(|row| {
                self.header
                    .iter()
                    .filter(|h| !h.is_empty())
                    .map(|h| (h.clone(), row.get(h).to_string()))
                    .collect()
            })
            .collect()
    }
}

#[derive(Debug)]
struct CachedTable {
    snapshot: TableSnapshot,
    loaded_at: Instant,
}

/// Sheet-level client over a workbook
#[derive(Debug)]
pub struct StoreClient<W: Workbook> {
    workbook: W,
    cache: HashMap<String, CachedTable>,
    cache_ttl: Duration,
    input_mode: ValueInputMode,
}

impl<W: Workbook> StoreClient<W> {
    /// Create a client; a zero `cache_ttl` disables the display cache
    pub fn new(workbook: W, cache_ttl: Duration, input_mode: ValueInputMode) -> Self {
        Self {
            workbook,
            cache: HashMap::new(),
            cache_ttl,
            input_mode,
        }
    }

    /// Underlying workbook
    pub fn workbook(&self) -> &W {
        &self.workbook
    }

    /// Load a sheet, serving a cached snapshot while it is fresh
    ///
    /// Only for display; mutations must use [`StoreClient::load_table_fresh`].
    pub fn load_table(&mut self, name: &str) -> Result<TableSnapshot> {
        if let Some(cached) = self.cache.get(name) {
            if cached.loaded_at.elapsed() < self.cache_ttl {
                debug!("Serving cached snapshot of '{}'", name);
                return Ok(cached.snapshot.clone());
            }
        }
        self.load_table_fresh(name)
    }

    /// Load a sheet straight from the workbook, bypassing the cache
    pub fn load_table_fresh(&mut self, name: &str) -> Result<TableSnapshot> {
        self.cache.remove(name);

        let values = self.workbook.read_all_values(name)?;
        let snapshot = TableSnapshot::from_values(name, values);
        debug!("Loaded '{}' ({} rows)", name, snapshot.len());

        if !self.cache_ttl.is_zero() {
            self.cache.insert(
                name.to_string(),
                CachedTable {
                    snapshot: snapshot.clone(),
                    loaded_at: Instant::now(),
                },
            );
        }
        Ok(snapshot)
    }

    /// Load a sheet, creating it with `header` if it does not exist
    pub fn load_or_create(&mut self, name: &str, header: &[&str]) -> Result<TableSnapshot> {
        match self.load_table(name) {
            Err(StoreError::SheetNotFound(_)) => self.create_table(name, header),
            other => other,
        }
    }

    /// Create a sheet holding only `header` and return its empty snapshot
    pub fn create_table(&mut self, name: &str, header: &[&str]) -> Result<TableSnapshot> {
        let header_row: Vec<String> = header.iter().map(|h| h.to_string()).collect();
        let created = self.workbook.create_sheet(name, &header_row);
        self.invalidate(name);

        match created {
            Ok(()) => {
                info!("Created sheet '{}'", name);
                Ok(TableSnapshot::with_header(name, header))
            }
            Err(e) => {
                error!("Creating sheet '{}' failed: {}", name, e);
                Err(e.into_persist())
            }
        }
    }

    /// Append records in one workbook call
    ///
    /// Values are placed by the sheet's live header read at call time. When the
    /// sheet has no header yet, `fallback_header` is written first. Ids must
    /// already be allocated by the caller.
    pub fn append_rows(
        &mut self,
        name: &str,
        records: &[Vec<(&str, String)>],
        fallback_header: &[&str],
    ) -> Result<()> {
        let live = self.load_table_fresh(name).map_err(|e| {
            error!("Reading header of '{}' before append failed: {}", name, e);
            e.into_persist()
        })?;

        let mut rows = Vec::with_capacity(records.len() + 1);
        let header: Vec<String> = if live.header.is_empty() {
            let fallback: Vec<String> = fallback_header.iter().map(|h| h.to_string()).collect();
            rows.push(fallback.clone());
            fallback
        } else {
            live.header
        };

        for record in records {
            for (field, _) in record {
                if !header.iter().any(|h| h == *field) {
                    warn!("Sheet '{}' has no column '{}'; value dropped", name, field);
                }
            }
            rows.push(
                header
                    .iter()
                    .map(|h| {
                        record
                            .iter()
                            .find(|(field, _)| *field == h.as_str())
                            .map(|(_, value)| value.clone())
                            .unwrap_or_default()
                    })
                    .collect(),
            );
        }

        let result = self.workbook.append_rows(name, &rows, self.input_mode);
        self.invalidate(name);

        match result {
            Ok(()) => {
                info!("Appended {} row(s) to '{}'", records.len(), name);
                Ok(())
            }
            Err(e) => {
                error!("Append to '{}' failed: {}", name, e);
                Err(e.into_persist())
            }
        }
    }

    /// Rewrite a whole sheet: clear, then write header and rows from A1
    ///
    /// Not atomic. If the write fails after the clear succeeded the sheet is
    /// left empty and `StoreError::PartialReplace` is returned.
    pub fn replace_table(&mut self, name: &str, header: &[String], rows: &[Vec<String>]) -> Result<()> {
        let cleared = self.workbook.clear(name);
        if let Err(e) = cleared {
            self.invalidate(name);
            error!("Clearing '{}' failed, sheet unchanged: {}", name, e);
            return Err(e.into_persist());
        }

        let mut values = Vec::with_capacity(rows.len() + 1);
        values.push(header.to_vec());
        values.extend(rows.iter().cloned());

        let written = self.workbook.write_range(name, "A1", &values);
        self.invalidate(name);

        match written {
            Ok(()) => {
                info!("Rewrote '{}' with {} row(s)", name, rows.len());
                Ok(())
            }
            Err(e) => {
                error!(
                    "PARTIAL REPLACE: sheet '{}' was cleared but the rewrite of {} row(s) failed; the sheet is now empty: {}",
                    name,
                    rows.len(),
                    e
                );
                Err(StoreError::PartialReplace {
                    table: name.to_string(),
                    message: e.to_string(),
                })
            }
        }
    }

    /// Drop the cached snapshot of one sheet
    pub fn invalidate(&mut self, name: &str) {
        self.cache.remove(name);
    }

    /// Drop every cached snapshot
    pub fn invalidate_all(&mut self) {
        self.cache.clear();
    }
}

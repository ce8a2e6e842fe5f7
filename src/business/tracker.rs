//! Main Tracker API
//!
//! This module provides the primary interface for reading and mutating the
//! workout workbook.

use std::path::Path;
use log::debug;
use crate::config::StoreConfig;
use crate::error::{StoreError, Result};
use crate::schema::TableKind;
use crate::sheets::{SqliteWorkbook, StoreClient, TableSnapshot, Workbook};

/// Main tracker interface
///
/// One tracker is one session. Several trackers may share a workbook; they
/// do not coordinate beyond re-reading before every destructive write.
#[derive(Debug)]
pub struct Tracker<W: Workbook> {
    /// Sheet client with the display cache
    pub(crate) client: StoreClient<W>,
    /// Sheet names and cache settings
    pub(crate) config: StoreConfig,
}

impl<W: Workbook> Tracker<W> {
    /// Create a tracker over a workbook
    pub fn new(workbook: W, config: StoreConfig) -> Self {
        let client = StoreClient::new(workbook, config.cache_ttl(), config.value_input_mode);
        Self { client, config }
    }

    /// Active configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Underlying workbook
    pub fn workbook(&self) -> &W {
        self.client.workbook()
    }

    /// Drop all cached snapshots so the next read hits the workbook
    pub fn refresh(&mut self) {
        self.client.invalidate_all();
    }

    /// Sheet name for a logical table
    pub(crate) fn sheet(&self, kind: TableKind) -> String {
        kind.sheet_name(&self.config).to_string()
    }

    /// Load a table for display (cached snapshot allowed)
    pub(crate) fn load(&mut self, kind: TableKind) -> Result<TableSnapshot> {
        self.read(kind, false)
    }

    /// Load a table straight from the workbook
    pub(crate) fn load_fresh(&mut self, kind: TableKind) -> Result<TableSnapshot> {
        self.read(kind, true)
    }

    fn read(&mut self, kind: TableKind, fresh: bool) -> Result<TableSnapshot> {
        let sheet = self.sheet(kind);
        let result = if fresh {
            self.client.load_table_fresh(&sheet)
        } else {
            self.client.load_table(&sheet)
        };

        let snapshot = match result {
            Err(StoreError::SheetNotFound(_)) if kind == TableKind::TemplateMaster => {
                debug!("Sheet '{}' missing, creating it", sheet);
                self.client.create_table(&sheet, kind.header())?
            }
            other => other?,
        };

        snapshot.require_columns(kind.required_columns())?;
        Ok(snapshot)
    }
}

impl Tracker<SqliteWorkbook> {
    /// Open a tracker over a local SQLite workbook
    pub fn open_sqlite(path: &Path, config: StoreConfig) -> Result<Self> {
        let workbook = SqliteWorkbook::open(path)?;
        Ok(Self::new(workbook, config))
    }
}

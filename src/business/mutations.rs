//! Whole-table mutations
//!
//! The workbook has no row-level delete or update, so both are done as
//! read-modify-replace over the full sheet. The read is always fresh: the ids
//! or keys a caller passes were chosen against a snapshot that another
//! session may have rewritten since. Concurrent sessions are last-write-wins.

use std::collections::HashSet;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use crate::error::{StoreError, Result};
use crate::schema::TableKind;
use crate::sheets::{TableSnapshot, Workbook};
use crate::utils::normalize_id;
use super::tracker::Tracker;

/// Result of a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeleteOutcome {
    /// No ids were given; nothing was read or written
    Skipped,
    /// The table was rewritten without the matching rows
    Applied {
        /// Rows actually removed (0 if the ids were already gone)
        removed: usize,
        /// Rows left in the table
        remaining: usize,
    },
}

impl DeleteOutcome {
    /// Rows removed by this request
    pub fn removed(&self) -> usize {
        match self {
            DeleteOutcome::Skipped => 0,
            DeleteOutcome::Applied { removed, .. } => *removed,
        }
    }
}

fn column_or_schema_error(snapshot: &TableSnapshot, field: &str) -> Result<usize> {
    snapshot.column(field).ok_or_else(|| {
        StoreError::Schema(format!("Sheet '{}' has no '{}' column", snapshot.name, field))
    })
}

impl<W: Workbook> Tracker<W> {
    /// Delete every row whose id is in `ids`, rewriting the table
    ///
    /// Ids absent from the fresh snapshot are ignored, so repeating a delete
    /// is harmless.
    pub fn delete_by_ids<I, S>(&mut self, kind: TableKind, ids: I) -> Result<DeleteOutcome>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let wanted: HashSet<String> = ids
            .into_iter()
            .map(|id| kind.id_key(id.as_ref()))
            .filter(|id| !id.is_empty())
            .collect();

        if wanted.is_empty() {
            warn!("No rows selected for deletion from {}", kind);
            return Ok(DeleteOutcome::Skipped);
        }

        let id_field = kind.id_field().ok_or_else(|| {
            StoreError::Validation(format!("{} rows have no id and cannot be deleted", kind))
        })?;

        let snapshot = self.load_fresh(kind)?;
        if snapshot.header.is_empty() {
            warn!("{} sheet is empty, nothing to delete", kind);
            return Ok(DeleteOutcome::Applied { removed: 0, remaining: 0 });
        }
        let id_col = column_or_schema_error(&snapshot, id_field)?;

        let before = snapshot.len();
        let remaining: Vec<Vec<String>> = snapshot
            .rows
            .iter()
            .filter(|row| {
                let id = row.get(id_col).map(|c| kind.id_key(c)).unwrap_or_default();
                !wanted.contains(&id)
            })
            .cloned()
            .collect();
        let removed = before - remaining.len();

        if removed == 0 {
            warn!("None of {} id(s) found in {}; rewriting unchanged", wanted.len(), kind);
        }

        let sheet = self.sheet(kind);
        self.client.replace_table(&sheet, &snapshot.header, &remaining)?;

        info!("Deleted {} row(s) from {} ({} remaining)", removed, kind, remaining.len());
        Ok(DeleteOutcome::Applied {
            removed,
            remaining: remaining.len(),
        })
    }

    /// Set `field` to `value` on every row whose `match_field` equals `match_value`
    ///
    /// Returns the number of rows changed. Nothing is written when no row
    /// matches.
    pub fn update_field(
        &mut self,
        kind: TableKind,
        match_field: &str,
        match_value: &str,
        field: &str,
        value: &str,
    ) -> Result<usize> {
        let snapshot = self.load_fresh(kind)?;
        let match_col = column_or_schema_error(&snapshot, match_field)?;
        let field_col = column_or_schema_error(&snapshot, field)?;
        let key = normalize_id(match_value);

        let mut rows = snapshot.rows.clone();
        let mut updated = 0;
        for row in rows.iter_mut() {
            let matches = row.get(match_col).is_some_and(|c| normalize_id(c) == key);
            if !matches {
                continue;
            }
            if row.len() <= field_col {
                row.resize(field_col + 1, String::new());
            }
            row[field_col] = value.to_string();
            updated += 1;
        }

        if updated == 0 {
            warn!("No {} row with {} = '{}'; nothing updated", kind, match_field, match_value);
            return Ok(0);
        }

        let sheet = self.sheet(kind);
        self.client.replace_table(&sheet, &snapshot.header, &rows)?;

        info!("Updated '{}' on {} {} row(s)", field, updated, kind);
        Ok(updated)
    }
}

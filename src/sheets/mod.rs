//! Sheet storage layer
//!
//! Handles the workbook side of the record store:
//! - The `Workbook` primitives and their backends (in-memory, SQLite)
//! - Header-addressed table snapshots
//! - Append, replace and lazy-create operations with a display cache

pub mod workbook;
pub mod memory;
pub mod sqlite;
pub mod sql;
pub mod client;

pub use workbook::{CellRef, ValueInputMode, Workbook};
pub use memory::{FailPoint, MemoryWorkbook};
pub use sqlite::SqliteWorkbook;
pub use client::{Record, RowView, StoreClient, TableSnapshot};

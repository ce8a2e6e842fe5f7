//! # Liftbook Core
//!
//! Record store for a workout tracker whose system of record is a shared
//! spreadsheet.
//!
//! ## Features
//!
//! - Typed access to the training log, exercise master, constants and
//!   template sheets
//! - Unit-normalized weight and Epley 1RM derived on every read
//! - Monotonic log and template ids allocated from the live sheet
//! - Delete and update as whole-sheet rewrites over a freshly read snapshot
//! - In-memory and SQLite workbook backends
//!
//! ## Example
//!
//! ```no_run
//! use liftbook::{NewLogEntry, StoreConfig, Tracker};
//! use chrono::NaiveDate;
//! use std::path::Path;
//!
//! let mut tracker = Tracker::open_sqlite(Path::new("/path/to/workbook.db"), StoreConfig::default()).unwrap();
//!
//! let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
//! let record = tracker.append_log(&NewLogEntry::new(date, "Bench Press", 100.0, "kg", 5)).unwrap();
//! println!("Logged set {}", record.id);
//!
//! for entry in tracker.get_log().unwrap() {
//!     println!("{}: {:.1} kg", entry.record.exercise_name, entry.metrics.estimated_1rm);
//! }
//! ```

pub mod business;
pub mod codec;
pub mod config;
pub mod derive;
pub mod error;
pub mod logging;
pub mod schema;
pub mod sheets;
pub mod utils;

// Re-export main types
pub use error::{StoreError, Result};
pub use business::{DeleteOutcome, ExerciseProgress, DailyBest, Tracker};
pub use config::StoreConfig;
pub use derive::{derive_metrics, DerivedMetrics};
pub use schema::{Constants, ExerciseRecord, LogEntry, LogRecord, NewLogEntry, TableKind, TemplateRecord};
pub use sheets::{FailPoint, MemoryWorkbook, SqliteWorkbook, StoreClient, TableSnapshot, ValueInputMode, Workbook};

/// Default training log sheet name
pub const SHEET_TRAINING_LOG: &str = "Training Log";

/// Default exercise master sheet name
pub const SHEET_EXERCISE_MASTER: &str = "Exercise Master";

/// Default constants sheet name
pub const SHEET_CONSTANTS: &str = "Constants";

/// Default template master sheet name
pub const SHEET_TEMPLATE_MASTER: &str = "Template Master";

/// Default display cache freshness in seconds
pub const DEFAULT_CACHE_TTL_SECS: u64 = 5;

/// Kilograms per pound
pub const KG_PER_LB: f64 = 0.453592;

/// Template id prefix
pub const TEMPLATE_ID_PREFIX: &str = "TMP";

/// Lowest accepted RPE
pub const RPE_MIN: f64 = 1.0;

/// Highest accepted RPE
pub const RPE_MAX: f64 = 10.0;

/// Muscle group filter value meaning "no filter"
pub const ALL_MUSCLE_GROUPS: &str = "All";

//! Business logic layer for Liftbook
//!
//! This module provides the high-level Tracker API: typed reads of the four
//! tables and the append, delete and update mutations over them.

pub mod tracker;
pub mod mutations;
pub mod logs;
pub mod exercises;
pub mod constants;
pub mod templates;
pub mod progress;

pub use tracker::Tracker;
pub use mutations::DeleteOutcome;
pub use progress::{summarize_progress, DailyBest, ExerciseProgress};

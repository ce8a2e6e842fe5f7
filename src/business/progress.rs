//! Progress summaries over the training log

use std::collections::BTreeMap;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::error::Result;
use crate::schema::LogEntry;
use crate::sheets::Workbook;
use crate::ALL_MUSCLE_GROUPS;
use super::tracker::Tracker;

/// Best values logged for one exercise on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBest {
    pub date: NaiveDate,
    pub max_estimated_1rm: f64,
    pub max_weight_kg: f64,
    pub max_reps: u32,
}

/// Progress of a single exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseProgress {
    pub exercise_name: String,
    /// One point per training day, oldest first
    pub daily: Vec<DailyBest>,
    pub personal_best_1rm: f64,
    pub max_weight_kg: f64,
    pub total_sets: usize,
    /// Newest day first, sets ascending within a day
    pub entries: Vec<LogEntry>,
}

impl ExerciseProgress {
    /// True if no dated sets exist for the exercise
    pub fn is_empty(&self) -> bool {
        self.total_sets == 0
    }
}

/// Summarize the dated log entries of one exercise
pub fn summarize_progress(exercise_name: &str, log: &[LogEntry]) -> ExerciseProgress {
    let mut entries: Vec<LogEntry> = log
        .iter()
        .filter(|e| e.record.exercise_name == exercise_name && e.record.date.is_some())
        .cloned()
        .collect();

    let mut days: BTreeMap<NaiveDate, DailyBest> = BTreeMap::new();
    for entry in &entries {
        let Some(date) = entry.record.date else { continue };
        let day = days.entry(date).or_insert(DailyBest {
            date,
            max_estimated_1rm: 0.0,
            max_weight_kg: 0.0,
            max_reps: 0,
        });
        day.max_estimated_1rm = day.max_estimated_1rm.max(entry.metrics.estimated_1rm);
        day.max_weight_kg = day.max_weight_kg.max(entry.metrics.weight_kg);
        day.max_reps = day.max_reps.max(entry.record.reps);
    }

    let daily: Vec<DailyBest> = days.into_values().collect();
    let personal_best_1rm = daily.iter().map(|d| d.max_estimated_1rm).fold(0.0, f64::max);
    let max_weight_kg = daily.iter().map(|d| d.max_weight_kg).fold(0.0, f64::max);

    entries.sort_by(|a, b| {
        b.record
            .date
            .cmp(&a.record.date)
            .then(a.record.set_number.cmp(&b.record.set_number))
    });

    ExerciseProgress {
        exercise_name: exercise_name.to_string(),
        daily,
        personal_best_1rm,
        max_weight_kg,
        total_sets: entries.len(),
        entries,
    }
}

impl<W: Workbook> Tracker<W> {
    /// Progress summary of one exercise; undated rows are left out
    pub fn exercise_progress(&mut self, exercise_name: &str) -> Result<ExerciseProgress> {
        let log = self.get_log()?;
        Ok(summarize_progress(exercise_name.trim(), &log))
    }

    /// Sorted distinct exercises in the log, optionally limited to a muscle group
    ///
    /// The group is matched against the exercise master, not the target copied
    /// into each log row. `None` or `"All"` disables the filter.
    pub fn logged_exercises(&mut self, muscle_group: Option<&str>) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .get_log()?
            .into_iter()
            .map(|e| e.record.exercise_name)
            .filter(|n| !n.is_empty())
            .collect();
        names.sort();
        names.dedup();

        match muscle_group.map(str::trim) {
            None | Some(ALL_MUSCLE_GROUPS) => Ok(names),
            Some(group) => {
                let exercises = self.get_exercises()?;
                Ok(names
                    .into_iter()
                    .filter(|name| {
                        exercises
                            .iter()
                            .any(|e| &e.exercise_name == name && e.target_muscle_group == group)
                    })
                    .collect())
            }
        }
    }

    /// Exercise of the most recently appended log row
    pub fn last_logged_exercise(&mut self) -> Result<Option<String>> {
        Ok(self
            .get_log()?
            .pop()
            .map(|e| e.record.exercise_name)
            .filter(|n| !n.is_empty()))
    }
}

//! Training log operations

use log::info;
use crate::error::{StoreError, Result};
use crate::schema::{log_fields, LogEntry, LogRecord, NewLogEntry, TableKind, LOG_HEADER};
use crate::sheets::Workbook;
use crate::utils::next_id_from_cells;
use super::mutations::DeleteOutcome;
use super::tracker::Tracker;

impl<W: Workbook> Tracker<W> {
    /// All log rows with freshly derived metrics, in sheet order
    pub fn get_log(&mut self) -> Result<Vec<LogEntry>> {
        let snapshot = self.load(TableKind::TrainingLog)?;
        Ok(snapshot
            .iter()
            .map(|row| LogEntry::from(LogRecord::from_row(row)))
            .collect())
    }

    /// Append one set to the log
    ///
    /// Target and exercise name are copied from the master as they are now;
    /// later master edits do not flow back into logged rows. The id is
    /// allocated from a snapshot read just before the append.
    pub fn append_log(&mut self, entry: &NewLogEntry) -> Result<LogRecord> {
        entry.validate()?;
        let constants = self.get_constants()?;
        entry.validate_against(&constants)?;

        let exercise = self
            .exercise_by_name(&entry.exercise_name)?
            .ok_or_else(|| {
                StoreError::Validation(format!("Unknown exercise: {}", entry.exercise_name))
            })?;

        let snapshot = self.load_fresh(TableKind::TrainingLog)?;
        let id = next_id_from_cells(snapshot.iter().map(|row| row.get(log_fields::ID)));

        let record = LogRecord {
            id,
            date: Some(entry.date),
            exercise_id: exercise.exercise_id,
            target: exercise.target_muscle_group,
            exercise_name: exercise.exercise_name,
            set_number: entry.set_number,
            weight: entry.weight,
            unit: entry.unit.clone(),
            reps: entry.reps,
            rpe: entry.rpe,
            set_type: entry.set_type.clone(),
            memo: entry.memo.clone(),
        };

        let sheet = self.sheet(TableKind::TrainingLog);
        self.client.append_rows(&sheet, &[record.to_fields()], LOG_HEADER)?;

        info!(
            "Logged set #{} of {} (id {})",
            record.set_number, record.exercise_name, record.id
        );
        Ok(record)
    }

    /// Delete log rows by id
    pub fn delete_logs(&mut self, ids: &[u64]) -> Result<DeleteOutcome> {
        self.delete_by_ids(TableKind::TrainingLog, ids.iter().map(|id| id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::business::tracker::tests::create_test_tracker;
    use crate::error::StoreError;
    use crate::schema::{NewLogEntry, LOG_HEADER};
    use crate::sheets::FailPoint;

    fn entry(exercise: &str, weight: f64, unit: &str, reps: u32) -> NewLogEntry {
        NewLogEntry::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), exercise, weight, unit, reps)
    }

    #[test]
    fn test_append_to_empty_log() {
        let (mut tracker, wb) = create_test_tracker();

        let record = tracker.append_log(&entry("Bench Press", 100.0, "kg", 5)).unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(record.exercise_id, "E1");
        assert_eq!(record.target, "Chest");

        let values = wb.sheet_values("Training Log").unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[1][0], "1");
        assert_eq!(values[1][1], "2024/05/01");
        assert_eq!(values[1][4], "Bench Press");

        let log = tracker.get_log().unwrap();
        assert!((log[0].metrics.estimated_1rm - 116.67).abs() < 0.01);
    }

    #[test]
    fn test_ids_increase() {
        let (mut tracker, _wb) = create_test_tracker();
        let first = entry("Squat", 140.0, "kg", 3);
        let a = tracker.append_log(&first).unwrap();
        let b = tracker.append_log(&first.next_set()).unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(b.set_number, 2);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let (mut tracker, _wb) = create_test_tracker();
        let e = entry("Squat", 140.0, "kg", 3);
        tracker.append_log(&e).unwrap();
        tracker.append_log(&e).unwrap();
        tracker.append_log(&e).unwrap();

        tracker.delete_logs(&[2]).unwrap();
        assert_eq!(tracker.append_log(&e).unwrap().id, 4);
    }

    #[test]
    fn test_append_respects_live_header_order() {
        let (mut tracker, wb) = create_test_tracker();
        wb.seed("Training Log", &["Exercise", "ID", "Weight", "Reps", "Unit"], &[&["Squat", "9", "100", "5", "kg"]]);

        let record = tracker.append_log(&entry("Bench Press", 80.0, "kg", 8)).unwrap();
        assert_eq!(record.id, 10);

        let values = wb.sheet_values("Training Log").unwrap();
        assert_eq!(values[2], vec!["Bench Press", "10", "80", "8", "kg"]);
    }

    #[test]
    fn test_append_to_headerless_sheet_writes_header() {
        let (mut tracker, wb) = create_test_tracker();
        wb.insert_sheet("Training Log", vec![]);

        tracker.append_log(&entry("Squat", 100.0, "kg", 5)).unwrap();
        let values = wb.sheet_values("Training Log").unwrap();
        assert_eq!(values[0][0], "ID");
        assert_eq!(values[0].len(), 12);
        assert_eq!(values[1][0], "1");
    }

    #[test]
    fn test_append_next_to_max_id() {
        let (mut tracker, wb) = create_test_tracker();
        wb.seed(
            "Training Log",
            LOG_HEADER,
            &[
                &["18446744073709551615", "2024/05/01", "E2", "Legs", "Squat", "1", "100", "kg", "5"],
                &["1.8446744073709552e19", "2024/05/01", "E2", "Legs", "Squat", "2", "100", "kg", "5"],
                &["7", "2024/05/01", "E2", "Legs", "Squat", "3", "100", "kg", "5"],
            ],
        );

        let record = tracker.append_log(&entry("Bench Press", 100.0, "kg", 5)).unwrap();
        assert_eq!(record.id, 8);
    }

    #[test]
    fn test_append_unknown_exercise() {
        let (mut tracker, _wb) = create_test_tracker();
        let result = tracker.append_log(&entry("Deadlift", 180.0, "kg", 1));
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    #[test]
    fn test_validation_before_any_store_call() {
        let (mut tracker, wb) = create_test_tracker();
        wb.set_reachable(false);
        let result = tracker.append_log(&entry("Squat", -5.0, "kg", 5));
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    #[test]
    fn test_append_bad_unit() {
        let (mut tracker, _wb) = create_test_tracker();
        let result = tracker.append_log(&entry("Squat", 100.0, "stone", 5));
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    #[test]
    fn test_append_failure_is_persist() {
        let (mut tracker, wb) = create_test_tracker();
        wb.fail_next(FailPoint::Append);

        let err = tracker.append_log(&entry("Squat", 100.0, "kg", 5)).unwrap_err();
        assert!(matches!(err, StoreError::Persist(_)));
        assert!(err.user_message().contains("retry"));
        assert!(tracker.get_log().unwrap().is_empty());
    }

    #[test]
    fn test_lbs_entry_metrics() {
        let (mut tracker, _wb) = create_test_tracker();
        tracker.append_log(&entry("Squat", 225.0, "lbs", 5)).unwrap();
        let log = tracker.get_log().unwrap();
        assert!(log[0].metrics.weight_kg < 225.0);
        assert_eq!(log[0].record.weight, 225.0);
    }
}

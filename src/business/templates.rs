//! Workout template operations
//!
//! The template sheet is created on first use. Templates are appended with a
//! fresh `TMP` id, rewritten through whole-table updates and removed through
//! whole-table deletes.

use chrono::NaiveDate;
use log::{info, warn};
use crate::codec;
use crate::error::{StoreError, Result};
use crate::schema::{template_fields, ExerciseRecord, TableKind, TemplateRecord, TEMPLATE_HEADER};
use crate::sheets::Workbook;
use crate::utils::{allocate_template_id, normalize_id};
use super::mutations::DeleteOutcome;
use super::tracker::Tracker;

impl<W: Workbook> Tracker<W> {
    /// All templates in sheet order
    pub fn get_templates(&mut self) -> Result<Vec<TemplateRecord>> {
        let snapshot = self.load(TableKind::TemplateMaster)?;
        Ok(snapshot
            .iter()
            .map(TemplateRecord::from_row)
            .filter(|t| !t.template_id.is_empty())
            .collect())
    }

    /// Get a template by ID
    pub fn get_template(&mut self, template_id: &str) -> Result<Option<TemplateRecord>> {
        let id = template_id.trim();
        Ok(self
            .get_templates()?
            .into_iter()
            .find(|t| t.template_id == id))
    }

    /// Create a new template from an ordered list of exercise ids
    pub fn create_template<S: AsRef<str>>(
        &mut self,
        name: &str,
        exercise_ids: &[S],
        created_at: NaiveDate,
    ) -> Result<TemplateRecord> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::Validation("Template name is required".to_string()));
        }
        let exercise_ids = self.checked_exercise_ids(exercise_ids)?;

        let snapshot = self.load_fresh(TableKind::TemplateMaster)?;
        let existing: Vec<&str> = snapshot
            .iter()
            .map(|row| row.get(template_fields::TEMPLATE_ID).trim())
            .filter(|id| !id.is_empty())
            .collect();

        let template = TemplateRecord {
            template_id: allocate_template_id(&existing),
            template_name: name.to_string(),
            exercise_ids,
            created_at: Some(created_at),
        };

        let sheet = self.sheet(TableKind::TemplateMaster);
        self.client.append_rows(&sheet, &[template.to_fields()], TEMPLATE_HEADER)?;

        info!("Created template {} '{}'", template.template_id, template.template_name);
        Ok(template)
    }

    /// Replace the exercise list of a template
    pub fn update_template_exercises<S: AsRef<str>>(
        &mut self,
        template_id: &str,
        exercise_ids: &[S],
    ) -> Result<()> {
        let exercise_ids = self.checked_exercise_ids(exercise_ids)?;
        self.update_template_field(template_id, template_fields::EXERCISE_IDS, &codec::encode(&exercise_ids))
    }

    /// Rename a template
    pub fn rename_template(&mut self, template_id: &str, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::Validation("Template name is required".to_string()));
        }
        self.update_template_field(template_id, template_fields::TEMPLATE_NAME, name)
    }

    /// Delete templates by id
    pub fn delete_templates<S: AsRef<str>>(&mut self, template_ids: &[S]) -> Result<DeleteOutcome> {
        self.delete_by_ids(TableKind::TemplateMaster, template_ids.iter().map(|id| id.as_ref()))
    }

    /// Exercises of a template in workout order; unknown ids are skipped
    pub fn template_exercises(&mut self, template_id: &str) -> Result<Vec<ExerciseRecord>> {
        let template = self
            .get_template(template_id)?
            .ok_or_else(|| StoreError::Validation(format!("Unknown template: {}", template_id)))?;
        let exercises = self.get_exercises()?;

        let mut resolved = Vec::with_capacity(template.exercise_ids.len());
        for id in &template.exercise_ids {
            match exercises.iter().find(|e| &e.exercise_id == id) {
                Some(exercise) => resolved.push(exercise.clone()),
                None => warn!("Template {} references unknown exercise {}", template_id, id),
            }
        }
        Ok(resolved)
    }

    fn update_template_field(&mut self, template_id: &str, field: &str, value: &str) -> Result<()> {
        let updated = self.update_field(
            TableKind::TemplateMaster,
            template_fields::TEMPLATE_ID,
            template_id.trim(),
            field,
            value,
        )?;

        if updated == 0 {
            return Err(StoreError::Validation(format!("Unknown template: {}", template_id)));
        }
        Ok(())
    }

    /// Normalize ids and check they are storable and known
    fn checked_exercise_ids<S: AsRef<str>>(&mut self, exercise_ids: &[S]) -> Result<Vec<String>> {
        if exercise_ids.is_empty() {
            return Err(StoreError::Validation("Template needs at least one exercise".to_string()));
        }

        let ids: Vec<String> = exercise_ids.iter().map(|id| normalize_id(id.as_ref())).collect();
        if let Some(bad) = ids.iter().find(|id| !codec::is_encodable(id)) {
            return Err(StoreError::Validation(format!("Invalid exercise id: '{}'", bad)));
        }

        let known = self.get_exercises()?;
        if let Some(unknown) = ids.iter().find(|id| !known.iter().any(|e| &e.exercise_id == *id)) {
            return Err(StoreError::Validation(format!("Unknown exercise id: {}", unknown)));
        }
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::business::mutations::DeleteOutcome;
    use crate::business::tracker::tests::create_test_tracker;
    use crate::error::StoreError;
    use crate::sheets::FailPoint;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_get_templates_creates_sheet() {
        let (mut tracker, wb) = create_test_tracker();
        assert!(tracker.get_templates().unwrap().is_empty());
        assert!(wb.sheet_values("Template Master").is_some());
    }

    #[test]
    fn test_create_template() {
        let (mut tracker, wb) = create_test_tracker();

        let a = tracker.create_template("Push", &["E1", "E3"], today()).unwrap();
        let b = tracker.create_template("Legs", &["E2"], today()).unwrap();
        assert_eq!(a.template_id, "TMP001");
        assert_eq!(b.template_id, "TMP002");

        let values = wb.sheet_values("Template Master").unwrap();
        assert_eq!(values[1], vec!["TMP001", "Push", "E1|E3", "2024/06/01"]);

        let stored = tracker.get_template("TMP001").unwrap().unwrap();
        assert_eq!(stored.exercise_ids, vec!["E1", "E3"]);
        assert_eq!(stored.created_at, Some(today()));
    }

    #[test]
    fn test_create_template_validation() {
        let (mut tracker, _wb) = create_test_tracker();
        assert!(matches!(
            tracker.create_template(" ", &["E1"], today()),
            Err(StoreError::Validation(_))
        ));
        assert!(tracker.create_template::<&str>("Empty", &[], today()).is_err());
        assert!(tracker.create_template("Bad", &["E1|E2"], today()).is_err());
        assert!(tracker.create_template("Ghost", &["E99"], today()).is_err());
    }

    #[test]
    fn test_template_order_round_trips() {
        let (mut tracker, _wb) = create_test_tracker();
        tracker.create_template("Mixed", &["E3", "E1", "E2"], today()).unwrap();

        let names: Vec<String> = tracker
            .template_exercises("TMP001")
            .unwrap()
            .into_iter()
            .map(|e| e.exercise_name)
            .collect();
        assert_eq!(names, vec!["Cable Fly", "Bench Press", "Squat"]);
    }

    #[test]
    fn test_legacy_template_cells() {
        let (mut tracker, wb) = create_test_tracker();
        wb.seed(
            "Template Master",
            &["template_id", "template_name", "exercise_ids", "created_at"],
            &[&["TMP001", "Old", "E2,E1", "2023/01/01"]],
        );

        let exercises = tracker.template_exercises("TMP001").unwrap();
        assert_eq!(exercises.len(), 2);
        assert_eq!(exercises[0].exercise_id, "E2");
    }

    #[test]
    fn test_update_and_rename() {
        let (mut tracker, _wb) = create_test_tracker();
        tracker.create_template("Push", &["E1"], today()).unwrap();

        tracker.update_template_exercises("TMP001", &["E3", "E1"]).unwrap();
        tracker.rename_template("TMP001", "Push v2").unwrap();

        let template = tracker.get_template("TMP001").unwrap().unwrap();
        assert_eq!(template.template_name, "Push v2");
        assert_eq!(template.exercise_ids, vec!["E3", "E1"]);

        assert!(matches!(
            tracker.rename_template("TMP404", "x"),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn test_delete_templates() {
        let (mut tracker, _wb) = create_test_tracker();
        tracker.create_template("A", &["E1"], today()).unwrap();
        tracker.create_template("B", &["E2"], today()).unwrap();
        tracker.create_template("C", &["E3"], today()).unwrap();

        let outcome = tracker.delete_templates(&["TMP002"]).unwrap();
        assert_eq!(outcome, DeleteOutcome::Applied { removed: 1, remaining: 2 });

        // Ids keep counting from the last row
        let d = tracker.create_template("D", &["E1"], today()).unwrap();
        assert_eq!(d.template_id, "TMP004");
    }

    #[test]
    fn test_create_after_max_template_id() {
        let (mut tracker, wb) = create_test_tracker();
        wb.seed(
            "Template Master",
            &["template_id", "template_name", "exercise_ids", "created_at"],
            &[&["TMP18446744073709551615", "Huge", "E1", "2024/01/01"]],
        );

        let template = tracker.create_template("Next", &["E2"], today()).unwrap();
        assert_eq!(template.template_id, "TMP002");
    }

    #[test]
    fn test_create_sheet_failure_is_persist() {
        let (mut tracker, wb) = create_test_tracker();
        wb.fail_next(FailPoint::CreateSheet);
        let err = tracker.get_templates().unwrap_err();
        assert!(err.is_persist());
    }
}

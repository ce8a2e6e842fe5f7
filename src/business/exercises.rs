//! Exercise master operations
//!
//! The master is reference data maintained outside this crate; only the
//! description column is edited here.

use crate::error::{StoreError, Result};
use crate::schema::{exercise_fields, ExerciseRecord, TableKind};
use crate::sheets::Workbook;
use crate::utils::normalize_id;
use super::tracker::Tracker;

impl<W: Workbook> Tracker<W> {
    /// All exercises with a name, in sheet order
    pub fn get_exercises(&mut self) -> Result<Vec<ExerciseRecord>> {
        let snapshot = self.load(TableKind::ExerciseMaster)?;
        Ok(snapshot
            .iter()
            .map(ExerciseRecord::from_row)
            .filter(|e| !e.exercise_name.is_empty())
            .collect())
    }

    /// Look up an exercise by its name
    pub fn exercise_by_name(&mut self, name: &str) -> Result<Option<ExerciseRecord>> {
        let name = name.trim();
        Ok(self
            .get_exercises()?
            .into_iter()
            .find(|e| e.exercise_name == name))
    }

    /// Look up an exercise by its id
    pub fn exercise_by_id(&mut self, exercise_id: &str) -> Result<Option<ExerciseRecord>> {
        let id = normalize_id(exercise_id);
        Ok(self
            .get_exercises()?
            .into_iter()
            .find(|e| e.exercise_id == id))
    }

    /// Distinct exercise names in sheet order
    pub fn exercise_names(&mut self) -> Result<Vec<String>> {
        let mut names: Vec<String> = Vec::new();
        for exercise in self.get_exercises()? {
            if !names.contains(&exercise.exercise_name) {
                names.push(exercise.exercise_name);
            }
        }
        Ok(names)
    }

    /// Distinct target muscle groups, sorted
    pub fn muscle_groups(&mut self) -> Result<Vec<String>> {
        let mut groups: Vec<String> = self
            .get_exercises()?
            .into_iter()
            .map(|e| e.target_muscle_group)
            .filter(|g| !g.is_empty())
            .collect();
        groups.sort();
        groups.dedup();
        Ok(groups)
    }

    /// Replace an exercise's description
    pub fn update_exercise_description(&mut self, exercise_name: &str, description: &str) -> Result<()> {
        let updated = self.update_field(
            TableKind::ExerciseMaster,
            exercise_fields::EXERCISE_NAME,
            exercise_name.trim(),
            exercise_fields::DESCRIPTION,
            description,
        )?;

        if updated == 0 {
            return Err(StoreError::Validation(format!("Unknown exercise: {}", exercise_name)));
        }
        Ok(())
    }
}

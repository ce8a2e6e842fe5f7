//! Typed records of the workout workbook

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::codec;
use crate::derive::{derive_metrics, DerivedMetrics};
use crate::error::{StoreError, Result};
use crate::sheets::{RowView, TableSnapshot};
use crate::utils::{
    coerce_id, format_date, normalize_id, parse_count, parse_date, parse_decimal,
    parse_optional_decimal,
};
use crate::{RPE_MAX, RPE_MIN};
use super::{constant_fields, exercise_fields, log_fields, template_fields};

/// One logged set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Unique row id (0 when the cell was blank or corrupt)
    pub id: u64,
    /// Training date; None when the cell could not be parsed
    pub date: Option<NaiveDate>,
    /// Reference into the exercise master
    pub exercise_id: String,
    /// Muscle group copied from the master when the set was logged
    pub target: String,
    /// Exercise name copied from the master when the set was logged
    pub exercise_name: String,
    pub set_number: u32,
    pub weight: f64,
    pub unit: String,
    pub reps: u32,
    pub rpe: Option<f64>,
    pub set_type: String,
    pub memo: String,
}

impl LogRecord {
    /// Parse a log row; unparsable cells degrade to defaults
    pub fn from_row(row: RowView<'_>) -> Self {
        Self {
            id: coerce_id(row.get(log_fields::ID)),
            date: parse_date(row.get(log_fields::DATE)),
            exercise_id: normalize_id(row.get(log_fields::EXERCISE_ID)),
            target: row.get(log_fields::TARGET).trim().to_string(),
            exercise_name: row.get(log_fields::EXERCISE).trim().to_string(),
            set_number: parse_count(row.get(log_fields::SET_NUMBER)),
            weight: parse_decimal(row.get(log_fields::WEIGHT)),
            unit: row.get(log_fields::UNIT).trim().to_string(),
            reps: parse_count(row.get(log_fields::REPS)),
            rpe: parse_optional_decimal(row.get(log_fields::RPE)),
            set_type: row.get(log_fields::SET_TYPE).trim().to_string(),
            memo: row.get(log_fields::MEMO).to_string(),
        }
    }

    /// Field values keyed by column name
    pub fn to_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            (log_fields::ID, self.id.to_string()),
            (log_fields::DATE, self.date.as_ref().map(format_date).unwrap_or_default()),
            (log_fields::EXERCISE_ID, self.exercise_id.clone()),
            (log_fields::TARGET, self.target.clone()),
            (log_fields::EXERCISE, self.exercise_name.clone()),
            (log_fields::SET_NUMBER, self.set_number.to_string()),
            (log_fields::WEIGHT, self.weight.to_string()),
            (log_fields::UNIT, self.unit.clone()),
            (log_fields::REPS, self.reps.to_string()),
            (log_fields::RPE, self.rpe.map(|r| r.to_string()).unwrap_or_default()),
            (log_fields::SET_TYPE, self.set_type.clone()),
            (log_fields::MEMO, self.memo.clone()),
        ]
    }

    /// Metrics recomputed from the raw fields
    pub fn metrics(&self) -> DerivedMetrics {
        derive_metrics(self.weight, &self.unit, self.reps)
    }
}

/// Log record enriched with derived metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(flatten)]
    pub record: LogRecord,
    #[serde(flatten)]
    pub metrics: DerivedMetrics,
}

impl From<LogRecord> for LogEntry {
    fn from(record: LogRecord) -> Self {
        let metrics = record.metrics();
        Self { record, metrics }
    }
}

/// Exercise reference data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    pub exercise_id: String,
    /// Human-facing unique key
    pub exercise_name: String,
    pub target_muscle_group: String,
    pub sub_muscle_group: String,
    pub equipment_type: String,
    pub exercise_category: String,
    /// The only field edited after creation
    pub description: String,
}

impl ExerciseRecord {
    /// Parse an exercise master row
    pub fn from_row(row: RowView<'_>) -> Self {
        Self {
            exercise_id: normalize_id(row.get(exercise_fields::EXERCISE_ID)),
            exercise_name: row.get(exercise_fields::EXERCISE_NAME).trim().to_string(),
            target_muscle_group: row.get(exercise_fields::TARGET_MUSCLE_GROUP).trim().to_string(),
            sub_muscle_group: row.get(exercise_fields::SUB_MUSCLE_GROUP).trim().to_string(),
            equipment_type: row.get(exercise_fields::EQUIPMENT_TYPE).trim().to_string(),
            exercise_category: row.get(exercise_fields::EXERCISE_CATEGORY).trim().to_string(),
            description: row.get(exercise_fields::DESCRIPTION).to_string(),
        }
    }
}

/// Allowed values projected from the constants sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constants {
    /// Allowed set types, deduplicated in sheet order
    pub set_types: Vec<String>,
    /// Allowed units, deduplicated in sheet order
    pub units: Vec<String>,
}

impl Constants {
    /// Project a constants snapshot; fails if `Category` or `Value` is missing
    pub fn from_snapshot(snapshot: &TableSnapshot) -> Result<Self> {
        snapshot.require_columns(&[constant_fields::CATEGORY, constant_fields::VALUE])?;

        let mut constants = Constants::default();
        for row in snapshot.iter() {
            let value = row.get(constant_fields::VALUE).trim();
            if value.is_empty() {
                continue;
            }
            let list = match row.get(constant_fields::CATEGORY).trim() {
                constant_fields::SET_TYPE_CATEGORY => &mut constants.set_types,
                constant_fields::UNIT_CATEGORY => &mut constants.units,
                _ => continue,
            };
            if !list.iter().any(|v| v == value) {
                list.push(value.to_string());
            }
        }
        Ok(constants)
    }

    /// True if the unit is allowed (any unit when none are configured)
    pub fn allows_unit(&self, unit: &str) -> bool {
        self.units.is_empty() || self.units.iter().any(|u| u == unit)
    }

    /// True if the set type is allowed; empty is always allowed
    pub fn allows_set_type(&self, set_type: &str) -> bool {
        set_type.is_empty()
            || self.set_types.is_empty()
            || self.set_types.iter().any(|s| s == set_type)
    }

    /// Default unit: `kg` if offered, else the first configured unit
    pub fn default_unit(&self) -> Option<&str> {
        self.units
            .iter()
            .find(|u| u.as_str() == "kg")
            .or_else(|| self.units.first())
            .map(|u| u.as_str())
    }

    /// Default set type: `Main` if offered, else the first configured type
    pub fn default_set_type(&self) -> Option<&str> {
        self.set_types
            .iter()
            .find(|s| s.as_str() == "Main")
            .or_else(|| self.set_types.first())
            .map(|s| s.as_str())
    }
}

/// Named ordered list of exercises
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRecord {
    /// `TMP` + zero-padded counter
    pub template_id: String,
    pub template_name: String,
    /// Exercise ids in workout order
    pub exercise_ids: Vec<String>,
    pub created_at: Option<NaiveDate>,
}

impl TemplateRecord {
    /// Parse a template row
    pub fn from_row(row: RowView<'_>) -> Self {
        Self {
            template_id: row.get(template_fields::TEMPLATE_ID).trim().to_string(),
            template_name: row.get(template_fields::TEMPLATE_NAME).trim().to_string(),
            exercise_ids: codec::decode(row.get(template_fields::EXERCISE_IDS)),
            created_at: parse_date(row.get(template_fields::CREATED_AT)),
        }
    }

    /// Field values keyed by column name
    pub fn to_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            (template_fields::TEMPLATE_ID, self.template_id.clone()),
            (template_fields::TEMPLATE_NAME, self.template_name.clone()),
            (template_fields::EXERCISE_IDS, codec::encode(&self.exercise_ids)),
            (
                template_fields::CREATED_AT,
                self.created_at.as_ref().map(format_date).unwrap_or_default(),
            ),
        ]
    }
}

/// Validated input for one new log row
///
/// The set number is caller-held state; use [`NewLogEntry::next_set`] to carry
/// an entry over to the following set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLogEntry {
    pub date: NaiveDate,
    /// Exercise name as listed in the master
    pub exercise_name: String,
    pub set_number: u32,
    pub weight: f64,
    pub unit: String,
    pub reps: u32,
    pub rpe: Option<f64>,
    pub set_type: String,
    pub memo: String,
}

impl NewLogEntry {
    /// Entry with the given essentials and empty optional fields
    pub fn new(date: NaiveDate, exercise_name: &str, weight: f64, unit: &str, reps: u32) -> Self {
        Self {
            date,
            exercise_name: exercise_name.to_string(),
            set_number: 1,
            weight,
            unit: unit.to_string(),
            reps,
            rpe: None,
            set_type: String::new(),
            memo: String::new(),
        }
    }

    /// Same entry for the following set
    pub fn next_set(&self) -> Self {
        Self {
            set_number: self.set_number + 1,
            ..self.clone()
        }
    }

    /// Check the fields that need no store access
    pub fn validate(&self) -> Result<()> {
        if self.exercise_name.trim().is_empty() {
            return Err(StoreError::Validation("Exercise is required".to_string()));
        }
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(StoreError::Validation(format!(
                "Weight must be a non-negative number, got {}",
                self.weight
            )));
        }
        if self.set_number < 1 {
            return Err(StoreError::Validation("Set # must be at least 1".to_string()));
        }
        if let Some(rpe) = self.rpe {
            if !(RPE_MIN..=RPE_MAX).contains(&rpe) {
                return Err(StoreError::Validation(format!(
                    "RPE must be between {} and {}, got {}",
                    RPE_MIN, RPE_MAX, rpe
                )));
            }
        }
        Ok(())
    }

    /// Check unit and set type against the allowed constants
    pub fn validate_against(&self, constants: &Constants) -> Result<()> {
        if !constants.allows_unit(&self.unit) {
            return Err(StoreError::Validation(format!(
                "Unknown unit '{}', expected one of: {}",
                self.unit,
                constants.units.join(", ")
            )));
        }
        if !constants.allows_set_type(&self.set_type) {
            return Err(StoreError::Validation(format!(
                "Unknown set type '{}', expected one of: {}",
                self.set_type,
                constants.set_types.join(", ")
            )));
        }
        Ok(())
    }
}

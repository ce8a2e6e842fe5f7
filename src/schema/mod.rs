//! Logical tables of the workout workbook
//!
//! Declares each table's header contract and the typed records parsed from
//! its rows. Column order matters only when a sheet has no header yet; live
//! sheets are always addressed by header name.

pub mod models;

pub use models::*;

use serde::{Deserialize, Serialize};
use crate::config::StoreConfig;
use crate::utils::{coerce_id, normalize_id};

/// Training log columns
pub mod log_fields {
    pub const ID: &str = "ID";
    pub const DATE: &str = "Date";
    pub const EXERCISE_ID: &str = "ExerciseID";
    pub const TARGET: &str = "Target";
    pub const EXERCISE: &str = "Exercise";
    pub const SET_NUMBER: &str = "Set #";
    pub const WEIGHT: &str = "Weight";
    pub const UNIT: &str = "Unit";
    pub const REPS: &str = "Reps";
    pub const RPE: &str = "RPE";
    pub const SET_TYPE: &str = "Set Type";
    pub const MEMO: &str = "Memo";
}

/// Exercise master columns
pub mod exercise_fields {
    pub const EXERCISE_ID: &str = "exercise_id";
    pub const EXERCISE_NAME: &str = "exercise_name";
    pub const TARGET_MUSCLE_GROUP: &str = "target_muscle_group";
    pub const SUB_MUSCLE_GROUP: &str = "sub_muscle_group";
    pub const EQUIPMENT_TYPE: &str = "equipment_type";
    pub const EXERCISE_CATEGORY: &str = "exercise_category";
    pub const DESCRIPTION: &str = "description";
}

/// Constants columns and categories
pub mod constant_fields {
    pub const CATEGORY: &str = "Category";
    pub const VALUE: &str = "Value";
    pub const SET_TYPE_CATEGORY: &str = "SetType";
    pub const UNIT_CATEGORY: &str = "Unit";
}

/// Template master columns
pub mod template_fields {
    pub const TEMPLATE_ID: &str = "template_id";
    pub const TEMPLATE_NAME: &str = "template_name";
    pub const EXERCISE_IDS: &str = "exercise_ids";
    pub const CREATED_AT: &str = "created_at";
}

pub const LOG_HEADER: &[&str] = &[
    log_fields::ID,
    log_fields::DATE,
    log_fields::EXERCISE_ID,
    log_fields::TARGET,
    log_fields::EXERCISE,
    log_fields::SET_NUMBER,
    log_fields::WEIGHT,
    log_fields::UNIT,
    log_fields::REPS,
    log_fields::RPE,
    log_fields::SET_TYPE,
    log_fields::MEMO,
];

pub const EXERCISE_HEADER: &[&str] = &[
    exercise_fields::EXERCISE_ID,
    exercise_fields::EXERCISE_NAME,
    exercise_fields::TARGET_MUSCLE_GROUP,
    exercise_fields::SUB_MUSCLE_GROUP,
    exercise_fields::EQUIPMENT_TYPE,
    exercise_fields::EXERCISE_CATEGORY,
    exercise_fields::DESCRIPTION,
];

pub const CONSTANTS_HEADER: &[&str] = &[constant_fields::CATEGORY, constant_fields::VALUE];

pub const TEMPLATE_HEADER: &[&str] = &[
    template_fields::TEMPLATE_ID,
    template_fields::TEMPLATE_NAME,
    template_fields::EXERCISE_IDS,
    template_fields::CREATED_AT,
];

/// The four logical tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableKind {
    TrainingLog,
    ExerciseMaster,
    Constants,
    TemplateMaster,
}

impl TableKind {
    /// Fixed header used when the sheet is empty or must be created
    pub fn header(self) -> &'static [&'static str] {
        match self {
            TableKind::TrainingLog => LOG_HEADER,
            TableKind::ExerciseMaster => EXERCISE_HEADER,
            TableKind::Constants => CONSTANTS_HEADER,
            TableKind::TemplateMaster => TEMPLATE_HEADER,
        }
    }

    /// Column identifying a row, if the table has one
    pub fn id_field(self) -> Option<&'static str> {
        match self {
            TableKind::TrainingLog => Some(log_fields::ID),
            TableKind::ExerciseMaster => Some(exercise_fields::EXERCISE_ID),
            TableKind::Constants => None,
            TableKind::TemplateMaster => Some(template_fields::TEMPLATE_ID),
        }
    }

    /// Comparable form of an id cell
    ///
    /// Log ids are read as integers, so `03`, `3` and `3.00` name the same row.
    /// Other ids are text with float artifacts stripped. Blank cells give an
    /// empty key.
    pub fn id_key(self, cell: &str) -> String {
        let cell = cell.trim();
        if cell.is_empty() {
            return String::new();
        }
        match self {
            TableKind::TrainingLog => coerce_id(cell).to_string(),
            _ => normalize_id(cell),
        }
    }

    /// Columns that must be present for the table to be usable
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            TableKind::TrainingLog => &[],
            TableKind::ExerciseMaster => {
                &[exercise_fields::EXERCISE_ID, exercise_fields::EXERCISE_NAME]
            }
            TableKind::Constants => CONSTANTS_HEADER,
            TableKind::TemplateMaster => &[],
        }
    }

    /// Sheet name configured for this table
    pub fn sheet_name(self, config: &StoreConfig) -> &str {
        match self {
            TableKind::TrainingLog => &config.log_sheet,
            TableKind::ExerciseMaster => &config.exercise_sheet,
            TableKind::Constants => &config.constants_sheet,
            TableKind::TemplateMaster => &config.template_sheet,
        }
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableKind::TrainingLog => write!(f, "TrainingLog"),
            TableKind::ExerciseMaster => write!(f, "ExerciseMaster"),
            TableKind::Constants => write!(f, "Constants"),
            TableKind::TemplateMaster => write!(f, "TemplateMaster"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_contracts() {
        assert_eq!(
            TableKind::TrainingLog.header(),
            &["ID", "Date", "ExerciseID", "Target", "Exercise", "Set #", "Weight", "Unit", "Reps", "RPE", "Set Type", "Memo"]
        );
        assert_eq!(
            TableKind::TemplateMaster.header(),
            &["template_id", "template_name", "exercise_ids", "created_at"]
        );
        assert_eq!(TableKind::Constants.header(), &["Category", "Value"]);
        assert_eq!(TableKind::ExerciseMaster.header().len(), 7);
    }

    #[test]
    fn test_id_fields() {
        assert_eq!(TableKind::TrainingLog.id_field(), Some("ID"));
        assert_eq!(TableKind::TemplateMaster.id_field(), Some("template_id"));
        assert_eq!(TableKind::Constants.id_field(), None);
    }

    #[test]
    fn test_id_keys() {
        assert_eq!(TableKind::TrainingLog.id_key("03"), "3");
        assert_eq!(TableKind::TrainingLog.id_key("4.00"), "4");
        assert_eq!(TableKind::TrainingLog.id_key(" 5 "), "5");
        assert_eq!(TableKind::TrainingLog.id_key(""), "");
        assert_eq!(TableKind::TemplateMaster.id_key("TMP001"), "TMP001");
        assert_eq!(TableKind::ExerciseMaster.id_key("12.0"), "12");
        assert_eq!(TableKind::ExerciseMaster.id_key("012"), "012");
    }

    #[test]
    fn test_sheet_names() {
        let config = StoreConfig::default();
        assert_eq!(TableKind::TrainingLog.sheet_name(&config), "Training Log");
        assert_eq!(TableKind::TemplateMaster.sheet_name(&config), "Template Master");
    }
}

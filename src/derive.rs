//! Derived training metrics
//!
//! Metrics are recomputed from the raw log fields on every read; any derived
//! columns stored in the sheet are ignored.

use serde::{Deserialize, Serialize};
use crate::KG_PER_LB;

/// Metrics derived from one logged set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Weight normalized to kilograms
    pub weight_kg: f64,
    /// Estimated one-rep max in kilograms (Epley)
    pub estimated_1rm: f64,
}

/// Convert a weight to kilograms; `lbs` is matched case-insensitively
pub fn weight_in_kg(weight: f64, unit: &str) -> f64 {
    if unit.trim().eq_ignore_ascii_case("lbs") {
        weight * KG_PER_LB
    } else {
        weight
    }
}

/// Epley estimate: `weight * (1 + reps / 30)`, zero when no reps were done
pub fn epley_1rm(weight_kg: f64, reps: u32) -> f64 {
    if reps > 0 {
        weight_kg * (1.0 + reps as f64 / 30.0)
    } else {
        0.0
    }
}

/// Derive kg weight and estimated 1RM from raw fields
pub fn derive_metrics(weight: f64, unit: &str, reps: u32) -> DerivedMetrics {
    let weight_kg = weight_in_kg(weight, unit);
    DerivedMetrics {
        weight_kg,
        estimated_1rm: epley_1rm(weight_kg, reps),
    }
}

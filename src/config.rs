//! Store configuration

use std::env;
use std::path::Path;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::error::{StoreError, Result};
use crate::sheets::ValueInputMode;
use crate::{
    DEFAULT_CACHE_TTL_SECS, SHEET_CONSTANTS, SHEET_EXERCISE_MASTER, SHEET_TEMPLATE_MASTER,
    SHEET_TRAINING_LOG,
};

/// Sheet names and cache behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub log_sheet: String,
    pub exercise_sheet: String,
    pub constants_sheet: String,
    pub template_sheet: String,
    /// Freshness of display reads in seconds; 0 disables the cache
    pub cache_ttl_secs: u64,
    pub value_input_mode: ValueInputMode,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            log_sheet: SHEET_TRAINING_LOG.to_string(),
            exercise_sheet: SHEET_EXERCISE_MASTER.to_string(),
            constants_sheet: SHEET_CONSTANTS.to_string(),
            template_sheet: SHEET_TEMPLATE_MASTER.to_string(),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            value_input_mode: ValueInputMode::default(),
        }
    }
}

impl StoreConfig {
    /// Load from a JSON file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse from a JSON string
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Apply `LIFTBOOK_*` environment overrides
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| env::var(key).ok())
    }

    fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("LIFTBOOK_LOG_SHEET") {
            self.log_sheet = v;
        }
        if let Some(v) = lookup("LIFTBOOK_EXERCISE_SHEET") {
            self.exercise_sheet = v;
        }
        if let Some(v) = lookup("LIFTBOOK_CONSTANTS_SHEET") {
            self.constants_sheet = v;
        }
        if let Some(v) = lookup("LIFTBOOK_TEMPLATE_SHEET") {
            self.template_sheet = v;
        }
        if let Some(v) = lookup("LIFTBOOK_CACHE_TTL_SECS") {
            self.cache_ttl_secs = v.trim().parse().map_err(|_| {
                StoreError::Config(format!("LIFTBOOK_CACHE_TTL_SECS is not a number: {}", v))
            })?;
        }
        if let Some(v) = lookup("LIFTBOOK_VALUE_INPUT_MODE") {
            self.value_input_mode = v.parse()?;
        }
        Ok(self)
    }

    /// Display cache freshness
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

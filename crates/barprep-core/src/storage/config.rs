//! TOML-based application configuration.
//!
//! Stores the last-used inputs for both calculators:
//! - Planner dates, hour budgets and high-intensity window
//! - Practice scores for the projection
//!
//! Configuration is stored at `~/.config/barprep/config.toml`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, CoreError, Result};
use crate::planner::SchedulerInputs;
use crate::projection::{ScoreInputs, ESSAY_COUNT};

/// Planner defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,
    #[serde(default = "default_exam_date")]
    pub exam_date: NaiveDate,
    #[serde(default = "default_part_time_hours")]
    pub part_time_hours: f64,
    #[serde(default = "default_full_time_hours")]
    pub full_time_hours: f64,
    #[serde(default = "default_window_weeks")]
    pub high_intensity_window_weeks: u32,
}

/// Projection defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    #[serde(default = "default_mbe_accuracy")]
    pub mbe_accuracy_percent: f64,
    #[serde(default = "default_essay_scores")]
    pub essay_scores: [f64; ESSAY_COUNT],
    #[serde(default = "default_performance_test")]
    pub performance_test_score: f64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/barprep/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub projection: ProjectionConfig,
}

// Default functions
fn default_start_date() -> NaiveDate {
    SchedulerInputs::default().start_date
}
fn default_exam_date() -> NaiveDate {
    SchedulerInputs::default().exam_date
}
fn default_part_time_hours() -> f64 {
    SchedulerInputs::default().part_time_hours_per_week
}
fn default_full_time_hours() -> f64 {
    SchedulerInputs::default().full_time_hours_per_week
}
fn default_window_weeks() -> u32 {
    SchedulerInputs::default().high_intensity_window_weeks
}
fn default_mbe_accuracy() -> f64 {
    ScoreInputs::default().mbe_accuracy_percent
}
fn default_essay_scores() -> [f64; ESSAY_COUNT] {
    ScoreInputs::default().essay_scores
}
fn default_performance_test() -> f64 {
    ScoreInputs::default().performance_test_score
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            start_date: default_start_date(),
            exam_date: default_exam_date(),
            part_time_hours: default_part_time_hours(),
            full_time_hours: default_full_time_hours(),
            high_intensity_window_weeks: default_window_weeks(),
        }
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            mbe_accuracy_percent: default_mbe_accuracy(),
            essay_scores: default_essay_scores(),
            performance_test_score: default_performance_test(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults there if it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| {
                CoreError::from(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config missing, writing defaults");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Update a value in memory by dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// existing type.
    pub fn update(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Set a config value by key and persist. Returns error if key is unknown.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.update(key, value)?;
        self.save()
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to default config");
            Self::default()
        })
    }

    pub fn scheduler_inputs(&self) -> SchedulerInputs {
        SchedulerInputs {
            start_date: self.planner.start_date,
            exam_date: self.planner.exam_date,
            part_time_hours_per_week: self.planner.part_time_hours,
            full_time_hours_per_week: self.planner.full_time_hours,
            high_intensity_window_weeks: self.planner.high_intensity_window_weeks,
        }
    }

    pub fn score_inputs(&self) -> ScoreInputs {
        ScoreInputs {
            mbe_accuracy_percent: self.projection.mbe_accuracy_percent,
            essay_scores: self.projection.essay_scores,
            performance_test_score: self.projection.performance_test_score,
        }
    }
}

//! Session configuration loaded from YAML or JSON.
//!
//! Every section is optional. A missing section falls back to the seed
//! data, so an empty document describes the default session.
//!
//! ```yaml
//! principles:
//!   - name: vida_humana
//!     weight: 0.9
//! situations:
//!   - name: corte_energia
//!     factors:
//!       vida_humana: 0.8
//!       seguridad: 0.6
//! determinism:
//!   evaluated_at: "2025-12-20T10:00:00Z"
//! ```

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::catalog::SituationCatalog;
use crate::registry::PrincipleRegistry;
use crate::types::{Principle, Situation};

lazy_static! {
    /// Principle and situation names are lowercase snake_case identifiers.
    static ref IDENTIFIER_PATTERN: Regex = Regex::new(r"^[a-z][a-z0-9_]*$").unwrap();
}

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config validation failed: {0}")]
    Validation(String),
}

/// Configuration for one decision session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OraculoConfig {
    /// Principles and their initial weights, in display order
    #[serde(default = "default_principles")]
    pub principles: Vec<Principle>,

    /// Situation catalog, in display order
    #[serde(default = "default_situations")]
    pub situations: Vec<Situation>,

    /// Determinism settings
    #[serde(default)]
    pub determinism: DeterminismConfig,
}

fn default_principles() -> Vec<Principle> {
    PrincipleRegistry::seeded().principles().to_vec()
}

fn default_situations() -> Vec<Situation> {
    SituationCatalog::seeded().situations().to_vec()
}

impl Default for OraculoConfig {
    fn default() -> Self {
        Self {
            principles: default_principles(),
            situations: default_situations(),
            determinism: DeterminismConfig::default(),
        }
    }
}

/// Fixed timestamp for reproducible decision logs.
///
/// When `evaluated_at` is None (default), the current system time is used.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DeterminismConfig {
    /// Format: RFC 3339 (e.g., "2025-12-20T10:00:00Z")
    #[serde(default)]
    pub evaluated_at: Option<DateTime<Utc>>,
}

impl OraculoConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load a file, choosing JSON for a `.json` extension and YAML otherwise.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.extension().map(|e| e == "json").unwrap_or(false) {
            Self::from_json_file(path)
        } else {
            Self::from_yaml_file(path)
        }
    }

    /// Check names, uniqueness and numeric ranges.
    ///
    /// Principle weights only need to be finite; relevance factors must lie
    /// in [0.0, 1.0].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.principles.is_empty() {
            return Err(ConfigError::Validation("no principles defined".to_string()));
        }
        if self.situations.is_empty() {
            return Err(ConfigError::Validation("no situations defined".to_string()));
        }

        let mut seen = HashSet::new();
        for principle in &self.principles {
            check_identifier("principle", &principle.name)?;
            if !seen.insert(principle.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate principle '{}'",
                    principle.name
                )));
            }
            if !principle.weight.is_finite() {
                return Err(ConfigError::Validation(format!(
                    "principle '{}' has a non-finite weight",
                    principle.name
                )));
            }
        }

        let mut seen = HashSet::new();
        for situation in &self.situations {
            check_identifier("situation", &situation.name)?;
            if !seen.insert(situation.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate situation '{}'",
                    situation.name
                )));
            }
            for (principle, relevance) in &situation.factors {
                check_identifier("factor", principle)?;
                if !(0.0..=1.0).contains(relevance) {
                    return Err(ConfigError::Validation(format!(
                        "situation '{}': relevance of '{}' must be within [0.0, 1.0], got {}",
                        situation.name, principle, relevance
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn registry(&self) -> PrincipleRegistry {
        PrincipleRegistry::new(self.principles.iter().cloned())
    }

    pub fn catalog(&self) -> SituationCatalog {
        SituationCatalog::new(self.situations.iter().cloned())
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn check_identifier(kind: &str, name: &str) -> Result<(), ConfigError> {
    if IDENTIFIER_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "{} name '{}' must be a lowercase snake_case identifier",
            kind, name
        )))
    }
}

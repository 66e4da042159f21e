// File: src/config.rs
// Purpose: Configuration parsing from formscan.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::rules::{RuleSet, ValidationKind};
use crate::validator::UnknownKindPolicy;

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "formscan.toml";

/// Validator configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ValidatorConfig {
    #[serde(default)]
    pub validator: RulesConfig,

    #[serde(default)]
    pub markup: MarkupConfig,
}

/// Which rules apply and how fields without one are treated
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RulesConfig {
    #[serde(default)]
    pub unknown_kind: UnknownKindPolicy,

    /// Registered kinds (default: all built-in kinds)
    #[serde(default = "default_kinds")]
    pub kinds: Vec<ValidationKind>,
}

/// How validation markers are read from HTML
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarkupConfig {
    /// Attribute holding the validation kind (default: "data-validation")
    #[serde(default = "default_marker_attribute")]
    pub marker_attribute: String,
}

fn default_kinds() -> Vec<ValidationKind> {
    ValidationKind::ALL.to_vec()
}

fn default_marker_attribute() -> String {
    "data-validation".to_string()
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            unknown_kind: UnknownKindPolicy::default(),
            kinds: default_kinds(),
        }
    }
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            marker_attribute: default_marker_attribute(),
        }
    }
}

impl ValidatorConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::parse(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from the default path (./formscan.toml)
    pub fn load_default() -> Result<Self> {
        Self::load(DEFAULT_CONFIG_FILE)
    }

    /// Parse configuration from TOML text; blank input yields defaults
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: ValidatorConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// The rule set described by `validator.kinds`
    pub fn rule_set(&self) -> RuleSet {
        RuleSet::only(self.validator.kinds.iter().copied())
    }
}

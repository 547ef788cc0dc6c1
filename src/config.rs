//! Comparison configuration
//!
//! Controls which semantic attributes are extracted from components and how
//! each one is compared. The defaults cover the attributes found in job
//! exports; a JSON file passed with `--config` can replace them.

use crate::error::{JobdiffError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Attribute carrying a component's display name
pub const NAME_ATTRIBUTE: &str = "Name";

/// How an attribute's elements are read and compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    /// Single value at `elements.1.values.1.value`
    Scalar,
    /// Set of `values.1.value` across every element
    Set,
    /// `values.1.value` → `values.2.value` across every element
    Mapping,
}

/// A tracked attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeSpec {
    pub name: String,
    pub kind: AttributeKind,
}

impl AttributeSpec {
    pub fn new(name: impl Into<String>, kind: AttributeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct DiffConfig {
    /// Tracked attributes, in report order
    pub attributes: Vec<AttributeSpec>,
    /// Label for components without a resolvable name
    pub unnamed_label: String,
    /// Label for components without an `executionHint`
    pub unknown_type_label: String,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            attributes: default_attributes(),
            unnamed_label: "Unnamed".to_string(),
            unknown_type_label: "Unknown".to_string(),
        }
    }
}

fn default_attributes() -> Vec<AttributeSpec> {
    vec![
        AttributeSpec::new(NAME_ATTRIBUTE, AttributeKind::Scalar),
        AttributeSpec::new("Target Table", AttributeKind::Scalar),
        AttributeSpec::new("SQL Query", AttributeKind::Scalar),
        AttributeSpec::new("Schema", AttributeKind::Scalar),
        AttributeSpec::new("Database", AttributeKind::Scalar),
        AttributeSpec::new("Column Names", AttributeKind::Set),
        AttributeSpec::new("Column Mapping", AttributeKind::Mapping),
    ]
}

impl DiffConfig {
    /// Load configuration from a JSON file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(JobdiffError::PathNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| JobdiffError::config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;

        log::debug!(
            "Loaded config from {} ({} attributes)",
            path.display(),
            config.attributes.len()
        );
        Ok(config)
    }

    /// Load from `path` when given, otherwise use the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for spec in &self.attributes {
            if spec.name.trim().is_empty() {
                return Err(JobdiffError::config("attribute names must not be empty"));
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(JobdiffError::config(format!(
                    "attribute '{}' is listed more than once",
                    spec.name
                )));
            }
            if spec.name == NAME_ATTRIBUTE && spec.kind != AttributeKind::Scalar {
                return Err(JobdiffError::config(format!(
                    "attribute '{}' must be a scalar",
                    NAME_ATTRIBUTE
                )));
            }
        }
        Ok(())
    }
}

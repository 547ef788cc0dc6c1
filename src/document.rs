//! Tolerant view over a job-definition document
//!
//! A document is kept as the raw `serde_json::Value` it was parsed from.
//! Accessors never fail: a missing key, or a scalar/array where a mapping was
//! expected, reads as an empty mapping.

use serde_json::{Map, Value};
use std::path::Path;
use std::sync::OnceLock;

/// A job export: `{ "info": {...}, "job": { "components": {...}, "variables": {...} } }`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    root: Value,
}

impl Document {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// The document substituted for unreadable input
    pub fn empty() -> Self {
        Self::new(Value::Object(Map::new()))
    }

    /// Parse a document from raw bytes, degrading to an empty document on
    /// malformed input.
    pub fn from_slice(bytes: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(root) => Self::new(root),
            Err(e) => {
                log::warn!("Document is not valid JSON, treating as empty: {}", e);
                Self::empty()
            }
        }
    }

    /// Read and parse a document from disk. A missing or unreadable file is
    /// treated as an empty document.
    pub fn load(path: &Path) -> Self {
        match std::fs::read(path) {
            Ok(bytes) => {
                log::debug!("Loaded {} ({} bytes)", path.display(), bytes.len());
                let document = Self::from_slice(&bytes);
                if document.is_empty() {
                    log::debug!("{} has no content to compare", path.display());
                }
                document
            }
            Err(e) => {
                log::warn!("Error reading file {}: {}", path.display(), e);
                Self::empty()
            }
        }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Job metadata (name, description, extra fields)
    pub fn info(&self) -> &Map<String, Value> {
        object_at(&self.root, "info").unwrap_or_else(|| empty_map())
    }

    pub fn components(&self) -> &Map<String, Value> {
        lookup(&self.root, &["job", "components"])
            .and_then(Value::as_object)
            .unwrap_or_else(|| empty_map())
    }

    pub fn variables(&self) -> &Map<String, Value> {
        lookup(&self.root, &["job", "variables"])
            .and_then(Value::as_object)
            .unwrap_or_else(|| empty_map())
    }

    /// True when the document carries no info, components or variables
    pub fn is_empty(&self) -> bool {
        self.info().is_empty() && self.components().is_empty() && self.variables().is_empty()
    }
}

fn empty_map() -> &'static Map<String, Value> {
    static EMPTY: OnceLock<Map<String, Value>> = OnceLock::new();
    EMPTY.get_or_init(Map::new)
}

/// Walk a chain of object keys. Any non-object along the way ends the walk.
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(value, |current, key| current.as_object()?.get(*key))
}

/// The mapping stored under `key`, if `value` is an object and the entry is one too
pub fn object_at<'a>(value: &'a Value, key: &str) -> Option<&'a Map<String, Value>> {
    value.as_object()?.get(key)?.as_object()
}

/// Text form of a scalar leaf. `null`, objects and arrays have none.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Render an optional value for a report line
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "(unset)".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

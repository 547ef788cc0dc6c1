//! Document comparison driver
//!
//! [`compare_documents`] is the pure entry point of the comparison core: it
//! never fails and holds no state between calls. [`compare_files`] wraps it
//! with the tolerant file loading used by the CLI.

use crate::attributes::diff_attributes;
use crate::canonical::{canonicalize, execution_hint};
use crate::config::DiffConfig;
use crate::document::Document;
use crate::entity::diff_entities;
use crate::error::Result;
use crate::hash::{digest_document, HashValue};
use crate::report::{build_report, ChangeRecord, ComponentSummary, Report};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Info fields reported before any other metadata field
const LEADING_INFO_FIELDS: &[&str] = &["name", "description"];

/// Compare two documents and build the change report
pub fn compare_documents(old: &Document, new: &Document, config: &DiffConfig) -> Report {
    if old.root() == new.root() {
        log::debug!("Documents are structurally identical");
        return build_report(Vec::new());
    }

    let mut records = info_changes(old.info(), new.info());
    records.extend(component_changes(old.components(), new.components(), config));
    records.extend(variable_changes(old.variables(), new.variables()));

    let report = build_report(records);
    log::debug!(
        "Comparison found {} change(s): {} component, {} variable",
        report.summary.total,
        report.summary.component_total(),
        report.summary.variable_total()
    );
    report
}

fn info_changes(old: &Map<String, Value>, new: &Map<String, Value>) -> Vec<ChangeRecord> {
    let diff = diff_entities(old, new);
    let is_changed = |field: &str| diff.added.iter().chain(&diff.modified).any(|k| k == field);

    let leading = LEADING_INFO_FIELDS.iter().copied();
    let rest = new
        .keys()
        .map(String::as_str)
        .filter(|field| !LEADING_INFO_FIELDS.contains(field));

    let mut records: Vec<ChangeRecord> = leading
        .chain(rest)
        .filter(|&field| is_changed(field))
        .map(|field| ChangeRecord::InfoModified {
            field: field.to_string(),
            old: old.get(field).cloned(),
            new: new.get(field).cloned(),
        })
        .collect();

    let mut removed: Vec<&String> = diff.removed.iter().collect();
    removed.sort_by_key(|field| {
        LEADING_INFO_FIELDS
            .iter()
            .position(|leading| leading == field)
            .unwrap_or(LEADING_INFO_FIELDS.len())
    });
    records.extend(removed.into_iter().map(|field| ChangeRecord::InfoModified {
        field: field.clone(),
        old: old.get(field).cloned(),
        new: None,
    }));

    records
}

fn component_changes(
    old: &Map<String, Value>,
    new: &Map<String, Value>,
    config: &DiffConfig,
) -> Vec<ChangeRecord> {
    let diff = diff_entities(old, new);
    if !diff.has_changes() {
        return Vec::new();
    }
    let mut records = Vec::with_capacity(diff.total_changes());

    for id in &diff.added {
        if let Some(component) = new.get(id) {
            records.push(ChangeRecord::ComponentAdded {
                component: summarize(id, component, None, config),
            });
        }
    }

    for id in &diff.modified {
        if let (Some(old_component), Some(new_component)) = (old.get(id), new.get(id)) {
            let old_attributes = canonicalize(old_component, &config.attributes);
            let new_attributes = canonicalize(new_component, &config.attributes);
            let deltas = diff_attributes(&old_attributes, &new_attributes, &config.attributes);
            log::debug!("Component {} modified with {} attribute delta(s)", id, deltas.len());

            records.push(ChangeRecord::ComponentModified {
                component: summarize(id, new_component, Some(old_component), config),
                deltas,
            });
        }
    }

    for id in &diff.removed {
        if let Some(component) = old.get(id) {
            records.push(ChangeRecord::ComponentRemoved {
                component: summarize(id, component, None, config),
            });
        }
    }

    records
}

/// Label a component by its own name, falling back to `previous`'s name
fn summarize(
    id: &str,
    component: &Value,
    previous: Option<&Value>,
    config: &DiffConfig,
) -> ComponentSummary {
    let name_of = |component: &Value| canonicalize(component, &config.attributes).name();
    let name = name_of(component)
        .or_else(|| previous.and_then(name_of))
        .unwrap_or_else(|| config.unnamed_label.clone());
    let component_type = execution_hint(component)
        .or_else(|| previous.and_then(execution_hint))
        .unwrap_or(config.unknown_type_label.as_str())
        .to_string();

    ComponentSummary {
        id: id.to_string(),
        name,
        component_type,
    }
}

fn variable_changes(old: &Map<String, Value>, new: &Map<String, Value>) -> Vec<ChangeRecord> {
    let diff = diff_entities(old, new);
    let value_of = |variables: &Map<String, Value>, name: &str| {
        variables
            .get(name)
            .and_then(|variable| variable.get("value"))
            .cloned()
    };

    // Added and modified variables interleave in new-document order
    let mut records: Vec<ChangeRecord> = new
        .keys()
        .filter_map(|name| {
            if diff.added.contains(name) {
                Some(ChangeRecord::VariableAdded {
                    name: name.clone(),
                    value: value_of(new, name),
                })
            } else if diff.modified.contains(name) {
                Some(ChangeRecord::VariableModified {
                    name: name.clone(),
                    old: value_of(old, name),
                    new: value_of(new, name),
                })
            } else {
                None
            }
        })
        .collect();

    records.extend(diff.removed.iter().map(|name| ChangeRecord::VariableRemoved {
        name: name.clone(),
        value: value_of(old, name),
    }));

    records
}

/// A compared file (or pair of files), with its fingerprints
#[derive(Debug, Clone, Serialize)]
pub struct FileComparison {
    /// Name shown in the report header
    pub label: String,
    pub old: FileInfo,
    pub new: FileInfo,
    pub report: Report,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileInfo {
    /// `None` when the file is absent on this side
    pub path: Option<PathBuf>,
    pub digest: HashValue,
}

/// Load two files tolerantly and compare them. An absent path compares as
/// an empty document.
pub fn compare_files(
    label: impl Into<String>,
    old_path: Option<&Path>,
    new_path: Option<&Path>,
    config: &DiffConfig,
) -> Result<FileComparison> {
    let old = old_path.map(Document::load).unwrap_or_else(Document::empty);
    let new = new_path.map(Document::load).unwrap_or_else(Document::empty);

    let old_info = FileInfo {
        path: old_path.map(Path::to_path_buf),
        digest: digest_document(&old)?,
    };
    let new_info = FileInfo {
        path: new_path.map(Path::to_path_buf),
        digest: digest_document(&new)?,
    };

    let report = if old_info.digest == new_info.digest {
        build_report(Vec::new())
    } else {
        compare_documents(&old, &new, config)
    };

    Ok(FileComparison {
        label: label.into(),
        old: old_info,
        new: new_info,
        report,
    })
}

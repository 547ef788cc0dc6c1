//! Attribute-level differ for modified components
//!
//! Projects two canonical attribute maps of the same component onto an
//! ordered list of [`AttributeDelta`]s: the rename first, then scalar changes
//! in configured order, then set and mapping entries sorted by key.

use crate::canonical::AttributeMap;
use crate::config::{AttributeKind, AttributeSpec, NAME_ATTRIBUTE};
use crate::document::display_value;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};

/// One difference between two canonical attribute maps
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "delta", rename_all = "snake_case")]
pub enum AttributeDelta {
    /// Display name differs (including appearing or disappearing)
    Renamed {
        from: Option<String>,
        to: Option<String>,
    },
    /// Scalar present on both sides with different values
    Changed {
        attribute: String,
        old: Value,
        new: Value,
    },
    /// Scalar only present in the new component
    Appeared { attribute: String, value: Value },
    /// Scalar only present in the old component
    Disappeared { attribute: String, value: Value },
    MemberAdded { attribute: String, member: String },
    MemberRemoved { attribute: String, member: String },
    MappingAdded {
        attribute: String,
        source: String,
        target: String,
    },
    MappingRemoved {
        attribute: String,
        source: String,
        target: String,
    },
    MappingChanged {
        attribute: String,
        source: String,
        old_target: String,
        new_target: String,
    },
}

impl AttributeDelta {
    /// One report line for this delta, `component` being the label of the
    /// component it belongs to
    pub fn describe(&self, component: &str) -> String {
        match self {
            Self::Renamed { from, to } => format!(
                "Component renamed: {} -> {}",
                from.as_deref().unwrap_or("(unset)"),
                to.as_deref().unwrap_or("(unset)")
            ),
            Self::Changed {
                attribute,
                old,
                new,
            } => {
                // 1 vs "1": fall back to JSON text so the type change shows
                let (old_text, new_text) = match (display_value(Some(old)), display_value(Some(new))) {
                    (old_text, new_text) if old_text == new_text => (old.to_string(), new.to_string()),
                    texts => texts,
                };
                format!("{} changed in {}: {} -> {}", attribute, component, old_text, new_text)
            }
            Self::Appeared { attribute, value } => format!(
                "{} set in {}: {}",
                attribute,
                component,
                display_value(Some(value))
            ),
            Self::Disappeared { attribute, value } => format!(
                "{} unset in {} (was: {})",
                attribute,
                component,
                display_value(Some(value))
            ),
            Self::MemberAdded { attribute, member } => {
                format!("Added to {} in {}: {}", attribute, component, member)
            }
            Self::MemberRemoved { attribute, member } => {
                format!("Removed from {} in {}: {}", attribute, component, member)
            }
            Self::MappingAdded {
                attribute,
                source,
                target,
            } => format!("Added {} in {}: {} -> {}", attribute, component, source, target),
            Self::MappingRemoved {
                attribute,
                source,
                target,
            } => format!("Removed {} in {}: {} -> {}", attribute, component, source, target),
            Self::MappingChanged {
                attribute,
                source,
                old_target,
                new_target,
            } => format!(
                "Modified {} in {}: {}: {} -> {}",
                attribute, component, source, old_target, new_target
            ),
        }
    }
}

/// Compute the ordered deltas between two canonical maps of one component
pub fn diff_attributes(
    old: &AttributeMap,
    new: &AttributeMap,
    attributes: &[AttributeSpec],
) -> Vec<AttributeDelta> {
    let mut deltas = Vec::new();

    let (old_name, new_name) = (old.name(), new.name());
    if old_name != new_name {
        deltas.push(AttributeDelta::Renamed {
            from: old_name,
            to: new_name,
        });
    }

    for spec in attributes
        .iter()
        .filter(|spec| spec.name != NAME_ATTRIBUTE && spec.kind == AttributeKind::Scalar)
    {
        if let Some(delta) = diff_scalar(&spec.name, old.scalar(&spec.name), new.scalar(&spec.name)) {
            deltas.push(delta);
        }
    }

    let empty_set = BTreeSet::new();
    let empty_mapping = IndexMap::new();
    for spec in attributes {
        match spec.kind {
            AttributeKind::Scalar => {}
            AttributeKind::Set => diff_set(
                &spec.name,
                old.set(&spec.name).unwrap_or(&empty_set),
                new.set(&spec.name).unwrap_or(&empty_set),
                &mut deltas,
            ),
            AttributeKind::Mapping => diff_mapping(
                &spec.name,
                old.mapping(&spec.name).unwrap_or(&empty_mapping),
                new.mapping(&spec.name).unwrap_or(&empty_mapping),
                &mut deltas,
            ),
        }
    }

    deltas
}

fn diff_scalar(attribute: &str, old: Option<&Value>, new: Option<&Value>) -> Option<AttributeDelta> {
    match (old, new) {
        (Some(old), Some(new)) if old != new => Some(AttributeDelta::Changed {
            attribute: attribute.to_string(),
            old: old.clone(),
            new: new.clone(),
        }),
        (None, Some(value)) => Some(AttributeDelta::Appeared {
            attribute: attribute.to_string(),
            value: value.clone(),
        }),
        (Some(value), None) => Some(AttributeDelta::Disappeared {
            attribute: attribute.to_string(),
            value: value.clone(),
        }),
        _ => None,
    }
}

/// Members are visited in sorted order since both sides are `BTreeSet`s.
fn diff_set(
    attribute: &str,
    old: &BTreeSet<String>,
    new: &BTreeSet<String>,
    deltas: &mut Vec<AttributeDelta>,
) {
    deltas.extend(new.difference(old).map(|member| AttributeDelta::MemberAdded {
        attribute: attribute.to_string(),
        member: member.clone(),
    }));
    deltas.extend(old.difference(new).map(|member| AttributeDelta::MemberRemoved {
        attribute: attribute.to_string(),
        member: member.clone(),
    }));
}

fn diff_mapping(
    attribute: &str,
    old: &IndexMap<String, String>,
    new: &IndexMap<String, String>,
    deltas: &mut Vec<AttributeDelta>,
) {
    let mut sources: Vec<&String> = old
        .keys()
        .chain(new.keys())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    sources.sort();

    for source in sources {
        let delta = match (old.get(source), new.get(source)) {
            (None, Some(target)) => AttributeDelta::MappingAdded {
                attribute: attribute.to_string(),
                source: source.clone(),
                target: target.clone(),
            },
            (Some(target), None) => AttributeDelta::MappingRemoved {
                attribute: attribute.to_string(),
                source: source.clone(),
                target: target.clone(),
            },
            (Some(old_target), Some(new_target)) if old_target != new_target => {
                AttributeDelta::MappingChanged {
                    attribute: attribute.to_string(),
                    source: source.clone(),
                    old_target: old_target.clone(),
                    new_target: new_target.clone(),
                }
            }
            _ => continue,
        };
        deltas.push(delta);
    }
}

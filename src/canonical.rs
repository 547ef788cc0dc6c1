//! Component canonicalization
//!
//! Job exports address component parameters in two ways. Newer exports give
//! every parameter a `name` ("Target Table", "SQL Query", ...). Older ones
//! only carry slot ids, and the display name lives by convention in slot `"1"`.
//! [`canonicalize`] hides that difference behind an [`AttributeMap`] keyed by
//! semantic attribute name.

use crate::config::{AttributeKind, AttributeSpec, NAME_ATTRIBUTE};
use crate::document::{lookup, scalar_text};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Resolved value of one semantic attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AttributeValue {
    Scalar(Value),
    Set(BTreeSet<String>),
    /// Source → target, in document order
    Mapping(IndexMap<String, String>),
}

/// Normalized view of a component's parameters.
///
/// An attribute missing from the map is *unset*, which is distinct from an
/// attribute present with an empty value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AttributeMap {
    entries: IndexMap<String, AttributeValue>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: AttributeValue) {
        self.entries.insert(name.into(), value);
    }

    pub fn scalar(&self, name: &str) -> Option<&Value> {
        match self.entries.get(name)? {
            AttributeValue::Scalar(value) => Some(value),
            _ => None,
        }
    }

    pub fn set(&self, name: &str) -> Option<&BTreeSet<String>> {
        match self.entries.get(name)? {
            AttributeValue::Set(members) => Some(members),
            _ => None,
        }
    }

    pub fn mapping(&self, name: &str) -> Option<&IndexMap<String, String>> {
        match self.entries.get(name)? {
            AttributeValue::Mapping(pairs) => Some(pairs),
            _ => None,
        }
    }

    /// Display name of the component, if one resolved
    pub fn name(&self) -> Option<String> {
        self.scalar(NAME_ATTRIBUTE).and_then(scalar_text)
    }
}

/// What a naming strategy gets to look at
struct ParameterSlot<'a> {
    slot: &'a str,
    parameter: &'a Value,
    /// Whether any parameter of the same component carries a `name` key
    has_named_parameters: bool,
}

type NameResolver = fn(&ParameterSlot<'_>) -> Option<String>;

/// Tried in order; the first strategy that yields a name wins.
const NAME_RESOLVERS: &[NameResolver] = &[explicit_name, positional_name];

/// A parameter with a non-string `name` is name-addressed but unnamed.
fn explicit_name(slot: &ParameterSlot<'_>) -> Option<String> {
    slot.parameter.get("name")?.as_str().map(str::to_string)
}

/// Legacy exports: slot "1" is the display name.
fn positional_name(slot: &ParameterSlot<'_>) -> Option<String> {
    if !slot.has_named_parameters && slot.slot == "1" && slot.parameter.get("name").is_none() {
        Some(NAME_ATTRIBUTE.to_string())
    } else {
        None
    }
}

/// Pair each parameter with its semantic name, in document order.
/// Parameters no strategy can name are dropped.
pub fn resolve_parameters(component: &Value) -> Vec<(String, &Value)> {
    let parameters = match lookup(component, &["parameters"]).and_then(Value::as_object) {
        Some(parameters) => parameters,
        None => return Vec::new(),
    };

    let has_named_parameters = parameters
        .values()
        .any(|p| p.get("name").is_some());

    parameters
        .iter()
        .filter(|(_, parameter)| parameter.is_object())
        .filter_map(|(slot, parameter)| {
            let ctx = ParameterSlot {
                slot: slot.as_str(),
                parameter,
                has_named_parameters,
            };
            NAME_RESOLVERS
                .iter()
                .find_map(|resolve| resolve(&ctx))
                .map(|name| (name, parameter))
        })
        .collect()
}

/// Build the canonical attribute map of a component for the given attributes
pub fn canonicalize(component: &Value, attributes: &[AttributeSpec]) -> AttributeMap {
    let resolved = resolve_parameters(component);
    let mut map = AttributeMap::new();

    for spec in attributes {
        let matching: Vec<&Value> = resolved
            .iter()
            .filter(|(name, _)| *name == spec.name)
            .map(|(_, parameter)| *parameter)
            .collect();

        if matching.is_empty() {
            continue;
        }

        match spec.kind {
            AttributeKind::Scalar => {
                if matching.len() > 1 {
                    log::debug!(
                        "{} parameters resolve to '{}', using the first",
                        matching.len(),
                        spec.name
                    );
                }
                if let Some(value) = first_value(matching[0]) {
                    map.insert(spec.name.clone(), AttributeValue::Scalar(value.clone()));
                }
            }
            AttributeKind::Set => {
                let members = matching
                    .iter()
                    .flat_map(|parameter| elements(parameter))
                    .filter_map(|element| element_value(element, "1"))
                    .collect();
                map.insert(spec.name.clone(), AttributeValue::Set(members));
            }
            AttributeKind::Mapping => {
                let mut pairs = IndexMap::new();
                for element in matching.iter().flat_map(|parameter| elements(parameter)) {
                    let source = element_value(element, "1");
                    let target = element_value(element, "2");
                    if let (Some(source), Some(target)) = (source, target) {
                        pairs.insert(source, target);
                    }
                }
                map.insert(spec.name.clone(), AttributeValue::Mapping(pairs));
            }
        }
    }

    map
}

/// Scalar at `elements.1.values.1.value`
fn first_value(parameter: &Value) -> Option<&Value> {
    lookup(parameter, &["elements", "1", "values", "1", "value"]).filter(|value| is_scalar(value))
}

fn elements(parameter: &Value) -> impl Iterator<Item = &Value> {
    lookup(parameter, &["elements"])
        .and_then(Value::as_object)
        .map(Map::values)
        .into_iter()
        .flatten()
}

fn element_value(element: &Value, slot: &str) -> Option<String> {
    lookup(element, &["values", slot, "value"]).and_then(scalar_text)
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Array(_) | Value::Object(_))
}

/// The component's `executionHint`, when it is a string
pub fn execution_hint(component: &Value) -> Option<&str> {
    component.get("executionHint").and_then(Value::as_str)
}

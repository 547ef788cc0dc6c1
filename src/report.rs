//! Change records and report assembly

use crate::attributes::AttributeDelta;
use crate::document::display_value;
use serde::Serialize;
use serde_json::Value;

/// Identity of a component as shown in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentSummary {
    pub id: String,
    /// Resolved display name, or the configured placeholder
    pub name: String,
    /// The component's `executionHint`, or the configured placeholder
    pub component_type: String,
}

/// One classified difference between two documents
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum ChangeRecord {
    InfoModified {
        field: String,
        old: Option<Value>,
        new: Option<Value>,
    },
    ComponentAdded {
        component: ComponentSummary,
    },
    ComponentModified {
        component: ComponentSummary,
        deltas: Vec<AttributeDelta>,
    },
    ComponentRemoved {
        component: ComponentSummary,
    },
    VariableAdded {
        name: String,
        value: Option<Value>,
    },
    VariableModified {
        name: String,
        old: Option<Value>,
        new: Option<Value>,
    },
    VariableRemoved {
        name: String,
        value: Option<Value>,
    },
}

/// Report sections, in rendering order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChangeCategory {
    Info,
    ComponentAdded,
    ComponentModified,
    ComponentRemoved,
    /// Added and modified variables share one section, in new-document order
    Variable,
    VariableRemoved,
}

impl ChangeRecord {
    pub fn category(&self) -> ChangeCategory {
        match self {
            Self::InfoModified { .. } => ChangeCategory::Info,
            Self::ComponentAdded { .. } => ChangeCategory::ComponentAdded,
            Self::ComponentModified { .. } => ChangeCategory::ComponentModified,
            Self::ComponentRemoved { .. } => ChangeCategory::ComponentRemoved,
            Self::VariableAdded { .. } | Self::VariableModified { .. } => ChangeCategory::Variable,
            Self::VariableRemoved { .. } => ChangeCategory::VariableRemoved,
        }
    }

    /// Report lines for this record. Always at least one: a modified
    /// component with no tracked-attribute delta still gets a line.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::InfoModified { field, old, new } => vec![format!(
                "Job {} changed: {} -> {}",
                field,
                display_value(old.as_ref()),
                display_value(new.as_ref())
            )],
            Self::ComponentAdded { component } => vec![format!(
                "Component added: {} ({})",
                component.name, component.component_type
            )],
            Self::ComponentModified { component, deltas } if deltas.is_empty() => vec![format!(
                "Component modified: {} ({})",
                component.name, component.component_type
            )],
            Self::ComponentModified { component, deltas } => deltas
                .iter()
                .map(|delta| delta.describe(&component.name))
                .collect(),
            Self::ComponentRemoved { component } => vec![format!(
                "Component removed: {} ({})",
                component.name, component.component_type
            )],
            Self::VariableAdded { name, value } => vec![format!(
                "Variable added: {} = {}",
                name,
                display_value(value.as_ref())
            )],
            Self::VariableModified { name, old, new } => vec![format!(
                "Variable changed: {}: {} -> {}",
                name,
                display_value(old.as_ref()),
                display_value(new.as_ref())
            )],
            Self::VariableRemoved { name, value } => vec![format!(
                "Variable removed: {} (was: {})",
                name,
                display_value(value.as_ref())
            )],
        }
    }

    /// Number of report lines, which is what this record adds to the total
    pub fn line_count(&self) -> usize {
        match self {
            Self::ComponentModified { deltas, .. } => deltas.len().max(1),
            _ => 1,
        }
    }
}

/// Per-category change counts.
///
/// Counts are per report line: a modified component contributes one change
/// per attribute delta, so set and mapping entries count individually.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummaryCounts {
    pub info_changes: usize,
    pub components_added: usize,
    pub component_changes: usize,
    pub components_removed: usize,
    pub variables_added: usize,
    pub variables_modified: usize,
    pub variables_removed: usize,
    /// Modified component entities; informational, not part of `total`
    pub components_modified: usize,
    pub total: usize,
}

impl SummaryCounts {
    pub fn component_total(&self) -> usize {
        self.components_added + self.component_changes + self.components_removed
    }

    pub fn variable_total(&self) -> usize {
        self.variables_added + self.variables_modified + self.variables_removed
    }
}

/// Ordered change list with its summary
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    pub summary: SummaryCounts,
    pub changes: Vec<ChangeRecord>,
}

pub const NO_CHANGES_LINE: &str = "No changes detected";

/// Order records into report sections and count them.
///
/// Sorting is stable, so records keep their relative order within a section.
pub fn build_report(mut records: Vec<ChangeRecord>) -> Report {
    records.sort_by_key(ChangeRecord::category);

    let mut summary = SummaryCounts::default();
    for record in &records {
        let lines = record.line_count();
        match record {
            ChangeRecord::InfoModified { .. } => summary.info_changes += lines,
            ChangeRecord::ComponentAdded { .. } => summary.components_added += lines,
            ChangeRecord::ComponentModified { .. } => {
                summary.component_changes += lines;
                summary.components_modified += 1;
            }
            ChangeRecord::ComponentRemoved { .. } => summary.components_removed += lines,
            ChangeRecord::VariableAdded { .. } => summary.variables_added += lines,
            ChangeRecord::VariableModified { .. } => summary.variables_modified += lines,
            ChangeRecord::VariableRemoved { .. } => summary.variables_removed += lines,
        }
    }
    summary.total = summary.info_changes + summary.component_total() + summary.variable_total();

    Report {
        summary,
        changes: records,
    }
}

impl Report {
    pub fn has_changes(&self) -> bool {
        self.summary.total > 0
    }

    /// Change lines without numbering, in report order
    pub fn lines(&self) -> Vec<String> {
        self.changes.iter().flat_map(ChangeRecord::lines).collect()
    }

    /// Change lines numbered from 1
    pub fn numbered_lines(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .enumerate()
            .map(|(i, line)| format!("{}. {}", i + 1, line))
            .collect()
    }

    /// Plain-text rendering: a single line when nothing changed, otherwise a
    /// header with per-section tallies followed by the numbered change list
    pub fn render(&self) -> String {
        if !self.has_changes() {
            return NO_CHANGES_LINE.to_string();
        }

        let mut out = format!(
            "Changes detected: {} (info: {}, components: {}, variables: {})",
            self.summary.total,
            self.summary.info_changes,
            self.summary.component_total(),
            self.summary.variable_total()
        );
        for line in self.numbered_lines() {
            out.push('\n');
            out.push_str(&line);
        }
        out
    }
}

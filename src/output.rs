//! Output formatting utilities

use crate::compare::FileComparison;
use crate::error::Result;
use chrono::Utc;
use serde_json::Value;

/// Pretty printer for jobdiff output
pub struct PrettyPrinter;

impl PrettyPrinter {
    /// One comparison: a `File:` header followed by the rendered report
    pub fn format_comparison(comparison: &FileComparison) -> String {
        format!("File: {}\n{}", comparison.label, comparison.report.render())
    }

    /// Directory comparison: one block per file pair, then a tally line
    pub fn format_batch(comparisons: &[FileComparison]) -> String {
        let mut out = String::new();
        for comparison in comparisons {
            out.push_str(&Self::format_comparison(comparison));
            out.push_str("\n\n");
        }

        let changed = comparisons
            .iter()
            .filter(|c| c.report.has_changes())
            .count();
        out.push_str(&format!(
            "Files compared: {}, files changed: {}",
            comparisons.len(),
            changed
        ));
        out
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format any serializable data as JSON
    pub fn format<T: serde::Serialize + ?Sized>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }

    pub fn format_comparison(comparison: &FileComparison) -> Result<String> {
        Self::format(&Self::comparison_value(comparison)?)
    }

    pub fn format_batch(comparisons: &[FileComparison]) -> Result<String> {
        let values = comparisons
            .iter()
            .map(Self::comparison_value)
            .collect::<Result<Vec<_>>>()?;
        Self::format(&values)
    }

    fn comparison_value(comparison: &FileComparison) -> Result<Value> {
        Ok(serde_json::json!({
            "file": comparison.label,
            "old": serde_json::to_value(&comparison.old)?,
            "new": serde_json::to_value(&comparison.new)?,
            "generated_at": Utc::now(),
            "summary": serde_json::to_value(&comparison.report.summary)?,
            "changes": serde_json::to_value(&comparison.report.changes)?,
            "lines": comparison.report.numbered_lines(),
        }))
    }
}

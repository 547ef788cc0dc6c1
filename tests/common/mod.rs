//! Common test utilities and helpers

use jobdiff::Result;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture manager for creating temporary test environments
pub struct TestFixture {
    pub temp_dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    /// Get the root path of the test fixture
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a job document, creating parent directories as needed
    pub fn create_job(&self, name: &str, document: &Value) -> Result<PathBuf> {
        let path = self.root().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_json::to_string_pretty(document)?)?;
        Ok(path)
    }

    /// Create a file with raw content
    pub fn create_raw(&self, name: &str, content: &[u8]) -> Result<PathBuf> {
        let path = self.root().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Create a corrupted file for testing error handling
    pub fn create_corrupted_file(&self, name: &str) -> Result<PathBuf> {
        self.create_raw(name, b"\x00\x01\x02\x03invalid_data\xff\xfe")
    }

    pub fn create_dir(&self, name: &str) -> Result<PathBuf> {
        let path = self.root().join(name);
        fs::create_dir_all(&path)?;
        Ok(path)
    }
}

/// Helper for running CLI invocations in tests
pub struct CliTestRunner {
    fixture: TestFixture,
}

impl CliTestRunner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            fixture: TestFixture::new()?,
        })
    }

    pub fn fixture(&self) -> &TestFixture {
        &self.fixture
    }

    /// Parse `args` as the CLI would and return the rendered report
    pub fn run_command(&self, args: &[&str]) -> Result<String> {
        use clap::Parser;
        use jobdiff::cli::Cli;
        use jobdiff::commands::render_comparison;

        let mut cmd_args = vec!["jobdiff"];
        cmd_args.extend(args);

        let cli = Cli::try_parse_from(cmd_args)
            .map_err(|e| jobdiff::JobdiffError::invalid_input(e.to_string()))?;
        render_comparison(&cli)
    }

    /// Run a comparison of two paths and expect it to succeed
    pub fn expect_success(&self, args: &[&str]) -> String {
        self.run_command(args).expect("Command should succeed")
    }

    /// Run a command and expect it to fail
    pub fn expect_failure(&self, args: &[&str]) -> jobdiff::JobdiffError {
        self.run_command(args).expect_err("Command should fail")
    }
}

/// Builders for job export documents
pub mod sample_jobs {
    use serde_json::{json, Map, Value};

    /// A name-addressed parameter with a single value
    pub fn named_param(name: &str, value: &str) -> Value {
        json!({
            "name": name,
            "elements": {"1": {"values": {"1": {"value": value}}}}
        })
    }

    /// Legacy slot-addressed display-name parameter
    pub fn positional_name_param(value: &str) -> Value {
        json!({"elements": {"1": {"values": {"1": {"value": value}}}}})
    }

    pub fn column_names_param(columns: &[&str]) -> Value {
        let elements: Map<String, Value> = columns
            .iter()
            .enumerate()
            .map(|(i, column)| ((i + 1).to_string(), json!({"values": {"1": {"value": column}}})))
            .collect();
        json!({"name": "Column Names", "elements": elements})
    }

    pub fn column_mapping_param(pairs: &[(&str, &str)]) -> Value {
        let elements: Map<String, Value> = pairs
            .iter()
            .enumerate()
            .map(|(i, (source, target))| {
                (
                    (i + 1).to_string(),
                    json!({"values": {"1": {"value": source}, "2": {"value": target}}}),
                )
            })
            .collect();
        json!({"name": "Column Mapping", "elements": elements})
    }

    /// A component from its type and parameters, slots numbered from 1
    pub fn component(hint: &str, parameters: Vec<Value>) -> Value {
        let parameters: Map<String, Value> = parameters
            .into_iter()
            .enumerate()
            .map(|(i, parameter)| ((i + 1).to_string(), parameter))
            .collect();
        json!({"executionHint": hint, "parameters": parameters})
    }

    /// A full document from components and variables
    pub fn job(components: Vec<(&str, Value)>, variables: Vec<(&str, &str)>) -> Value {
        let components: Map<String, Value> = components
            .into_iter()
            .map(|(id, component)| (id.to_string(), component))
            .collect();
        let variables: Map<String, Value> = variables
            .into_iter()
            .map(|(name, value)| (name.to_string(), json!({"value": value})))
            .collect();
        json!({
            "info": {"name": "Daily Load", "description": "Loads the warehouse"},
            "job": {"components": components, "variables": variables}
        })
    }

    /// Old side of the rename + SQL change scenario
    pub fn load_job_v1() -> Value {
        job(
            vec![(
                "c1",
                component(
                    "Sql",
                    vec![named_param("Name", "Load"), named_param("SQL Query", "SELECT 1")],
                ),
            )],
            vec![],
        )
    }

    /// New side: renamed, new SQL, plus an `env` variable
    pub fn load_job_v2() -> Value {
        job(
            vec![(
                "c1",
                component(
                    "Sql",
                    vec![named_param("Name", "LoadV2"), named_param("SQL Query", "SELECT 2")],
                ),
            )],
            vec![("env", "prod")],
        )
    }
}

/// Assertion helpers for test validation
pub mod assertions {
    use jobdiff::Report;

    /// The summary total always matches the numbered lines
    pub fn assert_total_matches_lines(report: &Report) {
        assert_eq!(
            report.summary.total,
            report.numbered_lines().len(),
            "Total should equal the number of report lines"
        );
    }

    pub fn assert_no_changes(report: &Report) {
        assert_eq!(report.summary.total, 0, "Expected no changes, got {:?}", report.lines());
        assert!(report.changes.is_empty());
    }
}

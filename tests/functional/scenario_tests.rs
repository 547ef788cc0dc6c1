//! End-to-end comparison scenarios over in-memory documents

use crate::common::assertions;
use crate::common::sample_jobs::*;
use jobdiff::attributes::AttributeDelta;
use jobdiff::{compare_documents, ChangeRecord, DiffConfig, Document};
use serde_json::json;

fn compare(old: serde_json::Value, new: serde_json::Value) -> jobdiff::Report {
    compare_documents(&Document::new(old), &Document::new(new), &DiffConfig::default())
}

#[test]
fn test_rename_sql_change_and_new_variable() {
    let report = compare(load_job_v1(), load_job_v2());

    assert_eq!(report.summary.total, 3);
    assert_eq!(report.summary.component_changes, 2);
    assert_eq!(report.summary.components_modified, 1);
    assert_eq!(report.summary.variables_added, 1);

    match &report.changes[0] {
        ChangeRecord::ComponentModified { component, deltas } => {
            assert_eq!(component.id, "c1");
            assert_eq!(component.name, "LoadV2");
            assert_eq!(deltas.len(), 2);
            assert!(matches!(&deltas[0], AttributeDelta::Renamed { .. }));
            assert!(matches!(&deltas[1], AttributeDelta::Changed { attribute, .. } if attribute == "SQL Query"));
        }
        other => panic!("expected a modified component, got {:?}", other),
    }
    assert!(matches!(&report.changes[1], ChangeRecord::VariableAdded { name, .. } if name == "env"));

    assert_eq!(
        report.render(),
        "Changes detected: 3 (info: 0, components: 2, variables: 1)\n\
         1. Component renamed: Load -> LoadV2\n\
         2. SQL Query changed in LoadV2: SELECT 1 -> SELECT 2\n\
         3. Variable added: env = prod"
    );
    assertions::assert_total_matches_lines(&report);
}

#[test]
fn test_empty_documents() {
    let report = compare(json!({}), json!({}));
    assertions::assert_no_changes(&report);
    assert_eq!(report.render(), "No changes detected");
}

#[test]
fn test_component_added_modified_removed_order() {
    let old = job(
        vec![
            ("gone", component("Truncate", vec![named_param("Name", "Old Step")])),
            ("kept", component("Sql", vec![named_param("Name", "Keep"), named_param("Schema", "a")])),
        ],
        vec![],
    );
    let new = job(
        vec![
            ("kept", component("Sql", vec![named_param("Name", "Keep"), named_param("Schema", "b")])),
            ("fresh", component("Python", vec![named_param("Name", "New Step")])),
        ],
        vec![],
    );

    let report = compare(old, new);
    assert_eq!(
        report.lines(),
        vec![
            "Component added: New Step (Python)",
            "Schema changed in Keep: a -> b",
            "Component removed: Old Step (Truncate)",
        ]
    );
    assert_eq!(report.summary.components_added, 1);
    assert_eq!(report.summary.components_removed, 1);
}

#[test]
fn test_columns_and_mappings_in_one_component() {
    let old = job(
        vec![(
            "map",
            component(
                "Rename",
                vec![
                    named_param("Name", "Map"),
                    column_names_param(&["A", "B"]),
                    column_mapping_param(&[("x", "y")]),
                ],
            ),
        )],
        vec![],
    );
    let new = job(
        vec![(
            "map",
            component(
                "Rename",
                vec![
                    named_param("Name", "Map"),
                    column_names_param(&["B", "C"]),
                    column_mapping_param(&[("x", "z"), ("w", "v")]),
                ],
            ),
        )],
        vec![],
    );

    let report = compare(old, new);
    assert_eq!(
        report.lines(),
        vec![
            "Added to Column Names in Map: C",
            "Removed from Column Names in Map: A",
            "Added Column Mapping in Map: w -> v",
            "Modified Column Mapping in Map: x: y -> z",
        ]
    );
    assert_eq!(report.summary.total, 4);
    assertions::assert_total_matches_lines(&report);
}

#[test]
fn test_untracked_parameter_change_still_reported() {
    let old = job(
        vec![("c1", component("Sql", vec![named_param("Name", "Load"), named_param("Comment", "v1")]))],
        vec![],
    );
    let new = job(
        vec![("c1", component("Sql", vec![named_param("Name", "Load"), named_param("Comment", "v2")]))],
        vec![],
    );

    let report = compare(old, new);
    assert_eq!(report.lines(), vec!["Component modified: Load (Sql)"]);
    assert_eq!(report.summary.total, 1);
}

#[test]
fn test_job_info_changes_come_first() {
    let old = load_job_v1();
    let mut new = load_job_v1();
    new["info"]["description"] = json!("Loads the lake");
    new["job"]["variables"] = json!({"env": {"value": "prod"}});

    let report = compare(old, new);
    assert_eq!(
        report.numbered_lines(),
        vec![
            "1. Job description changed: Loads the warehouse -> Loads the lake",
            "2. Variable added: env = prod",
        ]
    );
}

#[test]
fn test_custom_attribute_configuration() {
    let config: DiffConfig = serde_json::from_value(json!({
        "attributes": [
            {"name": "Name", "kind": "scalar"},
            {"name": "Partition Keys", "kind": "set"}
        ]
    }))
    .unwrap();

    let partition = |keys: &[&str]| {
        let mut param = column_names_param(keys);
        param["name"] = json!("Partition Keys");
        param
    };
    let old = job(vec![("t", component("Table", vec![named_param("Name", "T"), partition(&["day"])]))], vec![]);
    let new = job(vec![("t", component("Table", vec![named_param("Name", "T"), partition(&["day", "hour"])]))], vec![]);

    let report = compare_documents(&Document::new(old), &Document::new(new), &config);
    assert_eq!(report.lines(), vec!["Added to Partition Keys in T: hour"]);
}

#[test]
fn test_variable_changes_follow_new_document_order() {
    let old = job(vec![], vec![("retired", "x"), ("env", "dev")]);
    let new = job(vec![], vec![("env", "prod"), ("region", "eu")]);

    let report = compare(old, new);
    assert_eq!(
        report.numbered_lines(),
        vec![
            "1. Variable changed: env: dev -> prod",
            "2. Variable added: region = eu",
            "3. Variable removed: retired (was: x)",
        ]
    );
    assert_eq!(report.summary.variable_total(), 3);
}

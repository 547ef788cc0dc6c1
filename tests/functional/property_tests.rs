//! Properties that hold for any pair of documents

use crate::common::assertions;
use crate::common::sample_jobs::*;
use jobdiff::canonical::canonicalize;
use jobdiff::entity::diff_entities;
use jobdiff::{compare_documents, DiffConfig, Document};
use serde_json::{json, Value};
use std::collections::HashSet;

fn corpus() -> Vec<Value> {
    vec![
        json!({}),
        load_job_v1(),
        load_job_v2(),
        job(
            vec![
                (
                    "a",
                    component(
                        "Rename",
                        vec![
                            named_param("Name", "Map"),
                            column_names_param(&["A", "B", "B"]),
                            column_mapping_param(&[("x", "y"), ("p", "q")]),
                        ],
                    ),
                ),
                ("b", component("Legacy", vec![positional_name_param("Old Style")])),
            ],
            vec![("env", "dev"), ("region", "eu")],
        ),
        json!({"info": {"name": "only info", "tags": ["a", "b"]}}),
    ]
}

#[test]
fn test_comparing_a_document_with_itself_finds_nothing() {
    for doc in corpus() {
        let document = Document::new(doc);
        let report = compare_documents(&document, &document.clone(), &DiffConfig::default());
        assertions::assert_no_changes(&report);
    }
}

#[test]
fn test_added_and_removed_are_disjoint_and_mirrored() {
    let docs: Vec<Document> = corpus().into_iter().map(Document::new).collect();

    for old in &docs {
        for new in &docs {
            let forward = diff_entities(old.components(), new.components());
            let backward = diff_entities(new.components(), old.components());

            let added: HashSet<&String> = forward.added.iter().collect();
            let removed: HashSet<&String> = forward.removed.iter().collect();
            let backward_removed: HashSet<&String> = backward.removed.iter().collect();

            assert!(added.is_disjoint(&removed));
            assert_eq!(added, backward_removed);
        }
    }
}

#[test]
fn test_total_always_matches_rendered_lines() {
    let docs: Vec<Document> = corpus().into_iter().map(Document::new).collect();

    for old in &docs {
        for new in &docs {
            let report = compare_documents(old, new, &DiffConfig::default());
            assertions::assert_total_matches_lines(&report);
            if report.has_changes() {
                assert_eq!(report.render().lines().count(), report.summary.total + 1);
            } else {
                assert_eq!(report.render().lines().count(), 1);
            }
        }
    }
}

#[test]
fn test_convention_invariance_across_documents() {
    let attributes = DiffConfig::default().attributes;
    let named = component("Sql", vec![named_param("Name", "Load")]);
    let positional = component("Sql", vec![positional_name_param("Load")]);

    assert_eq!(canonicalize(&named, &attributes), canonicalize(&positional, &attributes));

    // Same logical name, different addressing: the raw records differ, so
    // the component is modified, but no attribute delta results.
    let old = job(vec![("c1", named)], vec![]);
    let new = job(vec![("c1", positional)], vec![]);
    let report = compare_documents(&Document::new(old), &Document::new(new), &DiffConfig::default());
    assert_eq!(report.lines(), vec!["Component modified: Load (Sql)"]);
}

#[test]
fn test_output_is_deterministic() {
    let old = Document::new(corpus()[3].clone());
    let new = Document::new(load_job_v2());

    let first = compare_documents(&old, &new, &DiffConfig::default()).render();
    for _ in 0..5 {
        assert_eq!(compare_documents(&old, &new, &DiffConfig::default()).render(), first);
    }
}

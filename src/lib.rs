//! # jobdiff
//!
//! Semantic diff for ETL job-definition exports. Components are canonicalized
//! into attribute maps whatever parameter addressing convention the export
//! uses, then classified as added, removed or modified and reported
//! attribute by attribute.

pub mod cli;
pub mod error;
pub mod config;
pub mod document;
pub mod canonical;
pub mod entity;
pub mod attributes;
pub mod report;
pub mod hash;
pub mod compare;
pub mod batch;
pub mod commands;
pub mod output;
pub mod progress;

pub use compare::{compare_documents, compare_files};
pub use config::DiffConfig;
pub use document::Document;
pub use error::{JobdiffError, Result};
pub use report::{build_report, ChangeRecord, Report};

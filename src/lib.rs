//
// lib.rs
// sectdiff
//
// Library entry that re-exports the extractor, the fuzzy comparator and the report helpers so the binary and tests share one interface.
//
// October 2026
//
// Public crate interface: re-export modules used by the binary and tests.
pub mod cli;
pub mod diff;
pub mod error;
pub mod extract;
pub mod report;
pub mod similarity;
pub mod utils;

pub use cli::{build_options, Args, Options};
pub use diff::{
    best_similarity, compare, compare_documents, compare_with, CategoryDiff, Counters, DiffResult,
    Threshold,
};
pub use error::ConfigError;
pub use extract::{detect_format, extract, Category, Document, FormatKind, Sections};
pub use similarity::{levenshtein, similarity, Metric};

//! Test builders: pinned parsers, reconcilers and temp log files.
//!
//! These panic on invalid input rather than returning `Result`.

use super::fixtures::TODAY;
use authsift_core::{Catalogue, EventParser, Reconciler};
use chrono::NaiveDate;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(TODAY.0, TODAY.1, TODAY.2).unwrap()
}

/// Reconciler pinned to [`TODAY`].
pub fn pinned_reconciler() -> Reconciler {
    Reconciler::new(today())
}

/// Parser over the built-in catalogue with a pinned reconciler.
pub fn pinned_parser() -> EventParser {
    EventParser::new(Arc::new(Catalogue::builtin()), pinned_reconciler())
}

/// A scratch directory holding `auth.log` with `contents`.
///
/// Keep the returned `TempDir` alive for as long as the path is used.
pub fn log_file(contents: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("auth.log");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    (dir, path)
}

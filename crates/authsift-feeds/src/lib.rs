//! authsift-feeds: line feed sources and the ingestion loop for authsift.
//!
//! Each feed opens a line-oriented reader (a file or stdin). [`ingest`] runs
//! one reader through an [`authsift_core::EventParser`] with its own
//! reconciliation state; [`ingest_all`] does the same for several feeds
//! concurrently, one blocking task per feed, and returns results in the order
//! the feeds were given.

pub mod file;
pub mod ingest;
pub mod stdin;

pub use file::FileFeed;
pub use ingest::{ingest, ingest_all, IngestOutput, IngestReport};
pub use stdin::StdinFeed;

use std::io::BufRead;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("input not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("ingest task for {0} did not complete")]
    TaskFailed(String),
}

/// Trait implemented by each log feed source.
pub trait LineFeed: Send + Sync {
    /// Human-readable name used in logs and reports.
    fn name(&self) -> &str;

    /// Fail early if the source cannot be read at all.
    fn check(&self) -> Result<(), FeedError> {
        Ok(())
    }

    /// Open a fresh reader positioned at the first line.
    fn open(&self) -> Result<Box<dyn BufRead + Send>, FeedError>;
}

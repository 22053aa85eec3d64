//! Stdin feed: reads lines piped into the process.

use crate::{FeedError, LineFeed};
use std::io::{BufRead, BufReader};

#[derive(Debug, Clone, Copy, Default)]
pub struct StdinFeed;

impl LineFeed for StdinFeed {
    fn name(&self) -> &str {
        "<stdin>"
    }

    fn open(&self) -> Result<Box<dyn BufRead + Send>, FeedError> {
        Ok(Box::new(BufReader::new(std::io::stdin())))
    }
}

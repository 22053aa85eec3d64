//! File feed: reads a log file from the beginning to the end.

use crate::{FeedError, LineFeed};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileFeed {
    path: PathBuf,
    name: String,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineFeed for FileFeed {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self) -> Result<(), FeedError> {
        if self.path.is_file() {
            Ok(())
        } else {
            Err(FeedError::NotFound(self.path.clone()))
        }
    }

    fn open(&self) -> Result<Box<dyn BufRead + Send>, FeedError> {
        let file = std::fs::File::open(&self.path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => FeedError::NotFound(self.path.clone()),
            _ => FeedError::Read { name: self.name.clone(), source },
        })?;
        Ok(Box::new(BufReader::new(file)))
    }
}

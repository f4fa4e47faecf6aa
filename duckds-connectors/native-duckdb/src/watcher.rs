use std::{fs, path::PathBuf};

use chrono::{DateTime, Utc};
use duckds_logging::debug;

use crate::DuckDbConnectionConfig;

/// Detects modifications of a local database file made by other processes,
/// so the connection can be reopened to observe them.
#[derive(Debug, Clone)]
pub struct FileWatcher {
    path: PathBuf,
    is_local_file: bool,
    last_modified: DateTime<Utc>,
}

impl FileWatcher {
    pub fn new(conf: &DuckDbConnectionConfig) -> Self {
        Self {
            path: conf.database().into(),
            is_local_file: conf.is_local_file(),
            last_modified: Utc::now(),
        }
    }

    fn modified(&self) -> Option<DateTime<Utc>> {
        fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Utc>::from)
    }

    /// Marks the current state of the file as seen
    pub fn reset(&mut self) {
        let now = Utc::now();
        self.last_modified = self.modified().map_or(now, |m| m.max(now));
    }

    /// Returns true once for every observed modification of the file
    pub fn has_update(&mut self) -> bool {
        if !self.is_local_file {
            return false;
        }

        let modified = match self.modified() {
            Some(m) => m,
            None => return false,
        };

        debug!(
            "Checking file modification path={:?} last_modified={} current_modified={}",
            self.path, self.last_modified, modified
        );

        if modified > self.last_modified {
            self.last_modified = modified;
            return true;
        }

        false
    }
}

//! Per-file metadata snapshots.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Local};

/// Rendering used for `Created`/`Modified`, e.g. `Sat Oct 17 2026 10:00:00 GMT+0200`.
pub const TIMESTAMP_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

/// Size and timestamps of one stored file, taken at a single point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    pub name: String,
    pub size: u64,
    pub created: DateTime<Local>,
    pub modified: DateTime<Local>,
}

impl FileMeta {
    /// Stat `path` and record it under `name`.
    pub fn stat(name: &str, path: &Path) -> io::Result<Self> {
        let metadata = fs::metadata(path)?;
        Self::from_metadata(name, &metadata)
    }

    /// Build a snapshot from already-fetched metadata.
    ///
    /// Not every filesystem records a creation time; when it is unavailable
    /// the modification time stands in for it.
    pub fn from_metadata(name: &str, metadata: &fs::Metadata) -> io::Result<Self> {
        let modified = metadata.modified()?;
        let created = metadata.created().unwrap_or_else(|err| {
            tracing::debug!(name, error = %err, "creation time unavailable");
            modified
        });

        Ok(Self {
            name: name.to_string(),
            size: metadata.len(),
            created: DateTime::from(created),
            modified: DateTime::from(modified),
        })
    }
}

impl fmt::Display for FileMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "File: {}", self.name)?;
        writeln!(f, "Size: {} bytes", self.size)?;
        writeln!(f, "Created: {}", self.created.format(TIMESTAMP_FORMAT))?;
        writeln!(f, "Modified: {}", self.modified.format(TIMESTAMP_FORMAT))
    }
}

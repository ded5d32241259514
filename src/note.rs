//! Note representation.

use crate::parser::{normalize_tags, split_frontmatter};
use chrono::NaiveDateTime;
use serde_yaml::Mapping;
use std::path::PathBuf;

/// A note read from the vault at scan time.
///
/// Immutable once constructed; lives only for the duration of a scan.
#[derive(Debug, Clone)]
pub struct Note {
    /// Path relative to the vault root (e.g., "proj/My Project.md").
    pub path: PathBuf,

    /// Raw content of the note, frontmatter included.
    pub content: String,

    /// Last modification time, in local time.
    pub modified: NaiveDateTime,
}

impl Note {
    pub fn new(
        path: impl Into<PathBuf>,
        content: impl Into<String>,
        modified: NaiveDateTime,
    ) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            modified,
        }
    }

    /// Get the note name (filename without .md extension).
    pub fn name(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
    }

    /// Frontmatter mapping; empty when absent or malformed.
    pub fn frontmatter(&self) -> Mapping {
        split_frontmatter(&self.content, &self.path).0
    }

    /// Content after the frontmatter header.
    pub fn body(&self) -> &str {
        split_frontmatter(&self.content, &self.path).1
    }

    /// Normalized frontmatter tags.
    pub fn tags(&self) -> Vec<String> {
        normalize_tags(&self.frontmatter())
    }
}

//! Note discovery: time-window filtering, tag classification, extraction.

use crate::error::Result;
use crate::note::Note;
use crate::parser::{extract_tagged_blocks, tag_pattern};
use crate::vault::Vault;
use crate::window::SearchWindow;
use chrono::{DateTime, Local};
use regex::Regex;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A note (or fragment of one) selected for summarization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedNote {
    /// Vault-relative path.
    pub path: PathBuf,
    /// Extracted text: the full raw note or its tagged blocks.
    pub content: String,
}

/// Scans the vault for notes carrying the target tag within a time window.
///
/// A note whose frontmatter `tags` list contains the target tag qualifies in
/// full, header included. Otherwise only its tagged list-item blocks
/// qualify; a note with neither is excluded.
pub struct NoteScanner<'a> {
    vault: &'a Vault,
    target_tag: String,
    window: SearchWindow,
    pattern: Regex,
}

impl<'a> NoteScanner<'a> {
    pub fn new(
        vault: &'a Vault,
        target_tag: impl Into<String>,
        window: SearchWindow,
    ) -> Result<Self> {
        let target_tag = target_tag.into();
        let pattern = tag_pattern(&target_tag)?;

        Ok(Self {
            vault,
            target_tag,
            window,
            pattern,
        })
    }

    /// Scan every note in the vault, preserving enumeration order.
    ///
    /// Enumeration failure is fatal; anything that goes wrong while
    /// processing a single file is logged and that file skipped.
    pub fn scan(&self) -> Result<Vec<ScannedNote>> {
        let paths = self.vault.list_notes()?;
        Ok(self.scan_paths(paths))
    }

    /// Scan an explicit sequence of vault-relative paths.
    pub fn scan_paths<I>(&self, paths: I) -> Vec<ScannedNote>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut selected = Vec::new();

        for path in paths {
            match self.scan_one(&path) {
                Ok(Some(note)) => selected.push(note),
                Ok(None) => {}
                Err(e) => warn!("skipping {}: {}", path.display(), e),
            }
        }

        selected
    }

    fn scan_one(&self, relative_path: &Path) -> Result<Option<ScannedNote>> {
        let full_path = self.vault.note_path(relative_path);

        let metadata = match std::fs::metadata(&full_path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                // Deleted between listing and stat.
                warn!("file vanished before stat: {}", relative_path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let modified = DateTime::<Local>::from(metadata.modified()?).naive_local();
        if !self.window.contains(modified) {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&full_path)?;
        let note = Note::new(relative_path, content, modified);

        if note.tags().iter().any(|t| t == &self.target_tag) {
            info!("frontmatter tag hit: {}", relative_path.display());
            return Ok(Self::emit(note.path, note.content));
        }

        let blocks = extract_tagged_blocks(note.body(), &self.pattern);
        if blocks.is_empty() {
            debug!("no tagged content in {}", relative_path.display());
            return Ok(None);
        }

        info!(
            "{} tagged block(s) in {}",
            blocks.len(),
            relative_path.display()
        );
        Ok(Self::emit(note.path, blocks.join("\n\n")))
    }

    fn emit(path: PathBuf, content: String) -> Option<ScannedNote> {
        if content.trim().is_empty() {
            return None;
        }
        Some(ScannedNote { path, content })
    }
}

//! Vault root validation and note enumeration.

use crate::error::{DigestError, Result};
use glob::glob;
use std::path::{Path, PathBuf};
use tracing::warn;

/// An Obsidian-style vault rooted at a directory.
#[derive(Debug, Clone)]
pub struct Vault {
    /// Root path of the vault.
    pub root: PathBuf,
}

impl Vault {
    /// Open a vault, failing when the root is not a directory.
    ///
    /// An inaccessible root makes the whole run meaningless, so this is the
    /// one place where a missing path is fatal rather than skipped.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.is_dir() {
            return Err(DigestError::VaultNotFound(root));
        }

        Ok(Self { root })
    }

    /// Get the full path to a note.
    pub fn note_path(&self, relative_path: &Path) -> PathBuf {
        self.root.join(relative_path)
    }

    /// List all markdown files in the vault as sorted vault-relative paths.
    ///
    /// Hidden files and directories (`.obsidian` and friends) are skipped.
    pub fn list_notes(&self) -> Result<Vec<PathBuf>> {
        let pattern = self.root.join("**/*.md");
        let pattern_str = pattern.to_string_lossy();

        let mut notes = Vec::new();

        for entry in glob(&pattern_str)? {
            match entry {
                Ok(path) => {
                    if let Ok(relative) = path.strip_prefix(&self.root) {
                        if !relative
                            .components()
                            .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
                        {
                            notes.push(relative.to_path_buf());
                        }
                    }
                }
                Err(e) => {
                    warn!("glob error while listing notes: {}", e);
                }
            }
        }

        notes.sort();

        Ok(notes)
    }
}

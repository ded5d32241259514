//! Vaultdigest - scans an Obsidian-style vault for tagged notes and mails an
//! AI-generated digest.
//!
//! # Overview
//!
//! A run proceeds in four stages:
//! - enumerate the vault and select notes modified within the configured
//!   search window
//! - classify each note by its frontmatter `tags` field, extracting either
//!   the whole note or only the tagged list-item blocks from its body
//! - combine the extracted fragments and summarize them through a
//!   chat-completions endpoint
//! - deliver the summary by email
//!
//! # Example
//!
//! ```no_run
//! use vaultdigest::config::SearchPeriod;
//! use vaultdigest::{NoteScanner, SearchWindow, Vault};
//!
//! let vault = Vault::open("/path/to/vault").unwrap();
//! let window = SearchWindow::from_period(&SearchPeriod::default());
//! let scanner = NoteScanner::new(&vault, "daily", window).unwrap();
//! for note in scanner.scan().unwrap() {
//!     println!("{}: {} bytes", note.path.display(), note.content.len());
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod mail;
pub mod note;
pub mod parser;
pub mod scanner;
pub mod summarize;
pub mod vault;
pub mod window;

// Re-export main types at crate root
pub use config::Config;
pub use error::{DigestError, Result};
pub use note::Note;
pub use scanner::{NoteScanner, ScannedNote};
pub use vault::Vault;
pub use window::SearchWindow;

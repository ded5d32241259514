//! Error types and exit codes for vaultdigest.

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes reported by the CLI.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const VAULT_NOT_FOUND: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
}

/// Main error type for vaultdigest operations.
#[derive(Error, Debug)]
pub enum DigestError {
    #[error("Vault not found at: {0}")]
    VaultNotFound(PathBuf),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Regex error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected summary response: {0}")]
    SummaryResponse(String),

    #[error("Invalid email address: {0}")]
    AddressParse(#[from] lettre::address::AddressError),

    #[error("Mail build error: {0}")]
    MailBuild(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("No valid recipient addresses configured")]
    NoValidRecipients,

    #[error("Logging setup error: {0}")]
    LoggingSetup(String),
}

impl DigestError {
    /// Returns the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            DigestError::VaultNotFound(_) => exit_code::VAULT_NOT_FOUND,
            DigestError::ConfigError(_) => exit_code::CONFIG_ERROR,
            _ => exit_code::GENERAL_ERROR,
        }
    }
}

/// Result type alias for vaultdigest operations.
pub type Result<T> = std::result::Result<T, DigestError>;

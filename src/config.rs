//! Runtime configuration loaded from a YAML file.

use crate::error::{DigestError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Top-level configuration, read from `config.yaml` by default.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Root directory of the vault to scan.
    pub vault_path: PathBuf,

    /// Tag that marks content for inclusion, without the `#` prefix.
    pub target_tag: String,

    #[serde(default)]
    pub search_period: SearchPeriod,

    #[serde(default)]
    pub logging: LoggingConfig,

    pub openai: OpenAiConfig,

    pub email: EmailConfig,
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DigestError::ConfigError(format!("failed to read {}: {}", path.display(), e))
        })?;

        serde_yaml::from_str(&raw).map_err(|e| {
            DigestError::ConfigError(format!("failed to parse {}: {}", path.display(), e))
        })
    }
}

/// How far back in time the scan reaches.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchPeriod {
    /// Number of days covered, counting today.
    pub days: i64,
    /// `HH:MM` start-of-window time on the first day.
    pub start_time: String,
    /// `HH:MM` end-of-window time on the last day.
    pub end_time: String,
}

impl Default for SearchPeriod {
    fn default() -> Self {
        Self {
            days: 1,
            start_time: "00:00".to_string(),
            end_time: "23:59".to_string(),
        }
    }
}

/// Log file location and retention.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: PathBuf,
    pub retention_days: i64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
            retention_days: 7,
        }
    }
}

/// Settings for the chat-completions summarization call.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Appended to the built-in system prompt.
    #[serde(default)]
    pub additional_prompt: Option<String>,
    /// Skip the API call and deliver a placeholder instead.
    #[serde(default)]
    pub skip_summary: bool,
}

fn default_max_tokens() -> u32 {
    2048
}

/// SMTP delivery settings.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Sender address, also used as the SMTP login user.
    pub from: String,
    #[serde(default)]
    pub to: Recipients,
    pub smtp_server: String,
    pub smtp_port: u16,
    pub password: String,
}

fn default_true() -> bool {
    true
}

/// Recipient list: a single address, a comma-separated string, or a sequence.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Recipients {
    One(String),
    Many(Vec<String>),
}

impl Default for Recipients {
    fn default() -> Self {
        Recipients::Many(Vec::new())
    }
}

impl Recipients {
    /// Flatten to individual addresses, splitting comma-separated entries.
    pub fn addresses(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            Recipients::One(s) => vec![s.as_str()],
            Recipients::Many(v) => v.iter().map(String::as_str).collect(),
        };

        raw.iter()
            .flat_map(|s| s.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
vault_path: /notes/vault
target_tag: daily
openai:
  api_key: sk-test
  model: gpt-test
email:
  from: me@example.com
  to: you@example.com
  smtp_server: smtp.example.com
  smtp_port: 587
  password: secret
"#;

    #[test]
    fn test_load_minimal_config() {
        let config: Config = serde_yaml::from_str(MINIMAL).unwrap();
        assert_eq!(config.vault_path, PathBuf::from("/notes/vault"));
        assert_eq!(config.target_tag, "daily");
        assert_eq!(config.search_period.days, 1);
        assert_eq!(config.search_period.start_time, "00:00");
        assert_eq!(config.search_period.end_time, "23:59");
        assert_eq!(config.logging.directory, PathBuf::from("logs"));
        assert_eq!(config.logging.retention_days, 7);
        assert!(config.email.enabled);
        assert!(!config.openai.skip_summary);
        assert_eq!(config.openai.max_tokens, 2048);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, MINIMAL).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.target_tag, "daily");
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let result = Config::load(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(DigestError::ConfigError(_))));
    }

    #[test]
    fn test_recipients_scalar() {
        let recipients: Recipients = serde_yaml::from_str("a@example.com").unwrap();
        assert_eq!(recipients.addresses(), vec!["a@example.com"]);
    }

    #[test]
    fn test_recipients_comma_separated() {
        let recipients: Recipients =
            serde_yaml::from_str("\"a@example.com, b@example.com\"").unwrap();
        assert_eq!(
            recipients.addresses(),
            vec!["a@example.com", "b@example.com"]
        );
    }

    #[test]
    fn test_recipients_sequence() {
        let recipients: Recipients =
            serde_yaml::from_str("- a@example.com\n- b@example.com").unwrap();
        assert_eq!(
            recipients.addresses(),
            vec!["a@example.com", "b@example.com"]
        );
    }

    #[test]
    fn test_recipients_empty_entries_dropped() {
        let recipients = Recipients::One("a@example.com,, ".to_string());
        assert_eq!(recipients.addresses(), vec!["a@example.com"]);
    }
}

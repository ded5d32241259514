//! Summary delivery over SMTP.

use crate::config::EmailConfig;
use crate::error::{DigestError, Result};
use crate::window::SearchWindow;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{info, warn};

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// Basic shape check for a recipient address.
pub fn is_valid_address(address: &str) -> bool {
    EMAIL.is_match(address)
}

/// Sends the digest to the configured recipients.
pub struct Mailer<'a> {
    config: &'a EmailConfig,
}

impl<'a> Mailer<'a> {
    pub fn new(config: &'a EmailConfig) -> Self {
        Self { config }
    }

    /// Send the summary, BCCing every valid configured recipient.
    ///
    /// The summary is always logged. Delivery is skipped when disabled in
    /// configuration; invalid addresses are dropped with a warning, and
    /// having none left is an error.
    pub fn send_summary(&self, window: &SearchWindow, summary: &str) -> Result<()> {
        info!("summary:\n{}", summary);

        if !self.config.enabled {
            info!("email delivery is disabled; skipping");
            return Ok(());
        }

        let mut recipients = Vec::new();
        for address in self.config.to.addresses() {
            if is_valid_address(&address) {
                recipients.push(address);
            } else {
                warn!("invalid email address: {}", address);
            }
        }

        if recipients.is_empty() {
            return Err(DigestError::NoValidRecipients);
        }

        let from: Mailbox = self.config.from.parse()?;
        let (subject, body_prefix) = subject_and_prefix(window);

        let mut builder = Message::builder()
            .from(from.clone())
            .to(from)
            .subject(subject);
        for address in &recipients {
            builder = builder.bcc(address.parse()?);
        }
        let message = builder.body(format!("{}\n\n{}", body_prefix, summary))?;

        let mailer = SmtpTransport::starttls_relay(&self.config.smtp_server)?
            .port(self.config.smtp_port)
            .credentials(Credentials::new(
                self.config.from.clone(),
                self.config.password.clone(),
            ))
            .build();

        mailer.send(&message)?;

        info!("email sent to {} recipient(s)", recipients.len());
        for address in &recipients {
            info!("recipient: {}", address);
        }

        Ok(())
    }
}

fn subject_and_prefix(window: &SearchWindow) -> (String, &'static str) {
    if window.is_single_day() {
        (
            format!("Vault note summary {}", window.start.format("%Y-%m-%d")),
            "Notes summarized for today:",
        )
    } else {
        (
            format!(
                "Vault note summary {} to {}",
                window.start.format("%Y-%m-%d"),
                window.end.format("%Y-%m-%d")
            ),
            "Notes summarized for the period:",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Recipients, SearchPeriod};
    use chrono::NaiveDate;

    #[test]
    fn test_address_validation() {
        assert!(is_valid_address("user@example.com"));
        assert!(is_valid_address("first.last+tag@sub.example.org"));
        assert!(!is_valid_address("not-an-address"));
        assert!(!is_valid_address("missing@tld"));
        assert!(!is_valid_address("@example.com"));
        assert!(!is_valid_address("user@example.com extra"));
    }

    #[test]
    fn test_disabled_email_skips_delivery() {
        let config = EmailConfig {
            enabled: false,
            from: "me@example.com".to_string(),
            to: Recipients::One("you@example.com".to_string()),
            smtp_server: "smtp.example.com".to_string(),
            smtp_port: 587,
            password: "secret".to_string(),
        };

        let window = SearchWindow::from_period_at(
            &SearchPeriod::default(),
            NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
        );

        // No SMTP server involved; disabled delivery must succeed silently.
        Mailer::new(&config).send_summary(&window, "summary").unwrap();
    }

    #[test]
    fn test_no_valid_recipients_is_an_error() {
        let config = EmailConfig {
            enabled: true,
            from: "me@example.com".to_string(),
            to: Recipients::One("bogus".to_string()),
            smtp_server: "smtp.example.com".to_string(),
            smtp_port: 587,
            password: "secret".to_string(),
        };

        let window = SearchWindow::from_period_at(
            &SearchPeriod::default(),
            NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
        );

        let result = Mailer::new(&config).send_summary(&window, "summary");
        assert!(matches!(result, Err(DigestError::NoValidRecipients)));
    }

    #[test]
    fn test_subject_single_day() {
        let window = SearchWindow::from_period_at(
            &SearchPeriod::default(),
            NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
        );
        let (subject, prefix) = subject_and_prefix(&window);
        assert_eq!(subject, "Vault note summary 2026-08-06");
        assert_eq!(prefix, "Notes summarized for today:");
    }

    #[test]
    fn test_subject_date_range() {
        let period = SearchPeriod {
            days: 3,
            ..SearchPeriod::default()
        };
        let window =
            SearchWindow::from_period_at(&period, NaiveDate::from_ymd_opt(2026, 8, 6).unwrap());
        let (subject, prefix) = subject_and_prefix(&window);
        assert_eq!(subject, "Vault note summary 2026-08-04 to 2026-08-06");
        assert_eq!(prefix, "Notes summarized for the period:");
    }
}

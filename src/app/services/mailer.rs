//! SMTP delivery of the weekly portfolio report
//!
//! Credentials come from environment variables, never from the config file.
//! Missing credentials are a logged skip upstream, not an error: polling
//! must keep working on machines that never send mail.

use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::env;
use tracing::info;

use crate::config::EmailConfig;
use crate::constants::{
    ENV_NOTIFY_ADDRESS, ENV_SENDER_ADDRESS, ENV_SENDER_PASSWORD, REPORT_SENDER_NAME,
};
use crate::{Error, Result};

/// Delivery secrets sourced from the environment
#[derive(Debug, Clone)]
pub struct EmailCredentials {
    /// Sender address, also the SMTP username
    pub sender: String,
    /// SMTP app password
    pub password: String,
    /// Report recipient
    pub recipient: String,
}

impl EmailCredentials {
    /// Read credentials from the environment, `None` when any variable is
    /// unset or empty
    pub fn from_env() -> Option<Self> {
        let read = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());

        Some(Self {
            sender: read(ENV_SENDER_ADDRESS)?,
            password: read(ENV_SENDER_PASSWORD)?,
            recipient: read(ENV_NOTIFY_ADDRESS)?,
        })
    }
}

/// SMTP mailer for the portfolio report
#[derive(Debug, Clone)]
pub struct Mailer {
    smtp_host: String,
    smtp_port: u16,
}

impl Mailer {
    /// Create a mailer against the configured SMTP relay
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            smtp_host: config.smtp_host.clone(),
            smtp_port: config.smtp_port,
        }
    }

    /// Send the rendered report
    pub fn send_report(
        &self,
        credentials: &EmailCredentials,
        subject: &str,
        html: String,
    ) -> Result<()> {
        let message = build_message(credentials, subject, html)?;

        let transport = SmtpTransport::starttls_relay(&self.smtp_host)
            .map_err(|e| Error::email("failed to configure SMTP relay", Some(Box::new(e))))?
            .port(self.smtp_port)
            .credentials(Credentials::new(
                credentials.sender.clone(),
                credentials.password.clone(),
            ))
            .build();

        transport
            .send(&message)
            .map_err(|e| Error::email("SMTP delivery failed", Some(Box::new(e))))?;

        info!("Portfolio report sent to {}", credentials.recipient);
        Ok(())
    }
}

/// Assemble the report message
fn build_message(
    credentials: &EmailCredentials,
    subject: &str,
    html: String,
) -> Result<Message> {
    let from: Mailbox = format!("{} <{}>", REPORT_SENDER_NAME, credentials.sender)
        .parse()
        .map_err(|e| {
            Error::email(
                format!("invalid sender address '{}'", credentials.sender),
                Some(Box::new(e)),
            )
        })?;

    let to: Mailbox = credentials.recipient.parse().map_err(|e| {
        Error::email(
            format!("invalid recipient address '{}'", credentials.recipient),
            Some(Box::new(e)),
        )
    })?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(subject)
        .header(ContentType::TEXT_HTML)
        .body(html)
        .map_err(|e| Error::email("failed to assemble report message", Some(Box::new(e))))
}

use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;
use vigil_config::MailConfig;

use crate::notifier::Notifier;

/// Sends the rendered report over authenticated SMTP with STARTTLS.
pub struct EmailNotifier {
    config: MailConfig,
}

impl EmailNotifier {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }

    fn build_message(&self, subject: &str, html_body: &str) -> Result<Message> {
        let message = Message::builder()
            .from(self.config.from.parse()?)
            .to(self.config.to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())?;

        Ok(message)
    }

    fn smtp_username(&self) -> &str {
        if self.config.username.is_empty() {
            &self.config.from
        } else {
            &self.config.username
        }
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn send(&self, subject: &str, html_body: &str) -> Result<()> {
        let email = self.build_message(subject, html_body)?;

        let creds = Credentials::new(
            self.smtp_username().to_string(),
            self.config.password.clone(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.server)?
            .credentials(creds)
            .port(self.config.port)
            .build();

        mailer
            .send(email)
            .await
            .with_context(|| format!("sending report to {}", self.config.to))?;

        info!(to = %self.config.to, "Report mailed");
        Ok(())
    }

    fn name(&self) -> &str {
        "email"
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled
    }
}

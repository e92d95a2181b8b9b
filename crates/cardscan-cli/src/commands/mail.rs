//! Compose and send commands - follow-up email to a scanned contact.

use std::fs;
use std::time::Duration;

use clap::Args;
use console::style;
use serde_json::json;
use tracing::{debug, info};

use cardscan_core::error::MailError;
use cardscan_core::models::config::MailConfig;
use cardscan_core::FollowUpMessage;

use super::config::load_config;

/// Arguments shared by the compose and send commands.
#[derive(Args)]
pub struct MessageArgs {
    /// Receiver email address
    #[arg(long)]
    to: String,

    /// Contact name used in the greeting
    #[arg(short, long)]
    name: Option<String>,

    /// Reply-to address
    #[arg(long)]
    reply_to: Option<String>,

    /// Print the message as JSON
    #[arg(long)]
    json: bool,
}

impl MessageArgs {
    fn compose(&self, config: &MailConfig) -> Result<FollowUpMessage, MailError> {
        FollowUpMessage::compose(
            &self.to,
            self.name.as_deref(),
            self.reply_to.as_deref(),
            &config.sender_name,
        )
    }
}

/// Print the follow-up message without sending it.
pub async fn compose(args: MessageArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let message = args.compose(&config.mail)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&message)?);
    } else {
        println!("To: {}", message.to);
        if let Some(reply_to) = &message.reply_to {
            println!("Reply-To: {}", reply_to);
        }
        println!("Subject: {}", message.subject);
        println!();
        println!("{}", message.body);
    }

    Ok(())
}

/// Send the follow-up message through the configured provider.
pub async fn send(args: MessageArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let message = args.compose(&config.mail)?;

    let mailer = SendGridMailer::from_config(&config.mail)?;
    let status = mailer.send(&message).await?;

    if args.json {
        println!("{}", json!({ "status": "success", "code": status }));
    } else {
        println!(
            "{} Sent follow-up to {} ({})",
            style("✓").green(),
            message.to,
            status
        );
    }

    Ok(())
}

/// Delivers follow-up messages.
trait Mailer {
    /// Send a message, returning the provider's status code.
    async fn send(&self, message: &FollowUpMessage) -> anyhow::Result<u16>;
}

/// SendGrid v3 mail client.
struct SendGridMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from_email: String,
}

impl SendGridMailer {
    /// Build a client from mail configuration.
    ///
    /// The API key and any extra root certificate are taken from `config`
    /// (or the key from the environment) and bound to this client only.
    fn from_config(config: &MailConfig) -> anyhow::Result<Self> {
        let api_key = config.resolve_api_key().ok_or(MailError::MissingApiKey)?;
        if config.from_email.trim().is_empty() {
            return Err(MailError::MissingSender.into());
        }

        let mut builder =
            reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_secs));

        if let Some(ca_bundle) = &config.ca_bundle {
            let pem = fs::read(ca_bundle).map_err(|e| {
                anyhow::anyhow!("Failed to read CA bundle {}: {}", ca_bundle.display(), e)
            })?;
            builder = builder.add_root_certificate(reqwest::Certificate::from_pem(&pem)?);
            debug!("Trusting extra root certificate from {}", ca_bundle.display());
        }

        Ok(Self {
            client: builder.build()?,
            api_url: config.api_url.clone(),
            api_key,
            from_email: config.from_email.clone(),
        })
    }

    fn payload(&self, message: &FollowUpMessage) -> serde_json::Value {
        let mut payload = json!({
            "personalizations": [{ "to": [{ "email": message.to }] }],
            "from": { "email": self.from_email },
            "subject": message.subject,
            "content": [{ "type": "text/plain", "value": message.body }],
        });
        if let Some(reply_to) = &message.reply_to {
            payload["reply_to"] = json!({ "email": reply_to });
        }
        payload
    }
}

impl Mailer for SendGridMailer {
    async fn send(&self, message: &FollowUpMessage) -> anyhow::Result<u16> {
        info!("Sending follow-up to {}", message.to);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&self.payload(message))
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        Ok(status.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mail_config() -> MailConfig {
        MailConfig {
            from_email: "cards@example.com".to_string(),
            api_key: Some("SG.test".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_payload() {
        let mailer = SendGridMailer::from_config(&mail_config()).unwrap();
        let message =
            FollowUpMessage::compose("jane@acme.com", Some("Jane"), Some("me@example.com"), "Sam")
                .unwrap();

        let payload = mailer.payload(&message);

        assert_eq!(payload["personalizations"][0]["to"][0]["email"], "jane@acme.com");
        assert_eq!(payload["from"]["email"], "cards@example.com");
        assert_eq!(payload["reply_to"]["email"], "me@example.com");
        assert_eq!(payload["content"][0]["type"], "text/plain");
    }

    #[test]
    fn test_requires_sender() {
        let config = MailConfig {
            from_email: String::new(),
            ..mail_config()
        };
        assert!(SendGridMailer::from_config(&config).is_err());
    }
}

//! Follow-up message composition for scanned contacts.

use serde::{Deserialize, Serialize};

use crate::error::MailError;

/// Name used when the contact's name is unknown.
pub const DEFAULT_CONTACT_NAME: &str = "there";

/// A plain-text follow-up message addressed to a scanned contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpMessage {
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    pub subject: String,
    pub body: String,
}

impl FollowUpMessage {
    /// Compose a follow-up message.
    ///
    /// `receiver` is required. A blank `contact_name` falls back to
    /// [`DEFAULT_CONTACT_NAME`]; a blank `reply_to` is dropped.
    pub fn compose(
        receiver: &str,
        contact_name: Option<&str>,
        reply_to: Option<&str>,
        sender_name: &str,
    ) -> Result<Self, MailError> {
        let to = receiver.trim();
        if to.is_empty() {
            return Err(MailError::MissingRecipient);
        }

        let name = contact_name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_CONTACT_NAME);

        let reply_to = reply_to
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string);

        Ok(Self {
            to: to.to_string(),
            reply_to,
            subject: format!("Hi {} - quick note from Card-to-Connect", name),
            body: greeting_body(name, sender_name),
        })
    }
}

fn greeting_body(contact_name: &str, sender_name: &str) -> String {
    format!(
        "Hi {},\n\n\
         This is a test email from our Business Card Scanner app.\n\
         Looking forward to connecting!\n\n\
         Best regards,\n\
         {}\n",
        contact_name, sender_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_compose() {
        let message = FollowUpMessage::compose(
            "jane@acme.com",
            Some("Jane Doe"),
            Some("me@example.com"),
            "Sam",
        )
        .unwrap();

        assert_eq!(message.to, "jane@acme.com");
        assert_eq!(message.reply_to.as_deref(), Some("me@example.com"));
        assert_eq!(message.subject, "Hi Jane Doe - quick note from Card-to-Connect");
        assert!(message.body.starts_with("Hi Jane Doe,\n\n"));
        assert!(message.body.contains("Looking forward to connecting!"));
        assert!(message.body.ends_with("Best regards,\nSam\n"));
    }

    #[test]
    fn test_compose_defaults_name() {
        let message = FollowUpMessage::compose("jane@acme.com", Some("  "), None, "Sam").unwrap();

        assert_eq!(message.subject, "Hi there - quick note from Card-to-Connect");
        assert_eq!(message.reply_to, None);
    }

    #[test]
    fn test_compose_requires_receiver() {
        let err = FollowUpMessage::compose(" ", Some("Jane"), None, "Sam").unwrap_err();
        assert!(matches!(err, MailError::MissingRecipient));
    }
}

//! Fluent construction of [`Email`] values.
//!
//! An [`EmailStartingBuilder`] decides the starting state (configured
//! defaults or a blank slate) and hands out an [`EmailBuilder`], which is
//! then mutated in place and finally turned into an immutable [`Email`].

use crate::model::address::EmailAddress;
use crate::model::attachment::AttachmentResource;
use crate::model::email::Email;

/// Values pre-applied to every email started with [`EmailStartingBuilder::start`].
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EmailDefaults {
    /// Default sender, e.g. `"Help Desk <help@example.com>"`.
    pub from: Option<String>,
    /// Default reply-to address.
    pub reply_to: Option<String>,
    /// Addresses silently copied on every email.
    pub bcc: Vec<String>,
    /// Default subject.
    pub subject: Option<String>,
}

/// Entry point for creating an [`EmailBuilder`].
#[derive(Debug, Clone, Default)]
pub struct EmailStartingBuilder {
    defaults: Option<EmailDefaults>,
}

impl EmailStartingBuilder {
    /// A starting builder without any defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// A starting builder that applies `defaults` on [`start`](Self::start).
    pub fn with_defaults(defaults: EmailDefaults) -> Self {
        Self {
            defaults: Some(defaults),
        }
    }

    /// Drop any configured defaults.
    pub fn ignoring_defaults(mut self) -> Self {
        self.defaults = None;
        self
    }

    /// Start a builder with the configured defaults applied.
    pub fn start(self) -> EmailBuilder {
        let mut builder = EmailBuilder::default();
        if let Some(defaults) = self.defaults {
            builder.apply_defaults(&defaults);
        }
        builder
    }

    /// Start an empty builder. Defaults are never applied, so every field
    /// of the result reflects only what is set afterwards.
    pub fn starting_blank(self) -> EmailBuilder {
        EmailBuilder::default()
    }
}

/// Mutable construction object for an [`Email`].
///
/// Setters return `&mut Self` for chaining. Recipient and resource setters
/// append; all others overwrite.
#[derive(Debug, Clone, Default)]
pub struct EmailBuilder {
    email: Email,
}

impl EmailBuilder {
    pub fn from(&mut self, name: impl Into<String>, address: impl Into<String>) -> &mut Self {
        self.email.from = Some(EmailAddress::new(name, address));
        self
    }

    pub fn with_reply_to(
        &mut self,
        name: impl Into<String>,
        address: impl Into<String>,
    ) -> &mut Self {
        self.email.reply_to = Some(EmailAddress::new(name, address));
        self
    }

    pub fn to(&mut self, name: impl Into<String>, address: impl Into<String>) -> &mut Self {
        self.email.to.push(EmailAddress::new(name, address));
        self
    }

    pub fn cc(&mut self, name: impl Into<String>, address: impl Into<String>) -> &mut Self {
        self.email.cc.push(EmailAddress::new(name, address));
        self
    }

    pub fn bcc(&mut self, name: impl Into<String>, address: impl Into<String>) -> &mut Self {
        self.email.bcc.push(EmailAddress::new(name, address));
        self
    }

    pub fn with_subject(&mut self, subject: impl Into<String>) -> &mut Self {
        self.email.subject = Some(subject.into());
        self
    }

    pub fn with_plain_text(&mut self, text: Option<String>) -> &mut Self {
        self.email.plain_text = text;
        self
    }

    pub fn with_html_text(&mut self, html: Option<String>) -> &mut Self {
        self.email.html_text = html;
        self
    }

    /// Add an inline image, referenced from the HTML body as `cid:<content_id>`.
    pub fn with_embedded_image(
        &mut self,
        content_id: impl Into<String>,
        data: Vec<u8>,
        mime_type: impl Into<String>,
    ) -> &mut Self {
        self.email.embedded_images.push(AttachmentResource {
            name: content_id.into(),
            data,
            mime_type: mime_type.into(),
        });
        self
    }

    pub fn with_attachment(
        &mut self,
        name: impl Into<String>,
        data: Vec<u8>,
        mime_type: impl Into<String>,
    ) -> &mut Self {
        self.email.attachments.push(AttachmentResource {
            name: name.into(),
            data,
            mime_type: mime_type.into(),
        });
        self
    }

    /// Peek at the email as populated so far.
    pub fn current(&self) -> &Email {
        &self.email
    }

    /// Finish construction.
    pub fn build(self) -> Email {
        self.email
    }

    fn apply_defaults(&mut self, defaults: &EmailDefaults) {
        if let Some(from) = &defaults.from {
            let addr = EmailAddress::parse(from);
            self.from(addr.display_name, addr.address);
        }
        if let Some(reply_to) = &defaults.reply_to {
            let addr = EmailAddress::parse(reply_to);
            self.with_reply_to(addr.display_name, addr.address);
        }
        for bcc in &defaults.bcc {
            let addr = EmailAddress::parse(bcc);
            self.bcc(addr.display_name, addr.address);
        }
        if let Some(subject) = &defaults.subject {
            self.with_subject(subject.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> EmailDefaults {
        EmailDefaults {
            from: Some("Help Desk <help@example.com>".into()),
            reply_to: None,
            bcc: vec!["archive@example.com".into()],
            subject: Some("(no subject)".into()),
        }
    }

    #[test]
    fn test_start_applies_defaults() {
        let email = EmailStartingBuilder::with_defaults(defaults()).start().build();
        assert_eq!(
            email.from(),
            Some(&EmailAddress::new("Help Desk", "help@example.com"))
        );
        assert_eq!(email.bcc(), &[EmailAddress::new("", "archive@example.com")]);
        assert_eq!(email.subject(), Some("(no subject)"));
        assert_eq!(email.reply_to(), None);
    }

    #[test]
    fn test_ignoring_defaults() {
        let email = EmailStartingBuilder::with_defaults(defaults())
            .ignoring_defaults()
            .start()
            .build();
        assert_eq!(email, Email::default());
    }

    #[test]
    fn test_starting_blank_skips_defaults() {
        let email = EmailStartingBuilder::with_defaults(defaults())
            .starting_blank()
            .build();
        assert_eq!(email, Email::default());
    }

    #[test]
    fn test_setters_chain_and_append() {
        let mut builder = EmailStartingBuilder::new().starting_blank();
        builder
            .from("Alice", "alice@x.com")
            .to("Bob", "bob@x.com")
            .to("Carol", "carol@x.com")
            .cc("Dan", "dan@x.com")
            .with_subject("Hi")
            .with_plain_text(Some("Hello".into()))
            .with_attachment("a.txt", b"abc".to_vec(), "text/plain")
            .with_embedded_image("img1", vec![0x89, b'P'], "image/png");

        let email = builder.build();
        assert_eq!(email.to().len(), 2);
        assert_eq!(email.to()[1].address, "carol@x.com");
        assert_eq!(email.cc()[0].display_name, "Dan");
        assert!(email.bcc().is_empty());
        assert_eq!(email.html_text(), None);
        assert_eq!(email.embedded_image("img1").map(|i| i.size()), Some(2));
        assert_eq!(email.payload_size(), 5);
    }
}

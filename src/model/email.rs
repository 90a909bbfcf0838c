//! The immutable, vendor-neutral email produced by [`EmailBuilder::build`].
//!
//! [`EmailBuilder::build`]: crate::builder::EmailBuilder::build

use super::address::EmailAddress;
use super::attachment::AttachmentResource;

/// A finished email. Construct it through [`EmailBuilder`].
///
/// [`EmailBuilder`]: crate::builder::EmailBuilder
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Email {
    pub(crate) from: Option<EmailAddress>,
    pub(crate) reply_to: Option<EmailAddress>,
    pub(crate) to: Vec<EmailAddress>,
    pub(crate) cc: Vec<EmailAddress>,
    pub(crate) bcc: Vec<EmailAddress>,
    pub(crate) subject: Option<String>,
    pub(crate) plain_text: Option<String>,
    pub(crate) html_text: Option<String>,
    pub(crate) embedded_images: Vec<AttachmentResource>,
    pub(crate) attachments: Vec<AttachmentResource>,
}

impl Email {
    pub fn from(&self) -> Option<&EmailAddress> {
        self.from.as_ref()
    }

    pub fn reply_to(&self) -> Option<&EmailAddress> {
        self.reply_to.as_ref()
    }

    pub fn to(&self) -> &[EmailAddress] {
        &self.to
    }

    pub fn cc(&self) -> &[EmailAddress] {
        &self.cc
    }

    pub fn bcc(&self) -> &[EmailAddress] {
        &self.bcc
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn plain_text(&self) -> Option<&str> {
        self.plain_text.as_deref()
    }

    pub fn html_text(&self) -> Option<&str> {
        self.html_text.as_deref()
    }

    /// Inline images, each named by its normalized content-id.
    pub fn embedded_images(&self) -> &[AttachmentResource] {
        &self.embedded_images
    }

    /// Look up an embedded image by content-id.
    pub fn embedded_image(&self, content_id: &str) -> Option<&AttachmentResource> {
        self.embedded_images.iter().find(|img| img.name == content_id)
    }

    pub fn attachments(&self) -> &[AttachmentResource] {
        &self.attachments
    }

    /// Total payload size of attachments and embedded images, in bytes.
    pub fn payload_size(&self) -> u64 {
        self.attachments
            .iter()
            .chain(&self.embedded_images)
            .map(AttachmentResource::size)
            .sum()
    }
}

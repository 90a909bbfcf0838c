//! The parsed Outlook message, as handed over by a [`MessageParser`].
//!
//! [`MessageParser`]: crate::parser::MessageParser

use std::collections::BTreeMap;

use super::address::EmailAddress;
use super::attachment::FileAttachment;

/// A fully parsed Outlook message. Read-only input to the conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ParsedMessage {
    /// Sender display name.
    pub from_name: String,
    /// Sender address.
    pub from_email: String,

    pub reply_to_name: Option<String>,
    pub reply_to_email: Option<String>,

    /// Primary recipients, in source order.
    pub to: Vec<EmailAddress>,
    /// Carbon-copy recipients, in source order.
    pub cc: Vec<EmailAddress>,
    /// Blind-copy recipients, in source order.
    pub bcc: Vec<EmailAddress>,

    pub subject: String,

    /// Plain-text body.
    pub body_text: Option<String>,
    /// Native HTML body.
    pub body_html: Option<String>,
    /// HTML the parser derived from the RTF or plain-text body.
    pub converted_body_html: Option<String>,

    /// Inline images keyed by their raw content-id (e.g. `"<logo123>"`).
    pub cid_map: BTreeMap<String, FileAttachment>,

    /// Attachments not referenced from the HTML body, in source order.
    pub attachments: Vec<FileAttachment>,
}

impl ParsedMessage {
    /// The HTML body to use: the native HTML body if present and non-empty,
    /// else the converted HTML body if present and non-empty.
    pub fn effective_html(&self) -> Option<&str> {
        non_empty(self.body_html.as_deref())
            .or_else(|| non_empty(self.converted_body_html.as_deref()))
    }

    /// The reply-to address, when present and non-empty.
    pub fn reply_to(&self) -> Option<EmailAddress> {
        let address = non_empty(self.reply_to_email.as_deref())?;
        Some(EmailAddress::new(
            self.reply_to_name.clone().unwrap_or_default(),
            address,
        ))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

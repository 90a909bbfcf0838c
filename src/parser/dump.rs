//! Parser for JSON dumps of Outlook messages.
//!
//! `.msg` extraction tools can emit the decoded property streams of a
//! message as JSON. This parser reads that dump and sorts its attachments
//! into inline images and true attachments.

use std::collections::BTreeMap;

use tracing::{trace, warn};

use crate::convert::extract_cid;
use crate::model::address::EmailAddress;
use crate::model::attachment::FileAttachment;
use crate::model::message::ParsedMessage;

use super::MessageParser;

/// One attachment as it appears in a dump, before classification.
#[derive(Debug, Clone, serde::Deserialize)]
struct DumpAttachment {
    #[serde(flatten)]
    file: FileAttachment,
    #[serde(default)]
    content_id: Option<String>,
}

/// The top-level dump document.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default)]
struct MessageDump {
    from_name: String,
    from_email: String,
    reply_to_name: Option<String>,
    reply_to_email: Option<String>,
    to: Vec<EmailAddress>,
    cc: Vec<EmailAddress>,
    bcc: Vec<EmailAddress>,
    subject: String,
    body_text: Option<String>,
    body_html: Option<String>,
    converted_body_html: Option<String>,
    attachments: Vec<DumpAttachment>,
}

/// Reads JSON message dumps.
///
/// Malformed JSON (including bad base64 payloads) is reported as
/// [`std::io::ErrorKind::InvalidData`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DumpParser;

impl DumpParser {
    pub fn new() -> Self {
        Self
    }
}

impl MessageParser for DumpParser {
    fn parse_bytes(&self, data: &[u8]) -> std::io::Result<ParsedMessage> {
        let dump: MessageDump = serde_json::from_slice(data)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        let mut message = ParsedMessage {
            from_name: dump.from_name,
            from_email: dump.from_email,
            reply_to_name: dump.reply_to_name,
            reply_to_email: dump.reply_to_email,
            to: dump.to,
            cc: dump.cc,
            bcc: dump.bcc,
            subject: dump.subject,
            body_text: dump.body_text,
            body_html: dump.body_html,
            converted_body_html: dump.converted_body_html,
            ..Default::default()
        };
        let (cid_map, attachments) = classify_attachments(&message, dump.attachments);
        message.cid_map = cid_map;
        message.attachments = attachments;
        Ok(message)
    }
}

/// Split attachments into inline images (keyed by raw content-id) and true
/// attachments.
///
/// An attachment is inline when it has a non-empty content-id and the
/// message's effective HTML body references it as a whole `cid:<id>` token.
/// A second part claiming an already used content-id stays a true attachment.
fn classify_attachments(
    message: &ParsedMessage,
    parts: Vec<DumpAttachment>,
) -> (BTreeMap<String, FileAttachment>, Vec<FileAttachment>) {
    let html = message.effective_html().unwrap_or("");
    let mut cid_map = BTreeMap::new();
    let mut attachments = Vec::new();

    for part in parts {
        match part.content_id {
            Some(cid) if references_cid(html, extract_cid(&cid)) => {
                let normalized = extract_cid(&cid);
                if cid_map.keys().any(|k: &String| extract_cid(k) == normalized) {
                    warn!(cid = %cid, "Duplicate content-id, keeping part as attachment");
                    attachments.push(part.file);
                } else {
                    trace!(cid = %cid, "Classified attachment as inline image");
                    cid_map.insert(cid, part.file);
                }
            }
            _ => attachments.push(part.file),
        }
    }

    (cid_map, attachments)
}

/// Whether `html` contains `cid:<id>` followed by a terminator or the end of input.
fn references_cid(html: &str, id: &str) -> bool {
    if id.is_empty() {
        return false;
    }
    let needle = format!("cid:{id}");
    html.match_indices(&needle).any(|(pos, _)| {
        html[pos + needle.len()..]
            .chars()
            .next()
            .is_none_or(|c| matches!(c, '"' | '\'' | ')' | '>') || c.is_whitespace())
    })
}

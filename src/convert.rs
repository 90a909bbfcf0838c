//! Conversion of parsed Outlook messages into [`Email`] builders.
//!
//! [`populate`] copies every recognized field of a [`ParsedMessage`] onto an
//! [`EmailBuilder`]. The `convert_*` entry points run the parser first and
//! translate its I/O failures into [`ConvertError::ParseFailure`].
//!
//! [`Email`]: crate::model::email::Email

use std::io::Read;
use std::path::Path;

use tracing::{debug, trace};

use crate::builder::{EmailBuilder, EmailStartingBuilder};
use crate::error::{ConvertError, Result};
use crate::model::message::ParsedMessage;
use crate::parser::{MessageParser, MsgSource};

/// Parse an Outlook message and map it onto a blank builder.
///
/// Defaults configured on `starting` are ignored so that the builder only
/// reflects what the message contains.
pub fn outlook_msg_to_email_builder(
    source: MsgSource<'_>,
    parser: &impl MessageParser,
    starting: EmailStartingBuilder,
) -> Result<EmailBuilder> {
    check_source(&source)?;
    let message = parser.parse(source).map_err(ConvertError::parse_failure)?;

    let mut builder = starting.ignoring_defaults().starting_blank();
    populate(&mut builder, &message)?;
    Ok(builder)
}

pub fn convert_file(
    path: &Path,
    parser: &impl MessageParser,
    starting: EmailStartingBuilder,
) -> Result<EmailBuilder> {
    outlook_msg_to_email_builder(MsgSource::File(path), parser, starting)
}

pub fn convert_bytes(
    data: &[u8],
    parser: &impl MessageParser,
    starting: EmailStartingBuilder,
) -> Result<EmailBuilder> {
    outlook_msg_to_email_builder(MsgSource::Bytes(data), parser, starting)
}

pub fn convert_reader(
    reader: &mut dyn Read,
    parser: &impl MessageParser,
    starting: EmailStartingBuilder,
) -> Result<EmailBuilder> {
    outlook_msg_to_email_builder(MsgSource::Reader(reader), parser, starting)
}

/// Copy `message` onto `builder` and return the same builder.
///
/// `builder` is expected to be blank. Fails with
/// [`ConvertError::InvalidState`] on an empty inline-image content-id; fields
/// set before the failure stay set, so a failed builder should be discarded.
pub fn populate<'b>(
    builder: &'b mut EmailBuilder,
    message: &ParsedMessage,
) -> Result<&'b mut EmailBuilder> {
    builder.from(message.from_name.as_str(), message.from_email.as_str());
    if let Some(reply_to) = message.reply_to() {
        builder.with_reply_to(reply_to.display_name, reply_to.address);
    }

    copy_recipients(builder, message);

    builder.with_subject(message.subject.as_str());
    builder.with_plain_text(message.body_text.clone());
    builder.with_html_text(message.effective_html().map(String::from));

    for (cid, attachment) in &message.cid_map {
        let content_id = extract_cid(cid);
        if content_id.is_empty() {
            return Err(ConvertError::InvalidState(format!(
                "inline image has an empty content-id ({cid:?})"
            )));
        }
        trace!(cid = content_id, mime = %attachment.mime_tag, "Adding embedded image");
        builder.with_embedded_image(
            content_id,
            attachment.data.clone(),
            attachment.mime_tag.as_str(),
        );
    }

    for attachment in &message.attachments {
        let name = attachment.display_name();
        trace!(name, mime = %attachment.mime_tag, "Adding attachment");
        builder.with_attachment(name, attachment.data.clone(), attachment.mime_tag.as_str());
    }

    debug!(
        to = message.to.len(),
        cc = message.cc.len(),
        bcc = message.bcc.len(),
        embedded = message.cid_map.len(),
        attachments = message.attachments.len(),
        "Populated email from Outlook message"
    );

    Ok(builder)
}

fn copy_recipients(builder: &mut EmailBuilder, message: &ParsedMessage) {
    for to in &message.to {
        builder.to(to.display_name.as_str(), to.address.as_str());
    }
    for cc in &message.cc {
        builder.cc(cc.display_name.as_str(), cc.address.as_str());
    }
    for bcc in &message.bcc {
        builder.bcc(bcc.display_name.as_str(), bcc.address.as_str());
    }
}

/// Strip the angle brackets wrapping a content-id: `"<logo123>"` → `"logo123"`.
pub fn extract_cid(cid: &str) -> &str {
    let trimmed = cid.trim();
    let trimmed = trimmed.strip_prefix('<').unwrap_or(trimmed);
    trimmed.strip_suffix('>').unwrap_or(trimmed)
}

fn check_source(source: &MsgSource<'_>) -> Result<()> {
    match source {
        MsgSource::File(path) if path.as_os_str().is_empty() => {
            Err(ConvertError::InvalidArgument("msgFile must not be empty".into()))
        }
        MsgSource::Bytes(data) if data.is_empty() => {
            Err(ConvertError::InvalidArgument("msgData must not be empty".into()))
        }
        _ => Ok(()),
    }
}

//! Binary parts: file attachments of a parsed message and resources of the target email.

/// A file attachment as decoded by the Outlook message parser.
///
/// Outlook stores both an 8.3 style short filename and an optional long
/// filename; [`FileAttachment::display_name`] picks between them.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FileAttachment {
    /// Raw decoded payload.
    #[serde(with = "super::payload")]
    pub data: Vec<u8>,

    /// MIME type tag (e.g. `"image/png"`, `"application/pdf"`).
    pub mime_tag: String,

    /// Short filename (e.g. `"QTR1.PDF"`).
    pub filename: String,

    /// Long filename, when the sender's client recorded one.
    #[serde(default)]
    pub long_filename: Option<String>,
}

impl FileAttachment {
    /// The name to show for this attachment: the long filename if present
    /// and non-empty, otherwise the short filename.
    pub fn display_name(&self) -> &str {
        match self.long_filename.as_deref() {
            Some(long) if !long.is_empty() => long,
            _ => &self.filename,
        }
    }
}

/// A named binary resource on an [`Email`]: either an attachment or an
/// embedded image. For embedded images `name` is the normalized content-id.
///
/// [`Email`]: crate::model::email::Email
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AttachmentResource {
    /// Display filename or content-id.
    pub name: String,

    /// Raw payload.
    #[serde(with = "super::payload")]
    pub data: Vec<u8>,

    /// MIME content type.
    pub mime_type: String,
}

impl AttachmentResource {
    /// Payload size in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

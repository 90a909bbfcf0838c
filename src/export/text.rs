//! Export emails as plain text files.

use std::path::{Path, PathBuf};

use humansize::{format_size, DECIMAL};

use crate::error::{ConvertError, Result};
use crate::model::address::EmailAddress;
use crate::model::email::Email;

/// Render headers, body and a resource listing as plain text.
pub fn render_text(email: &Email) -> String {
    let mut content = String::new();

    if let Some(from) = email.from() {
        content.push_str(&format!("From:     {}\n", from.display()));
    }
    if let Some(reply_to) = email.reply_to() {
        content.push_str(&format!("Reply-To: {}\n", reply_to.display()));
    }
    push_address_line(&mut content, "To:      ", email.to());
    push_address_line(&mut content, "Cc:      ", email.cc());
    push_address_line(&mut content, "Bcc:     ", email.bcc());
    content.push_str(&format!("Subject:  {}\n", email.subject().unwrap_or("")));
    content.push_str(&format!("\n{}\n", "-".repeat(72)));

    match (email.plain_text(), email.html_text()) {
        (Some(text), _) if !text.is_empty() => {
            content.push('\n');
            content.push_str(text);
            content.push('\n');
        }
        (_, Some(_)) => content.push_str("\n[HTML body only]\n"),
        _ => {}
    }

    if !email.attachments().is_empty() {
        content.push_str(&format!(
            "\n[Attachments: {} file(s)]\n",
            email.attachments().len()
        ));
        for att in email.attachments() {
            content.push_str(&format!(
                "  - {} ({}, {})\n",
                att.name,
                att.mime_type,
                format_size(att.size(), DECIMAL)
            ));
        }
    }

    if !email.embedded_images().is_empty() {
        content.push_str(&format!(
            "\n[Embedded images: {}]\n",
            email.embedded_images().len()
        ));
        for img in email.embedded_images() {
            content.push_str(&format!(
                "  - cid:{} ({}, {})\n",
                img.name,
                img.mime_type,
                format_size(img.size(), DECIMAL)
            ));
        }
    }

    content
}

/// Write [`render_text`] output to `{output_dir}/{file_stem}.txt`.
pub fn export_text(email: &Email, output_dir: &Path, file_stem: &str) -> Result<PathBuf> {
    let path = output_dir.join(format!("{file_stem}.txt"));
    std::fs::write(&path, render_text(email)).map_err(|e| ConvertError::io(&path, e))?;
    Ok(path)
}

fn push_address_line(content: &mut String, label: &str, addresses: &[EmailAddress]) {
    if addresses.is_empty() {
        return;
    }
    let joined = addresses
        .iter()
        .map(EmailAddress::display)
        .collect::<Vec<_>>()
        .join(", ");
    content.push_str(&format!("{label} {joined}\n"));
}

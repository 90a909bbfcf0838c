//! Write attachments and embedded images to disk.

use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};
use crate::model::attachment::AttachmentResource;
use crate::model::email::Email;

/// Write a single resource into `output_dir`. Existing files are never overwritten.
pub fn export_resource(resource: &AttachmentResource, output_dir: &Path) -> Result<PathBuf> {
    let filename = sanitize_filename_part(&resource.name, 150);
    let path = unique_path(&output_dir.join(&filename));
    std::fs::write(&path, &resource.data).map_err(|e| ConvertError::io(&path, e))?;
    Ok(path)
}

/// Write every attachment, and optionally every embedded image, of `email`.
///
/// Embedded images go to an `inline/` subfolder so they cannot collide with
/// attachments of the same name.
pub fn export_resources(
    email: &Email,
    output_dir: &Path,
    include_embedded: bool,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir).map_err(|e| ConvertError::io(output_dir, e))?;
    let mut paths = Vec::with_capacity(email.attachments().len());

    for att in email.attachments() {
        paths.push(export_resource(att, output_dir)?);
    }

    if include_embedded && !email.embedded_images().is_empty() {
        let inline_dir = output_dir.join("inline");
        std::fs::create_dir_all(&inline_dir).map_err(|e| ConvertError::io(&inline_dir, e))?;
        for img in email.embedded_images() {
            match export_resource(img, &inline_dir) {
                Ok(path) => paths.push(path),
                Err(e) => {
                    tracing::warn!(cid = %img.name, error = %e, "Failed to export embedded image");
                }
            }
        }
    }

    Ok(paths)
}

/// Folder name for one message's export: the sanitized subject, or `fallback`.
pub fn message_folder_name(email: &Email, fallback: &str) -> String {
    match email.subject() {
        Some(subject) if !subject.trim().is_empty() => sanitize_filename_part(subject, 60),
        _ => sanitize_filename_part(fallback, 60),
    }
}

/// Sanitize a string for use in filenames.
///
/// Replaces invalid characters with `_` and truncates to `max_len`.
pub fn sanitize_filename_part(s: &str, max_len: usize) -> String {
    let sanitized: String = s
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '.' || c == '_' || c == '@' {
                c
            } else {
                '_'
            }
        })
        .take(max_len)
        .collect();

    if sanitized.is_empty() || sanitized.chars().all(|c| c == '.') {
        "unknown".to_string()
    } else {
        sanitized
    }
}

/// If `path` already exists, append a counter to make it unique.
fn unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("file");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let parent = path.parent().unwrap_or(Path::new("."));

    for i in 1..1000 {
        let candidate = if ext.is_empty() {
            parent.join(format!("{stem}_{i}"))
        } else {
            parent.join(format!("{stem}_{i}.{ext}"))
        };
        if !candidate.exists() {
            return candidate;
        }
    }

    parent.join(format!("{stem}_dup.{ext}"))
}

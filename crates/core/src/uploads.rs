//! Upload constraints and stored-filename generation for course materials.
//!
//! MIME validation happens before the file is written anywhere, so a
//! rejected upload never touches disk or the database. Stored filenames
//! combine the sanitized original stem with a timestamp and a random
//! suffix; collision avoidance on the shared storage directory relies on
//! that suffix rather than locking.

use rand::Rng;

use crate::error::CoreError;

/// Upload size ceiling: 500 MB.
pub const MAX_UPLOAD_BYTES: usize = 500 * 1024 * 1024;

/// MIME types accepted for course materials: documents, images, common
/// video formats, archives, and plain text/CSV.
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    // Documents
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    // Images
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/svg+xml",
    // Video
    "video/mp4",
    "video/mpeg",
    "video/quicktime",
    "video/webm",
    "video/x-msvideo",
    // Archives
    "application/zip",
    "application/x-rar-compressed",
    "application/x-7z-compressed",
    // Text
    "text/plain",
    "text/csv",
];

pub const VISIBILITY_PUBLIC: &str = "public";
pub const VISIBILITY_PRIVATE: &str = "private";
pub const VISIBILITY_ENROLLED: &str = "enrolled";

const VALID_VISIBILITIES: &[&str] = &[VISIBILITY_PUBLIC, VISIBILITY_PRIVATE, VISIBILITY_ENROLLED];

pub fn validate_mime_type(mime: &str) -> Result<(), CoreError> {
    if ALLOWED_MIME_TYPES.contains(&mime) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unsupported file type '{mime}'"
        )))
    }
}

pub fn validate_upload_size(size: usize) -> Result<(), CoreError> {
    if size > MAX_UPLOAD_BYTES {
        return Err(CoreError::Validation(format!(
            "File exceeds the maximum upload size of {MAX_UPLOAD_BYTES} bytes"
        )));
    }
    Ok(())
}

pub fn validate_visibility(value: &str) -> Result<(), CoreError> {
    if VALID_VISIBILITIES.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid visibility '{value}'. Must be one of: {VALID_VISIBILITIES:?}"
        )))
    }
}

/// Build the stored filename for an uploaded file:
/// `<sanitized stem>-<unix millis>-<random>.<ext>`.
///
/// The original extension is preserved (lowercased); a missing extension
/// yields no trailing dot.
pub fn generate_file_key(original_filename: &str) -> String {
    let (stem, ext) = split_filename(original_filename);
    let stem = sanitize_stem(stem);
    let timestamp = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::rng().random_range(0..1_000_000);

    if ext.is_empty() {
        format!("{stem}-{timestamp}-{suffix:06}")
    } else {
        format!("{stem}-{timestamp}-{suffix:06}.{ext}")
    }
}

/// Split into (stem, lowercased extension). Hidden files and names without
/// a dot have no extension.
fn split_filename(filename: &str) -> (&str, String) {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, ext.to_ascii_lowercase()),
        _ => (filename, String::new()),
    }
}

/// Replace anything outside `[A-Za-z0-9_-]` with `-` and collapse the
/// result so the key is safe as a path segment regardless of the original
/// name (no separators, no `..`).
fn sanitize_stem(stem: &str) -> String {
    let mut out = String::with_capacity(stem.len());
    let mut last_dash = false;
    for c in stem.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_accepts_pdf_and_rejects_executables() {
        assert!(validate_mime_type("application/pdf").is_ok());
        assert!(validate_mime_type("video/mp4").is_ok());
        assert!(validate_mime_type("text/csv").is_ok());
        assert!(validate_mime_type("application/x-msdownload").is_err());
        assert!(validate_mime_type("text/html").is_err());
    }

    #[test]
    fn size_ceiling_is_enforced() {
        assert!(validate_upload_size(MAX_UPLOAD_BYTES).is_ok());
        assert!(validate_upload_size(MAX_UPLOAD_BYTES + 1).is_err());
    }

    #[test]
    fn visibility_values_are_validated() {
        assert!(validate_visibility("public").is_ok());
        assert!(validate_visibility("private").is_ok());
        assert!(validate_visibility("enrolled").is_ok());
        assert!(validate_visibility("hidden").is_err());
    }

    #[test]
    fn file_key_preserves_extension_and_strips_separators() {
        let key = generate_file_key("Week 1 / Birth Plan.PDF");
        assert!(key.ends_with(".pdf"), "extension should be lowercased: {key}");
        assert!(!key.contains('/'), "no path separators allowed: {key}");
        assert!(!key.contains(' '), "no spaces allowed: {key}");
        assert!(key.starts_with("Week-1"), "stem should be sanitized: {key}");
    }

    #[test]
    fn file_key_handles_missing_extension() {
        let key = generate_file_key("README");
        assert!(!key.contains('.'), "no extension expected: {key}");
        assert!(key.starts_with("README-"));
    }

    #[test]
    fn file_key_is_unique_per_call() {
        let a = generate_file_key("notes.txt");
        let b = generate_file_key("notes.txt");
        assert_ne!(a, b, "random suffix should differ");
    }

    #[test]
    fn degenerate_name_falls_back_to_file() {
        let key = generate_file_key("....");
        assert!(key.starts_with("file-"), "got: {key}");
    }
}

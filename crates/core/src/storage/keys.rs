use uuid::Uuid;

use super::StorageError;
use crate::types::Timestamp;

/// Folder inside the image bucket that holds project images.
pub const IMAGE_KEY_PREFIX: &str = "projects";

/// Replace every character outside `[A-Za-z0-9.]` with `_`.
pub fn sanitize_file_name(file_name: &str) -> String {
    file_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' { c } else { '_' })
        .collect()
}

/// Unique key for a project image: `projects/{uuid}.{ext}`.
///
/// The extension is taken from the original file name when it is a short
/// alphanumeric suffix, and dropped otherwise.
pub fn image_object_key(file_name: &str) -> String {
    let id = Uuid::new_v4();
    match extension(file_name) {
        Some(ext) => format!("{IMAGE_KEY_PREFIX}/{id}.{ext}"),
        None => format!("{IMAGE_KEY_PREFIX}/{id}"),
    }
}

/// Unique key for a CV upload: `cv_{unix_millis}_{sanitized_name}`.
pub fn cv_object_key(file_name: &str, now: Timestamp) -> String {
    format!(
        "cv_{}_{}",
        now.timestamp_millis(),
        sanitize_file_name(file_name)
    )
}

/// Reject keys that are empty, absolute, or contain `..` path segments.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let invalid = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key.split('/').any(|segment| segment.is_empty() || segment == "..");
    if invalid {
        Err(StorageError::InvalidKey(key.to_string()))
    } else {
        Ok(())
    }
}

fn extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || ext.len() > 8 {
        return None;
    }
    if !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn sanitize_replaces_unsafe_characters() {
        assert_eq!(sanitize_file_name("My CV (2024).pdf"), "My_CV__2024_.pdf");
        assert_eq!(sanitize_file_name("résumé.docx"), "r_sum_.docx");
    }

    #[test]
    fn image_keys_are_unique_and_keep_extension() {
        let a = image_object_key("Cover.PNG");
        let b = image_object_key("Cover.PNG");
        assert_ne!(a, b);
        assert!(a.starts_with("projects/"));
        assert!(a.ends_with(".png"));
        assert!(validate_key(&a).is_ok());
    }

    #[test]
    fn image_key_without_usable_extension() {
        let key = image_object_key("noext");
        assert!(!key.contains('.'));
        let key = image_object_key("weird.p n g");
        assert!(!key.ends_with("p n g"));
    }

    #[test]
    fn cv_key_embeds_timestamp_and_sanitized_name() {
        let now = chrono::Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let key = cv_object_key("Jane Doe CV.pdf", now);
        assert_eq!(key, format!("cv_{}_Jane_Doe_CV.pdf", now.timestamp_millis()));
        assert!(validate_key(&key).is_ok());
    }

    #[test]
    fn validate_key_rejects_escapes() {
        assert!(validate_key("").is_err());
        assert!(validate_key("/etc/passwd").is_err());
        assert!(validate_key("projects/../secret").is_err());
        assert!(validate_key("projects//a.png").is_err());
        assert!(validate_key("a\\b").is_err());
        assert!(validate_key("cv_1_my..pdf").is_ok());
    }
}

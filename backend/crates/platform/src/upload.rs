//! Upload Validation
//!
//! Mod archives are accepted only when the declared media type, the file
//! extension and the size all pass.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum archive size (100 MiB)
pub const MAX_UPLOAD_BYTES: u64 = 100 * 1024 * 1024;

pub const ALLOWED_MEDIA_TYPES: [&str; 4] = [
    "application/zip",
    "application/x-zip-compressed",
    "application/x-rar-compressed",
    "application/x-7z-compressed",
];

pub const ALLOWED_EXTENSIONS: [&str; 3] = [".zip", ".rar", ".7z"];

/// File metadata as declared by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadCandidate {
    pub file_name: String,
    pub media_type: String,
    pub size_bytes: u64,
}

impl UploadCandidate {
    pub fn new(file_name: impl Into<String>, media_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            size_bytes,
        }
    }

    /// Lower-cased extension including the dot, taken from the last `.`
    pub fn extension(&self) -> Option<String> {
        let lower = self.file_name.to_lowercase();
        lower.rfind('.').map(|idx| lower[idx..].to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadRejection {
    #[error("Unsupported file type: {0}")]
    UnsupportedMediaType(String),

    #[error("Unsupported file extension: {0}")]
    UnsupportedExtension(String),

    #[error("File is too large: {actual} bytes (max {max})")]
    TooLarge { max: u64, actual: u64 },
}

pub fn validate_file_upload(file: &UploadCandidate) -> Result<(), UploadRejection> {
    if !ALLOWED_MEDIA_TYPES.contains(&file.media_type.as_str()) {
        return Err(UploadRejection::UnsupportedMediaType(file.media_type.clone()));
    }

    match file.extension() {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => {}
        Some(ext) => return Err(UploadRejection::UnsupportedExtension(ext)),
        None => return Err(UploadRejection::UnsupportedExtension(String::new())),
    }

    if file.size_bytes > MAX_UPLOAD_BYTES {
        return Err(UploadRejection::TooLarge {
            max: MAX_UPLOAD_BYTES,
            actual: file.size_bytes,
        });
    }

    Ok(())
}

pub fn is_valid_file_upload(file: &UploadCandidate) -> bool {
    validate_file_upload(file).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIB: u64 = 1024 * 1024;

    #[test]
    fn test_accepts_zip_within_limit() {
        let file = UploadCandidate::new("ktm_450.zip", "application/zip", 50 * MIB);
        assert!(is_valid_file_upload(&file));
    }

    #[test]
    fn test_rejects_oversized_archive() {
        let file = UploadCandidate::new("track.zip", "application/zip", 101 * MIB);
        assert_eq!(
            validate_file_upload(&file),
            Err(UploadRejection::TooLarge {
                max: MAX_UPLOAD_BYTES,
                actual: 101 * MIB
            })
        );
    }

    #[test]
    fn test_exact_limit_is_accepted() {
        let file = UploadCandidate::new("track.7z", "application/x-7z-compressed", MAX_UPLOAD_BYTES);
        assert!(is_valid_file_upload(&file));
    }

    #[test]
    fn test_spoofed_media_type_rejected() {
        let file = UploadCandidate::new("payload.zip", "application/x-msdownload", MIB);
        assert!(matches!(
            validate_file_upload(&file),
            Err(UploadRejection::UnsupportedMediaType(_))
        ));
    }

    #[test]
    fn test_spoofed_extension_rejected() {
        let file = UploadCandidate::new("payload.exe", "application/zip", MIB);
        assert_eq!(
            validate_file_upload(&file),
            Err(UploadRejection::UnsupportedExtension(".exe".to_string()))
        );

        let file = UploadCandidate::new("archive.zip.exe", "application/zip", MIB);
        assert!(!is_valid_file_upload(&file));
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let file = UploadCandidate::new("Gear_Pack.RAR", "application/x-rar-compressed", MIB);
        assert!(is_valid_file_upload(&file));
    }

    #[test]
    fn test_missing_extension_rejected() {
        let file = UploadCandidate::new("zip", "application/zip", MIB);
        assert_eq!(file.extension(), None);
        assert!(!is_valid_file_upload(&file));
    }

    #[test]
    fn test_media_type_is_exact() {
        let file = UploadCandidate::new("mod.zip", "APPLICATION/ZIP", MIB);
        assert!(!is_valid_file_upload(&file));
    }
}

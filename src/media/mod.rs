pub mod cloudinary;

use async_trait::async_trait;
use bytes::Bytes;

/// Folder uploads land in on the media host.
pub const UPLOAD_FOLDER: &str = "internship-uploads";

/// Formats the media host is told to accept.
pub const ALLOWED_FORMATS: &[&str] = &["jpg", "png", "pdf"];

pub const ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "application/pdf"];

pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Reference recorded when the request carried no file.
pub const NO_FILE: &str = "No file uploaded";

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

#[derive(Debug)]
pub enum UploadError {
    InvalidFileType(String),
    TooLarge,
    UnexpectedField(String),
    Transport(String),
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadError::InvalidFileType(_) => write!(f, "Invalid file type"),
            UploadError::TooLarge => write!(f, "File too large"),
            UploadError::UnexpectedField(_) => write!(f, "Unexpected field"),
            UploadError::Transport(msg) => write!(f, "Upload failed: {msg}"),
        }
    }
}

/// Check a file against the upload constraints before it is handed to a store.
pub fn check_constraints(file: &UploadedFile) -> Result<(), UploadError> {
    if !ALLOWED_MIME_TYPES.contains(&file.content_type.as_str()) {
        return Err(UploadError::InvalidFileType(file.content_type.clone()));
    }
    if file.data.len() > MAX_FILE_SIZE {
        return Err(UploadError::TooLarge);
    }
    Ok(())
}

/// Remote storage for uploaded files. Returns a URL identifying the stored object.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn store(&self, file: UploadedFile) -> Result<String, UploadError>;
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::email::NotifyError;
use crate::media::UploadError;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Upload(UploadError),
    MissingFields(Vec<&'static str>),
    UploadFailed(String),
    SaveFailed(std::io::Error),
    EmailFailed(NotifyError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            AppError::Upload(err) => write!(f, "Upload rejected: {err}"),
            AppError::MissingFields(names) => write!(f, "Missing fields: {}", names.join(", ")),
            AppError::UploadFailed(msg) => write!(f, "Upload failed: {msg}"),
            AppError::SaveFailed(err) => write!(f, "Save failed: {err}"),
            AppError::EmailFailed(err) => write!(f, "Email failed: {err}"),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::MissingFields(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown to the client.
    pub fn message(&self) -> String {
        match self {
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Upload(err) => err.to_string(),
            AppError::MissingFields(_) => "Missing required fields.".to_string(),
            AppError::UploadFailed(_) => "Failed to upload file.".to_string(),
            AppError::SaveFailed(_) => "Failed to save submission.".to_string(),
            AppError::EmailFailed(_) => "Form submitted, but email failed.".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Upload(err) => tracing::warn!("Upload rejected: {err:?}"),
            AppError::UploadFailed(msg) => tracing::error!("Error uploading file: {msg}"),
            AppError::SaveFailed(err) => tracing::error!("Error saving submission: {err}"),
            AppError::EmailFailed(err) => tracing::error!("SendGrid error: {err}"),
            AppError::BadRequest(_) | AppError::MissingFields(_) => {}
        }

        (self.status(), self.message()).into_response()
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        AppError::Upload(err)
    }
}

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::Sha1;
use sha2::{Digest, Sha256};

use super::{ALLOWED_FORMATS, MediaStore, UPLOAD_FOLDER, UploadError, UploadedFile};
use crate::config::{CloudinaryConfig, SignatureAlgorithm};

/// Signed uploads to the Cloudinary upload API.
pub struct CloudinaryStore {
    client: reqwest::Client,
    config: CloudinaryConfig,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl CloudinaryStore {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/v1_1/{}/auto/upload",
            self.config.api_base.trim_end_matches('/'),
            self.config.cloud_name
        )
    }
}

/// Sign upload parameters: sorted `key=value` pairs joined by `&`, secret appended, hex digest.
pub fn sign(params: &[(&str, String)], api_secret: &str, algorithm: SignatureAlgorithm) -> String {
    let mut sorted: Vec<&(&str, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    match algorithm {
        SignatureAlgorithm::Sha1 => hex_digest::<Sha1>(&to_sign, api_secret),
        SignatureAlgorithm::Sha256 => hex_digest::<Sha256>(&to_sign, api_secret),
    }
}

fn hex_digest<D: Digest>(to_sign: &str, api_secret: &str) -> String {
    let mut hasher = D::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl MediaStore for CloudinaryStore {
    async fn store(&self, file: UploadedFile) -> Result<String, UploadError> {
        let params = vec![
            ("allowed_formats", ALLOWED_FORMATS.join(",")),
            ("folder", UPLOAD_FOLDER.to_string()),
            ("timestamp", chrono::Utc::now().timestamp().to_string()),
        ];
        let signature = sign(
            &params,
            &self.config.api_secret,
            self.config.signature_algorithm,
        );

        let part = Part::bytes(file.data.to_vec())
            .file_name(file.filename.clone())
            .mime_str(&file.content_type)
            .map_err(|e| UploadError::Transport(format!("Invalid content type: {e}")))?;

        let mut form = Form::new()
            .part("file", part)
            .text("api_key", self.config.api_key.clone())
            .text("signature", signature);
        for (key, value) in params {
            form = form.text(key, value);
        }

        let resp = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Transport(format!("Cloudinary request failed: {e}")))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| UploadError::Transport(format!("Failed to read Cloudinary response: {e}")))?;

        if !status.is_success() {
            let reason = serde_json::from_str::<ErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| text.chars().take(1024).collect());
            return Err(UploadError::Transport(format!("Cloudinary returned {status}: {reason}")));
        }

        let body: UploadResponse = serde_json::from_str(&text)
            .map_err(|e| UploadError::Transport(format!("Invalid Cloudinary response: {e}")))?;

        let url = body
            .secure_url
            .ok_or_else(|| UploadError::Transport("Cloudinary response has no secure_url".to_string()))?;

        tracing::info!("Uploaded {} to {url}", file.filename);
        Ok(url)
    }
}

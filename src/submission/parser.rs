use bytes::Bytes;
use multer::{Constraints, SizeLimit};
use serde_json::{Map, Value};

use super::fields;
use crate::error::AppError;
use crate::media::{self, UploadError, UploadedFile};

/// The only multipart field allowed to carry a file.
pub const FILE_FIELD: &str = "fileupload";

/// A decoded request: the text fields and at most one file.
#[derive(Debug, Default)]
pub struct ParsedForm {
    pub fields: Map<String, Value>,
    pub file: Option<UploadedFile>,
}

/// Lowercased `type/subtype` of a Content-Type header, parameters dropped.
fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Parse a request body based on Content-Type header.
pub async fn parse(content_type: Option<&str>, body: Bytes) -> Result<ParsedForm, AppError> {
    match content_type {
        Some(ct) if media_type(ct) == "multipart/form-data" => parse_multipart(ct, body).await,
        _ => Ok(ParsedForm {
            fields: parse_body(content_type, &body)?,
            file: None,
        }),
    }
}

/// Parse a JSON or form-urlencoded body. Anything that isn't a JSON object yields no fields.
pub fn parse_body(content_type: Option<&str>, body: &[u8]) -> Result<Map<String, Value>, AppError> {
    let ct = content_type.map(media_type).unwrap_or_default();

    if ct == "application/json" {
        if body.is_empty() {
            return Ok(Map::new());
        }
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON: {e}")))?;
        Ok(into_object(value))
    } else if ct == "application/x-www-form-urlencoded" {
        Ok(parse_form_urlencoded(body))
    } else {
        // Try JSON first, then form-urlencoded
        Ok(serde_json::from_slice(body)
            .map(into_object)
            .unwrap_or_else(|_| parse_form_urlencoded(body)))
    }
}

fn into_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn parse_form_urlencoded(body: &[u8]) -> Map<String, Value> {
    let mut map = Map::new();
    for (k, v) in form_urlencoded::parse(body) {
        fields::insert(&mut map, k.into_owned(), Value::String(v.into_owned()));
    }
    map
}

/// Parse multipart form data using multer, enforcing the upload constraints on the file part.
pub async fn parse_multipart(content_type: &str, body: Bytes) -> Result<ParsedForm, AppError> {
    let boundary = multer::parse_boundary(content_type)
        .map_err(|_| AppError::BadRequest("Missing multipart boundary".to_string()))?;

    let constraints = Constraints::new().size_limit(
        SizeLimit::new().for_field(FILE_FIELD, media::MAX_FILE_SIZE as u64),
    );
    let stream = futures_util::stream::once(async { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::with_constraints(stream, boundary, constraints);

    let mut form = ParsedForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();

        let Some(filename) = field.file_name().map(|s| s.to_string()) else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("Field read error: {e}")))?;
            fields::insert(&mut form.fields, name, Value::String(value));
            continue;
        };

        if name != FILE_FIELD || form.file.is_some() {
            return Err(UploadError::UnexpectedField(name).into());
        }

        let content_type = field
            .content_type()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let data = field.bytes().await.map_err(|e| match e {
            multer::Error::FieldSizeExceeded { .. } => AppError::Upload(UploadError::TooLarge),
            other => AppError::BadRequest(format!("File read error: {other}")),
        })?;

        // A form submitted with nothing selected still sends an empty file part.
        if filename.is_empty() && data.is_empty() {
            continue;
        }

        let file = UploadedFile {
            filename,
            content_type,
            data,
        };
        media::check_constraints(&file)?;
        form.file = Some(file);
    }

    Ok(form)
}

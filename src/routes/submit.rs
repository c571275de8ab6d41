use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;

use crate::error::AppError;
use crate::state::SharedState;
use crate::submission::{parser, pipeline};

pub const SUCCESS: &str = "Form submitted and emailed successfully!";

pub async fn submit(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, AppError> {
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());

    // File type, size and field-name rules are enforced while decoding.
    let form = parser::parse(content_type, body).await?;

    pipeline::run(&state, form).await?;

    Ok(SUCCESS)
}

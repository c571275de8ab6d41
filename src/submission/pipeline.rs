use super::Submission;
use super::fields;
use super::parser::ParsedForm;
use crate::email::{Notification, SUBJECT};
use crate::error::AppError;
use crate::media::{NO_FILE, UploadError};
use crate::state::SharedState;

/// Validate, upload, persist, notify. Each step runs only if the previous one succeeded.
pub async fn run(state: &SharedState, form: ParsedForm) -> Result<Submission, AppError> {
    let missing = fields::missing_required(&form.fields);
    if !missing.is_empty() {
        tracing::debug!("Rejected submission, missing fields: {:?}", missing);
        return Err(AppError::MissingFields(missing));
    }

    let file_reference = match form.file {
        Some(file) => state.media.store(file).await.map_err(|e| match e {
            UploadError::Transport(msg) => AppError::UploadFailed(msg),
            other => AppError::Upload(other),
        })?,
        None => NO_FILE.to_string(),
    };

    let submission = Submission::new(form.fields, file_reference);

    state
        .log
        .append(&submission)
        .await
        .map_err(AppError::SaveFailed)?;
    tracing::info!("Submission saved to {}", state.log.path().display());

    let notification = Notification {
        to: vec![submission.email(), state.config.admin_email.clone()],
        from: state.config.verified_sender.clone(),
        subject: SUBJECT.to_string(),
        text: submission.email_text(),
    };

    state
        .notifier
        .send(&notification)
        .await
        .map_err(AppError::EmailFailed)?;
    tracing::info!("Confirmation email sent to {}", notification.to.join(", "));

    Ok(submission)
}

use std::sync::Arc;

use crate::config::Config;
use crate::email::{self, Notifier};
use crate::media::MediaStore;
use crate::media::cloudinary::CloudinaryStore;
use crate::submission_log::SubmissionLog;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub media: Arc<dyn MediaStore>,
    pub notifier: Arc<dyn Notifier>,
    pub log: SubmissionLog,
}

impl AppState {
    /// Wire up the Cloudinary store, the SendGrid transport and the submission log from config.
    pub fn from_config(config: Config) -> Result<Self, String> {
        let media: Arc<dyn MediaStore> = Arc::new(CloudinaryStore::new(config.cloudinary.clone()));
        let notifier = email::from_config(&config.sendgrid)?;
        let log = SubmissionLog::new(config.submissions_log.clone());

        Ok(Self {
            config,
            media,
            notifier,
            log,
        })
    }
}

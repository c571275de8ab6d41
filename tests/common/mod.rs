use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use tempfile::TempDir;

use intake::config::{CloudinaryConfig, Config, MailTransport, SendGridConfig, SignatureAlgorithm};
use intake::email::{Notification, Notifier, NotifyError};
use intake::media::{MediaStore, UploadError, UploadedFile};
use intake::state::AppState;
use intake::submission_log::SubmissionLog;

pub const ADMIN_EMAIL: &str = "admin@intake.test";
pub const SENDER: &str = "noreply@intake.test";

/// Records every file it is asked to store, or fails every upload.
#[derive(Default)]
pub struct FakeMedia {
    pub fail: bool,
    pub stored: Mutex<Vec<UploadedFile>>,
}

#[async_trait]
impl MediaStore for FakeMedia {
    async fn store(&self, file: UploadedFile) -> Result<String, UploadError> {
        if self.fail {
            return Err(UploadError::Transport("media host unreachable".to_string()));
        }
        let url = format!("https://media.test/internship-uploads/{}", file.filename);
        self.stored.lock().unwrap().push(file);
        Ok(url)
    }
}

/// Records every notification it is asked to send, or fails every send.
#[derive(Default)]
pub struct FakeNotifier {
    pub fail: bool,
    pub attempts: Mutex<Vec<Notification>>,
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.attempts.lock().unwrap().push(notification.clone());
        if self.fail {
            return Err(NotifyError("401 Unauthorized".to_string()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct Options {
    pub media_fails: bool,
    pub email_fails: bool,
    pub log_unwritable: bool,
    pub max_body_size: Option<usize>,
}

/// A running server backed by fake upstream services and a temporary log file.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub media: Arc<FakeMedia>,
    pub notifier: Arc<FakeNotifier>,
    pub log_path: PathBuf,
    _dir: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Post a multipart form, return (status, body text).
    pub async fn submit(&self, form: Form) -> (reqwest::StatusCode, String) {
        let resp = self
            .client
            .post(self.url("/submit"))
            .multipart(form)
            .send()
            .await
            .expect("submit request failed");
        let status = resp.status();
        (status, resp.text().await.unwrap_or_default())
    }

    /// Contents of the submission log, or `None` if it was never created.
    pub fn log_contents(&self) -> Option<String> {
        std::fs::read_to_string(&self.log_path).ok()
    }

    pub fn emails(&self) -> Vec<Notification> {
        self.notifier.attempts.lock().unwrap().clone()
    }

    pub fn uploads(&self) -> Vec<UploadedFile> {
        self.media.stored.lock().unwrap().clone()
    }
}

/// The four required fields, filled in.
pub fn complete_form() -> Form {
    form_with(&[
        ("Name", "A"),
        ("Email", "a@x.com"),
        ("CollegeName", "C"),
        ("Location", "L"),
    ])
}

pub fn form_with(fields: &[(&str, &str)]) -> Form {
    fields.iter().fold(Form::new(), |form, (name, value)| {
        form.text(name.to_string(), value.to_string())
    })
}

pub fn file(filename: &str, mime: &str, content: Vec<u8>) -> Part {
    Part::bytes(content)
        .file_name(filename.to_string())
        .mime_str(mime)
        .unwrap()
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(Options::default()).await
}

pub async fn spawn_app_with(options: Options) -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let log_path = if options.log_unwritable {
        dir.path().join("missing").join("submissions.txt")
    } else {
        dir.path().join("submissions.txt")
    };

    let config = Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        submissions_log: log_path.clone(),
        max_body_size: options.max_body_size.unwrap_or(6 * 1024 * 1024),
        log_level: "warn".to_string(),
        cloudinary: CloudinaryConfig {
            cloud_name: "test".to_string(),
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            api_base: "http://127.0.0.1:1".to_string(),
            signature_algorithm: SignatureAlgorithm::Sha1,
        },
        sendgrid: SendGridConfig {
            api_key: "SG.test".to_string(),
            api_base: "http://127.0.0.1:1".to_string(),
            transport: MailTransport::Api,
        },
        verified_sender: SENDER.to_string(),
        admin_email: ADMIN_EMAIL.to_string(),
    };

    let media = Arc::new(FakeMedia {
        fail: options.media_fails,
        ..Default::default()
    });
    let notifier = Arc::new(FakeNotifier {
        fail: options.email_fails,
        ..Default::default()
    });

    let state = AppState {
        log: SubmissionLog::new(config.submissions_log.clone()),
        config,
        media: media.clone(),
        notifier: notifier.clone(),
    };
    let app = intake::build_app(state);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        media,
        notifier,
        log_path,
        _dir: dir,
    }
}

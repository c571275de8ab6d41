use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub submissions_log: PathBuf,
    pub max_body_size: usize,
    pub log_level: String,
    pub cloudinary: CloudinaryConfig,
    pub sendgrid: SendGridConfig,
    pub verified_sender: String,
    pub admin_email: String,
}

#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub api_base: String,
    pub signature_algorithm: SignatureAlgorithm,
}

/// Digest used to sign uploads. Must match the Cloudinary account setting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SignatureAlgorithm {
    Sha1,
    Sha256,
}

#[derive(Debug, Clone)]
pub struct SendGridConfig {
    pub api_key: String,
    pub api_base: String,
    pub transport: MailTransport,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MailTransport {
    Api,
    Smtp,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let signature_algorithm = match env_or("CLOUDINARY_SIGNATURE_ALGORITHM", "sha1").as_str() {
            "sha1" => SignatureAlgorithm::Sha1,
            "sha256" => SignatureAlgorithm::Sha256,
            other => {
                return Err(format!(
                    "Invalid CLOUDINARY_SIGNATURE_ALGORITHM: {other} (expected sha1 or sha256)"
                ));
            }
        };

        let cloudinary = CloudinaryConfig {
            cloud_name: env_required("CLOUDINARY_CLOUD_NAME")?,
            api_key: env_required("CLOUDINARY_API_KEY")?,
            api_secret: env_required("CLOUDINARY_API_SECRET")?,
            api_base: env_or("CLOUDINARY_API_BASE", "https://api.cloudinary.com"),
            signature_algorithm,
        };

        let transport = match env_or("SENDGRID_TRANSPORT", "api").as_str() {
            "api" => MailTransport::Api,
            "smtp" => MailTransport::Smtp,
            other => return Err(format!("Invalid SENDGRID_TRANSPORT: {other} (expected api or smtp)")),
        };

        let sendgrid = SendGridConfig {
            api_key: env_required("SENDGRID_API_KEY")?,
            api_base: env_or("SENDGRID_API_BASE", "https://api.sendgrid.com"),
            transport,
        };

        let verified_sender = env_required("VERIFIED_SENDER")?;
        let admin_email = env_required("ADMIN_EMAIL")?;

        let host: IpAddr = env_or("HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid HOST: {e}"))?;

        let port: u16 = env_or("PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid PORT: {e}"))?;

        let submissions_log = PathBuf::from(env_or("SUBMISSIONS_LOG", "submissions.txt"));

        let max_body_size: usize = env_or("MAX_BODY_SIZE", "6291456")
            .parse()
            .map_err(|e| format!("Invalid MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("LOG_LEVEL", "info");

        Ok(Config {
            host,
            port,
            submissions_log,
            max_body_size,
            log_level,
            cloudinary,
            sendgrid,
            verified_sender,
            admin_email,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_REGION: &str = "eu-north-1";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing AWS configuration keys: {}. Check your env file.", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub aws_region: String,
    pub bucket_name: String,
    /// Custom endpoint for S3-compatible stores; enables path-style addressing
    pub s3_endpoint_url: Option<String>,
    pub listen_addr: String,
    /// TOML file with `[[users]]` entries (`username`, `password_hash`)
    pub auth_users_file: Option<PathBuf>,
    pub session_ttl_secs: u64,
    pub session_cookie_secure: bool,
    /// Require a live session for the listing and upload endpoints
    pub require_session: bool,
    pub max_upload_bytes: usize,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup (environment, map in tests)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let flag = |key: &str, default: bool| {
            text(key)
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(default)
        };

        Self {
            aws_access_key_id: text("AWS_ACCESS_KEY_ID").unwrap_or_default(),
            aws_secret_access_key: text("AWS_SECRET_ACCESS_KEY").unwrap_or_default(),
            aws_region: text("AWS_S3_REGION_NAME").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            bucket_name: text("AWS_STORAGE_BUCKET_NAME").unwrap_or_default(),
            s3_endpoint_url: text("S3_ENDPOINT_URL"),
            listen_addr: text("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:8000".to_string()),
            auth_users_file: text("AUTH_USERS_FILE").map(PathBuf::from),
            session_ttl_secs: text("SESSION_TTL_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(1_209_600), // two weeks
            session_cookie_secure: flag("SESSION_COOKIE_SECURE", false),
            require_session: flag("REQUIRE_SESSION", false),
            max_upload_bytes: text("MAX_UPLOAD_BYTES")
                .and_then(|s| s.parse().ok())
                .unwrap_or(25 * 1024 * 1024),
            allowed_origins: text("ALLOWED_ORIGINS")
                .unwrap_or_else(|| "http://localhost:3000".to_string())
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
        }
    }

    /// Validate configuration. Every missing required key is reported at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut missing = Vec::new();
        if self.aws_access_key_id.is_empty() {
            missing.push("AWS_ACCESS_KEY_ID");
        }
        if self.aws_secret_access_key.is_empty() {
            missing.push("AWS_SECRET_ACCESS_KEY");
        }
        if self.bucket_name.is_empty() {
            missing.push("AWS_STORAGE_BUCKET_NAME");
        }
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        if self.listen_addr.is_empty() {
            return Err(ConfigError::Invalid("LISTEN_ADDR cannot be empty".to_string()));
        }

        if self.session_ttl_secs < 60 {
            return Err(ConfigError::Invalid(
                "SESSION_TTL_SECS must be at least 60 seconds".to_string(),
            ));
        }

        if self.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid(
                "MAX_UPLOAD_BYTES must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

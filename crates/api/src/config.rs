use std::path::PathBuf;
use std::str::FromStr;

use vows_core::whatsapp::DEFAULT_WHATSAPP_NUMBER;

use crate::auth::jwt::JwtConfig;

/// A configuration value that could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be set")]
    Missing { name: &'static str },

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Time allowed for in-flight requests to drain after a shutdown signal.
    pub shutdown_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Studio number used in WhatsApp deep links.
    pub whatsapp_number: String,
    /// Directory backing local media storage.
    pub media_dir: PathBuf,
    /// Public URL prefix under which `media_dir` is served.
    pub media_base_url: String,
    /// Lower-cased emails that receive the `admin` role on sign-up.
    pub admin_emails: Vec<String>,
}

/// Read `name`, falling back to `default` when unset.
pub(crate) fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Read and parse `name`, falling back to `default` when unset.
pub(crate) fn parse_env<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

/// Split a comma-separated list, dropping empty entries.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                              |
    /// |------------------------|--------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                            |
    /// | `PORT`                 | `3000`                               |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`              |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                 |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                                 |
    /// | `WHATSAPP_NUMBER`      | `554732096098`                       |
    /// | `MEDIA_DIR`            | `./media`                            |
    /// | `MEDIA_BASE_URL`       | `http://localhost:3000/media`        |
    /// | `ADMIN_EMAILS`         | empty                                |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env_or("HOST", "0.0.0.0");
        let port: u16 = parse_env("PORT", 3000)?;
        let cors_origins = split_list(&env_or("CORS_ORIGINS", "http://localhost:5173"));
        let request_timeout_secs: u64 = parse_env("REQUEST_TIMEOUT_SECS", 30)?;
        let shutdown_timeout_secs: u64 = parse_env("SHUTDOWN_TIMEOUT_SECS", 30)?;
        let jwt = JwtConfig::from_env()?;

        let whatsapp_number = env_or("WHATSAPP_NUMBER", DEFAULT_WHATSAPP_NUMBER);
        if whatsapp_number.is_empty() || !whatsapp_number.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::Invalid {
                name: "WHATSAPP_NUMBER",
                value: whatsapp_number,
            });
        }

        let media_dir = PathBuf::from(env_or("MEDIA_DIR", "./media"));
        let media_base_url = env_or("MEDIA_BASE_URL", &format!("http://localhost:{port}/media"));
        let admin_emails = split_list(&env_or("ADMIN_EMAILS", ""))
            .into_iter()
            .map(|e| e.to_lowercase())
            .collect();

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt,
            whatsapp_number,
            media_dir,
            media_base_url,
            admin_emails,
        })
    }

    /// Whether a (lower-cased) email is on the sign-up admin list.
    pub fn is_admin_email(&self, email: &str) -> bool {
        self.admin_emails.iter().any(|e| e == email)
    }
}

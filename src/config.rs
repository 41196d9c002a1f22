//! Configuration resolution for recap
//!
//! All configuration comes from the environment and is resolved once at
//! startup. Missing provider credentials degrade the corresponding
//! capability rather than preventing startup; the affected endpoints
//! answer 503 with the demo flag until the credential is supplied.

use std::path::PathBuf;
use tracing::{info, warn};

/// Default HTTP listening port
pub const DEFAULT_PORT: u16 = 5000;

/// Default SQLite database file
pub const DEFAULT_DB_PATH: &str = "meetings.db";

/// Default SMTP relay host
pub const DEFAULT_SMTP_RELAY: &str = "smtp.gmail.com";

/// Resolved service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listening port (`RECAP_PORT`)
    pub port: u16,
    /// SQLite database file (`RECAP_DB_PATH`)
    pub db_path: PathBuf,
    /// Completion-provider credential (`RECAP_GROQ_API_KEY`), None when unset
    pub groq_api_key: Option<String>,
    /// Completion-provider base URL (`RECAP_GROQ_API_BASE`)
    pub groq_api_base: Option<String>,
    /// Email credentials, None when either half is unset
    pub email: Option<EmailConfig>,
}

/// SMTP account configuration
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP username, also used as the From address (`RECAP_EMAIL_USER`)
    pub user: String,
    /// SMTP password (`RECAP_EMAIL_PASS`)
    pub pass: String,
    /// SMTP relay host (`RECAP_SMTP_RELAY`)
    pub relay: String,
}

impl Config {
    /// Resolve configuration from the environment
    pub fn from_env() -> Self {
        let port = match env_non_blank("RECAP_PORT") {
            Some(value) => match value.parse::<u16>() {
                Ok(port) => port,
                Err(_) => {
                    warn!("RECAP_PORT '{}' is not a valid port, using {}", value, DEFAULT_PORT);
                    DEFAULT_PORT
                }
            },
            None => DEFAULT_PORT,
        };

        let db_path = env_non_blank("RECAP_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let groq_api_key = env_non_blank("RECAP_GROQ_API_KEY");
        if groq_api_key.is_some() {
            info!("Groq API key loaded from environment");
        }

        let groq_api_base = env_non_blank("RECAP_GROQ_API_BASE");

        let email = match (env_non_blank("RECAP_EMAIL_USER"), env_non_blank("RECAP_EMAIL_PASS")) {
            (Some(user), Some(pass)) => {
                info!(user = %user, "Email credentials loaded from environment");
                Some(EmailConfig {
                    user,
                    pass,
                    relay: env_non_blank("RECAP_SMTP_RELAY")
                        .unwrap_or_else(|| DEFAULT_SMTP_RELAY.to_string()),
                })
            }
            _ => None,
        };

        Config {
            port,
            db_path,
            groq_api_key,
            groq_api_base,
            email,
        }
    }
}

/// Read an environment variable, treating blank values as unset
fn env_non_blank(name: &str) -> Option<String> {
    std::env::var(name).ok().and_then(non_blank)
}

/// Discard empty or whitespace-only values
fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

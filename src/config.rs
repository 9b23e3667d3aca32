use serde::Deserialize;
use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};
use config; // Explicitly import the config crate

#[derive(Debug, Deserialize, Clone)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub web: WebConfig,
    // These fields are populated from the .env file
    pub database_path: String,
    pub session_secret_key: String,
    pub google_client_id: String,
    pub allowed_hosted_domain: String,
    pub manager_emails: String,
    pub allowed_origins: String,
    pub log_level: String,
    pub use_secure_cookies: bool,
}

impl Config {
    pub fn from_env(env_path: &Path) -> Result<Self, config::ConfigError> {
        // Load the specified .env file. Propagate an error if it fails.
        dotenvy::from_path(env_path)
            .map_err(|e| config::ConfigError::Message(format!(
                "FATAL: Failed to load .env file from '{}'. Error: {}", env_path.display(), e
            )))?;

        let database_path = env::var("DATABASE_PATH")
            .map_err(|_| config::ConfigError::Message(
                "FATAL: Environment variable 'DATABASE_PATH' is not set in your .env file.".to_string()
            ))?;

        let session_secret_key = env::var("SESSION_SECRET_KEY")
            .map_err(|_| config::ConfigError::Message(
                "FATAL: Environment variable 'SESSION_SECRET_KEY' is not set in your .env file.".to_string()
            ))?;

        // The cookie signing key must be 128 hex characters (64 bytes).
        if session_secret_key.len() != 128 || !session_secret_key.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(config::ConfigError::Message(
                "FATAL: 'SESSION_SECRET_KEY' must be 128 hexadecimal characters long (64 bytes).".to_string()
            ));
        }

        let google_client_id = env::var("GOOGLE_CLIENT_ID")
            .map_err(|_| config::ConfigError::Message(
                "FATAL: Environment variable 'GOOGLE_CLIENT_ID' is not set in your .env file.".to_string()
            ))?;

        let allowed_hosted_domain = env::var("ALLOWED_HOSTED_DOMAIN")
            .map_err(|_| config::ConfigError::Message(
                "FATAL: Environment variable 'ALLOWED_HOSTED_DOMAIN' is not set in your .env file.".to_string()
            ))?;

        // Whitespace-separated list of manager emails. May be empty.
        let manager_emails = env::var("MANAGER_EMAILS").unwrap_or_else(|_| "".to_string());

        let allowed_origins = env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "".to_string());

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let use_secure_cookies = env::var("USE_SECURE_COOKIES")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .unwrap_or(false);

        if Path::new(&database_path).is_relative() {
            return Err(config::ConfigError::Message(format!(
                "FATAL: The 'DATABASE_PATH' in your .env file is a relative path ('{}'). It MUST be an absolute path.",
                database_path
            )));
        }

        let builder = config::Config::builder()
            // Base settings (web host/port) come from the TOML file.
            .add_source(config::File::new("config/default.toml", config::FileFormat::Toml))
            .set_override("database_path", database_path)?
            .set_override("session_secret_key", session_secret_key)?
            .set_override("google_client_id", google_client_id)?
            .set_override("allowed_hosted_domain", allowed_hosted_domain)?
            .set_override("manager_emails", manager_emails)?
            .set_override("allowed_origins", allowed_origins)?
            .set_override("log_level", log_level)?
            .set_override("use_secure_cookies", use_secure_cookies)?
            .build()?;

        builder.try_deserialize()
    }

    /// Returns the full path to the bulletin-board database file.
    pub fn board_db_path(&self) -> PathBuf {
        PathBuf::from(&self.database_path).join("board.db")
    }

    /// Manager allowlist parsed from the whitespace-separated config value.
    pub fn manager_allowlist(&self) -> HashSet<String> {
        self.manager_emails
            .split_whitespace()
            .map(|s| s.to_string())
            .collect()
    }
}

// src/config.rs
use std::{env, path::PathBuf, str::FromStr};
use thiserror::Error;

use crate::domain::caller::Role;

#[derive(Clone, Debug)]
pub struct AppConfig {
    listen_addr: String,
    storage: StorageBackend,
    data_dir: PathBuf,
    database_url: Option<String>,
    api_tokens: Vec<ApiTokenConfig>,
    allowed_origins: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Json,
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "json" => Ok(Self::Json),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            other => Err(ConfigError::Invalid(format!(
                "STORAGE_BACKEND must be memory, json or postgres (got '{other}')"
            ))),
        }
    }
}

/// One issued API token: who holds it and the SHA-256 hex digest of the
/// token itself. The plain token never appears in configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiTokenConfig {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub sha256_hex: String,
}

impl FromStr for ApiTokenConfig {
    type Err = ConfigError;

    /// `name|email|role|sha256hex`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('|').map(str::trim).collect();
        let [name, email, role, digest] = parts.as_slice() else {
            return Err(ConfigError::Invalid(format!(
                "API_TOKENS entry '{s}' must be name|email|role|sha256hex"
            )));
        };
        if email.is_empty() {
            return Err(ConfigError::Invalid("API_TOKENS entry has an empty email".into()));
        }
        let role = role
            .parse::<Role>()
            .map_err(|err| ConfigError::Invalid(err.to_string()))?;
        if digest.len() != 64 || !digest.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConfigError::Invalid(format!(
                "API_TOKENS digest for {email} must be a 64-character hex string"
            )));
        }
        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            role,
            sha256_hex: digest.to_ascii_lowercase(),
        })
    }
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".into()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".into()]
}

pub fn parse_api_tokens(raw: &str) -> Result<Vec<ApiTokenConfig>, ConfigError> {
    raw.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::parse)
        .collect()
}

impl AppConfig {
    /// Build configuration from environment variables. Uses sensible defaults
    /// for optional values and validates required keys.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Allow dotenv files to populate env vars when present.
        dotenvy::dotenv().ok();

        let listen_addr = env::var("LISTEN_ADDR").unwrap_or_else(|_| default_listen_addr());
        let storage = match env::var("STORAGE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => StorageBackend::Json,
        };
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());

        let database_url = env::var("DATABASE_URL").ok();
        if storage == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let api_tokens =
            parse_api_tokens(&env::var("API_TOKENS").map_err(|_| ConfigError::Missing("API_TOKENS"))?)?;
        if api_tokens.is_empty() {
            return Err(ConfigError::Invalid("API_TOKENS must contain at least one entry".into()));
        }

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .ok()
            .map(|s| s.split(',').map(|p| p.trim().to_string()).collect())
            .unwrap_or_else(default_allowed_origins);

        Ok(Self {
            listen_addr,
            storage,
            data_dir,
            database_url,
            api_tokens,
            allowed_origins,
        })
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub fn storage(&self) -> StorageBackend {
        self.storage
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    pub fn api_tokens(&self) -> &[ApiTokenConfig] {
        &self.api_tokens
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIGEST: &str = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08";

    #[test]
    fn parses_token_entries() {
        let raw = format!("Ada Admin|ada@example.com|superadmin|{DIGEST}; Ed|ed@example.com|editor|{}", DIGEST.to_uppercase());
        let tokens = parse_api_tokens(&raw).unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].role, Role::SuperAdmin);
        assert_eq!(tokens[1].sha256_hex, DIGEST);
    }

    #[test]
    fn rejects_malformed_entries() {
        assert!(parse_api_tokens("ada@example.com|superadmin").is_err());
        assert!(parse_api_tokens("Ada|ada@example.com|owner|abc").is_err());
        assert!(parse_api_tokens(&format!("Ada||editor|{DIGEST}")).is_err());
        assert!(parse_api_tokens("Ada|ada@example.com|editor|xyz").is_err());
    }

    #[test]
    fn storage_backend_names() {
        assert_eq!("JSON".parse::<StorageBackend>().unwrap(), StorageBackend::Json);
        assert_eq!("postgresql".parse::<StorageBackend>().unwrap(), StorageBackend::Postgres);
        assert!("sqlite".parse::<StorageBackend>().is_err());
    }
}

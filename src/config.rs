//! Configuration

use crate::{Result, StoreError};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Backend server configuration, loaded from the environment (`.env`
/// honored). `DATABASE_URL`, `JWT_SECRET` and `PAYMENT_SECRET_KEY` are
/// required; everything else has a serviceable default.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub payment_api_url: String,
    pub payment_secret_key: String,
    pub nats_url: Option<String>,
    pub seed_db: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let get = |name: &str| {
            env::var(name)
                .map_err(|_| StoreError::Config(format!("missing environment variable '{name}'")))
        };

        let host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .map_err(|e| StoreError::Config(format!("invalid PORT: {e}")))?;
        let seed_db = env::var("SEED_DB")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Ok(Self {
            host,
            port,
            database_url: get("DATABASE_URL")?,
            jwt_secret: get("JWT_SECRET")?,
            payment_api_url: env::var("PAYMENT_API_URL")
                .unwrap_or_else(|_| "https://api.stripe.com".to_string()),
            payment_secret_key: get("PAYMENT_SECRET_KEY")?,
            nats_url: env::var("NATS_URL").ok(),
            seed_db,
        })
    }
}

/// Client-side session configuration. Constructed by the UI host; every
/// field has a default suitable for local development.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Base URL of the CivicConnect backend.
    pub api_base_url: String,
    /// Base URL of the payment processor used for confirmation.
    pub gateway_url: String,
    /// Durable storage directory; platform data dir when `None`.
    pub data_dir: Option<PathBuf>,
    /// Timeout applied to every network call.
    pub timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            gateway_url: "https://api.stripe.com".to_string(),
            data_dir: None,
            timeout: Duration::from_secs(15),
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: env::var("CIVICCONNECT_API_URL").unwrap_or(defaults.api_base_url),
            gateway_url: env::var("CIVICCONNECT_GATEWAY_URL").unwrap_or(defaults.gateway_url),
            data_dir: env::var("CIVICCONNECT_DATA_DIR").ok().map(PathBuf::from),
            timeout: env::var("CIVICCONNECT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}

/// Platform-appropriate default directory for durable session state.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(env::temp_dir)
        .join("civicconnect")
}

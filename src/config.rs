//! Client settings.
//!
//! Layered lowest to highest: built-in defaults, an optional TOML file, then
//! `MEALPLAN_*` environment variables (a `.env` file is loaded first), e.g.
//! `MEALPLAN_BASE_URL=https://api.example.com`.

use std::path::Path;
use std::time::Duration;

use api_framework::http::{DEFAULT_CLIENT_NAME, DEFAULT_TIMEOUT};
use api_framework::TransportOptions;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::session::DEFAULT_SESSION_COOKIE;
use crate::ClientError;

pub const ENV_PREFIX: &str = "MEALPLAN";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Scheme, host and optional path prefix of the API server.
    pub base_url: String,
    /// Sent as `X-Service-Client`.
    pub client_name: String,
    /// Sent as `Authorization: Bearer <token>` when set.
    pub oauth2_token: Option<String>,
    pub timeout_secs: u64,
    pub session_cookie_name: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            oauth2_token: None,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            session_cookie_name: DEFAULT_SESSION_COOKIE.to_string(),
        }
    }
}

impl ClientConfig {
    /// Loads `.env`, then layers `path` (if it exists) and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ClientError> {
        dotenvy::dotenv().ok();
        Self::from_sources(path, Environment::with_prefix(ENV_PREFIX))
    }

    /// Same layering as [`load`](Self::load) with an explicit environment source.
    pub fn from_sources(path: Option<&Path>, env: Environment) -> Result<Self, ClientError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("base_url", defaults.base_url)?
            .set_default("client_name", defaults.client_name)?
            .set_default("timeout_secs", defaults.timeout_secs)?
            .set_default("session_cookie_name", defaults.session_cookie_name)?;

        if let Some(path) = path {
            debug!(path = %path.display(), "Reading config file");
            builder = builder.add_source(File::from(path).required(false));
        }

        let settings = builder.add_source(env.try_parsing(true)).build()?;
        let config: ClientConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ClientError> {
        url::Url::parse(&self.base_url)
            .map_err(|e| ClientError::Config(format!("base_url {:?}: {e}", self.base_url)))?;
        if self.client_name.trim().is_empty() {
            return Err(ClientError::Config("client_name must not be blank".into()));
        }
        if self.timeout_secs == 0 {
            return Err(ClientError::Config("timeout_secs must be positive".into()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn transport_options(&self) -> TransportOptions {
        TransportOptions {
            client_name: self.client_name.clone(),
            oauth2_token: self
                .oauth2_token
                .clone()
                .filter(|token| !token.trim().is_empty()),
            timeout: self.timeout(),
        }
    }
}

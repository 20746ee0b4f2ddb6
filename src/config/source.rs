// src/config/source.rs
use std::{env, fmt};

use anyhow::{anyhow, Result};

use crate::error::MonitorError;

const ENV_USER_AGENT: &str = "USER_AGENT";
const ENV_CLIENT_ID: &str = "CLIENT_ID";
const ENV_CLIENT_SECRET: &str = "CLIENT_SECRET";
const ENV_USERNAME: &str = "REDDIT_USERNAME";
const ENV_PASSWORD: &str = "REDDIT_PASSWORD";

/// Credentials for the Reddit script app. Immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct SourceConfig {
    user_agent: String,
    client_id: String,
    client_secret: String,
    username: String,
    password: String,
}

impl SourceConfig {
    /// All fields except `user_agent` are required. The first empty one (in
    /// the order client id, client secret, username, password) is reported.
    pub fn new(
        user_agent: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> crate::Result<Self> {
        let cfg = Self {
            user_agent: user_agent.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            username: username.into(),
            password: password.into(),
        };

        let checks = [
            ("clientID", &cfg.client_id),
            ("clientSecret", &cfg.client_secret),
            ("username", &cfg.username),
            ("password", &cfg.password),
        ];
        if let Some((name, _)) = checks.iter().find(|(_, v)| v.is_empty()) {
            return Err(MonitorError::MissingField(*name));
        }

        Ok(cfg)
    }

    /// Read credentials from the process environment.
    /// Every variable must be present; only `USER_AGENT` may be empty.
    pub fn from_env() -> Result<Self> {
        let read = |key: &str| {
            env::var(key).map_err(|_| anyhow!("missing environment variable {key}"))
        };

        let cfg = Self::new(
            read(ENV_USER_AGENT)?,
            read(ENV_CLIENT_ID)?,
            read(ENV_CLIENT_SECRET)?,
            read(ENV_USERNAME)?,
            read(ENV_PASSWORD)?,
        )?;
        Ok(cfg)
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceConfig")
            .field("user_agent", &self.user_agent)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Datasource settings and engine configuration

use crate::frame::DEFAULT_FRAME_NAME;
use crate::store::compose_connection_uri;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the base URI or host
pub const ENV_URI: &str = "DOCFRAME_URI";
/// Environment variable holding the username
pub const ENV_USERNAME: &str = "DOCFRAME_USERNAME";
/// Environment variable holding the password
pub const ENV_PASSWORD: &str = "DOCFRAME_PASSWORD";

/// Key of the password in the host's decrypted secure settings
pub const SECURE_PASSWORD_KEY: &str = "password";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("error unmarshalling JSON data: {0}")]
    InvalidJson(String),

    #[error("missing configuration value: {0}")]
    Missing(String),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: String, reason: String },
}

/// Connection settings for one datasource instance
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasourceSettings {
    /// Base URI (`mongodb://...`, `mongodb+srv://...`) or bare host
    #[serde(default)]
    pub uri: String,

    #[serde(default)]
    pub username: String,

    /// Never read from or written to plain JSON settings
    #[serde(skip)]
    pub password: String,
}

impl DatasourceSettings {
    pub fn new(
        uri: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Decode host settings: `{"uri", "username"}` JSON plus the decrypted
    /// secure map carrying `password`
    pub fn from_json(
        json_data: &[u8],
        secure: &HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let mut settings: DatasourceSettings = if json_data.iter().all(u8::is_ascii_whitespace) {
            DatasourceSettings::default()
        } else {
            serde_json::from_slice(json_data).map_err(|e| ConfigError::InvalidJson(e.to_string()))?
        };
        settings.password = secure
            .get(SECURE_PASSWORD_KEY)
            .cloned()
            .unwrap_or_default();
        Ok(settings)
    }

    /// Read settings from `DOCFRAME_URI`, `DOCFRAME_USERNAME` and
    /// `DOCFRAME_PASSWORD`; only the URI is required
    pub fn from_env() -> Result<Self, ConfigError> {
        let uri = std::env::var(ENV_URI)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| ConfigError::Missing(ENV_URI.to_string()))?;

        Ok(Self {
            uri,
            username: std::env::var(ENV_USERNAME).unwrap_or_default(),
            password: std::env::var(ENV_PASSWORD).unwrap_or_default(),
        })
    }

    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    /// Final connection URI with credentials injected when both are set
    pub fn connection_uri(&self) -> String {
        compose_connection_uri(&self.uri, &self.username, &self.password)
    }
}

impl fmt::Debug for DatasourceSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasourceSettings")
            .field("uri", &self.uri)
            .field("username", &self.username)
            .field("password", &if self.password.is_empty() { "" } else { "***" })
            .finish()
    }
}

/// Connection pool limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Idle connections kept per URI; 0 disables pooling
    pub max_idle_per_uri: usize,

    /// Idle connections older than this are closed instead of reused
    pub idle_timeout: Duration,
}

impl PoolConfig {
    /// Connect per query, tear down afterwards
    pub fn disabled() -> Self {
        Self {
            max_idle_per_uri: 0,
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.max_idle_per_uri > 0
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_idle_per_uri: 4,
            idle_timeout: Duration::from_secs(300), // 5 minutes
        }
    }
}

/// Engine-wide settings shared by every query of a [`Datasource`](crate::Datasource)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub pool: PoolConfig,

    /// Applied to queries whose context carries no deadline
    pub default_query_timeout: Option<Duration>,

    /// Name given to every result frame
    pub frame_name: String,
}

impl EngineConfig {
    /// One connection per query, closed when the query finishes
    pub fn no_pooling() -> Self {
        Self {
            pool: PoolConfig::disabled(),
            ..Self::default()
        }
    }

    pub fn with_default_query_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.default_query_timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                name: "frame_name".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.default_query_timeout == Some(Duration::ZERO) {
            return Err(ConfigError::Invalid {
                name: "default_query_timeout".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pool: PoolConfig::default(),
            default_query_timeout: Some(Duration::from_secs(60)),
            frame_name: DEFAULT_FRAME_NAME.to_string(),
        }
    }
}

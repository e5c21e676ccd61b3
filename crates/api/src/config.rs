// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Server configuration module
//!
//! Settings for the swap details server. Values are validated on load so an
//! out-of-range port or timeout fails startup instead of the first request.
//!
//! Sources, later ones winning:
//! 1. built-in defaults
//! 2. `config.json`
//! 3. `config.{environment}.json`
//! 4. `SERVER_*` environment variables (`SERVER_PORT`, `SERVER_STRICT_QUERY_PARAMS`, ...)
//!
//! The environment name itself comes from `ENVIRONMENT` when set.

use std::{
    fmt,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    time::Duration,
};

use anyhow::ensure;
use config::{Config, ConfigError, Environment as ConfigEnv, File};
use serde::Deserialize;

use crate::error::{ServerError, ServerResult};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const TESTING_TIMEOUT_SECONDS: u64 = 5;
const MAX_TIMEOUT_SECONDS: u64 = 300;

/// Listening port; 0 asks the OS for a free port and is only allowed in testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ServerPort(u16);

impl ServerPort {
    /// Validate a port for the given environment
    ///
    /// # Errors
    ///
    /// Returns an error if the port is 0 outside the testing environment.
    pub fn new(port: u16, environment: Environment) -> anyhow::Result<Self> {
        ensure!(
            port != 0 || environment == Environment::Testing,
            "port cannot be 0 in non-testing environments"
        );
        Ok(Self(port))
    }

    /// The port number
    pub fn value(self) -> u16 {
        self.0
    }
}

/// Per-request timeout, between 1 and 300 seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u64")]
pub struct TimeoutSeconds(Duration);

impl TimeoutSeconds {
    /// Validate a timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is 0 or greater than 300 seconds.
    pub fn new(seconds: u64) -> anyhow::Result<Self> {
        ensure!(seconds != 0, "timeout must be greater than 0");
        ensure!(
            seconds <= MAX_TIMEOUT_SECONDS,
            "timeout cannot exceed {MAX_TIMEOUT_SECONDS}"
        );
        Ok(Self(Duration::from_secs(seconds)))
    }

    /// The timeout as a duration
    pub fn value(self) -> Duration {
        self.0
    }
}

impl TryFrom<u64> for TimeoutSeconds {
    type Error = anyhow::Error;

    fn try_from(seconds: u64) -> Result<Self, Self::Error> {
        Self::new(seconds)
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Production environment
    Production,
    /// Development environment
    Development,
    /// Testing environment
    Testing,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Environment::Production => "production",
            Environment::Development => "development",
            Environment::Testing => "testing",
        })
    }
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    pub host: IpAddr,
    /// Port to bind
    pub port: ServerPort,
    /// Request timeout applied by the middleware stack
    pub timeout_seconds: TimeoutSeconds,
    /// Environment type
    pub environment: Environment,
    /// Reject unknown or unparsable query parameters on reads instead of ignoring them
    #[serde(default)]
    pub strict_query_params: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: ServerPort(DEFAULT_PORT),
            timeout_seconds: TimeoutSeconds(Duration::from_secs(DEFAULT_TIMEOUT_SECONDS)),
            environment: Environment::Development,
            strict_query_params: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration, mapping failures to `ServerError::Config`
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Config` if configuration is invalid or cannot be loaded.
    pub fn from_env() -> ServerResult<Self> {
        Self::load().map_err(|e| ServerError::Config {
            message: format!("failed to load configuration: {e}"),
        })
    }

    /// Load configuration from the layered sources described in the module docs
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be read or a value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("ENVIRONMENT")
            .map(|name| name.to_lowercase())
            .ok();
        let file_env = environment.as_deref().unwrap_or("development");

        let loaded: Self = Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", DEFAULT_PORT)?
            .set_default("timeout_seconds", DEFAULT_TIMEOUT_SECONDS)?
            .set_default("environment", "development")?
            .set_default("strict_query_params", false)?
            .add_source(File::with_name("config.json").required(false))
            .add_source(File::with_name(&format!("config.{file_env}.json")).required(false))
            // no nesting separator, so SERVER_TIMEOUT_SECONDS maps to timeout_seconds
            .add_source(
                ConfigEnv::with_prefix("SERVER")
                    .prefix_separator("_")
                    .try_parsing(true),
            )
            .set_override_option("environment", environment)?
            .build()?
            .try_deserialize()?;

        // the port rule depends on the environment, so it is checked after both are known
        ServerPort::new(loaded.port.value(), loaded.environment)
            .map_err(|e| ConfigError::Message(format!("invalid port configuration: {e}")))?;

        Ok(loaded)
    }

    /// Configuration for tests: OS-assigned port and a short timeout
    pub fn for_testing() -> Self {
        Self {
            port: ServerPort(0),
            timeout_seconds: TimeoutSeconds(Duration::from_secs(TESTING_TIMEOUT_SECONDS)),
            environment: Environment::Testing,
            ..Self::default()
        }
    }

    /// Enable strict query parameter checking
    #[must_use]
    pub fn with_strict_query_params(mut self, strict: bool) -> Self {
        self.strict_query_params = strict;
        self
    }

    /// Socket address to bind
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port.value())
    }
}

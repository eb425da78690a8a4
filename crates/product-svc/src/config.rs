//! Configuration loading and validation for the product service.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any variable is present but invalid.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated product service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Port the HTTP server listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Per-request timeout in seconds. Requests exceeding it get a 503.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Maximum number of products the in-memory store will hold.
    #[serde(default = "default_max_products")]
    pub max_products: usize,

    /// OTLP gRPC endpoint for span export. Export is disabled when unset.
    #[serde(default)]
    pub otel_exporter_otlp_endpoint: Option<String>,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_listen_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    30
}
fn default_max_products() -> usize {
    10_000
}
fn default_log_level() -> String {
    "info".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_port: default_listen_port(),
            request_timeout_secs: default_request_timeout(),
            max_products: default_max_products(),
            otel_exporter_otlp_endpoint: None,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Per-request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// OTLP endpoint, treating a blank value as unset.
    pub fn otlp_endpoint(&self) -> Option<&str> {
        self.otel_exporter_otlp_endpoint
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be > 0");
        }
        if self.max_products == 0 {
            anyhow::bail!("MAX_PRODUCTS must be > 0");
        }
        if self.log_level.trim().is_empty() {
            anyhow::bail!("LOG_LEVEL must not be empty");
        }
        Ok(())
    }
}

//! # Logistics Configuration
//!
//! Environment-driven carrier registry configuration.
//!
//! Each remote carrier is enabled by the presence of its credential. A
//! missing or blank credential simply leaves the carrier out.
//!
//! | Variable                              | Meaning                          |
//! |---------------------------------------|----------------------------------|
//! | `LOGISTICS_GIG_LOGISTICS_API_KEY`     | enables GIG Logistics            |
//! | `LOGISTICS_KWIK_API_KEY`              | enables Kwik                     |
//! | `LOGISTICS_SENDBOX_API_KEY`           | enables Sendbox                  |
//! | `LOGISTICS_<CARRIER>_BASE_URL`        | overrides a carrier's API URL    |
//! | `LOGISTICS_HTTP_TIMEOUT_MS`           | per-request carrier timeout      |
//! | `LOGISTICS_QUOTE_TIMEOUT_MS`          | per-carrier quote fan-out bound  |
//! | `LOGISTICS_LOG_FORMAT`                | `pretty` or `json`               |
//!
//! # Examples
//!
//! ```
//! use shipquote::infrastructure::config::LogisticsConfig;
//!
//! let config = LogisticsConfig::new()
//!     .with_kwik_key("kwik-secret")
//!     .with_http_timeout_ms(10_000);
//!
//! assert!(config.kwik().is_some());
//! assert!(config.sendbox().is_none());
//! ```

use crate::infrastructure::carriers::http_client::DEFAULT_TIMEOUT_MS;
use crate::infrastructure::carriers::{GigLogisticsConfig, KwikConfig, SendboxConfig};
use crate::infrastructure::logging::LogFormat;
use config::{Config, Environment};
use serde::Deserialize;
use thiserror::Error;

/// Prefix shared by every environment variable.
pub const ENV_PREFIX: &str = "LOGISTICS";

/// Default per-carrier bound on the quote fan-out, in milliseconds.
pub const DEFAULT_QUOTE_TIMEOUT_MS: u64 = 20_000;

/// Error raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A value was present but unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Carrier credentials and tuning.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogisticsConfig {
    gig_logistics_api_key: Option<String>,
    gig_logistics_base_url: Option<String>,
    kwik_api_key: Option<String>,
    kwik_base_url: Option<String>,
    sendbox_api_key: Option<String>,
    sendbox_base_url: Option<String>,
    http_timeout_ms: Option<u64>,
    quote_timeout_ms: Option<u64>,
    log_format: LogFormat,
}

impl LogisticsConfig {
    /// Creates an empty configuration: only the local carrier will be active.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `.env` (if present) and then the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable has the wrong type or a timeout is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is normal outside development.
        let _ = dotenvy::dotenv();
        Self::from_environment(Environment::with_prefix(ENV_PREFIX))
    }

    /// Loads from an explicit environment source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable has the wrong type or a timeout is zero.
    pub fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        let config: Self = Config::builder()
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.http_timeout_ms == Some(0) {
            return Err(ConfigError::Invalid("http_timeout_ms must be positive".into()));
        }
        if self.quote_timeout_ms == Some(0) {
            return Err(ConfigError::Invalid("quote_timeout_ms must be positive".into()));
        }
        Ok(())
    }

    /// Sets the GIG Logistics credential.
    #[must_use]
    pub fn with_gig_logistics_key(mut self, key: impl Into<String>) -> Self {
        self.gig_logistics_api_key = Some(key.into());
        self
    }

    /// Overrides the GIG Logistics base URL.
    #[must_use]
    pub fn with_gig_logistics_base_url(mut self, url: impl Into<String>) -> Self {
        self.gig_logistics_base_url = Some(url.into());
        self
    }

    /// Sets the Kwik credential.
    #[must_use]
    pub fn with_kwik_key(mut self, key: impl Into<String>) -> Self {
        self.kwik_api_key = Some(key.into());
        self
    }

    /// Overrides the Kwik base URL.
    #[must_use]
    pub fn with_kwik_base_url(mut self, url: impl Into<String>) -> Self {
        self.kwik_base_url = Some(url.into());
        self
    }

    /// Sets the Sendbox credential.
    #[must_use]
    pub fn with_sendbox_key(mut self, key: impl Into<String>) -> Self {
        self.sendbox_api_key = Some(key.into());
        self
    }

    /// Overrides the Sendbox base URL.
    #[must_use]
    pub fn with_sendbox_base_url(mut self, url: impl Into<String>) -> Self {
        self.sendbox_base_url = Some(url.into());
        self
    }

    /// Sets the per-request carrier timeout.
    #[must_use]
    pub fn with_http_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.http_timeout_ms = Some(timeout_ms);
        self
    }

    /// Sets the per-carrier bound on the quote fan-out.
    #[must_use]
    pub fn with_quote_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.quote_timeout_ms = Some(timeout_ms);
        self
    }

    /// Returns the per-request carrier timeout.
    #[must_use]
    pub fn http_timeout_ms(&self) -> u64 {
        self.http_timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS)
    }

    /// Returns the per-carrier bound on the quote fan-out.
    #[must_use]
    pub fn quote_timeout_ms(&self) -> u64 {
        self.quote_timeout_ms.unwrap_or(DEFAULT_QUOTE_TIMEOUT_MS)
    }

    /// Returns the configured log format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the GIG Logistics adapter config when its credential is set.
    #[must_use]
    pub fn gig_logistics(&self) -> Option<GigLogisticsConfig> {
        let key = credential(self.gig_logistics_api_key.as_deref())?;
        let config = GigLogisticsConfig::new(key).with_timeout_ms(self.http_timeout_ms());
        Some(match &self.gig_logistics_base_url {
            Some(url) => config.with_base_url(url),
            None => config,
        })
    }

    /// Returns the Kwik adapter config when its credential is set.
    #[must_use]
    pub fn kwik(&self) -> Option<KwikConfig> {
        let key = credential(self.kwik_api_key.as_deref())?;
        let config = KwikConfig::new(key).with_timeout_ms(self.http_timeout_ms());
        Some(match &self.kwik_base_url {
            Some(url) => config.with_base_url(url),
            None => config,
        })
    }

    /// Returns the Sendbox adapter config when its credential is set.
    #[must_use]
    pub fn sendbox(&self) -> Option<SendboxConfig> {
        let key = credential(self.sendbox_api_key.as_deref())?;
        let config = SendboxConfig::new(key).with_timeout_ms(self.http_timeout_ms());
        Some(match &self.sendbox_base_url {
            Some(url) => config.with_base_url(url),
            None => config,
        })
    }
}

fn credential(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use config::Map;

    fn environment(vars: &[(&str, &str)]) -> Environment {
        let source: Map<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(source))
    }

    #[test]
    fn empty_environment_enables_nothing() {
        let config = LogisticsConfig::from_environment(environment(&[])).unwrap();
        assert!(config.gig_logistics().is_none());
        assert!(config.kwik().is_none());
        assert!(config.sendbox().is_none());
        assert_eq!(config.http_timeout_ms(), DEFAULT_TIMEOUT_MS);
        assert_eq!(config.quote_timeout_ms(), DEFAULT_QUOTE_TIMEOUT_MS);
        assert_eq!(config.log_format(), LogFormat::Pretty);
    }

    #[test]
    fn reads_prefixed_variables() {
        let config = LogisticsConfig::from_environment(environment(&[
            ("LOGISTICS_KWIK_API_KEY", "kwik-key"),
            ("LOGISTICS_SENDBOX_API_KEY", "sb-key"),
            ("LOGISTICS_HTTP_TIMEOUT_MS", "8000"),
            ("LOGISTICS_LOG_FORMAT", "json"),
            ("UNRELATED_VAR", "ignored"),
        ]))
        .unwrap();
        assert!(config.gig_logistics().is_none());
        assert!(config.kwik().is_some());
        assert!(config.sendbox().is_some());
        assert_eq!(config.http_timeout_ms(), 8000);
        assert_eq!(config.log_format(), LogFormat::Json);
    }

    #[test]
    fn blank_credential_is_absent() {
        let config = LogisticsConfig::new().with_gig_logistics_key("   ");
        assert!(config.gig_logistics().is_none());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = LogisticsConfig::from_environment(environment(&[(
            "LOGISTICS_QUOTE_TIMEOUT_MS",
            "0",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn non_numeric_timeout_is_a_load_error() {
        let err = LogisticsConfig::from_environment(environment(&[(
            "LOGISTICS_HTTP_TIMEOUT_MS",
            "soon",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }
}

//! Server settings.
//!
//! Layered lowest to highest: built-in defaults, an optional
//! `amortization.toml` in the working directory, then `AMORTIZATION_*`
//! environment variables (`AMORTIZATION_PORT=8080`, `AMORTIZATION_LOG_FILTER=debug`).

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use crate::request::{DEFAULT_MAX_TERM_MONTHS, ValidationLimits};

const ENV_PREFIX: &str = "AMORTIZATION";
const CONFIG_FILE: &str = "amortization";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// `tracing_subscriber::EnvFilter` directives; `RUST_LOG` wins when set.
    pub log_filter: String,
    pub max_term_months: u32,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 5000)?
            .set_default("log_filter", "info")?
            .set_default("max_term_months", i64::from(DEFAULT_MAX_TERM_MONTHS))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn limits(&self) -> ValidationLimits {
        ValidationLimits {
            max_term_months: self.max_term_months,
        }
    }
}

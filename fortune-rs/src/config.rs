//! Client configuration: FortuneServiceConfig, per-call snapshots (ConfigSource), loading.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Where the fortune service lives, logically. `address` is a service name
/// that discovery resolves; it is not a host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FortuneServiceConfig {
    pub scheme: String,
    pub address: String,
    pub all_fortunes_path: String,
    pub random_fortune_path: String,
    /// Per-call timeout. None waits as long as the transport does.
    pub timeout_ms: Option<u64>,
}

impl Default for FortuneServiceConfig {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            address: "fortuneService".to_string(),
            all_fortunes_path: "api/fortunes/all".to_string(),
            random_fortune_path: "api/fortunes/random".to_string(),
            timeout_ms: None,
        }
    }
}

impl FortuneServiceConfig {
    pub fn all_fortunes_url(&self) -> String {
        self.url(&self.all_fortunes_path)
    }

    pub fn random_fortune_url(&self) -> String {
        self.url(&self.random_fortune_path)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}://{}/{}",
            self.scheme,
            self.address.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.address.is_empty() {
            return Err(ConfigError::Invalid("address cannot be empty".into()));
        }
        if self.scheme != "http" {
            return Err(ConfigError::Invalid(format!(
                "unsupported scheme {:?}, only http is supported",
                self.scheme
            )));
        }
        Ok(())
    }
}

/// Source of config snapshots. The client takes one snapshot per call and
/// never holds on to it, so replacing the config affects the next call only.
pub trait ConfigSource: Send + Sync {
    fn snapshot(&self) -> FortuneServiceConfig;
}

impl ConfigSource for FortuneServiceConfig {
    fn snapshot(&self) -> FortuneServiceConfig {
        self.clone()
    }
}

/// Process-wide config that can be replaced at runtime (e.g. on reload).
#[derive(Clone, Default)]
pub struct SharedConfig {
    inner: Arc<RwLock<FortuneServiceConfig>>,
}

impl SharedConfig {
    pub fn new(config: FortuneServiceConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    pub fn replace(&self, config: FortuneServiceConfig) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = config;
    }
}

impl ConfigSource for SharedConfig {
    fn snapshot(&self) -> FortuneServiceConfig {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Load config: .env, then optional `config/fortune.*`, then `FORTUNE_*` env vars
/// (e.g. FORTUNE_ADDRESS, FORTUNE_RANDOM_FORTUNE_PATH, FORTUNE_TIMEOUT_MS).
pub fn load_config() -> Result<FortuneServiceConfig, ConfigError> {
    dotenvy::dotenv().ok();
    let builder = Config::builder()
        .add_source(File::with_name("config/fortune").required(false))
        .add_source(Environment::with_prefix("FORTUNE").try_parsing(true));
    build(builder)
}

fn build(builder: ConfigBuilder<DefaultState>) -> Result<FortuneServiceConfig, ConfigError> {
    let config: FortuneServiceConfig = builder.build()?.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

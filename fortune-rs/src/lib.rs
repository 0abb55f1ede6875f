//! Fortune teller for Rust: discovery-backed fortune client and the fortune service, on fortune-core.

pub mod client;
pub mod config;
pub mod discovery;
pub mod service;

pub use client::{ClientError, FailureKind, FortuneServiceClient, HttpTransport, HyperTransport};
pub use crate::config::{load_config, ConfigError, ConfigSource, FortuneServiceConfig, SharedConfig};
pub use discovery::{DiscoveryTransport, StaticDiscovery};
pub use fortune_core::{App, CoreError, Fortune, Module, ServiceDiscovery};
pub use service::{FortuneRepository, FortunesController, InMemoryFortuneRepository};

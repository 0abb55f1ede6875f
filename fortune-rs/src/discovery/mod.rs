//! Discovery: StaticDiscovery and DiscoveryTransport, the transport decorator that
//! swaps a logical service name in the URL host for a resolved base address.

mod protocol;

pub use protocol::StaticDiscovery;

use std::sync::Arc;

use async_trait::async_trait;
use fortune_core::ServiceDiscovery;
use http::Uri;

use crate::client::{ClientError, HttpTransport};

/// Wraps any transport. Each call resolves the URL host through discovery, then
/// forwards `<first resolved base><path and query>` to the inner transport.
/// Nothing is cached: every call resolves again.
pub struct DiscoveryTransport<T> {
    discovery: Arc<dyn ServiceDiscovery>,
    inner: T,
}

impl<T> DiscoveryTransport<T> {
    pub fn new(discovery: Arc<dyn ServiceDiscovery>, inner: T) -> Self {
        Self { discovery, inner }
    }

    /// Rewrite a logical URL (`http://fortuneService/api/fortunes/all`) to a physical one.
    pub fn lookup(&self, url: &str) -> Result<String, ClientError> {
        let uri: Uri = url.parse().map_err(|e: http::uri::InvalidUri| ClientError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let service_name = uri.host().ok_or_else(|| ClientError::InvalidUrl {
            url: url.to_string(),
            reason: "missing host".into(),
        })?;
        let bases = self.discovery.resolve(service_name);
        let base = bases.first().ok_or_else(|| {
            ClientError::ServiceUnavailable(format!("service {:?} not found", service_name))
        })?;
        let path_and_query = uri.path_and_query().map(|p| p.as_str()).unwrap_or("/");
        Ok(format!("{}{}", base.trim_end_matches('/'), path_and_query))
    }
}

#[async_trait]
impl<T: HttpTransport> HttpTransport for DiscoveryTransport<T> {
    async fn get(&self, url: &str) -> Result<Vec<u8>, ClientError> {
        let target = self.lookup(url)?;
        tracing::trace!(logical = url, physical = %target, "resolved service address");
        self.inner.get(&target).await
    }
}

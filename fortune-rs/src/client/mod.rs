//! Fortune client: fetch fortunes from a service whose location comes from discovery.

mod protocol;
mod transport;

pub use protocol::{ClientError, FailureKind, HttpTransport};
pub use transport::HyperTransport;

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use fortune_core::{Fortune, ServiceDiscovery};
use serde::de::DeserializeOwned;

use crate::config::ConfigSource;
use crate::discovery::DiscoveryTransport;

/// Client for the fortune service.
///
/// `fetch_all` and `fetch_random` never fail: transport and decode errors are
/// logged and turned into an empty Vec or `None`. The `try_` variants return
/// the error instead (and log the same way).
///
/// Holds no mutable state; concurrent calls are independent.
pub struct FortuneServiceClient {
    config: Box<dyn ConfigSource>,
    transport: Box<dyn HttpTransport>,
}

impl FortuneServiceClient {
    /// HTTP via hyper, with the URL host resolved through `discovery` on every call.
    pub fn new(
        discovery: Arc<dyn ServiceDiscovery>,
        config: impl ConfigSource + 'static,
    ) -> Self {
        Self::with_transport(DiscoveryTransport::new(discovery, HyperTransport::new()), config)
    }

    /// Use any transport (a custom decorator stack, a test double).
    pub fn with_transport(
        transport: impl HttpTransport + 'static,
        config: impl ConfigSource + 'static,
    ) -> Self {
        Self {
            config: Box::new(config),
            transport: Box::new(transport),
        }
    }

    /// All fortunes in the order the service sent them. Empty on any failure.
    pub async fn fetch_all(&self) -> Vec<Fortune> {
        self.try_fetch_all().await.unwrap_or_default()
    }

    /// One random fortune. None on any failure.
    pub async fn fetch_random(&self) -> Option<Fortune> {
        self.try_fetch_random().await.ok()
    }

    pub async fn try_fetch_all(&self) -> Result<Vec<Fortune>, ClientError> {
        let config = self.config.snapshot();
        self.handle_request(&config.all_fortunes_url(), config.timeout())
            .await
    }

    pub async fn try_fetch_random(&self) -> Result<Fortune, ClientError> {
        let config = self.config.snapshot();
        self.handle_request(&config.random_fortune_url(), config.timeout())
            .await
    }

    /// One debug event per call, one error event per failure.
    async fn handle_request<T: DeserializeOwned + Debug>(
        &self,
        url: &str,
        timeout: Option<Duration>,
    ) -> Result<T, ClientError> {
        tracing::debug!(%url, "fortune service call");
        match self.request(url, timeout).await {
            Ok(result) => {
                tracing::trace!(?result, "fortune service returned");
                Ok(result)
            }
            Err(e) => {
                match e.kind() {
                    FailureKind::Transport => {
                        tracing::error!(%url, error = %e.detail(), "fortune service call failed")
                    }
                    FailureKind::Decode => {
                        tracing::error!(%url, error = %e.detail(), "fortune service serialization failed")
                    }
                }
                Err(e)
            }
        }
    }

    async fn request<T: DeserializeOwned>(
        &self,
        url: &str,
        timeout: Option<Duration>,
    ) -> Result<T, ClientError> {
        let body = match timeout {
            Some(limit) => tokio::time::timeout(limit, self.transport.get(url))
                .await
                .map_err(|_| ClientError::Timeout(limit))??,
            None => self.transport.get(url).await?,
        };
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FortuneServiceConfig;
    use async_trait::async_trait;

    /// Answers every URL with the same canned result.
    struct Canned(Result<&'static [u8], http::StatusCode>);

    #[async_trait]
    impl HttpTransport for Canned {
        async fn get(&self, _url: &str) -> Result<Vec<u8>, ClientError> {
            self.0.map(<[u8]>::to_vec).map_err(ClientError::Status)
        }
    }

    struct Never;

    #[async_trait]
    impl HttpTransport for Never {
        async fn get(&self, _url: &str) -> Result<Vec<u8>, ClientError> {
            std::future::pending().await
        }
    }

    fn client(t: impl HttpTransport + 'static) -> FortuneServiceClient {
        FortuneServiceClient::with_transport(t, FortuneServiceConfig::default())
    }

    #[tokio::test]
    async fn decodes_all() {
        let c = client(Canned(Ok(br#"[{"id":1,"text":"Hello"},{"id":3,"text":"Bye"}]"#)));
        assert_eq!(
            c.fetch_all().await,
            vec![Fortune::new(1, "Hello"), Fortune::new(3, "Bye")]
        );
    }

    #[tokio::test]
    async fn shape_mismatch_is_a_decode_failure() {
        let c = client(Canned(Ok(br#"{"id":1,"text":"Hello"}"#)));
        assert_eq!(c.try_fetch_all().await.unwrap_err().kind(), FailureKind::Decode);
        assert!(c.fetch_all().await.is_empty());
        let c = client(Canned(Ok(br#"[{"id":1,"text":"Hello"}]"#)));
        assert_eq!(c.fetch_random().await, None);
    }

    #[tokio::test]
    async fn status_is_a_transport_failure() {
        let c = client(Canned(Err(http::StatusCode::INTERNAL_SERVER_ERROR)));
        let err = c.try_fetch_random().await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Transport);
        assert!(matches!(err, ClientError::Status(s) if s.as_u16() == 500));
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_is_a_transport_failure() {
        let config = FortuneServiceConfig {
            timeout_ms: Some(50),
            ..Default::default()
        };
        let c = FortuneServiceClient::with_transport(Never, config);
        let err = c.try_fetch_all().await.unwrap_err();
        assert!(matches!(err, ClientError::Timeout(d) if d == Duration::from_millis(50)));
        assert!(c.fetch_all().await.is_empty());
    }
}

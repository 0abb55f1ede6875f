//! HyperTransport: plain-HTTP transport on the hyper-util legacy client.

use async_trait::async_trait;
use bytes::Bytes;
use http::Uri;
use http_body_util::{BodyExt, Empty};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use super::protocol::{ClientError, HttpTransport};

/// Cloning is cheap: clones share one connection pool. Each `get` owns its
/// response until the body is collected, and drops it on every exit path.
#[derive(Clone)]
pub struct HyperTransport {
    client: Client<HttpConnector, Empty<Bytes>>,
}

impl HyperTransport {
    pub fn new() -> Self {
        Self {
            client: Client::builder(TokioExecutor::new()).build_http(),
        }
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for HyperTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>, ClientError> {
        let uri: Uri = url.parse().map_err(|e: http::uri::InvalidUri| ClientError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let resp = self
            .client
            .get(uri)
            .await
            .map_err(|e| ClientError::Transport(Box::new(e)))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }
        let body = resp
            .into_body()
            .collect()
            .await
            .map_err(|e| ClientError::Transport(Box::new(e)))?
            .to_bytes();
        Ok(body.to_vec())
    }
}

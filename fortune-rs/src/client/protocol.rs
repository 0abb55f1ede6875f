//! Client protocols: ClientError, FailureKind, HttpTransport.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// The two failure classes a fetch can end in. Callers of the swallowing
/// operations never see them; the `try_` operations expose them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// Anything before or during the network exchange.
    Transport,
    /// The body arrived but is not the expected JSON shape.
    Decode,
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("unexpected HTTP status {0}")]
    Status(http::StatusCode),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ClientError::Decode(_) => FailureKind::Decode,
            _ => FailureKind::Transport,
        }
    }

    /// Display of this error and every source below it, joined with ": ".
    /// A source whose text the message already ends with is not repeated.
    pub fn detail(&self) -> String {
        let mut out = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            let text = cause.to_string();
            if !out.ends_with(&text) {
                out.push_str(": ");
                out.push_str(&text);
            }
            source = std::error::Error::source(cause);
        }
        out
    }
}

/// HTTP transport: GET a URL, get the response body. Non-2xx is an error.
/// Async so it does not block the runtime.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str) -> Result<Vec<u8>, ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Error, Debug)]
    #[error("client error (Connect)")]
    struct Outer(#[source] std::io::Error);

    #[test]
    fn detail_includes_the_whole_source_chain() {
        let refused = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "Connection refused");
        let err = ClientError::Transport(Box::new(Outer(refused)));
        assert_eq!(err.to_string(), "transport error: client error (Connect)");
        assert_eq!(
            err.detail(),
            "transport error: client error (Connect): Connection refused"
        );
    }

    #[test]
    fn detail_does_not_repeat_a_source_already_in_the_message() {
        let err = ClientError::Decode(serde_json::from_slice::<Vec<u8>>(b"{").unwrap_err());
        assert_eq!(err.detail(), err.to_string());
    }

    #[test]
    fn only_decode_errors_are_decode_failures() {
        let decode = serde_json::from_slice::<Vec<u8>>(b"{").unwrap_err();
        assert_eq!(ClientError::Decode(decode).kind(), FailureKind::Decode);
        assert_eq!(
            ClientError::Status(http::StatusCode::BAD_GATEWAY).kind(),
            FailureKind::Transport
        );
        assert_eq!(
            ClientError::Timeout(Duration::from_millis(5)).kind(),
            FailureKind::Transport
        );
        assert_eq!(
            ClientError::ServiceUnavailable("fortuneService".into()).kind(),
            FailureKind::Transport
        );
    }
}

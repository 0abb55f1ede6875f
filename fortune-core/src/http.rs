//! Async HTTP server: tokio + hyper. Dispatches every request to `App::handle_request`.
//! Host/port: env HOST/PORT (the fortune CLI lets --host/--port override them).

use crate::{App, CoreError};
use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE};
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response as HyperResponse, StatusCode};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Accept loop on an already bound listener. Returns once `shutdown` completes.
/// One task per connection; connection errors are logged, never returned.
pub async fn serve<F>(
    app: Arc<App>,
    listener: TcpListener,
    shutdown: F,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    F: Future<Output = ()> + Send,
{
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("shutting down");
                return Ok(());
            }
            accept_result = listener.accept() => {
                let (stream, peer) = match accept_result {
                    Ok(x) => x,
                    Err(e) => {
                        tracing::error!(error = %e, "accept error");
                        continue;
                    }
                };
                let io = TokioIo::new(stream);
                let app = Arc::clone(&app);
                tokio::task::spawn(async move {
                    let service = service_fn(move |req: Request<Incoming>| {
                        let app = Arc::clone(&app);
                        async move { handle(app, req).await }
                    });
                    if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                        tracing::error!(%peer, error = %e, "serve_connection error");
                    }
                });
            }
        }
    }
}

async fn handle(
    app: Arc<App>,
    req: Request<Incoming>,
) -> Result<HyperResponse<Full<Bytes>>, Infallible> {
    let method = req.method().to_string();
    let path = req.uri().path().trim_start_matches('/').to_string();
    let body = match req.into_body().collect().await {
        Ok(b) => b.to_bytes(),
        Err(e) => return Ok(error_response(CoreError::Validation(e.to_string()))),
    };
    tracing::debug!(%method, %path, "request");
    match app.handle_request(&method, &path, &body) {
        Ok(bytes) => Ok(json_response(StatusCode::OK, Bytes::from(bytes))),
        Err(e) => Ok(error_response(e)),
    }
}

fn json_response(status: StatusCode, body: Bytes) -> HyperResponse<Full<Bytes>> {
    let mut resp = HyperResponse::new(Full::new(body));
    *resp.status_mut() = status;
    resp.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    resp
}

/// NotFound -> 404, anything else -> 400. Body: {"error": message}.
fn error_response(e: CoreError) -> HyperResponse<Full<Bytes>> {
    let status = match &e {
        CoreError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_REQUEST,
    };
    let body = serde_json::json!({ "error": e.to_string() });
    json_response(status, Bytes::from(body.to_string()))
}

/// Reads host and port from env HOST/PORT, falling back to the given defaults.
pub fn host_port_from_env(default_host: &str, default_port: u16) -> (String, u16) {
    let host = std::env::var("HOST").unwrap_or_else(|_| default_host.to_string());
    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default_port);
    (host, port)
}

/// Completes when `signal` does. A signal that cannot be installed also ends
/// the wait, so it is logged rather than dropped.
async fn shutdown_signal<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        tracing::error!(error = %e, "failed to install Ctrl-C handler");
    }
}

/// Run the server on its own multi-thread runtime until Ctrl-C.
pub fn run(
    app: Arc<App>,
    host: &str,
    port: u16,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = format!("{}:{}", host, port);
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    rt.block_on(async move {
        let listener = TcpListener::bind(&addr).await?;
        tracing::info!(%addr, "listening");
        serve(app, listener, shutdown_signal(tokio::signal::ctrl_c()))
        .await
    })
}

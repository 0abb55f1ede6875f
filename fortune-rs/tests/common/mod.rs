//! Shared test helpers: a real fortune service on 127.0.0.1:0 and a client pointed at it.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use fortune_core::http::serve;
use fortune_rs::{
    App, ConfigSource, CoreError, Fortune, FortuneServiceClient, FortuneServiceConfig,
    FortunesController, InMemoryFortuneRepository, StaticDiscovery,
};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Running server; dropping it stops the accept loop.
pub struct Provider {
    pub addr: SocketAddr,
    _stop: oneshot::Sender<()>,
}

pub async fn spawn_app(app: App) -> Provider {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(serve(Arc::new(app), listener, async move {
        let _ = rx.await;
    }));
    Provider { addr, _stop: tx }
}

pub async fn spawn_fortunes(fortunes: Vec<Fortune>) -> Provider {
    let mut app = App::new();
    app.register(&mut FortunesController::new(
        InMemoryFortuneRepository::with_fortunes(fortunes),
    ))
    .unwrap();
    spawn_app(app).await
}

/// Provider whose endpoints answer 200 with the given raw bodies.
pub async fn spawn_raw(all: &'static [u8], random: &'static [u8]) -> Provider {
    let mut app = App::new();
    app.get(
        "api/fortunes/all",
        Box::new(move |_: &[u8]| -> Result<Vec<u8>, CoreError> { Ok(all.to_vec()) }),
    )
    .unwrap();
    app.get(
        "api/fortunes/random",
        Box::new(move |_: &[u8]| -> Result<Vec<u8>, CoreError> { Ok(random.to_vec()) }),
    )
    .unwrap();
    spawn_app(app).await
}

/// An address nothing listens on.
pub async fn dead_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

pub fn client_at(addr: SocketAddr) -> FortuneServiceClient {
    client_with(addr, FortuneServiceConfig::default())
}

pub fn client_with(addr: SocketAddr, config: impl ConfigSource + 'static) -> FortuneServiceClient {
    let discovery =
        StaticDiscovery::from_slice(&[("fortuneService", format!("http://{}", addr).as_str())]);
    FortuneServiceClient::new(Arc::new(discovery), config)
}

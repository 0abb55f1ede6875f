//! Example: fortune service and a discovery-backed client in one process.

use std::sync::Arc;

use fortune_core::http::serve;
use fortune_rs::{
    App, FortuneServiceClient, FortuneServiceConfig, FortunesController,
    InMemoryFortuneRepository, StaticDiscovery,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter("debug")
        .init();

    let mut app = App::new();
    app.register(&mut FortunesController::new(InMemoryFortuneRepository::default()))?;
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (stop, stopped) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(serve(Arc::new(app), listener, async move {
        let _ = stopped.await;
    }));

    let base = format!("http://{}", addr);
    let discovery = StaticDiscovery::from_slice(&[("fortuneService", base.as_str())]);
    let client = FortuneServiceClient::new(Arc::new(discovery), FortuneServiceConfig::default());

    for fortune in client.fetch_all().await {
        println!("{}", fortune);
    }
    if let Some(fortune) = client.fetch_random().await {
        println!("random: {}", fortune);
    }

    let _ = stop.send(());
    server.await??;
    Ok(())
}

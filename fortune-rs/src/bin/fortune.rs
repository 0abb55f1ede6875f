//! CLI for fortune-rs: run the fortune service, or fetch from it through discovery.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use fortune_core::http::host_port_from_env;
use fortune_rs::{
    load_config, App, FortuneServiceClient, FortunesController, InMemoryFortuneRepository,
    StaticDiscovery,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fortune")]
#[command(about = "Fortune service and discovery-backed client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve GET /api/fortunes/all and GET /api/fortunes/random.
    Serve {
        /// Overrides env HOST (default 127.0.0.1)
        #[arg(long)]
        host: Option<String>,
        /// Overrides env PORT (default 5000)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Fetch all fortunes.
    All {
        /// Base URL registered in discovery for the configured service name (e.g. http://127.0.0.1:5000)
        #[arg(long)]
        service_url: String,
    },
    /// Fetch one random fortune.
    Random {
        /// Base URL registered in discovery for the configured service name
        #[arg(long)]
        service_url: String,
    },
}

fn client(service_url: &str) -> Result<FortuneServiceClient, Box<dyn std::error::Error + Send + Sync>> {
    let config = load_config()?;
    let discovery = StaticDiscovery::from_slice(&[(config.address.as_str(), service_url)]);
    Ok(FortuneServiceClient::new(Arc::new(discovery), config))
}

fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve { host, port } => {
            let (env_host, env_port) = host_port_from_env("127.0.0.1", 5000);
            let host = host.unwrap_or(env_host);
            let port = port.unwrap_or(env_port);
            let mut app = App::new();
            app.register(&mut FortunesController::new(InMemoryFortuneRepository::default()))?;
            app.run(&host, port)
        }
        Commands::All { service_url } => {
            let client = client(&service_url)?;
            let fortunes = runtime()?.block_on(client.fetch_all());
            println!("{}", serde_json::to_string_pretty(&fortunes)?);
            Ok(())
        }
        Commands::Random { service_url } => {
            let client = client(&service_url)?;
            match runtime()?.block_on(client.fetch_random()) {
                Some(fortune) => println!("{}", serde_json::to_string_pretty(&fortune)?),
                None => println!("null"),
            }
            Ok(())
        }
    }
}

//! Web entry point for AQUARIA.
//!
//! Run with: cargo run --bin aquaria-web
//!
//! Then POST fish pools to http://127.0.0.1:8080/breed.

use clap::Parser;

use aquaria::{web::run_server, Config};
use std::net::SocketAddr;

#[derive(Parser)]
#[command(name = "aquaria-web")]
#[command(about = "AQUARIA - genetic fish breeding service")]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Address to bind the server to (overrides config and LISTEN_ADDR)
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    // Load or create default config
    let config = load_config(&args.config);

    // Bind precedence: --bind, then LISTEN_ADDR, then config file
    let bind_addr = args
        .bind
        .or_else(|| std::env::var("LISTEN_ADDR").ok())
        .unwrap_or_else(|| config.server.listen_addr.clone());

    let bind: SocketAddr = bind_addr
        .parse()
        .map_err(|e| format!("Invalid bind address '{}': {}", bind_addr, e))?;

    // Run the server
    run_server(config, bind).await
}

/// Load configuration from file or use default
fn load_config(config_path: &str) -> Config {
    if let Ok(config) = Config::from_file(config_path) {
        log::info!("Loaded config from: {}", config_path);
        return config;
    }

    let paths = ["config.yaml", "aquaria.yaml", "../config.yaml"];
    for path in paths {
        if let Ok(config) = Config::from_file(path) {
            log::info!("Loaded config from: {}", path);
            return config;
        }
    }

    log::info!("Using default configuration");
    Config::default()
}

//! Railway registry HTTP server.
//!
//! ```sh
//! cargo run --bin railways_server -- --port 9000
//! RUST_LOG=railways=debug cargo run --bin railways_server
//! ```

use std::net::IpAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use railways::services::{run_server, WebServerConfig};
use railways::{Config, LogConfig, Registry, WebConfig};

/// Railway registry HTTP server
#[derive(Parser, Debug)]
#[command(name = "railways_server")]
#[command(about = "Serve the train/station registry over HTTP")]
struct Args {
    /// Address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    bind: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value_t = railways::config::DEFAULT_PORT)]
    port: u16,

    /// Disable permissive CORS headers
    #[arg(long)]
    no_cors: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = railways::config::DEFAULT_LOG_FILTER)]
    log_filter: String,
}

impl Args {
    fn into_config(self) -> Config {
        Config::default()
            .with_web(
                WebConfig::default()
                    .with_bind(self.bind)
                    .with_port(self.port)
                    .with_cors(!self.no_cors),
            )
            .with_log(LogConfig::default().with_filter(&self.log_filter))
    }
}

fn init_tracing(log: &LogConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log.filter))
        .context("invalid log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Args::parse().into_config();
    init_tracing(&config.log)?;

    let registry = Arc::new(Registry::new());
    let web_config = WebServerConfig::from_config(&config.web);

    tracing::info!(
        addr = %web_config.addr,
        cors = web_config.cors_permissive,
        "starting railway registry"
    );

    run_server(registry, web_config)
        .await
        .context("HTTP server failed")
}

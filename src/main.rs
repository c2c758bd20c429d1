//! payroll-engine - HTTP service computing agent pay statements
//!
//! Loads the payroll configuration directory and serves the JSON API.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;

/// payroll-engine - Commission payroll for telemarketing agents
#[derive(Parser, Debug)]
#[command(name = "payroll-engine")]
#[command(about = "Commission payroll for telemarketing agents", long_about = None)]
struct Args {
    /// Configuration directory (or set PAYROLL_CONFIG env var)
    #[arg(short, long, env = "PAYROLL_CONFIG", default_value = "./config/iceland")]
    config: PathBuf,

    /// Address to listen on (or set PAYROLL_BIND env var)
    #[arg(short, long, env = "PAYROLL_BIND", default_value = "0.0.0.0:3000")]
    bind: String,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "payroll-engine starting");

    let config = ConfigLoader::load(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;

    let listener = TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;

    info!(address = %args.bind, "Listening");

    axum::serve(listener, create_router(AppState::new(config)))
        .await
        .context("Server error")
}

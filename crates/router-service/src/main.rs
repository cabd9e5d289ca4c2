//! Main entry point for the deposit router service.
//!
//! Loads configuration, wires the router's boundaries (quote provider, chain
//! reader, yield feed) and serves the HTTP API until interrupted.

use clap::Parser;
use router_config::Config;
use router_core::{DepositRouter, RouterBuilder};
use std::path::PathBuf;

mod apis;
mod error;
mod server;

/// Command-line arguments for the deposit router.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config/router.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	use tracing_subscriber::{fmt, EnvFilter};

	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

	fmt()
		.with_env_filter(env_filter)
		.with_thread_ids(true)
		.with_target(true)
		.init();

	tracing::info!("Started deposit router");

	let config_path = args
		.config
		.to_str()
		.ok_or("Configuration path is not valid UTF-8")?;
	let config = Config::from_file(config_path).await?;
	tracing::info!("Loaded configuration [{}]", config.router.id);

	let router = build_router(config.clone())?;

	// Yields refresh in the background.
	let refresh_task = router.yield_service().spawn_refresh_loop();

	match config.api.clone().filter(|api| api.enabled) {
		Some(api_config) => {
			tokio::select! {
				result = server::start_server(api_config, router, config) => {
					tracing::info!("API server finished");
					result?;
				}
				_ = tokio::signal::ctrl_c() => {
					tracing::info!("Received shutdown signal");
				}
			}
		},
		None => {
			tracing::warn!("API server disabled in configuration, nothing to serve");
		},
	}

	refresh_task.abort();
	tracing::info!("Stopped deposit router");
	Ok(())
}

fn build_router(config: Config) -> Result<DepositRouter, Box<dyn std::error::Error>> {
	Ok(RouterBuilder::new(config).build()?)
}

pub mod routes;
pub mod state;

use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;
use color_eyre::eyre;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;
use linkup_config::Config;

#[derive(Debug, Parser)]
#[command(version, rename_all = "kebab")]
pub struct Args {
	/// Path to the TOML config file.
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = linkup_config::load(&args.config)?;

	init_tracing(&config);

	let http_addr = http_addr(&config)?;
	let app = routes::router(AppState::new(config).await?);
	let listener = TcpListener::bind(http_addr).await?;

	tracing::info!(http_addr = %listener.local_addr()?, "HTTP server listening.");

	axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

	tracing::info!("HTTP server stopped.");

	Ok(())
}

fn http_addr(config: &Config) -> color_eyre::Result<SocketAddr> {
	let addr: SocketAddr = config.service.http_bind.parse()?;

	if config.security.bind_localhost_only && !addr.ip().is_loopback() {
		return Err(eyre::eyre!(
			"http_bind must be a loopback address when bind_localhost_only is true."
		));
	}

	Ok(addr)
}

fn init_tracing(config: &Config) {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
	if let Err(err) = tokio::signal::ctrl_c().await {
		tracing::error!(error = %err, "Failed to listen for the shutdown signal.");

		std::future::pending::<()>().await;
	}
}

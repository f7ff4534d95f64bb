mod logging;
mod routes;
mod singleton;
mod state;

use anyhow::Result;
use clap::Parser;
use ferien_core::config::PlannerConfig;
use std::net::SocketAddr;
use tracing::info;

use crate::state::AppState;

#[derive(Parser)]
#[command(name = "ferien-server")]
#[command(about = "HTTP backend for the Ferienplaner")]
struct Args {
    /// Port to listen on (defaults to the configured port)
    #[arg(long)]
    port: Option<u16>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = PlannerConfig::load()?;
    let port = args.port.unwrap_or(config.port);

    // One instance per port
    let _lock = singleton::acquire_lock(port)?;

    let state = AppState::from_config(&config)?;
    let app = routes::app(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, data = %config.data_path().display(), "ferien-server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

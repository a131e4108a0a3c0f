//! bundle-board - trip card record-keeping service

use anyhow::Result;
use bundle_board::{build_router, AppState};
use bundle_common::config;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "bundle-board", about = "Trip card board service")]
struct Args {
    /// Root data folder (platform default when omitted)
    #[arg(long, env = "BUNDLE_BOARD_ROOT")]
    root_folder: Option<PathBuf>,

    /// HTTP listen port
    #[arg(long, env = "BUNDLE_BOARD_PORT", default_value_t = 3000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber before anything that can log
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately for instant startup feedback
    info!(
        "Starting BundleBoard (bundle-board) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let root_folder = config::resolve_root_folder(args.root_folder.as_deref());
    let db_path = config::database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    let pool = bundle_board::db::connect(&db_path).await?;
    info!("✓ Connected to database");

    let state = AppState::new(pool);
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| bundle_common::Error::Http(format!("Failed to bind to {}: {}", addr, e)))?;
    info!("bundle-board listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use fickpengar::api::{AppState, create_router};
use fickpengar::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "fickpengar",
    about = "Serve the pocket-money funnel calculator over HTTP",
    version
)]
struct Cli {
    /// Configuration directory with defaults.yaml and chores.yaml (built-in Swedish values when omitted)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    /// Port to bind the HTTP server to
    #[arg(long, default_value_t = 3000)]
    port: u16,
    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&cli.log_level)?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();

    let config = match &cli.config {
        Some(dir) => ConfigLoader::load(dir)?,
        None => ConfigLoader::builtin(),
    };
    info!(
        config = %cli.config.as_ref().map_or("builtin".to_string(), |dir| dir.display().to_string()),
        "Configuration ready"
    );

    let app = create_router(AppState::new(config));

    let addr = format!("{}:{}", cli.host, cli.port).parse::<SocketAddr>()?;
    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

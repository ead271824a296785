use anyhow::Result;
use clap::Parser;

use hashsrv::config::{Args, ServerConfig};
use hashsrv::http;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = ServerConfig::load(&args)?;

    let server = tokio::spawn(http::serve(config.listen, args.verbose));

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    server.abort();

    Ok(())
}

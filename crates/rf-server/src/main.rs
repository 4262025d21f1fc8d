//! rf-server entry point.

use rf_server::{RfControlServer, ServerSettings};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = ServerSettings::load()?;
    RfControlServer::new(settings).serve().await
}

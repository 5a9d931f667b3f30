use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use event_sink::config::{AppConfig, ServerArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "event_sink=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting event sink");

    let args = ServerArgs::parse();
    let config = AppConfig::from_args(&args)?;
    info!("Configuration loaded, logging events to {:?}", config.log_path);

    event_sink::server::run(config).await
}

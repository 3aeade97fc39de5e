use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mstreamb0t::cli::Cli;
use mstreamb0t::config::Config;
use mstreamb0t::runner::Runner;
use mstreamb0t::shutdown;

/// Initialize tracing, honouring `RUST_LOG` when set.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "mstreamb0t=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = Config::from_env(cli)?;
    config.ensure_config_dir()?;

    let runner = Runner::new(&config);
    runner
        .run(async {
            let name = shutdown::signal().await;
            tracing::info!("Received {}, exiting.", name);
        })
        .await?;

    Ok(())
}

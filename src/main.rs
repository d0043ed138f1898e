//! `amortization-server`: serves the calculator over HTTP.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use french_amortization::config::Settings;
use french_amortization::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load settings")?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.log_filter)
            .with_context(|| format!("invalid log filter {:?}", settings.log_filter))?,
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    server::serve(&settings).await
}

//! Logging setup for the runner.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry(verbose: bool) -> Result<()> {
    let default_filter = if verbose {
        "info,alife_world=debug,alife_runner=debug"
    } else {
        "info,alife_world=info,alife_runner=debug"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    Ok(())
}

//! Tracing subscriber setup.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a stderr subscriber. `RUST_LOG` wins over the verbosity flag.
pub fn init_tracing_subscriber(verbose: bool) -> anyhow::Result<()> {
    let default_directive = if verbose { "medsum=debug" } else { "medsum=info" };
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_directive))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()?;

    Ok(())
}

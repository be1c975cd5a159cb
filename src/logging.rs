use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging for the compwiz CLI
///
/// Logs go to stderr so they never interleave with prompt rendering on stdout.
/// `RUST_LOG` takes precedence; otherwise `--verbose` selects debug level and
/// the default is warnings only.
pub fn init(verbose: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    tracing::debug!("Logging initialized");

    Ok(())
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "compwiz=debug" } else { "compwiz=warn" }
}

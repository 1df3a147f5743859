use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wrkit_core::constants::WRKIT_LOG_VAR;

/// Install the stderr fmt subscriber.
///
/// The filter comes from `WRKIT_LOG` when set, otherwise `warn`, or `info`
/// with `--verbose`. Stdout stays reserved for progress lines.
pub fn init(verbose: bool) -> eyre::Result<()> {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_env(WRKIT_LOG_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .try_init()?;
    Ok(())
}

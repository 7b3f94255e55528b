use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber on stderr. `RUST_LOG` wins over `verbose` when set.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))
}

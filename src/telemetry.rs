use tracing_subscriber::{EnvFilter, layer::SubscriberExt};

/// Builds the subscriber: `RUST_LOG` wins, otherwise `debug` when verbose
/// and `info` by default. Logs go to stderr so command output stays clean.
pub fn get_subscriber(verbose: bool) -> impl tracing::Subscriber + Send + Sync {
    let default_filter = if verbose { "unilink=debug,info" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose);

    tracing_subscriber::Registry::default()
        .with(env_filter)
        .with(stderr_log)
}

pub fn init_subscriber(verbose: bool) -> anyhow::Result<()> {
    tracing::subscriber::set_global_default(get_subscriber(verbose))?;
    Ok(())
}

use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber. `RUST_LOG` overrides the `info` default.
///
/// Stdout is left alone because `check-dex-records` prints its report there.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

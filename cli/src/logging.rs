use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Install the console subscriber.
///
/// Logs go to stderr so rendered posts on stdout stay clean. `RUST_LOG`
/// overrides the level chosen by `verbose`.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("posts_cli={level},posts_core={level},warn")));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_filter(env_filter);

    // try_init: tests may have installed a subscriber already.
    if tracing_subscriber::registry().with(console_layer).try_init().is_ok() {
        tracing::debug!(level, "logging initialized");
    }
}

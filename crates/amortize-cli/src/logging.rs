use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a stderr subscriber for this process.
///
/// `RUST_LOG` takes precedence over `level`. Stdout is left to the calculation output.
pub fn init_logging(level: &str) {
    let default_filter = format!("amortize={level},amortize_core={level}");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init();

    if installed.is_ok() {
        tracing::debug!(filter = %default_filter, "logging initialized");
    }
}

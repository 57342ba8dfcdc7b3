use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// `RUST_LOG` overrides the default `info` level. Records emitted through the
/// `log` facade by the library crates are forwarded to the same output.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
    {
        eprintln!("Failed to install logger: {err}");
    }
}

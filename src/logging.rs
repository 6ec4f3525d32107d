use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber used by the binaries
///
/// Defaults to `warn`; `RUST_LOG` overrides it. Stdout stays reserved for
/// generated code and diagnostics.
pub fn init_logging() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .try_init();
}

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Installs the global fmt subscriber. Defaults to `warn` so log lines don't
/// drown the terminal report; override with `RUST_LOG`.
pub fn init() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")
}

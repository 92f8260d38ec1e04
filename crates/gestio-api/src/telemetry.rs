//! Telemetry initialization

use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initialize tracing for the API process.
///
/// Honors `RUST_LOG` when set; otherwise defaults to debug logging for the
/// gestio crates plus tower-http request traces.
pub fn init_telemetry() -> Result<(), anyhow::Error> {
    // Console: compact format (message string for convenience).
    let console_fmt = tracing_subscriber::fmt::layer().event_format(
        Format::default()
            .compact()
            .with_target(false)
            .without_time(),
    );
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "gestio_api=debug,gestio_store=debug,gestio_client=debug,tower_http=debug".into()
        }))
        .with(console_fmt)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to initialize tracing: {}", err))?;

    Ok(())
}

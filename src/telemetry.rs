//! Telemetry helpers for applications embedding `footprint-rs`.
//!
//! The renderers only emit `tracing` events; installing a subscriber is left
//! to the host. `init_default_tracing` is a convenience for demos and tests.

/// Installs a compact `tracing` fmt subscriber when the `telemetry` feature is
/// enabled.
///
/// The filter is read from `RUST_LOG` and falls back to `info`. Returns `false`
/// when the feature is disabled or a global subscriber was already set by the
/// host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

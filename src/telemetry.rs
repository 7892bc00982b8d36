//! Opt-in tracing setup for hosts that have no subscriber of their own.
//!
//! The engine emits `tracing` events on the zoom, reset and scale-update
//! paths regardless; nothing here is required to use the crate.

/// Installs a compact global subscriber filtered by the given directive
/// string (`RUST_LOG` overrides it when set).
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_tracing_with_filter(default_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = default_filter;
        false
    }
}

/// [`init_tracing_with_filter`] at `info` level.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter("info")
}

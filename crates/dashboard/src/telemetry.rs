//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing with `EnvFilter` and a fmt layer.
///
/// Defaults to info level for the dashboard crates if `RUST_LOG` is not
/// set. Safe to call more than once; only the first call installs a
/// subscriber.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ledger_dashboard=info,ledger_core=info".into());

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

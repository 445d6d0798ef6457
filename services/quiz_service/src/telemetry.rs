//! services/quiz_service/src/telemetry.rs
//!
//! Logging setup shared by the service binaries.

use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global `tracing` subscriber at the configured level.
///
/// Returns `false` when a subscriber was already installed.
pub fn init_tracing(level: Level) -> bool {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}

//! Environment/runtime helpers
//!
//! Sanity checks run once at startup.

use tracing::warn;

/// Warn when the configured static bundle directory is missing.
/// Returns whether the directory is usable so the router can skip the fallback.
pub async fn check_static_dir(static_dir: &str) -> bool {
    match tokio::fs::metadata(static_dir).await {
        Ok(meta) if meta.is_dir() => true,
        Ok(_) => {
            warn!(%static_dir, "static_dir is not a directory; static assets disabled");
            false
        }
        Err(_) => {
            warn!(%static_dir, "static assets directory not found; static assets disabled");
            false
        }
    }
}

//! Periodic database ping so hosted databases that sleep when idle stay warm.

use std::time::Duration;

use sea_orm::DatabaseConnection;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Spawn the ping loop. The first ping happens one full interval after start.
pub fn spawn(db: DatabaseConnection, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match db.ping().await {
                Ok(()) => debug!(event = "keepalive_ping", "database ping ok"),
                Err(e) => warn!(event = "keepalive_failed", error = %e, "database ping failed"),
            }
        }
    })
}

use std::{net::SocketAddr, time::Duration};

use axum::Router;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use configs::AppConfig;
use models::db::{connect_with_config, DatabaseConfig};

use crate::auth::ServerState;
use crate::errors::StartupError;
use crate::routes;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Migrate when configured and create the bootstrap admin if it is missing.
pub async fn prepare(db: &DatabaseConnection, cfg: &AppConfig, state: &ServerState) -> anyhow::Result<()> {
    if cfg.database.auto_migrate {
        migration::Migrator::up(db, None).await?;
        info!(event = "migrations_applied", "database schema up to date");
    }
    if let Some((email, password)) = cfg.auth.bootstrap_admin() {
        if state.auth.bootstrap_admin(email, &cfg.auth.admin_name, password).await?.is_none() {
            info!(%email, "bootstrap admin already present");
        }
    }
    Ok(())
}

/// Router for a prepared state; the static bundle is mounted only when present.
pub async fn app(cfg: &AppConfig, state: ServerState) -> Router {
    let mut static_dir = cfg.server.static_dir.as_deref();
    if let Some(dir) = static_dir {
        if !common::env::check_static_dir(dir).await {
            static_dir = None;
        }
    }
    routes::build_router(state, build_cors(), static_dir)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut s) => { s.recv().await; }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!(event = "shutdown_signal", "shutting down");
}

/// Public entry: load config, connect, prepare the database and serve until a
/// shutdown signal arrives.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = connect_with_config(&DatabaseConfig::from(&cfg.database)).await?;
    let state = ServerState::new(db.clone(), (&cfg.auth).into());
    prepare(&db, &cfg, &state).await?;

    let keepalive = cfg
        .keepalive
        .enabled
        .then(|| service::keepalive::spawn(db.clone(), Duration::from_secs(cfg.keepalive.interval_secs)));

    let app = app(&cfg, state).await;
    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    if let Some(handle) = keepalive {
        handle.abort();
    }
    db.close().await?;
    Ok(())
}

use axum::{middleware, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::auth::{self as guard, ServerState};
use crate::openapi::ApiDoc;

pub mod auth;
pub mod categories;
pub mod clients;
pub mod experiences;
pub mod hero_slides;
pub mod messages;
pub mod projects;
pub mod services;
pub mod settings;
pub mod skills;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Wrap every route of `router` in the admin check.
pub(crate) fn admin_only(state: &ServerState, router: Router<ServerState>) -> Router<ServerState> {
    router.route_layer(middleware::from_fn_with_state(state.clone(), guard::require_admin))
}

/// Build the full application router: public reads, admin mutations, docs and
/// the optional static bundle for everything else.
pub fn build_router(state: ServerState, cors: CorsLayer, static_dir: Option<&str>) -> Router {
    let auth_routes = Router::new()
        .route("/api/auth/login", axum::routing::post(auth::login))
        .merge(
            Router::new()
                .route("/api/auth/me", get(auth::me))
                .route_layer(middleware::from_fn_with_state(state.clone(), guard::require_user)),
        );

    let mut app = Router::new()
        .route("/health", get(health))
        .merge(auth_routes)
        .merge(categories::routes(&state))
        .merge(clients::routes(&state))
        .merge(hero_slides::routes(&state))
        .merge(projects::routes(&state))
        .merge(services::routes(&state))
        .merge(skills::routes(&state))
        .merge(experiences::routes(&state))
        .merge(messages::routes(&state))
        .merge(settings::routes(&state))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    if let Some(dir) = static_dir {
        let index = format!("{}/index.html", dir.trim_end_matches('/'));
        app = app.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    app.layer(cors).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
            .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
    )
}

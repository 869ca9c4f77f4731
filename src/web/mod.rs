pub mod routes;

use std::sync::Arc;

use axum::extract::FromRef;
use axum::routing::{get, patch};
use axum::Router;
use http::header::{HeaderValue, CACHE_CONTROL};
use sqlx::SqlitePool;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::services::upstream_cache::UpstreamCache;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub upstream_cache: Arc<UpstreamCache>,
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(routes::public::index_handler))
        .route("/admin", get(routes::admin::dashboard_handler))
        .route("/admin/export", get(routes::admin::export_handler))
        // Guest API
        .route("/api/guests", get(routes::guests::list_guests_handler))
        .route(
            "/api/guests/no-family",
            get(routes::guests::list_unassigned_handler),
        )
        .route(
            "/api/guests/family/:family_id",
            get(routes::guests::list_family_handler),
        )
        .route(
            "/api/guests/:guest_id",
            patch(routes::guests::update_guest_handler),
        )
        .route(
            "/api/guest-changes",
            get(routes::guest_changes::history_handler),
        )
        .route("/api/stats", get(routes::guests::stats_handler))
        // Upstream proxies
        .route(
            "/api/entertainment/events",
            get(routes::entertainment::events_handler),
        )
        .route(
            "/api/entertainment/posts",
            get(routes::entertainment::posts_handler),
        )
        .route("/api/ai/hen", get(routes::ai::hen_handler))
        .route("/api/ai/stag", get(routes::ai::stag_handler))
        // Static files
        .nest_service("/assets", ServeDir::new("assets"))
        // Layers
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CatchPanicLayer::new())
        // State
        .with_state(state)
}

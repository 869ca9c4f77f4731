use askama::Template;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use sqlx::SqlitePool;
use tracing::warn;

use crate::services::admin_service;

#[derive(Template)]
#[template(path = "admin.html")]
pub struct AdminDashboardTemplate {
    pub dashboard: admin_service::DashboardView,
}

pub async fn dashboard_handler(State(pool): State<SqlitePool>) -> impl IntoResponse {
    let dashboard = match admin_service::build_dashboard(&pool).await {
        Ok(d) => d,
        Err(e) => {
            warn!(error = %e, "admin dashboard load failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let template = AdminDashboardTemplate { dashboard };
    Html(template.render().unwrap()).into_response()
}

pub async fn export_handler(State(pool): State<SqlitePool>) -> Response {
    let csv = match admin_service::render_guest_csv(&pool).await {
        Ok(csv) => csv,
        Err(e) => {
            warn!(error = %e, "guest export failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=guests.csv",
            ),
        ],
        csv,
    )
        .into_response()
}

//! HTTP surface of the dashboard: the page plus the JSON endpoints it calls

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::dashboard::{Dashboard, DashboardError, InitialView, Selection};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    dashboard: Arc<Dashboard>,
    initial_view: Arc<InitialView>,
}

impl AppState {
    /// Loads the default currency once so the date pickers can be bounded.
    pub async fn initialize(dashboard: Dashboard) -> Result<Self> {
        let initial_view = dashboard
            .initial_view()
            .await
            .context("Failed to load the default currency series")?;
        info!(
            currency = %initial_view.default_currency,
            min_date = ?initial_view.min_date,
            max_date = ?initial_view.max_date,
            "Loaded initial date bounds"
        );

        Ok(AppState {
            dashboard: Arc::new(dashboard),
            initial_view: Arc::new(initial_view),
        })
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, Json(ErrorResponse { error: self.1 })).into_response()
    }
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::UnknownCurrency(_) => {
                warn!(error = %err, "Rejected update");
                ApiError(StatusCode::BAD_REQUEST, err.to_string())
            }
            // The page only learns that rendering failed.
            DashboardError::Provider(_) => {
                error!(error = %err, "Update failed");
                ApiError(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to update the chart".to_string(),
                )
            }
        }
    }
}

/// GET / - Serve the dashboard page
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "OK" }))
}

/// GET /api/catalog - Currency choices and the default date bounds
async fn get_catalog(State(state): State<AppState>) -> Json<InitialView> {
    Json(state.initial_view.as_ref().clone())
}

/// GET /api/update - Refetch, filter and redraw for the given inputs
async fn get_update(
    State(state): State<AppState>,
    Query(selection): Query<Selection>,
) -> Result<impl IntoResponse, ApiError> {
    let update = state.dashboard.update(&selection).await?;
    Ok(Json(update))
}

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/catalog", get(get_catalog))
        .route("/update", get(get_update))
        .with_state(state);

    Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
}

/// Serves the dashboard on an already bound listener until the process stops.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    let addr = listener.local_addr()?;
    info!("Dashboard running on http://{addr}");

    axum::serve(listener, router(state))
        .await
        .context("Server terminated unexpectedly")
}

pub async fn bind(address: &str) -> Result<TcpListener> {
    TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind to address: {address}"))
}

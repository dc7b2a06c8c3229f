//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::PathRejection},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::domain::Bin;
use crate::store::StoreError;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Message returned for unparsable or out-of-range BINs.
pub const INVALID_BIN_MESSAGE: &str = "Invalid BIN type. It should be a number";

/// Message returned when neither the cache nor the provider know a BIN.
pub const BIN_NOT_FOUND_MESSAGE: &str = "BIN is not found. Please check the input and try again.";

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/lookup", get(lookup_page))
        .route("/api/:bin", get(lookup_bin))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Base URL of this server as seen by the client, for the usage examples.
fn api_base(headers: &HeaderMap) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost:3000");
    format!("http://{host}")
}

fn render(template: &IndexTemplate) -> Html<String> {
    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// Index page with the lookup form.
async fn index_page(headers: HeaderMap) -> impl IntoResponse {
    render(&IndexTemplate::new(&api_base(&headers)))
}

/// Lookup page: runs the lookup server side and renders the result.
async fn lookup_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<LookupPageRequest>,
) -> Response {
    let input = req.bin.unwrap_or_default();
    let page = IndexTemplate::new(&api_base(&headers)).with_bin(input.trim());

    let Ok(bin) = Bin::parse(&input) else {
        let page = page.with_error("Please enter a valid 6/8-digit BIN");
        return (StatusCode::BAD_REQUEST, render(&page)).into_response();
    };

    match state.lookup.lookup(bin).await {
        Ok(Some(result)) => render(&page.with_result(&result)).into_response(),
        Ok(None) => {
            let page = page.with_error(BIN_NOT_FOUND_MESSAGE);
            (StatusCode::NOT_FOUND, render(&page)).into_response()
        }
        Err(e) => {
            tracing::error!(%bin, error = %e, "lookup failed");
            let page = page.with_error("An error occurred while fetching BIN data");
            (StatusCode::INTERNAL_SERVER_ERROR, render(&page)).into_response()
        }
    }
}

/// JSON lookup endpoint.
async fn lookup_bin(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<LookupResponse>, AppError> {
    // Segments that don't decode to UTF-8 are invalid BINs too.
    let Path(raw) = path.map_err(|e| {
        tracing::debug!(error = %e, "rejected BIN path");
        AppError::InvalidBin
    })?;
    let bin = Bin::parse(&raw).map_err(|e| {
        tracing::debug!(error = %e, "rejected BIN");
        AppError::InvalidBin
    })?;

    let result = state
        .lookup
        .lookup(bin)
        .await?
        .ok_or(AppError::BinNotFound)?;

    Ok(Json(LookupResponse { data: result }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Path parameter is not a valid BIN
    InvalidBin,
    /// No cached record and no provider data
    BinNotFound,
    /// Anything else; details are logged, not returned
    Internal { message: String },
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::InvalidBin => (StatusCode::BAD_REQUEST, "INVALID_BIN", INVALID_BIN_MESSAGE),
            AppError::BinNotFound => (
                StatusCode::NOT_FOUND,
                "BIN_NOT_FOUND",
                BIN_NOT_FOUND_MESSAGE,
            ),
            AppError::Internal { message } => {
                tracing::error!("{message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error",
                )
            }
        };

        let status_name = status
            .canonical_reason()
            .unwrap_or("ERROR")
            .to_uppercase()
            .replace(' ', "_");

        let body = Json(ErrorResponse {
            status: status_name,
            code: status.as_u16(),
            error: error.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

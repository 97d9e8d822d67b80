//! Borrower dashboard route.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use lendview_core::access::can_view;
use lendview_core::dashboard::{build_dashboard, DashboardRequest};
use lendview_db::{BorrowerRepository, DashboardRepository};
use lendview_shared::types::DateRangePreset;

use crate::extractors::Requester;
use crate::AppState;

/// Creates the dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/borrowers/{borrower_id}/dashboard", get(get_dashboard))
}

/// Query parameters for the dashboard.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Date-range preset token.
    pub range: Option<String>,
    /// Free-text division filter.
    pub division: Option<String>,
}

fn not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "not_found", "message": "Borrower not found" })),
    )
        .into_response()
}

/// GET /borrowers/{borrower_id}/dashboard?range=&division=
async fn get_dashboard(
    State(state): State<AppState>,
    Path(borrower_id): Path<i64>,
    Query(query): Query<DashboardQuery>,
    Requester(ctx): Requester,
) -> impl IntoResponse {
    let borrower_repo = BorrowerRepository::new((*state.db).clone());
    let borrower_ref = match borrower_repo.find_ref(borrower_id).await {
        Ok(Some(reference)) => reference,
        Ok(None) => return not_found(),
        Err(err) => {
            error!(error = %err, "failed to resolve borrower");
            return internal_error();
        }
    };
    // Denied access takes the not-found shape so borrower existence never
    // leaks to unrelated requesters.
    if !can_view(&ctx, borrower_ref) {
        return not_found();
    }

    let dashboard_repo = DashboardRepository::new((*state.db).clone());
    let inputs = match dashboard_repo.load_inputs(borrower_id).await {
        Ok(Some(inputs)) => inputs,
        Ok(None) => return not_found(),
        Err(err) => {
            error!(error = %err, "failed to load dashboard inputs");
            return internal_error();
        }
    };

    let request = DashboardRequest {
        range: DateRangePreset::parse(query.range.as_deref().unwrap_or_default()),
        division: query.division,
        today: Utc::now().date_naive(),
    };
    let context = build_dashboard(&inputs, &request);
    (StatusCode::OK, Json(context)).into_response()
}

fn internal_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "internal_error", "message": "An error occurred" })),
    )
        .into_response()
}

//! Borrower listing and selection routes.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use lendview_core::access::{can_view, select_borrower, BorrowerRef};
use lendview_db::BorrowerRepository;

use crate::extractors::Requester;
use crate::AppState;

/// Creates the borrower routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/borrowers", get(list_borrowers))
        .route("/session/borrower", post(select_active_borrower))
}

/// One borrower listing entry.
#[derive(Debug, Serialize)]
pub struct BorrowerListEntry {
    /// Borrower id.
    pub id: i64,
    /// Company display name.
    pub company_name: Option<String>,
    /// Primary contact name.
    pub primary_contact: Option<String>,
}

/// GET /borrowers
///
/// Lists the borrowers visible to the requester.
async fn list_borrowers(
    State(state): State<AppState>,
    Requester(ctx): Requester,
) -> impl IntoResponse {
    let repo = BorrowerRepository::new((*state.db).clone());
    let records = match repo.list().await {
        Ok(records) => records,
        Err(err) => {
            error!(error = %err, "failed to list borrowers");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal_error", "message": "An error occurred" })),
            )
                .into_response();
        }
    };

    let visible: Vec<BorrowerListEntry> = records
        .into_iter()
        .filter(|record| {
            can_view(
                &ctx,
                BorrowerRef {
                    id: record.id,
                    company_id: record.company_id,
                },
            )
        })
        .map(|record| BorrowerListEntry {
            id: record.id,
            company_name: record.company_name,
            primary_contact: record.primary_contact,
        })
        .collect();

    (StatusCode::OK, Json(visible)).into_response()
}

/// Selection request body.
#[derive(Debug, Deserialize)]
pub struct SelectBorrowerBody {
    /// Borrower the requester wants to activate.
    pub borrower_id: i64,
    /// Currently selected borrower, if any.
    pub current: Option<i64>,
}

/// Selection response body.
#[derive(Debug, Serialize)]
pub struct SelectBorrowerResponse {
    /// Effective selection after applying the request.
    pub selected: Option<i64>,
}

/// POST /session/borrower
///
/// Applies a borrower selection. A denied request is ignored silently: the
/// previous selection comes back unchanged and no error is surfaced, so
/// the existence of other borrowers never leaks.
async fn select_active_borrower(
    State(state): State<AppState>,
    Requester(ctx): Requester,
    Json(body): Json<SelectBorrowerBody>,
) -> impl IntoResponse {
    let repo = BorrowerRepository::new((*state.db).clone());
    let selected = match repo.find_ref(body.borrower_id).await {
        Ok(Some(reference)) => select_borrower(&ctx, body.current, reference),
        // Unknown borrower: same silent behavior as a denied one.
        Ok(None) => body.current,
        Err(err) => {
            error!(error = %err, "failed to resolve borrower for selection");
            body.current
        }
    };

    (StatusCode::OK, Json(SelectBorrowerResponse { selected })).into_response()
}

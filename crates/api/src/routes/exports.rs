//! Borrowing-base workbook export route.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use tracing::error;

use lendview_core::access::can_view;
use lendview_db::BorrowerRepository;
use lendview_ingest::ExportService;

use crate::extractors::Requester;
use crate::AppState;

/// Creates the export routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/borrowers/{borrower_id}/export", get(export_borrower))
}

fn not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "not_found", "message": "Borrower not found" })),
    )
        .into_response()
}

/// GET /borrowers/{borrower_id}/export
async fn export_borrower(
    State(state): State<AppState>,
    Path(borrower_id): Path<i64>,
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
    if !can_view(&ctx, borrower_ref) {
        return not_found();
    }

    let service = ExportService::new((*state.db).clone());
    match service.export_workbook(borrower_id).await {
        Ok(buffer) => {
            let disposition = format!("attachment; filename=\"borrower-{borrower_id}-export.xlsx\"");
            (
                StatusCode::OK,
                [
                    (
                        header::CONTENT_TYPE,
                        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
                            .to_string(),
                    ),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                buffer,
            )
                .into_response()
        }
        Err(err) => {
            error!(error = %err, "failed to build export workbook");
            internal_error()
        }
    }
}

fn internal_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "internal_error", "message": "An error occurred" })),
    )
        .into_response()
}

//! Workbook import upload boundary.
//!
//! Validation happens before any parsing begins: extension, size, and an
//! explicit confirmation when a destructive clear is requested. Invoking
//! the endpoint with the wrong verb is rejected by the router with 405.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde_json::json;
use tracing::error;

use lendview_ingest::{ImportRequest, ImportService};
use lendview_shared::AppError;

use crate::AppState;

/// Hard cap for the multipart body, above the configured workbook limit.
const BODY_LIMIT_BYTES: usize = 64 * 1024 * 1024;

/// Creates the import routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/imports", post(upload_workbook))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
}

fn reject(message: &str) -> axum::response::Response {
    let error = AppError::UploadRejected(message.to_string());
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::BAD_REQUEST);
    (
        status,
        Json(json!({
            "status": "failed",
            "error": error.error_code(),
            "message": message,
        })),
    )
        .into_response()
}

fn truthy(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}

fn sanitize_file_stem(name: &str) -> String {
    let stem = name
        .rsplit('/')
        .next()
        .unwrap_or(name)
        .trim_end_matches(".xlsx")
        .trim_end_matches(".XLSX");
    let cleaned: String = stem
        .chars()
        .map(|ch| {
            if ch.is_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "import".to_string()
    } else {
        cleaned
    }
}

/// POST /imports
///
/// Multipart fields: `file` (required), `source_file`, `report_date`
/// (ISO date), `clear_existing`, `confirm_clear`.
async fn upload_workbook(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut file_name: Option<String> = None;
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut source_file: Option<String> = None;
    let mut report_date: Option<NaiveDate> = None;
    let mut clear_requested = false;
    let mut clear_confirmed = false;

    while let Ok(Some(field)) = multipart.next_field().await {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "file" => {
                file_name = field.file_name().map(ToString::to_string);
                match field.bytes().await {
                    Ok(bytes) => file_bytes = Some(bytes.to_vec()),
                    Err(err) => {
                        error!(error = %err, "failed to read upload body");
                        return reject("Upload could not be read.");
                    }
                }
            }
            "source_file" => {
                source_file = field.text().await.ok().filter(|text| !text.is_empty());
            }
            "report_date" => {
                report_date = field
                    .text()
                    .await
                    .ok()
                    .and_then(|text| NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok());
            }
            "clear_existing" => {
                clear_requested = field.text().await.map(|text| truthy(&text)).unwrap_or(false);
            }
            "confirm_clear" => {
                clear_confirmed = field.text().await.map(|text| truthy(&text)).unwrap_or(false);
            }
            _ => {}
        }
    }

    let Some(bytes) = file_bytes else {
        return reject("No file uploaded.");
    };
    let Some(name) = file_name else {
        return reject("No file uploaded.");
    };
    if !name.to_lowercase().ends_with(".xlsx") {
        return reject("Only .xlsx files are supported.");
    }
    let max_bytes = state.config.import.max_upload_mb * 1024 * 1024;
    if bytes.len() as u64 > max_bytes {
        return reject(&format!(
            "File too large. Max {}MB.",
            state.config.import.max_upload_mb
        ));
    }
    if clear_requested && !clear_confirmed {
        return reject("Please confirm clearing existing data.");
    }

    // Stage the upload on disk; the reader works from a path.
    let upload_dir = std::path::Path::new(&state.config.import.upload_dir);
    if let Err(err) = tokio::fs::create_dir_all(upload_dir).await {
        error!(error = %err, "failed to create upload directory");
        return reject("Upload could not be stored.");
    }
    let staged_name = format!(
        "{}-{}.xlsx",
        sanitize_file_stem(&name),
        Utc::now().timestamp_nanos_opt().unwrap_or_default()
    );
    let staged_path = upload_dir.join(staged_name);
    if let Err(err) = tokio::fs::write(&staged_path, &bytes).await {
        error!(error = %err, "failed to stage upload");
        return reject("Upload could not be stored.");
    }

    let service = ImportService::new((*state.db).clone());
    let outcome = service
        .import_file(&ImportRequest {
            path: staged_path,
            source_file: source_file.or(Some(name)),
            report_date,
            clear_existing: clear_requested,
        })
        .await;

    (StatusCode::OK, Json(outcome)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthy() {
        for value in ["true", "1", "yes", "on", " TRUE "] {
            assert!(truthy(value), "{value}");
        }
        for value in ["false", "0", "", "no"] {
            assert!(!truthy(value), "{value}");
        }
    }

    #[test]
    fn test_sanitize_file_stem() {
        assert_eq!(sanitize_file_stem("Q2 Report.xlsx"), "Q2_Report");
        assert_eq!(sanitize_file_stem("../../evil.xlsx"), "evil");
        assert_eq!(sanitize_file_stem(".xlsx"), "import");
    }
}

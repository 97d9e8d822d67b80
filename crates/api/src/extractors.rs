//! Request extractors.

use axum::{extract::FromRequestParts, http::request::Parts};

use lendview_core::access::RequesterContext;

/// Extracts the explicit requester context from request headers.
///
/// The aggregation layer takes no ambient session state; callers declare
/// their active company (`x-company-id`), their own borrower-profile link
/// (`x-borrower-id`), and elevated privilege (`x-elevated`). Absent headers
/// simply yield an empty context, which the access policy denies.
#[derive(Debug, Clone, Copy)]
pub struct Requester(pub RequesterContext);

impl<S> FromRequestParts<S> for Requester
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header_i64 = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<i64>().ok())
        };
        let elevated = parts
            .headers
            .get("x-elevated")
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| matches!(value.trim(), "1" | "true" | "yes"));

        Ok(Self(RequesterContext {
            company_id: header_i64("x-company-id"),
            borrower_id: header_i64("x-borrower-id"),
            elevated,
        }))
    }
}

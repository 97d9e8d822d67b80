//! Borrower visibility policy.
//!
//! A borrower is visible to a requester when the requester's active company
//! owns it, the requester's own borrower-profile link matches it, or the
//! requester carries elevated privilege. Denied selections are ignored
//! silently so the existence of other borrowers never leaks.

use serde::Deserialize;

/// Explicit requester context passed into every aggregation call; there is
/// no ambient session state.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RequesterContext {
    /// Active company the requester operates under.
    pub company_id: Option<i64>,
    /// Borrower the requester's own profile links to.
    pub borrower_id: Option<i64>,
    /// Staff/superuser privilege.
    pub elevated: bool,
}

/// Minimal borrower identity needed for the visibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorrowerRef {
    /// Borrower id.
    pub id: i64,
    /// Owning company id.
    pub company_id: i64,
}

/// Returns true when the requester may view the borrower.
#[must_use]
pub fn can_view(ctx: &RequesterContext, borrower: BorrowerRef) -> bool {
    if ctx.elevated {
        return true;
    }
    if ctx.company_id == Some(borrower.company_id) {
        return true;
    }
    ctx.borrower_id == Some(borrower.id)
}

/// Applies a borrower selection request: returns the new selection when
/// permitted, otherwise the current selection unchanged. Denial is silent.
#[must_use]
pub fn select_borrower(
    ctx: &RequesterContext,
    current: Option<i64>,
    requested: BorrowerRef,
) -> Option<i64> {
    if can_view(ctx, requested) {
        Some(requested.id)
    } else {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BORROWER: BorrowerRef = BorrowerRef {
        id: 7,
        company_id: 42,
    };

    #[test]
    fn test_owning_company_can_view() {
        let ctx = RequesterContext {
            company_id: Some(42),
            ..RequesterContext::default()
        };
        assert!(can_view(&ctx, BORROWER));
    }

    #[test]
    fn test_profile_link_can_view() {
        let ctx = RequesterContext {
            borrower_id: Some(7),
            ..RequesterContext::default()
        };
        assert!(can_view(&ctx, BORROWER));
    }

    #[test]
    fn test_elevated_can_view_anything() {
        let ctx = RequesterContext {
            elevated: true,
            ..RequesterContext::default()
        };
        assert!(can_view(&ctx, BORROWER));
    }

    #[test]
    fn test_unrelated_requester_cannot_view() {
        let ctx = RequesterContext {
            company_id: Some(99),
            borrower_id: Some(3),
            elevated: false,
        };
        assert!(!can_view(&ctx, BORROWER));
    }

    #[test]
    fn test_denied_selection_keeps_current_state() {
        let ctx = RequesterContext {
            company_id: Some(99),
            ..RequesterContext::default()
        };
        // No session state change, no error surfaced.
        assert_eq!(select_borrower(&ctx, Some(3), BORROWER), Some(3));
        assert_eq!(select_borrower(&ctx, None, BORROWER), None);
    }

    #[test]
    fn test_permitted_selection_updates_state() {
        let ctx = RequesterContext {
            company_id: Some(42),
            ..RequesterContext::default()
        };
        assert_eq!(select_borrower(&ctx, Some(3), BORROWER), Some(7));
    }
}

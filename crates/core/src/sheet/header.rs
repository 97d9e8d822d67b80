//! Column header normalization.
//!
//! Raw workbook headers are mapped to canonical lowercase snake_case field
//! names. A hand-curated alias table wins over the algorithmic transform so
//! that ambiguous abbreviations and symbol-heavy domain headers resolve to
//! the right field.

/// Text tokens that count as a blank cell.
pub(crate) const BLANK_STRINGS: &[&str] = &["", "-", "nan", "none", "\u{2013}", "\u{2014}"];

/// Returns true when the trimmed, lowercased text is a blank marker.
pub(crate) fn is_blank_text(text: &str) -> bool {
    let lowered = text.trim().to_lowercase();
    BLANK_STRINGS.contains(&lowered.as_str())
}

/// Curated aliases checked before the algorithmic transform.
///
/// Entries exist for headers the transform cannot resolve on its own:
/// currency/percent symbol columns, multi-word domain terms, and headers
/// whose literal text differs from the stored field name.
fn alias(header: &str) -> Option<&'static str> {
    let canonical = match header {
        "AsOfDate" => "as_of_date",
        "PctOfTotal" => "pct_of_total",
        "PctPastDue" => "pct_past_due",
        "CurrentAmt" => "current_amt",
        "PastDueAmt" => "past_due_amt",
        "ActualForecast" => "actual_forecast",
        "GrossMarginPct" => "gross_margin_pct",
        "GrossMarginDollars" => "gross_margin_dollars",
        "TTM_Sales" => "ttm_sales",
        "TTM_Sales_Prior" => "ttm_sales_prior",
        "Collateral Type" => "collateral_type",
        "Collateral Sub-Type" => "collateral_sub_type",
        "$ Limit" => "usd_limit",
        "% Limit" => "pct_limit",
        "FG_$" => "fg_usd",
        "FG_%Cost" => "fg_pct_cost",
        "RM_$" => "rm_usd",
        "RM_%Cost" => "rm_pct_cost",
        "WIP_$" => "wip_usd",
        "WIP_%Cost" => "wip_pct_cost",
        "Total_$" => "total_usd",
        "Total_%Cost" => "total_pct_cost",
        "Past Due >90 Days" => "past_due_gt_90_days",
        "Foreign" => "foreign_ar",
        _ => return None,
    };
    Some(canonical)
}

/// Collapses line breaks, unicode dashes, and repeated whitespace in a raw
/// header cell.
pub(crate) fn clean_header_text(raw: &str) -> String {
    if is_blank_text(raw) {
        return String::new();
    }
    let replaced: String = raw
        .chars()
        .map(|ch| match ch {
            '\n' | '\r' => ' ',
            '\u{2013}' | '\u{2014}' => '-',
            other => other,
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalizes a raw column header into a canonical snake_case field name.
///
/// Policy, in priority order: curated alias lookup, then the algorithmic
/// transform (camelCase split, symbol expansion, whitespace collapse,
/// lowercase), then a `col_` prefix for names that would start with a digit.
/// The result is deterministic and idempotent.
#[must_use]
pub fn normalize_header(raw: &str) -> String {
    let cleaned = clean_header_text(raw);
    if cleaned.is_empty() {
        return String::new();
    }
    if let Some(canonical) = alias(&cleaned) {
        return canonical.to_string();
    }

    let split = split_camel_case(&cleaned);

    let mut expanded = String::with_capacity(split.len() + 8);
    for ch in split.chars() {
        match ch {
            '%' => expanded.push_str(" pct "),
            '$' => expanded.push_str(" usd "),
            '-' | '/' => expanded.push('_'),
            '+' => expanded.push_str("_plus"),
            '(' | ')' => expanded.push(' '),
            other => expanded.push(other),
        }
    }

    let mut snake = String::with_capacity(expanded.len());
    let mut last_was_sep = true;
    for ch in expanded.trim().chars() {
        if ch.is_whitespace() || ch == '_' {
            if !last_was_sep {
                snake.push('_');
                last_was_sep = true;
            }
        } else {
            for lowered in ch.to_lowercase() {
                snake.push(lowered);
            }
            last_was_sep = false;
        }
    }
    let snake = snake.trim_matches('_').to_string();

    // Identifiers must not start with a digit.
    if snake.chars().next().is_some_and(|ch| ch.is_ascii_digit()) {
        format!("col_{snake}")
    } else {
        snake
    }
}

/// Inserts `_` at lower/digit → upper word boundaries: `NetSales` becomes
/// `Net_Sales`, `Trend_3M` becomes `Trend_3_M`.
fn split_camel_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    let mut prev: Option<char> = None;
    for ch in text.chars() {
        if ch.is_ascii_uppercase()
            && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit())
        {
            out.push('_');
        }
        out.push(ch);
        prev = Some(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("Main Type", "main_type")]
    #[case("SubType", "sub_type")]
    #[case("Beginning Collateral", "beginning_collateral")]
    #[case("NOLV %", "nolv_pct")]
    #[case("Pre-Reserve Collateral", "pre_reserve_collateral")]
    #[case("Ineligible % of AR", "ineligible_pct_of_ar")]
    #[case("Slow-Moving/Obsolete", "slow_moving_obsolete")]
    #[case("Damaged/Non-Saleable", "damaged_non_saleable")]
    #[case("In-Transit", "in_transit")]
    #[case("Trend_3M_Pct", "trend_3_m_pct")]
    #[case("Trend_TTM_Pct", "trend_ttm_pct")]
    #[case("Avg TTM ADO (Days)", "avg_ttm_ado_days")]
    #[case("91+", "col_91_plus")]
    #[case("0-30", "col_0_30")]
    fn test_algorithmic_transform(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_header(raw), expected);
    }

    #[rstest]
    #[case("AsOfDate", "as_of_date")]
    #[case("$ Limit", "usd_limit")]
    #[case("% Limit", "pct_limit")]
    #[case("FG_$", "fg_usd")]
    #[case("FG_%Cost", "fg_pct_cost")]
    #[case("Total_%Cost", "total_pct_cost")]
    #[case("Collateral Sub-Type", "collateral_sub_type")]
    #[case("Past Due >90 Days", "past_due_gt_90_days")]
    #[case("Foreign", "foreign_ar")]
    fn test_alias_table_wins(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_header(raw), expected);
    }

    #[test]
    fn test_blank_headers_normalize_to_empty() {
        for raw in ["", "  ", "-", "nan", "None", "\u{2014}"] {
            assert_eq!(normalize_header(raw), "", "raw: {raw:?}");
        }
    }

    #[test]
    fn test_line_breaks_collapse() {
        assert_eq!(normalize_header("Net\nCollateral"), "net_collateral");
    }

    #[test]
    fn test_digit_prefix() {
        let normalized = normalize_header("0_30");
        assert!(normalized.starts_with("col_"), "got {normalized}");
    }

    proptest! {
        /// Re-normalizing an already-normalized header yields the same string.
        #[test]
        fn prop_normalize_is_idempotent(raw in "[ -~]{0,40}") {
            let once = normalize_header(&raw);
            let twice = normalize_header(&once);
            prop_assert_eq!(once, twice);
        }

        /// The output never starts with a digit.
        #[test]
        fn prop_never_starts_with_digit(raw in "[ -~]{0,40}") {
            let normalized = normalize_header(&raw);
            if let Some(first) = normalized.chars().next() {
                prop_assert!(!first.is_ascii_digit());
            }
        }
    }
}

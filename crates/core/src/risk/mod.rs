//! Composite risk scores and sub-metric aggregation.
//!
//! Scores live on a 1–5 scale. When no explicit composite record exists for
//! a date the four sub-scores fall back to fixed defaults, and an overall
//! "risk profile" score is synthesized from the inventory ineligible ratio.

use rust_decimal::Decimal;
use serde::Serialize;

/// One imported risk sub-factor row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RiskSubfactor {
    /// Main risk category ("Accounts Receivable", "Inventory", …).
    pub main_category: Option<String>,
    /// Sub-risk label.
    pub sub_risk: Option<String>,
    /// Score on the 1–5 scale (or a fraction of it).
    pub risk_score: Option<Decimal>,
    /// High-impact factor label.
    pub high_impact_factor: Option<String>,
}

/// Composite sub-scores, explicit or defaulted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeScores {
    /// Overall score when explicitly recorded.
    pub overall: Option<Decimal>,
    /// Accounts receivable sub-score.
    pub ar: Decimal,
    /// Inventory sub-score.
    pub inventory: Decimal,
    /// Company sub-score.
    pub company: Decimal,
    /// Industry sub-score.
    pub industry: Decimal,
}

impl Default for CompositeScores {
    fn default() -> Self {
        Self {
            overall: None,
            ar: Decimal::new(30, 1),
            inventory: Decimal::new(30, 1),
            company: Decimal::new(25, 1),
            industry: Decimal::new(20, 1),
        }
    }
}

/// Lower score bound.
fn floor_score() -> Decimal {
    Decimal::ONE
}

/// Upper score bound.
fn ceiling_score() -> Decimal {
    Decimal::from(5)
}

/// Clamps a score into the [1, 5] band.
#[must_use]
pub fn clamp_score(score: Decimal) -> Decimal {
    score.max(floor_score()).min(ceiling_score())
}

/// Synthesizes an overall risk profile from the inventory ineligible ratio
/// (already expressed in percent), clamped to [1, 5].
///
/// A clean book (0% ineligible) sits at 1; each 25 points of ineligible
/// ratio adds one score point.
#[must_use]
pub fn profile_from_ineligible_ratio(ineligible_pct: Decimal) -> Decimal {
    clamp_score(Decimal::ONE + ineligible_pct / Decimal::from(25))
}

/// Resolves the effective overall score: the explicit one when present,
/// otherwise the synthesized profile, otherwise `None`.
#[must_use]
pub fn overall_score(
    composite: &CompositeScores,
    ineligible_pct: Option<Decimal>,
) -> Option<Decimal> {
    composite
        .overall
        .or_else(|| ineligible_pct.map(profile_from_ineligible_ratio))
        .map(clamp_score)
}

/// Mean sub-factor score for one main category, case-insensitive.
#[must_use]
pub fn category_score(subfactors: &[RiskSubfactor], category: &str) -> Option<Decimal> {
    let wanted = category.to_lowercase();
    let scores: Vec<Decimal> = subfactors
        .iter()
        .filter(|factor| {
            factor
                .main_category
                .as_deref()
                .map(str::to_lowercase)
                .is_some_and(|c| c == wanted || c.starts_with(&wanted) || wanted.starts_with(&c))
        })
        .filter_map(|factor| factor.risk_score)
        .collect();
    if scores.is_empty() {
        return None;
    }
    let total: Decimal = scores.iter().copied().sum();
    Some(total / Decimal::from(scores.len()))
}

/// Width of a score bar as a percentage of the 5-point scale, clamped to
/// [0, 100].
#[must_use]
pub fn bar_width_pct(score: Decimal) -> Decimal {
    let ratio = (score / Decimal::from(5))
        .max(Decimal::ZERO)
        .min(Decimal::ONE);
    ratio * Decimal::ONE_HUNDRED
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn factor(category: &str, sub_risk: &str, score: Decimal) -> RiskSubfactor {
        RiskSubfactor {
            main_category: Some(category.to_string()),
            sub_risk: Some(sub_risk.to_string()),
            risk_score: Some(score),
            high_impact_factor: None,
        }
    }

    #[test]
    fn test_default_sub_scores() {
        let scores = CompositeScores::default();
        assert_eq!(scores.ar, dec!(3.0));
        assert_eq!(scores.inventory, dec!(3.0));
        assert_eq!(scores.company, dec!(2.5));
        assert_eq!(scores.industry, dec!(2.0));
        assert_eq!(scores.overall, None);
    }

    #[rstest]
    #[case(dec!(0), dec!(1))]
    #[case(dec!(25), dec!(2))]
    #[case(dec!(50), dec!(3))]
    #[case(dec!(100), dec!(5))]
    #[case(dec!(200), dec!(5))] // clamped
    fn test_profile_from_ineligible_ratio(#[case] pct: Decimal, #[case] expected: Decimal) {
        assert_eq!(profile_from_ineligible_ratio(pct), expected);
    }

    #[test]
    fn test_clamp_score_bounds() {
        assert_eq!(clamp_score(dec!(0.2)), dec!(1));
        assert_eq!(clamp_score(dec!(7)), dec!(5));
        assert_eq!(clamp_score(dec!(3.4)), dec!(3.4));
    }

    #[test]
    fn test_overall_prefers_explicit_score() {
        let composite = CompositeScores {
            overall: Some(dec!(4.2)),
            ..CompositeScores::default()
        };
        assert_eq!(overall_score(&composite, Some(dec!(0))), Some(dec!(4.2)));
    }

    #[test]
    fn test_overall_synthesized_from_ratio_when_absent() {
        let composite = CompositeScores::default();
        assert_eq!(overall_score(&composite, Some(dec!(50))), Some(dec!(3)));
        assert_eq!(overall_score(&composite, None), None);
    }

    #[test]
    fn test_category_score_is_mean_of_matching_rows() {
        let factors = vec![
            factor("Inventory", "Velocity", dec!(4)),
            factor("Inventory", "Obsolete", dec!(2)),
            factor("Company", "Liquidity", dec!(5)),
        ];
        assert_eq!(category_score(&factors, "Inventory"), Some(dec!(3)));
        assert_eq!(category_score(&factors, "company"), Some(dec!(5)));
        assert_eq!(category_score(&factors, "Industry"), None);
    }

    #[test]
    fn test_bar_width_clamps() {
        assert_eq!(bar_width_pct(dec!(2.5)), dec!(50));
        assert_eq!(bar_width_pct(dec!(9)), dec!(100));
        assert_eq!(bar_width_pct(dec!(-1)), dec!(0));
    }
}

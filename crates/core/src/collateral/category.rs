//! Inventory category bucketing.
//!
//! Collateral rows are classified by case-insensitive substring match
//! against a fixed keyword table, checking the row's sub-type text before
//! its main-type text; the first matching category wins. Unmatched rows
//! still contribute to totals but not to per-category breakdowns.

/// Semantic inventory categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InventoryCategory {
    /// Finished goods.
    FinishedGoods,
    /// Raw materials.
    RawMaterials,
    /// Work-in-progress.
    WorkInProgress,
}

impl InventoryCategory {
    /// All categories in display order.
    pub const ALL: [Self; 3] = [Self::FinishedGoods, Self::RawMaterials, Self::WorkInProgress];

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FinishedGoods => "Finished Goods",
            Self::RawMaterials => "Raw Materials",
            Self::WorkInProgress => "Work-in-Progress",
        }
    }

    /// Stable key for serialized breakdowns.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::FinishedGoods => "finished_goods",
            Self::RawMaterials => "raw_materials",
            Self::WorkInProgress => "work_in_progress",
        }
    }

    /// Keywords matched against row type text, lowercased.
    #[must_use]
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::FinishedGoods => &["finished", "fg"],
            Self::RawMaterials => &["raw", "rm"],
            Self::WorkInProgress => &["wip", "work in progress", "work-in-progress", "work in process"],
        }
    }

    fn matches(self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.keywords().iter().any(|kw| lowered.contains(kw))
    }
}

/// Classifies a collateral row by its sub-type text, then its main-type
/// text. Returns `None` for rows outside every category.
#[must_use]
pub fn classify(sub_type: Option<&str>, main_type: Option<&str>) -> Option<InventoryCategory> {
    for text in [sub_type, main_type].into_iter().flatten() {
        for category in InventoryCategory::ALL {
            if category.matches(text) {
                return Some(category);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("Finished Goods"), None, Some(InventoryCategory::FinishedGoods))]
    #[case(Some("FG Inline"), None, Some(InventoryCategory::FinishedGoods))]
    #[case(Some("Raw Materials"), None, Some(InventoryCategory::RawMaterials))]
    #[case(Some("RM - Bulk"), None, Some(InventoryCategory::RawMaterials))]
    #[case(Some("Work In Progress"), None, Some(InventoryCategory::WorkInProgress))]
    #[case(Some("Work in Process"), None, Some(InventoryCategory::WorkInProgress))]
    #[case(Some("WIP"), None, Some(InventoryCategory::WorkInProgress))]
    #[case(None, Some("Finished Goods"), Some(InventoryCategory::FinishedGoods))]
    #[case(Some("Machinery"), Some("Equipment"), None)]
    #[case(None, None, None)]
    fn test_classify(
        #[case] sub_type: Option<&str>,
        #[case] main_type: Option<&str>,
        #[case] expected: Option<InventoryCategory>,
    ) {
        assert_eq!(classify(sub_type, main_type), expected);
    }

    #[test]
    fn test_sub_type_checked_before_main_type() {
        // Sub-type says raw materials even though main type mentions FG.
        let category = classify(Some("Raw Materials"), Some("Finished Goods"));
        assert_eq!(category, Some(InventoryCategory::RawMaterials));
    }

    #[test]
    fn test_first_matching_category_wins() {
        // "finished" matches before the WIP keywords get a chance.
        let category = classify(Some("Finished WIP"), None);
        assert_eq!(category, Some(InventoryCategory::FinishedGoods));
    }
}

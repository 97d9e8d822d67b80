//! Dashboard assembly tests.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal_macros::dec;

use lendview_shared::types::DateRangePreset;

use crate::collateral::{CollateralRow, RateLimitEntry};
use crate::risk::CompositeScores;

use super::builder::{build_dashboard, DashboardRequest};
use super::types::{ArSnapshot, BorrowerProfile, DashboardInputs};

fn at(text: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn profile() -> BorrowerProfile {
    BorrowerProfile {
        borrower_id: 1,
        company_id: 1,
        company_name: Some("Acme".to_string()),
        company_external_id: Some(42),
        industry: Some("Manufacturing".to_string()),
        website: Some("acme.example".to_string()),
        primary_contact: Some("Jane Doe".to_string()),
        update_interval: Some("Monthly".to_string()),
        ..BorrowerProfile::default()
    }
}

fn request() -> DashboardRequest {
    DashboardRequest {
        range: DateRangePreset::Last30,
        division: None,
        today: day(2024, 6, 20),
    }
}

fn fg_row() -> CollateralRow {
    CollateralRow {
        created_at: at("2024-06-15 12:00:00"),
        main_type: Some("Inventory".to_string()),
        sub_type: Some("Finished Goods".to_string()),
        eligible_collateral: Some(dec!(1000)),
        ineligibles: Some(dec!(100)),
        net_collateral: Some(dec!(900)),
        nolv_pct: Some(dec!(0.68)),
        ..CollateralRow::default()
    }
}

#[test]
fn test_single_fg_row_dominates_inventory_mix() {
    // The end-to-end shape: one imported collateral row yields net collateral
    // reflecting that row and a 100% finished-goods inventory mix.
    let inputs = DashboardInputs {
        profile: profile(),
        collateral: vec![fg_row()],
        composite: CompositeScores::default(),
        ..DashboardInputs::default()
    };
    let context = build_dashboard(&inputs, &request());

    assert_eq!(context.net.amount, "$900.00");
    assert_eq!(context.availability.amount, "$900.00");
    assert_eq!(context.inventory_mix.len(), 1);
    assert_eq!(context.inventory_mix[0].label, "Finished Goods");
    assert_eq!(context.inventory_mix[0].share_pct, dec!(100.0));
    assert_eq!(context.borrower.company_id, "42");
    assert_eq!(context.borrower.company_name, "Acme");
}

#[test]
fn test_empty_inputs_render_placeholders() {
    let inputs = DashboardInputs {
        profile: BorrowerProfile::default(),
        composite: CompositeScores::default(),
        ..DashboardInputs::default()
    };
    let context = build_dashboard(&inputs, &request());

    assert_eq!(context.net.amount, "—");
    assert_eq!(context.outstanding.amount, "—");
    assert_eq!(context.availability.amount, "—");
    assert_eq!(context.outstanding.detail, "Awaiting AR snapshot");
    assert_eq!(context.risk.rating, "—");
    assert!(context.inventory_mix.is_empty());
    // Charts still come out at the fixed length, all zero.
    assert_eq!(context.charts.net_collateral.series.values, vec![dec!(0); 5]);
}

#[test]
fn test_only_latest_snapshot_counts() {
    let mut stale = fg_row();
    stale.created_at = at("2024-06-01 09:00:00");
    stale.net_collateral = Some(dec!(111));

    let inputs = DashboardInputs {
        profile: profile(),
        collateral: vec![stale, fg_row()],
        composite: CompositeScores::default(),
        ..DashboardInputs::default()
    };
    let context = build_dashboard(&inputs, &request());

    assert_eq!(context.collateral_rows.len(), 1);
    assert_eq!(context.net.amount, "$900.00");
}

#[test]
fn test_collateral_tree_nests_sub_types() {
    let parent = CollateralRow {
        created_at: at("2024-06-15 12:00:00"),
        main_type: Some("Inventory".to_string()),
        sub_type: None,
        net_collateral: Some(dec!(2000)),
        ..CollateralRow::default()
    };
    let mut child = fg_row();
    child.sub_type = Some("Finished Goods".to_string());

    let inputs = DashboardInputs {
        profile: profile(),
        collateral: vec![parent, child],
        composite: CompositeScores::default(),
        ..DashboardInputs::default()
    };
    let context = build_dashboard(&inputs, &request());

    assert_eq!(context.collateral_tree.len(), 1);
    let node = &context.collateral_tree[0];
    assert_eq!(node.id, "inventory");
    assert_eq!(node.children.len(), 1);
    assert_eq!(node.children[0].id, "inventory-finished-goods");
}

#[test]
fn test_orphan_sub_type_creates_parent() {
    let inputs = DashboardInputs {
        profile: profile(),
        collateral: vec![fg_row()],
        composite: CompositeScores::default(),
        ..DashboardInputs::default()
    };
    let context = build_dashboard(&inputs, &request());

    assert_eq!(context.collateral_tree.len(), 1);
    assert_eq!(context.collateral_tree[0].children.len(), 1);
}

#[test]
fn test_rate_limit_resolution_reaches_row_view() {
    let mut row = fg_row();
    row.rate_limit = Some(dec!(0.4));
    let limits = vec![RateLimitEntry {
        collateral_type: Some("Inventory".to_string()),
        collateral_sub_type: Some("Finished Goods".to_string()),
        pct_limit: Some(dec!(0.85)),
        ..RateLimitEntry::default()
    }];

    let inputs = DashboardInputs {
        profile: profile(),
        collateral: vec![row],
        limits,
        composite: CompositeScores::default(),
        ..DashboardInputs::default()
    };
    let context = build_dashboard(&inputs, &request());

    assert_eq!(context.collateral_rows[0].rate_limit, "85.0%");
}

#[test]
fn test_availability_chart_subtracts_outstanding() {
    let row = CollateralRow {
        created_at: at("2024-06-15 12:00:00"),
        main_type: Some("Inventory".to_string()),
        sub_type: Some("FG".to_string()),
        net_collateral: Some(dec!(100)),
        ..CollateralRow::default()
    };
    let ar = ArSnapshot {
        created_at: at("2024-06-16 12:00:00"),
        as_of_date: Some(day(2024, 6, 16)),
        balance: Some(dec!(30)),
        ..ArSnapshot::default()
    };

    let inputs = DashboardInputs {
        profile: profile(),
        collateral: vec![row],
        ar: vec![ar],
        composite: CompositeScores::default(),
        ..DashboardInputs::default()
    };
    let context = build_dashboard(&inputs, &request());

    // One real month, padded to five points: availability = 100 - 30.
    let values = &context.charts.availability.series.values;
    assert_eq!(values.len(), 5);
    assert_eq!(values[4], dec!(70));
    assert_eq!(context.outstanding.amount, "$30.00");
    assert_eq!(context.outstanding.detail, "As of 06/16/2024");
}

#[test]
fn test_division_filter_restricts_ar_rows() {
    let north = ArSnapshot {
        created_at: at("2024-06-16 12:00:00"),
        as_of_date: Some(day(2024, 6, 16)),
        division: Some("North".to_string()),
        balance: Some(dec!(1000)),
        ..ArSnapshot::default()
    };
    let south = ArSnapshot {
        created_at: at("2024-06-17 12:00:00"),
        as_of_date: Some(day(2024, 6, 17)),
        division: Some("South".to_string()),
        balance: Some(dec!(2000)),
        ..ArSnapshot::default()
    };

    let inputs = DashboardInputs {
        profile: profile(),
        ar: vec![north, south],
        divisions: vec!["North".to_string(), "South".to_string()],
        composite: CompositeScores::default(),
        ..DashboardInputs::default()
    };

    let mut req = request();
    req.division = Some("north".to_string());
    let context = build_dashboard(&inputs, &req);
    assert_eq!(context.division, "North");
    assert_eq!(context.outstanding.amount, "$1,000.00");

    req.division = Some("unknown".to_string());
    let context = build_dashboard(&inputs, &req);
    assert_eq!(context.division, "all");
    assert_eq!(context.outstanding.amount, "$2,000.00");
}

#[test]
fn test_risk_panel_uses_defaults_without_composite_row() {
    let inputs = DashboardInputs {
        profile: profile(),
        collateral: vec![fg_row()],
        composite: CompositeScores::default(),
        ..DashboardInputs::default()
    };
    let context = build_dashboard(&inputs, &request());

    // Ineligible ratio 100/1100 ≈ 9.09% -> profile 1 + 9.09/25 ≈ 1.4.
    assert_eq!(context.risk.rating, "1.4");
    let labels: Vec<_> = context.risk.metrics.iter().map(|m| m.label.clone()).collect();
    assert_eq!(
        labels,
        [
            "Accounts Receivable",
            "Inventory",
            "Company",
            "Industry"
        ]
    );
    assert_eq!(context.risk.metrics[0].score, "3.0");
    assert_eq!(context.risk.metrics[2].score, "2.5");
}

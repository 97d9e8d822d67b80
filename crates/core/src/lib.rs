//! Core business logic for Lendview.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, normalization rules, and calculations
//! live here.
//!
//! # Modules
//!
//! - `sheet` - Workbook header normalization, cell typing, and row admission
//! - `collateral` - Snapshot selection, category bucketing, weighted ratios
//! - `chart` - Time-series normalization and axis scaling
//! - `risk` - Composite risk scores and sub-metric aggregation
//! - `access` - Borrower visibility policy
//! - `credential` - Portal credential hashing
//! - `dashboard` - View-model assembly for the borrower dashboard

pub mod access;
pub mod chart;
pub mod collateral;
pub mod credential;
pub mod dashboard;
pub mod risk;
pub mod sheet;

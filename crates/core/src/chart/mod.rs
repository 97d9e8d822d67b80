//! Chart-ready data: time-series normalization and axis scaling.

pub mod axis;
pub mod series;

pub use axis::{build_axis, nice_step, AxisScale};
pub use series::{
    monthly_latest_sum, normalize_series, ChartSeries, DatedValue, SeriesPoint, DEFAULT_SERIES_LEN,
};

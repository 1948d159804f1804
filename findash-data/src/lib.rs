//! Data processing for findash tables.
//!
//! This crate handles transforming loaded tables into forms suitable for
//! charting: gap filling, period-over-period change, and building the chart
//! specifications the dashboards hand to the renderer.

pub mod render;

/// Gap filling and percentage change over a fixed number of periods.
pub mod transform {
    /// Periods in a year of monthly observations.
    pub const PERIODS_PER_YEAR: usize = 12;

    /// Carry the most recent non-missing value forward over gaps. Leading
    /// gaps stay missing.
    pub fn forward_fill(values: &[Option<f64>]) -> Vec<Option<f64>> {
        let mut last = None;
        values
            .iter()
            .map(|v| {
                if v.is_some() {
                    last = *v;
                }
                last
            })
            .collect()
    }

    /// `(v_t / v_(t-periods) - 1) * 100` for each position. Positions without
    /// a prior value, or whose prior value is zero, are missing.
    pub fn pct_change(values: &[Option<f64>], periods: usize) -> Vec<Option<f64>> {
        (0..values.len())
            .map(|t| {
                if periods == 0 || t < periods {
                    return None;
                }
                match (values[t], values[t - periods]) {
                    (Some(current), Some(prior)) if prior != 0.0 => {
                        Some((current / prior - 1.0) * 100.0)
                    }
                    _ => None,
                }
            })
            .collect()
    }

    /// Year-over-year percentage change of monthly values, forward-filling
    /// gaps before differencing.
    pub fn year_over_year(values: &[Option<f64>]) -> Vec<Option<f64>> {
        pct_change(&forward_fill(values), PERIODS_PER_YEAR)
    }

}

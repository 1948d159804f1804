//! Chart builders: single-indicator line charts and dual-axis comparisons.

use crate::transform::year_over_year;
use findash_core::chart::{AxisSide, ChartSpec, Trace};
use findash_core::error::{DashError, Result};
use findash_core::table::{Point, Series, Table};
use log::debug;

/// Warning shown when the filtered subset has no rows.
pub const EMPTY_SELECTION_MESSAGE: &str = "No data available for the current selection.";

/// One line per distinct category in `table` (or a single line when the table
/// has no category column), `value_column` on the y axis.
pub fn line_chart(table: &Table, value_column: &str, title: impl Into<String>) -> Result<ChartSpec> {
    if table.is_empty() {
        return Err(DashError::unavailable(EMPTY_SELECTION_MESSAGE));
    }
    let spec = table
        .series(value_column)?
        .iter()
        .map(|s| Trace::from_series(s, AxisSide::Primary))
        .fold(
            ChartSpec::new(title, table.date_column(), value_column),
            ChartSpec::with_trace,
        );
    debug!("Line chart '{}' with {} traces", spec.title, spec.traces.len());
    Ok(spec)
}

fn require_distinct(primary: &str, secondary: &str) -> Result<()> {
    if primary == secondary {
        return Err(DashError::invalid(
            "Please select two different indicators.",
        ));
    }
    Ok(())
}

fn dual(table: &Table, title: String, left: Series, right: Series) -> ChartSpec {
    ChartSpec::new(title, table.date_column(), left.name.clone())
        .with_secondary_axis(right.name.clone())
        .with_trace(Trace::from_series(&left, AxisSide::Primary))
        .with_trace(Trace::from_series(&right, AxisSide::Secondary))
}

fn column_series(table: &Table, name: &str, values: Vec<Option<f64>>) -> Series {
    Series {
        name: name.to_string(),
        points: table
            .rows()
            .iter()
            .zip(values)
            .map(|(row, value)| Point {
                date: row.date,
                value,
            })
            .collect(),
    }
}

/// `primary` on the left axis and `secondary` on the right, sharing the date axis.
pub fn dual_axis_chart(
    table: &Table,
    primary: &str,
    secondary: &str,
    title: impl Into<String>,
) -> Result<ChartSpec> {
    require_distinct(primary, secondary)?;
    if table.is_empty() {
        return Err(DashError::unavailable(EMPTY_SELECTION_MESSAGE));
    }
    let left = column_series(table, primary, table.column(primary)?);
    let right = column_series(table, secondary, table.column(secondary)?);
    Ok(dual(table, title.into(), left, right))
}

/// Year-over-year percentage change of both columns, on two axes.
pub fn yoy_chart(
    table: &Table,
    primary: &str,
    secondary: &str,
    title: impl Into<String>,
) -> Result<ChartSpec> {
    require_distinct(primary, secondary)?;
    if table.is_empty() {
        return Err(DashError::unavailable(EMPTY_SELECTION_MESSAGE));
    }
    let left = column_series(
        table,
        &format!("{primary} YoY %"),
        year_over_year(&table.column(primary)?),
    );
    let right = column_series(
        table,
        &format!("{secondary} YoY %"),
        year_over_year(&table.column(secondary)?),
    );
    Ok(dual(table, title.into(), left, right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Months, NaiveDate};
    use findash_core::table::{Column, Row};

    fn stock_table(rows: &[(&str, u32, f64)]) -> Table {
        let columns = vec![
            Column::Date("date".into()),
            Column::Value("price".into()),
            Column::Category("stock".into()),
        ];
        let rows = rows
            .iter()
            .map(|(stock, day, price)| Row {
                date: NaiveDate::from_ymd_opt(2024, 1, *day).unwrap(),
                category: Some(stock.to_string()),
                values: vec![Some(*price)],
            })
            .collect();
        Table::new(columns, rows).unwrap()
    }

    fn monthly_table(months: u32) -> Table {
        let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let rows = (0..months)
            .map(|i| Row {
                date: start + Months::new(i),
                category: None,
                values: vec![Some(100.0 + i as f64), Some(5.0)],
            })
            .collect();
        Table::new(
            vec![
                Column::Date("Date".into()),
                Column::Value("CPI".into()),
                Column::Value("Unemployment Rate".into()),
            ],
            rows,
        )
        .unwrap()
    }

    #[test]
    fn test_line_chart_one_trace_per_stock() {
        let table = stock_table(&[("AAPL", 1, 100.0), ("MSFT", 1, 300.0), ("AAPL", 2, 101.0)]);
        let spec = line_chart(&table, "price", "Prices").unwrap();
        assert_eq!(spec.trace_names(), vec!["AAPL", "MSFT"]);
        assert_eq!(spec.x_label, "date");
        assert_eq!(spec.y_axis.label, "price");
        assert_eq!(spec.traces[0].values(), vec![Some(100.0), Some(101.0)]);
        assert!(!spec.is_dual_axis());
    }

    #[test]
    fn test_line_chart_empty_is_warning() {
        let table = stock_table(&[]);
        let err = line_chart(&table, "price", "Prices").unwrap_err();
        assert_eq!(err, DashError::unavailable(EMPTY_SELECTION_MESSAGE));
    }

    #[test]
    fn test_dual_axis_chart() {
        let table = monthly_table(3);
        let spec = dual_axis_chart(&table, "CPI", "Unemployment Rate", "CPI vs Unemployment Rate").unwrap();
        assert!(spec.is_dual_axis());
        assert_eq!(spec.traces[0].axis, AxisSide::Primary);
        assert_eq!(spec.traces[1].axis, AxisSide::Secondary);
        assert_eq!(spec.y_axis.label, "CPI");
        assert_eq!(spec.y2_axis.as_ref().unwrap().label, "Unemployment Rate");
        assert_eq!(spec.traces[0].points.len(), 3);
    }

    #[test]
    fn test_same_indicator_rejected() {
        let table = monthly_table(3);
        assert!(dual_axis_chart(&table, "CPI", "CPI", "x")
            .unwrap_err()
            .is_invalid_selection());
        assert!(yoy_chart(&table, "CPI", "CPI", "x")
            .unwrap_err()
            .is_invalid_selection());
    }

    #[test]
    fn test_yoy_chart_values() {
        let table = monthly_table(13);
        let spec = yoy_chart(&table, "CPI", "Unemployment Rate", "YoY").unwrap();
        let cpi = spec.traces[0].values();
        assert!(cpi[11].is_none());
        let expected = (112.0 / 100.0 - 1.0) * 100.0;
        assert!((cpi[12].unwrap() - expected).abs() < 1e-9);
        assert_eq!(spec.traces[1].values()[12], Some(0.0));
        assert_eq!(spec.trace_names(), vec!["CPI YoY %", "Unemployment Rate YoY %"]);
    }

    #[test]
    fn test_unknown_indicator_is_unavailable() {
        let table = monthly_table(2);
        let err = dual_axis_chart(&table, "CPI", "GDP", "x").unwrap_err();
        assert!(matches!(err, DashError::DataUnavailable(_)));
    }
}

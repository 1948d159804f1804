//! Economic indicators: two indicators compared on a dual-axis chart and as
//! year-over-year change, over a chosen range of years.

use findash_core::binder::Dashboard;
use findash_core::chart::ChartSpec;
use findash_core::controls::{year_domain, Control, ControlRegistry, ControlState, ControlValue, Widget};
use findash_core::error::{DashError, Result};
use findash_core::indicators::MacroQuery;
use findash_core::table::Table;
use findash_data::render::{dual_axis_chart, yoy_chart};

pub const FIRST_YEAR: i32 = 2000;
pub const LAST_YEAR: i32 = 2025;

pub const START_YEAR_CONTROL: &str = "start_year";
pub const END_YEAR_CONTROL: &str = "end_year";
pub const PRIMARY_CONTROL: &str = "primary";
pub const SECONDARY_CONTROL: &str = "secondary";

#[derive(Debug, Clone, PartialEq)]
pub struct EconIndicators {
    registry: ControlRegistry,
}

impl EconIndicators {
    /// `labels` are the indicator columns of the fetched table. The primary
    /// selector starts on the first label and the secondary on the second, so
    /// at least two distinct labels are required.
    pub fn new(labels: Vec<String>) -> Result<Self> {
        let secondary_default = match labels.as_slice() {
            [first, second, ..] if first != second => second.clone(),
            _ => {
                return Err(DashError::unavailable(
                    "At least two different indicators must be configured.",
                ))
            }
        };
        let years = year_domain(FIRST_YEAR, LAST_YEAR);
        let registry = ControlRegistry::new()
            .with(Control::single(
                START_YEAR_CONTROL,
                "Start Year",
                Widget::YearPicker,
                years.clone(),
            ))
            .with(
                Control::single(END_YEAR_CONTROL, "End Year", Widget::YearPicker, years)
                    .with_default(ControlValue::Single(LAST_YEAR.to_string())),
            )
            .with(Control::single(
                PRIMARY_CONTROL,
                "Primary Indicator (Left Axis)",
                Widget::Dropdown,
                labels.clone(),
            ))
            .with(
                Control::single(
                    SECONDARY_CONTROL,
                    "Secondary Indicator (Right Axis)",
                    Widget::Dropdown,
                    labels,
                )
                .with_default(ControlValue::Single(secondary_default)),
            );
        Ok(Self { registry })
    }

    /// The fetch the current year range needs. Fails before any request when
    /// the range is inverted.
    pub fn macro_query(&self, state: &ControlState) -> Result<MacroQuery> {
        MacroQuery::for_years(
            state.year(START_YEAR_CONTROL)?,
            state.year(END_YEAR_CONTROL)?,
        )
    }

    fn indicators<'a>(&self, state: &'a ControlState) -> Result<(&'a str, &'a str)> {
        let primary = state.single(PRIMARY_CONTROL)?;
        let secondary = state.single(SECONDARY_CONTROL)?;
        if primary == secondary {
            return Err(DashError::invalid("Please select two different indicators."));
        }
        Ok((primary, secondary))
    }
}

impl Dashboard for EconIndicators {
    fn registry(&self) -> &ControlRegistry {
        &self.registry
    }

    fn validate(&self, state: &ControlState) -> Result<()> {
        self.macro_query(state)?;
        self.indicators(state)?;
        Ok(())
    }

    fn render(&self, state: &ControlState, table: &Table) -> Result<Vec<ChartSpec>> {
        let query = self.macro_query(state)?;
        let (primary, secondary) = self.indicators(state)?;
        let in_range = table.between(query.start, query.end);
        Ok(vec![
            dual_axis_chart(&in_range, primary, secondary, format!("{primary} vs {secondary}"))?,
            yoy_chart(
                &in_range,
                primary,
                secondary,
                format!("Year-over-Year % Change: {primary} vs {secondary}"),
            )?,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Months, NaiveDate};
    use findash_core::binder::{Binder, NoticeLevel};
    use findash_core::table::{Column, Row};

    fn labels() -> Vec<String> {
        vec!["CPI".into(), "Unemployment Rate".into(), "Fed Funds Rate".into()]
    }

    /// Monthly rows from January 2019 through December 2021.
    fn table() -> Table {
        let start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        let rows = (0..36u32)
            .map(|i| Row {
                date: start + Months::new(i),
                category: None,
                values: vec![Some(250.0 + f64::from(i)), Some(4.0), None],
            })
            .collect();
        let mut columns = vec![Column::Date("Date".into())];
        columns.extend(labels().into_iter().map(Column::Value));
        Table::new(columns, rows).unwrap()
    }

    fn set(binder: &Binder<EconIndicators>, state: &mut ControlState, id: &str, value: &str) {
        binder
            .registry()
            .apply(state, id, ControlValue::Single(value.into()))
            .unwrap();
    }

    #[test]
    fn test_defaults() {
        let dashboard = EconIndicators::new(labels()).unwrap();
        let state = dashboard.registry().default_state();
        assert_eq!(state.year(START_YEAR_CONTROL).unwrap(), 2000);
        assert_eq!(state.year(END_YEAR_CONTROL).unwrap(), 2025);
        assert_eq!(state.single(PRIMARY_CONTROL).unwrap(), "CPI");
        assert_eq!(state.single(SECONDARY_CONTROL).unwrap(), "Unemployment Rate");
        let query = dashboard.macro_query(&state).unwrap();
        assert_eq!(query.start.to_string(), "2000-01-01");
        assert_eq!(query.end.to_string(), "2025-12-31");
    }

    #[test]
    fn test_needs_two_indicators() {
        let err = EconIndicators::new(vec!["CPI".into()]).unwrap_err();
        assert!(matches!(err, DashError::DataUnavailable(_)));
        assert!(EconIndicators::new(vec!["CPI".into(), "CPI".into()]).is_err());
        assert!(EconIndicators::new(Vec::new()).is_err());
    }

    #[test]
    fn test_two_indicators_open_on_charts() {
        let labels = vec!["CPI".to_string(), "Unemployment Rate".to_string()];
        let binder = Binder::new(EconIndicators::new(labels).unwrap(), "econ-charts");
        let view = binder.evaluate(&binder.initial_state(), &table());
        assert!(view.notice().is_none());
        assert_eq!(view.charts().len(), 2);
    }

    #[test]
    fn test_inverted_years_is_error_notice() {
        let binder = Binder::new(EconIndicators::new(labels()).unwrap(), "econ-charts");
        let mut state = binder.initial_state();
        set(&binder, &mut state, START_YEAR_CONTROL, "2010");
        set(&binder, &mut state, END_YEAR_CONTROL, "2005");
        assert!(binder.check(&state).unwrap_err().is_invalid_selection());
        let notice = binder.evaluate(&state, &table()).notice().cloned().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "Start year must be before end year.");
    }

    #[test]
    fn test_same_indicator_is_error_notice() {
        let binder = Binder::new(EconIndicators::new(labels()).unwrap(), "econ-charts");
        let mut state = binder.initial_state();
        set(&binder, &mut state, SECONDARY_CONTROL, "CPI");
        let view = binder.evaluate(&state, &table());
        assert_eq!(view.notice().unwrap().level, NoticeLevel::Error);
    }

    #[test]
    fn test_dual_axis_and_yoy_charts() {
        let binder = Binder::new(EconIndicators::new(labels()).unwrap(), "econ-charts");
        let mut state = binder.initial_state();
        set(&binder, &mut state, START_YEAR_CONTROL, "2020");
        set(&binder, &mut state, END_YEAR_CONTROL, "2021");
        let view = binder.evaluate(&state, &table());
        let charts = view.charts();
        assert_eq!(charts.len(), 2);

        assert_eq!(charts[0].title, "CPI vs Unemployment Rate");
        assert!(charts[0].is_dual_axis());
        assert_eq!(charts[0].traces[0].points.len(), 24);
        assert_eq!(charts[0].traces[0].points[0].date, "2020-01-01");

        assert_eq!(charts[1].title, "Year-over-Year % Change: CPI vs Unemployment Rate");
        let yoy = charts[1].traces[0].values();
        assert!(yoy[11].is_none());
        let expected = (f64::from(250 + 24) / f64::from(250 + 12) - 1.0) * 100.0;
        assert!((yoy[12].unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_empty_indicator_draws_gaps() {
        let binder = Binder::new(EconIndicators::new(labels()).unwrap(), "econ-charts");
        let mut state = binder.initial_state();
        set(&binder, &mut state, SECONDARY_CONTROL, "Fed Funds Rate");
        let view = binder.evaluate(&state, &table());
        let right = &view.charts()[0].traces[1];
        assert!(right.values().iter().all(Option::is_none));
    }
}

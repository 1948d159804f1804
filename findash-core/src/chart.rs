//! Serializable chart specifications handed to the rendering surface.
//!
//! A spec is rebuilt on every control change and thrown away after it is
//! drawn. Dates are emitted as `YYYY-MM-DD` strings and missing values as
//! `null`, which the D3 renderer draws as gaps.

use crate::dates::format_date;
use crate::error::{DashError, Result};
use crate::table::Series;
use serde::Serialize;

/// Which y axis a trace is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisSide {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: String,
    pub value: Option<f64>,
}

/// One drawn line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub name: String,
    pub axis: AxisSide,
    pub points: Vec<ChartPoint>,
}

impl Trace {
    pub fn from_series(series: &Series, axis: AxisSide) -> Self {
        Self {
            name: series.name.clone(),
            axis,
            points: series
                .points
                .iter()
                .map(|p| ChartPoint {
                    date: format_date(&p.date),
                    value: p.value,
                })
                .collect(),
        }
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.value).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_axis: Axis,
    /// Present only for dual-axis charts; drawn on the right.
    pub y2_axis: Option<Axis>,
    pub traces: Vec<Trace>,
}

impl ChartSpec {
    pub fn new(title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_axis: Axis {
                label: y_label.into(),
            },
            y2_axis: None,
            traces: Vec::new(),
        }
    }

    pub fn with_secondary_axis(mut self, label: impl Into<String>) -> Self {
        self.y2_axis = Some(Axis {
            label: label.into(),
        });
        self
    }

    pub fn with_trace(mut self, trace: Trace) -> Self {
        self.traces.push(trace);
        self
    }

    pub fn is_dual_axis(&self) -> bool {
        self.y2_axis.is_some()
    }

    pub fn trace_names(&self) -> Vec<&str> {
        self.traces.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| DashError::unavailable(format!("Failed to serialize chart: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Point;
    use chrono::NaiveDate;

    #[test]
    fn test_trace_from_series_formats_dates() {
        let series = Series {
            name: "AAPL".into(),
            points: vec![
                Point {
                    date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    value: Some(100.0),
                },
                Point {
                    date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                    value: None,
                },
            ],
        };
        let trace = Trace::from_series(&series, AxisSide::Primary);
        assert_eq!(trace.points[0].date, "2024-01-01");
        assert_eq!(trace.values(), vec![Some(100.0), None]);
    }

    #[test]
    fn test_spec_json_shape() {
        let spec = ChartSpec::new("CPI vs Unemployment", "Date", "CPI")
            .with_secondary_axis("Unemployment")
            .with_trace(Trace {
                name: "CPI".into(),
                axis: AxisSide::Primary,
                points: vec![ChartPoint {
                    date: "2020-01-01".into(),
                    value: None,
                }],
            });
        let json: serde_json::Value = serde_json::from_str(&spec.to_json().unwrap()).unwrap();
        assert_eq!(json["title"], "CPI vs Unemployment");
        assert_eq!(json["xLabel"], "Date");
        assert_eq!(json["y2Axis"]["label"], "Unemployment");
        assert_eq!(json["traces"][0]["axis"], "primary");
        assert!(json["traces"][0]["points"][0]["value"].is_null());
        assert!(spec.is_dual_axis());
    }
}

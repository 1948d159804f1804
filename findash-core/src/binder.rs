//! Reactive binder: the single-direction mapping from control state to charts.
//!
//! A [`Dashboard`] is a pure function of ([`ControlState`], [`Table`]). The
//! [`Binder`] runs it, recovers every [`DashError`] into a [`Notice`], and
//! hands the resulting [`View`] to a [`RenderSink`] owned by the UI runtime.
//! It is fired once with the default state at startup and once per completed
//! control change; nothing it produces ever feeds back into a control.

use crate::chart::ChartSpec;
use crate::controls::{ControlRegistry, ControlState};
use crate::error::{DashError, Result};
use crate::table::Table;
use log::debug;
use serde::Serialize;

/// One chart pipeline.
pub trait Dashboard {
    fn registry(&self) -> &ControlRegistry;

    /// Checks that need no data, run before any fetch (year order, distinct
    /// indicators, non-empty selection).
    fn validate(&self, _state: &ControlState) -> Result<()> {
        Ok(())
    }

    /// Build the charts for `state` from `table`.
    fn render(&self, state: &ControlState, table: &Table) -> Result<Vec<ChartSpec>>;
}

/// Accepts a finished view for a target placeholder.
pub trait RenderSink {
    fn render(&mut self, target: &str, view: &View);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// Inline message shown in place of the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl From<&DashError> for Notice {
    fn from(err: &DashError) -> Self {
        match err {
            DashError::InvalidSelection(msg) => Notice::error(msg.clone()),
            DashError::DataUnavailable(msg) => Notice::warning(msg.clone()),
        }
    }
}

/// What the chart area shows after one handler run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "body", rename_all = "lowercase")]
pub enum View {
    Charts(Vec<ChartSpec>),
    Notice(Notice),
}

impl View {
    pub fn charts(&self) -> &[ChartSpec] {
        match self {
            View::Charts(charts) => charts,
            View::Notice(_) => &[],
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            View::Notice(notice) => Some(notice),
            View::Charts(_) => None,
        }
    }
}

/// Owns one dashboard and the placeholder its charts render into.
#[derive(Debug, Clone)]
pub struct Binder<D> {
    dashboard: D,
    target: String,
}

impl<D: Dashboard> Binder<D> {
    pub fn new(dashboard: D, target: impl Into<String>) -> Self {
        Self {
            dashboard,
            target: target.into(),
        }
    }

    pub fn dashboard(&self) -> &D {
        &self.dashboard
    }

    pub fn registry(&self) -> &ControlRegistry {
        self.dashboard.registry()
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// The state the handler is fired with at startup.
    pub fn initial_state(&self) -> ControlState {
        self.dashboard.registry().default_state()
    }

    /// Run the data-free checks only. Callers that fetch use this to skip the
    /// fetch for an invalid selection.
    pub fn check(&self, state: &ControlState) -> Result<()> {
        self.dashboard.validate(state)
    }

    /// Run the handler. Never fails: errors become a notice and the renderer
    /// is not called once validation has failed.
    pub fn evaluate(&self, state: &ControlState, table: &Table) -> View {
        debug!("Evaluating {} with {:?}", self.target, state);
        let result = self
            .dashboard
            .validate(state)
            .and_then(|_| self.dashboard.render(state, table));
        match result {
            Ok(charts) if charts.is_empty() => View::Notice(Notice::warning("No data to chart.")),
            Ok(charts) => View::Charts(charts),
            Err(e) => self.fail(&e),
        }
    }

    /// Turn a failure that happened outside the handler (a fetch) into a view.
    pub fn fail(&self, err: &DashError) -> View {
        debug!("{} short-circuited: {}", self.target, err);
        View::Notice(Notice::from(err))
    }

    /// Evaluate and push the result to `sink`.
    pub fn fire<S: RenderSink>(&self, state: &ControlState, table: &Table, sink: &mut S) -> View {
        let view = self.evaluate(state, table);
        sink.render(&self.target, &view);
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{AxisSide, Trace};
    use crate::controls::{year_domain, Control, ControlValue, Widget};
    use crate::table::Column;
    use std::cell::Cell;

    /// Year range dashboard that counts how often its renderer runs.
    struct YearRange {
        registry: ControlRegistry,
        renders: Cell<usize>,
    }

    impl YearRange {
        fn new() -> Self {
            Self {
                registry: ControlRegistry::new()
                    .with(Control::single("start", "Start Year", Widget::YearPicker, year_domain(2000, 2002)))
                    .with(Control::single("end", "End Year", Widget::YearPicker, year_domain(2000, 2002))),
                renders: Cell::new(0),
            }
        }
    }

    impl Dashboard for YearRange {
        fn registry(&self) -> &ControlRegistry {
            &self.registry
        }

        fn validate(&self, state: &ControlState) -> Result<()> {
            if state.year("start")? > state.year("end")? {
                return Err(DashError::invalid("Start year must be before end year."));
            }
            Ok(())
        }

        fn render(&self, state: &ControlState, _table: &Table) -> Result<Vec<ChartSpec>> {
            self.renders.set(self.renders.get() + 1);
            let title = format!("{}-{}", state.single("start")?, state.single("end")?);
            Ok(vec![ChartSpec::new(title, "Date", "Value").with_trace(Trace {
                name: "x".into(),
                axis: AxisSide::Primary,
                points: vec![],
            })])
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        seen: Vec<(String, View)>,
    }

    impl RenderSink for RecordingSink {
        fn render(&mut self, target: &str, view: &View) {
            self.seen.push((target.to_string(), view.clone()));
        }
    }

    fn empty_table() -> Table {
        Table::empty(vec![Column::Date("Date".into()), Column::Value("v".into())])
    }

    #[test]
    fn startup_fires_with_defaults() {
        let binder = Binder::new(YearRange::new(), "chart");
        let mut sink = RecordingSink::default();
        let view = binder.fire(&binder.initial_state(), &empty_table(), &mut sink);
        assert_eq!(view.charts()[0].title, "2000-2000");
        assert_eq!(sink.seen.len(), 1);
        assert_eq!(sink.seen[0].0, "chart");
    }

    #[test]
    fn invalid_range_skips_renderer() {
        let binder = Binder::new(YearRange::new(), "chart");
        let mut state = binder.initial_state();
        binder
            .registry()
            .apply(&mut state, "start", ControlValue::Single("2002".into()))
            .unwrap();

        assert!(binder.check(&state).unwrap_err().is_invalid_selection());
        let view = binder.evaluate(&state, &empty_table());
        let notice = view.notice().expect("notice");
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "Start year must be before end year.");
        assert_eq!(binder.dashboard().renders.get(), 0);
    }

    #[test]
    fn fetch_failure_becomes_warning() {
        let binder = Binder::new(YearRange::new(), "chart");
        let view = binder.fail(&DashError::unavailable("No data retrieved."));
        assert_eq!(view.notice().unwrap().level, NoticeLevel::Warning);
        assert!(view.charts().is_empty());
    }

    #[test]
    fn view_serializes_with_kind_tag() {
        let view = View::Notice(Notice::warning("empty"));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["kind"], "notice");
        assert_eq!(json["body"]["level"], "warning");
    }
}

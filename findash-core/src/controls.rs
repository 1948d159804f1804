//! Control registry: the input widgets of a dashboard and their closed domains.
//!
//! Domains are fixed when the registry is built (the distinct categories of
//! the loaded table, or an external list such as calendar years) and never
//! change afterwards. [`ControlRegistry::apply`] rejects values outside them.

use crate::error::{DashError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which widget the UI should draw for a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Widget {
    Dropdown,
    MultiSelect,
    Radio,
    YearPicker,
}

/// The current value of one control.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ControlValue {
    Single(String),
    Multi(Vec<String>),
}

impl ControlValue {
    /// Human readable form used in chart titles.
    pub fn label(&self) -> String {
        match self {
            ControlValue::Single(v) => v.clone(),
            ControlValue::Multi(vs) => vs.join(", "),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Control {
    pub id: String,
    pub label: String,
    pub widget: Widget,
    pub domain: Vec<String>,
    pub default: ControlValue,
}

impl Control {
    /// A single-value control defaulting to the first domain element.
    pub fn single(
        id: impl Into<String>,
        label: impl Into<String>,
        widget: Widget,
        domain: Vec<String>,
    ) -> Self {
        let default = ControlValue::Single(domain.first().cloned().unwrap_or_default());
        Self {
            id: id.into(),
            label: label.into(),
            widget,
            domain,
            default,
        }
    }

    /// A multi-select control defaulting to the first domain element.
    pub fn multi(id: impl Into<String>, label: impl Into<String>, domain: Vec<String>) -> Self {
        let default = ControlValue::Multi(domain.iter().take(1).cloned().collect());
        Self {
            id: id.into(),
            label: label.into(),
            widget: Widget::MultiSelect,
            domain,
            default,
        }
    }

    /// Replace the default. The value must lie in the domain.
    pub fn with_default(mut self, value: ControlValue) -> Self {
        if self.accepts(&value) {
            self.default = value;
        }
        self
    }

    pub fn is_multi(&self) -> bool {
        matches!(self.default, ControlValue::Multi(_))
    }

    /// True when `value` has this control's cardinality and every element
    /// lies in the domain.
    pub fn accepts(&self, value: &ControlValue) -> bool {
        match (value, self.is_multi()) {
            (ControlValue::Single(v), false) => self.domain.contains(v),
            (ControlValue::Multi(vs), true) => vs.iter().all(|v| self.domain.contains(v)),
            _ => false,
        }
    }
}

/// Ordered set of controls for one chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ControlRegistry {
    controls: Vec<Control>,
}

impl ControlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, control: Control) -> Self {
        self.controls.push(control);
        self
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn get(&self, id: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Every control at its default value.
    pub fn default_state(&self) -> ControlState {
        ControlState {
            values: self
                .controls
                .iter()
                .map(|c| (c.id.clone(), c.default.clone()))
                .collect(),
        }
    }

    /// Set one control, checking the id, cardinality and domain.
    pub fn apply(&self, state: &mut ControlState, id: &str, value: ControlValue) -> Result<()> {
        let control = self
            .get(id)
            .ok_or_else(|| DashError::invalid(format!("Unknown control '{id}'")))?;
        if !control.accepts(&value) {
            return Err(DashError::invalid(format!(
                "'{}' is not a valid choice for {}",
                value.label(),
                control.label
            )));
        }
        state.values.insert(id.to_string(), value);
        Ok(())
    }

    /// Parse a textual value for a control: comma separated for multi-select
    /// controls, verbatim otherwise.
    pub fn parse_value(&self, id: &str, raw: &str) -> Result<ControlValue> {
        let control = self
            .get(id)
            .ok_or_else(|| DashError::invalid(format!("Unknown control '{id}'")))?;
        if control.is_multi() {
            Ok(ControlValue::Multi(
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect(),
            ))
        } else {
            Ok(ControlValue::Single(raw.trim().to_string()))
        }
    }
}

/// Current value of every control, keyed by control id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ControlState {
    values: BTreeMap<String, ControlValue>,
}

impl ControlState {
    pub fn get(&self, id: &str) -> Option<&ControlValue> {
        self.values.get(id)
    }

    pub fn single(&self, id: &str) -> Result<&str> {
        match self.values.get(id) {
            Some(ControlValue::Single(v)) => Ok(v),
            Some(ControlValue::Multi(_)) => Err(DashError::invalid(format!(
                "Control '{id}' holds several values"
            ))),
            None => Err(DashError::invalid(format!("Unknown control '{id}'"))),
        }
    }

    pub fn multi(&self, id: &str) -> Result<&[String]> {
        match self.values.get(id) {
            Some(ControlValue::Multi(vs)) => Ok(vs),
            Some(ControlValue::Single(_)) => Err(DashError::invalid(format!(
                "Control '{id}' holds a single value"
            ))),
            None => Err(DashError::invalid(format!("Unknown control '{id}'"))),
        }
    }

    pub fn year(&self, id: &str) -> Result<i32> {
        let raw = self.single(id)?;
        raw.parse::<i32>()
            .map_err(|_| DashError::invalid(format!("'{raw}' is not a year")))
    }

    /// Membership toggle for multi-select controls; used by checkbox lists.
    pub fn toggled(&self, id: &str, item: &str) -> Result<ControlValue> {
        let mut current = self.multi(id)?.to_vec();
        if let Some(pos) = current.iter().position(|v| v == item) {
            current.remove(pos);
        } else {
            current.push(item.to_string());
        }
        Ok(ControlValue::Multi(current))
    }
}

/// Calendar years `first..=last` as a control domain.
pub fn year_domain(first: i32, last: i32) -> Vec<String> {
    (first..=last).map(|y| y.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stocks() -> Vec<String> {
        vec!["AAPL".into(), "MSFT".into(), "TSLA".into()]
    }

    fn registry() -> ControlRegistry {
        ControlRegistry::new()
            .with(Control::single("stock", "Stock", Widget::Radio, stocks()))
            .with(Control::multi("stocks", "Stocks", stocks()))
            .with(
                Control::single("end_year", "End Year", Widget::YearPicker, year_domain(2000, 2025))
                    .with_default(ControlValue::Single("2025".into())),
            )
    }

    #[test]
    fn defaults_take_first_domain_element() {
        let state = registry().default_state();
        assert_eq!(state.single("stock").unwrap(), "AAPL");
        assert_eq!(state.multi("stocks").unwrap(), ["AAPL".to_string()]);
        assert_eq!(state.year("end_year").unwrap(), 2025);
    }

    #[test]
    fn apply_validates_domain_and_cardinality() {
        let registry = registry();
        let mut state = registry.default_state();
        registry
            .apply(&mut state, "stock", ControlValue::Single("MSFT".into()))
            .unwrap();
        assert_eq!(state.single("stock").unwrap(), "MSFT");

        let outside = registry.apply(&mut state, "stock", ControlValue::Single("IBM".into()));
        assert!(outside.unwrap_err().is_invalid_selection());

        let wrong_kind = registry.apply(&mut state, "stock", ControlValue::Multi(vec![]));
        assert!(wrong_kind.is_err());

        let unknown = registry.apply(&mut state, "nope", ControlValue::Single("x".into()));
        assert!(unknown.is_err());
        assert_eq!(state.single("stock").unwrap(), "MSFT");
    }

    #[test]
    fn empty_multi_selection_is_allowed() {
        let registry = registry();
        let mut state = registry.default_state();
        registry
            .apply(&mut state, "stocks", ControlValue::Multi(vec![]))
            .unwrap();
        assert!(state.multi("stocks").unwrap().is_empty());
    }

    #[test]
    fn toggled_adds_and_removes() {
        let state = registry().default_state();
        assert_eq!(
            state.toggled("stocks", "TSLA").unwrap(),
            ControlValue::Multi(vec!["AAPL".into(), "TSLA".into()])
        );
        assert_eq!(
            state.toggled("stocks", "AAPL").unwrap(),
            ControlValue::Multi(vec![])
        );
    }

    #[test]
    fn parse_value_splits_multi() {
        let registry = registry();
        assert_eq!(
            registry.parse_value("stocks", "AAPL, TSLA").unwrap(),
            ControlValue::Multi(vec!["AAPL".into(), "TSLA".into()])
        );
        assert_eq!(
            registry.parse_value("stock", " MSFT ").unwrap(),
            ControlValue::Single("MSFT".into())
        );
    }

    #[test]
    fn empty_domain_defaults() {
        let control = Control::single("stock", "Stock", Widget::Radio, vec![]);
        assert_eq!(control.default, ControlValue::Single(String::new()));
        let multi = Control::multi("stocks", "Stocks", vec![]);
        assert_eq!(multi.default, ControlValue::Multi(vec![]));
    }
}

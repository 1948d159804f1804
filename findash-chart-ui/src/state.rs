//! Dashboard state managed via Dioxus context.
//!
//! `DashState` bundles the reactive signals of one dashboard app into a single
//! struct provided via `use_context_provider`. Child components retrieve it
//! with `use_context::<DashState>()`.

use findash_core::binder::Notice;
use findash_core::controls::{ControlRegistry, ControlState, ControlValue};
use findash_core::table::Table;
use dioxus::prelude::*;
use log::warn;

/// Shared state for all findash dashboard apps.
#[derive(Clone, Copy)]
pub struct DashState {
    /// Loaded or fetched data (None until available)
    pub table: Signal<Option<Table>>,
    /// Whether data is still loading
    pub loading: Signal<bool>,
    /// Warning or error shown in place of the charts
    pub notice: Signal<Option<Notice>>,
    /// Controls of the active dashboard
    pub registry: Signal<ControlRegistry>,
    /// Current value of every control
    pub controls: Signal<ControlState>,
}

impl DashState {
    /// Create a new DashState with default signal values.
    pub fn new() -> Self {
        Self {
            table: Signal::new(None),
            loading: Signal::new(true),
            notice: Signal::new(None),
            registry: Signal::new(ControlRegistry::new()),
            controls: Signal::new(ControlState::default()),
        }
    }

    /// State for a dashboard whose controls are known up front.
    pub fn with_registry(registry: ControlRegistry) -> Self {
        Self {
            controls: Signal::new(registry.default_state()),
            registry: Signal::new(registry),
            ..Self::new()
        }
    }

    /// Swap in the controls of a dashboard, every control at its default.
    pub fn install(&mut self, registry: ControlRegistry) {
        self.controls.set(registry.default_state());
        self.registry.set(registry);
    }

    /// Set one control. Values outside the control's domain are refused
    /// and the state is left unchanged.
    pub fn set_control(&mut self, id: &str, value: ControlValue) {
        let mut next = self.controls.peek().clone();
        let applied = self.registry.peek().apply(&mut next, id, value);
        match applied {
            Ok(()) => self.controls.set(next),
            Err(e) => warn!("Ignoring control change: {}", e),
        }
    }

    /// Add or remove `item` from a multi-select control.
    pub fn toggle(&mut self, id: &str, item: &str) {
        let toggled = self.controls.peek().toggled(id, item);
        match toggled {
            Ok(value) => self.set_control(id, value),
            Err(e) => warn!("Ignoring toggle on {}: {}", id, e),
        }
    }
}

impl Default for DashState {
    fn default() -> Self {
        Self::new()
    }
}

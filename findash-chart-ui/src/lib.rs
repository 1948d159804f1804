//! Shared Dioxus components and D3.js bridge for findash dashboard apps.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the D3.js chart functions via `js_sys::eval()`
//! - `state`: Reactive DashState with Dioxus Signals
//! - `sink`: the render sink that puts binder views on the page
//! - `components`: Reusable RSX components (control widgets, containers, tables)

pub mod components;
pub mod js_bridge;
pub mod sink;
pub mod state;

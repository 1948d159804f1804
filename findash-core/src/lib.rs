//! Core types for the findash dashboards.
//!
//! Every dashboard follows the same pipeline: a data source produces a
//! [`table::Table`], a [`controls::ControlRegistry`] declares the inputs, and a
//! [`binder::Binder`] maps the current [`controls::ControlState`] plus the
//! table to a set of [`chart::ChartSpec`]s handed to a render sink.

pub mod binder;
pub mod cache;
pub mod chart;
pub mod config;
pub mod controls;
pub mod csv_io;
pub mod dates;
pub mod error;
pub mod indicators;
pub mod price;
pub mod table;

pub use error::{DashError, Result};

//! Data boundary for two country dashboards: a global power-plant explorer and
//! a wealth/health motion chart.
//!
//! Loading, identifier resolution, wide-table reshaping and per-filter
//! aggregation live here. Drawing is left to the browser, which talks to the
//! [`server`] or consumes the JSON printed by the [`cli`].

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod plants;
pub mod server;
pub mod stats;
pub mod trends;

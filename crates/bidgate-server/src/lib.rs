//! bidgate server library entry.
//!
//! This crate wires strict config, activity resolution, the metrics
//! registry, and the operational HTTP surface around `bidgate-core`. It is
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod context;
pub mod obs;
pub mod ops;
pub mod policy;
pub mod router;

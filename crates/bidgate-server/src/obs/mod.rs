//! Lightweight in-process metrics.
//!
//! Activity governance counters are stored as atomics and rendered by the
//! `/metrics` handler in Prometheus text format.

pub mod metrics;

pub use metrics::{ActivityMetricsRegistry, CounterVec};

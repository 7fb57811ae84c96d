//! bidgate core: activity governance for the auction server.
//!
//! This crate decides, per request and per privacy-sensitive operation,
//! whether that operation may proceed. It carries no transport or runtime
//! dependencies; the metrics backend is injected through `ActivityMetrics`.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Misconfiguration
//! surfaces as `BidgateError::Configuration` at construction time; the query
//! path has no error outcome at all.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod activity;
pub mod error;
pub mod metrics;

/// Shared result type.
pub use error::{Result, BidgateError};
pub use metrics::ActivityMetrics;

//! Policy layer (rule compilation, account resolution).
//!
//! Compiles activity configuration into evaluable rule lists at startup and
//! merges account overrides over system defaults, so per-request setup is
//! a cheap clone.

pub mod compile;
pub mod resolver;

pub use resolver::{ActivitiesResolver, ResolvedActivities, UNKNOWN_ACCOUNT};

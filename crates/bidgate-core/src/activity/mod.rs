//! Activity permission engine.
//!
//! - `vocab`: closed sets of activities and caller classes, trace levels.
//! - `rule`: conditions (component, GPP sid, geo, GPC, composites) and rules.
//! - `configuration`: ordered rules + default outcome for one activity.
//! - `infrastructure`: per-request facade that checks coverage at
//!   construction, answers queries, and emits tiered metrics.
//!
//! Evaluation is a pure function of configuration and call context, so a
//! single facade can be queried concurrently without locking.

pub mod configuration;
pub mod infrastructure;
pub mod payload;
pub mod rule;
pub mod vocab;

pub use configuration::{ActivityConfiguration, ActivityContextResult};
pub use infrastructure::ActivityInfrastructure;
pub use payload::{ActivityInvocationPayload, RequestContext};
pub use rule::{Condition, GeoCode, Rule};
pub use vocab::{Activity, ComponentType, TraceLevel};

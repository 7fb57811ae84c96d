//! Metrics sink contract consumed by the activity facade.
//!
//! Write-only and fire-and-forget. Implementations are shared across every
//! task of a request and must tolerate concurrent increments without loss.

use crate::activity::Activity;

pub trait ActivityMetrics: Send + Sync {
    fn record_request_processed_rules(&self, count: usize);
    fn record_account_processed_rules(&self, account_id: &str, count: usize);
    fn record_request_disallowed(&self, activity: Activity);
    fn record_account_disallowed(&self, account_id: &str, activity: Activity);
    /// Component (adapter) scope; emitted at every trace level.
    fn record_component_disallowed(&self, component_name: &str, activity: Activity);
}

//! Per-account/request activity governance facade.
//!
//! Construct once per request context from a resolved configuration map,
//! then share (`&`/`Arc`) across every task that is about to perform a
//! governed operation. Queries never fail: `false` means "skip it".

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{BidgateError, Result};
use crate::metrics::ActivityMetrics;

use super::configuration::{ActivityConfiguration, ActivityContextResult};
use super::payload::ActivityInvocationPayload;
use super::vocab::{Activity, ComponentType, TraceLevel};

pub struct ActivityInfrastructure {
    account_id: String,
    // indexed by Activity::index()
    configurations: [ActivityConfiguration; Activity::COUNT],
    trace_level: TraceLevel,
    metrics: Arc<dyn ActivityMetrics>,
}

impl std::fmt::Debug for ActivityInfrastructure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityInfrastructure")
            .field("account_id", &self.account_id)
            .field("trace_level", &self.trace_level)
            .finish_non_exhaustive()
    }
}

impl ActivityInfrastructure {
    /// Fails with `BidgateError::Configuration` naming every activity the map
    /// leaves uncovered. Extra keys cannot exist; duplicates are impossible.
    pub fn new(
        account_id: impl Into<String>,
        mut configurations: HashMap<Activity, ActivityConfiguration>,
        trace_level: TraceLevel,
        metrics: Arc<dyn ActivityMetrics>,
    ) -> Result<Self> {
        let account_id = account_id.into();

        let mut ordered = Vec::with_capacity(Activity::COUNT);
        let mut missing = Vec::new();
        for activity in Activity::ALL {
            match configurations.remove(&activity) {
                Some(cfg) => ordered.push(cfg),
                None => missing.push(activity.as_str()),
            }
        }

        if !missing.is_empty() {
            tracing::warn!(
                account = %account_id,
                missing = ?missing,
                "activity configuration incomplete"
            );
            return Err(BidgateError::Configuration(format!(
                "account {account_id}: no configuration for activities [{}]",
                missing.join(", ")
            )));
        }

        let configurations: [ActivityConfiguration; Activity::COUNT] =
            ordered.try_into().map_err(|_| {
                BidgateError::Internal("activity table size mismatch".into())
            })?;

        Ok(Self {
            account_id,
            configurations,
            trace_level,
            metrics,
        })
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn trace_level(&self) -> TraceLevel {
        self.trace_level
    }

    pub fn configuration(&self, activity: Activity) -> &ActivityConfiguration {
        &self.configurations[activity.index()]
    }

    pub fn is_allowed(
        &self,
        activity: Activity,
        component_type: ComponentType,
        component_name: &str,
    ) -> bool {
        self.is_allowed_with(
            activity,
            &ActivityInvocationPayload::new(component_type, component_name),
        )
    }

    /// Same as `is_allowed`, with request attributes for contextual rules.
    pub fn is_allowed_with(
        &self,
        activity: Activity,
        payload: &ActivityInvocationPayload<'_>,
    ) -> bool {
        let result = self.configuration(activity).evaluate(payload);

        if self.trace_level.is_verbose() {
            tracing::debug!(
                account = %self.account_id,
                activity = %activity,
                component_type = %payload.component_type,
                component_name = %payload.component_name,
                allowed = result.allowed,
                processed_rules = result.processed_rules,
                "activity evaluated"
            );
        }

        self.record(activity, payload.component_name, result);
        result.allowed
    }

    fn record(&self, activity: Activity, component_name: &str, result: ActivityContextResult) {
        let verbose = self.trace_level.is_verbose();

        if result.processed_rules > 0 {
            self.metrics.record_request_processed_rules(result.processed_rules);
            if verbose {
                self.metrics
                    .record_account_processed_rules(&self.account_id, result.processed_rules);
            }
        }

        if !result.allowed {
            self.metrics.record_request_disallowed(activity);
            self.metrics.record_component_disallowed(component_name, activity);
            if verbose {
                self.metrics.record_account_disallowed(&self.account_id, activity);
            }
        }
    }
}

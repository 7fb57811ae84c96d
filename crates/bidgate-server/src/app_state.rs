//! Shared application state for the bidgate server.
//!
//! Built once at startup: config is resolved into per-account activity
//! configurations and the metrics registry is shared by every request.

use std::sync::Arc;

use bidgate_core::activity::{ActivityInfrastructure, TraceLevel};
use bidgate_core::error::Result;

use crate::config::BidgateConfig;
use crate::obs::ActivityMetricsRegistry;
use crate::policy::{ActivitiesResolver, UNKNOWN_ACCOUNT};

#[derive(Clone)]
pub struct AppState {
    resolver: Arc<ActivitiesResolver>,
    metrics: Arc<ActivityMetricsRegistry>,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: &BidgateConfig) -> Result<Self> {
        let resolver = ActivitiesResolver::new(cfg)
            .map_err(|e| e.context("activity config resolution failed"))?;

        Ok(Self {
            resolver: Arc::new(resolver),
            metrics: Arc::new(ActivityMetricsRegistry::default()),
        })
    }

    pub fn resolver(&self) -> &ActivitiesResolver {
        &self.resolver
    }

    pub fn metrics(&self) -> Arc<ActivityMetricsRegistry> {
        Arc::clone(&self.metrics)
    }

    /// Per-request facade.
    ///
    /// Configured accounts: `requested` can only raise the account's level.
    /// Unknown accounts: system defaults at the server level, metrics under
    /// `UNKNOWN_ACCOUNT`; `requested` is ignored.
    pub fn activity_infrastructure(
        &self,
        account_id: &str,
        requested: Option<TraceLevel>,
    ) -> Result<ActivityInfrastructure> {
        let (label, resolved, trace_level) = match self.resolver.account(account_id) {
            Some(resolved) => {
                let level = requested
                    .map_or(resolved.trace_level, |r| r.max(resolved.trace_level));
                (account_id, resolved, level)
            }
            None => {
                let defaults = self.resolver.defaults();
                (UNKNOWN_ACCOUNT, defaults, defaults.trace_level)
            }
        };

        ActivityInfrastructure::new(
            label,
            resolved.configurations(),
            trace_level,
            self.metrics.clone(),
        )
        .inspect_err(|_| self.metrics.record_infrastructure_failure(label))
    }
}

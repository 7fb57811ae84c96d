//! Activity configuration resolution (system defaults + account overrides).
//!
//! Resolved once at startup. Per-request infrastructure construction then
//! clones `Arc`-backed rule lists only.

use std::collections::HashMap;

use bidgate_core::activity::{Activity, ActivityConfiguration, Rule, TraceLevel};
use bidgate_core::error::Result;

use crate::config::schema::{AccountConfig, BidgateConfig};

use super::compile::compile_rules;

/// Total activity mapping plus trace level for one account.
#[derive(Debug, Clone)]
pub struct ResolvedActivities {
    pub trace_level: TraceLevel,
    configurations: HashMap<Activity, ActivityConfiguration>,
}

impl ResolvedActivities {
    /// Fresh mapping, ready to hand to `ActivityInfrastructure::new`.
    pub fn configurations(&self) -> HashMap<Activity, ActivityConfiguration> {
        self.configurations.clone()
    }

    pub fn configuration(&self, activity: Activity) -> Option<&ActivityConfiguration> {
        self.configurations.get(&activity)
    }
}

/// Metrics label for requests under accounts absent from config. Keeps
/// caller-supplied account ids out of the label space.
pub const UNKNOWN_ACCOUNT: &str = "unknown";

struct SystemDefault {
    default_allowed: bool,
    rules: Vec<Rule>,
}

pub struct ActivitiesResolver {
    defaults: ResolvedActivities,
    accounts: HashMap<String, ResolvedActivities>,
}

impl ActivitiesResolver {
    pub fn new(cfg: &BidgateConfig) -> Result<Self> {
        // indexed by Activity::index()
        let system = Activity::ALL
            .iter()
            .map(|activity| match cfg.activities.get(activity) {
                Some(a) => Ok(SystemDefault {
                    default_allowed: a.default,
                    rules: compile_rules(&a.rules)?,
                }),
                None => Ok(SystemDefault {
                    default_allowed: true,
                    rules: Vec::new(),
                }),
            })
            .collect::<Result<Vec<_>>>()?;

        let defaults = ResolvedActivities {
            trace_level: cfg.server.trace_level,
            configurations: Activity::ALL
                .iter()
                .zip(&system)
                .map(|(a, s)| {
                    (*a, ActivityConfiguration::new(s.default_allowed, s.rules.clone()))
                })
                .collect(),
        };

        let mut accounts = HashMap::with_capacity(cfg.accounts.len());
        for account in &cfg.accounts {
            let resolved = resolve_account(account, &system, cfg.server.trace_level)?;
            tracing::debug!(
                account = %account.id,
                trace_level = ?resolved.trace_level,
                "account activities resolved"
            );
            accounts.insert(account.id.clone(), resolved);
        }

        Ok(Self { defaults, accounts })
    }

    /// `None` for accounts absent from config.
    pub fn account(&self, account_id: &str) -> Option<&ResolvedActivities> {
        self.accounts.get(account_id)
    }

    /// System defaults at the server trace level.
    pub fn defaults(&self) -> &ResolvedActivities {
        &self.defaults
    }

    pub fn knows_account(&self, account_id: &str) -> bool {
        self.accounts.contains_key(account_id)
    }
}

fn resolve_account(
    account: &AccountConfig,
    system: &[SystemDefault],
    server_trace_level: TraceLevel,
) -> Result<ResolvedActivities> {
    let mut configurations = HashMap::with_capacity(Activity::COUNT);

    for activity in Activity::ALL {
        let sys = &system[activity.index()];

        let cfg = match account.activities.get(&activity) {
            Some(over) => {
                // account rules first, inherited fallbacks last
                let mut rules = compile_rules(&over.rules)?;
                if over.inherit {
                    rules.extend_from_slice(&sys.rules);
                }
                ActivityConfiguration::new(over.default.unwrap_or(sys.default_allowed), rules)
            }
            None => ActivityConfiguration::new(sys.default_allowed, sys.rules.clone()),
        };
        configurations.insert(activity, cfg);
    }

    Ok(ResolvedActivities {
        trace_level: account.trace_level.unwrap_or(server_trace_level),
        configurations,
    })
}

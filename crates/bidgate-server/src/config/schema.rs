use std::collections::{BTreeMap, HashSet};
use std::net::SocketAddr;

use bidgate_core::activity::{Activity, ComponentType, TraceLevel};
use bidgate_core::error::{BidgateError, Result};
use serde::Deserialize;

use crate::policy::compile::compile_rules;
use crate::policy::UNKNOWN_ACCOUNT;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BidgateConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    /// System-wide defaults, one entry per activity (missing => allow all).
    #[serde(default)]
    pub activities: BTreeMap<Activity, ActivityConfig>,

    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
}

impl BidgateConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(BidgateError::UnsupportedVersion);
        }

        self.server.validate()?;

        for (activity, cfg) in &self.activities {
            compile_rules(&cfg.rules).map_err(|e| e.context(format!("activities.{activity}")))?;
        }

        let mut seen = HashSet::new();
        for account in &self.accounts {
            if account.id.trim().is_empty() {
                return Err(BidgateError::BadRequest("accounts[].id must not be empty".into()));
            }
            if account.id == UNKNOWN_ACCOUNT {
                return Err(BidgateError::BadRequest(format!(
                    "account id {UNKNOWN_ACCOUNT:?} is reserved"
                )));
            }
            if !seen.insert(account.id.as_str()) {
                return Err(BidgateError::BadRequest(format!(
                    "duplicate account id: {}",
                    account.id
                )));
            }
            for (activity, cfg) in &account.activities {
                compile_rules(&cfg.rules).map_err(|e| {
                    e.context(format!("accounts[{}].activities.{activity}", account.id))
                })?;
            }
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Trace level for accounts that do not set their own.
    #[serde(default)]
    pub trace_level: TraceLevel,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            trace_level: TraceLevel::default(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            BidgateError::BadRequest(format!(
                "server.listen must be a valid socket address: {}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

fn default_true() -> bool {
    true
}

/// System default policy for one activity.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActivityConfig {
    #[serde(default = "default_true")]
    pub default: bool,
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountConfig {
    pub id: String,
    #[serde(default)]
    pub trace_level: Option<TraceLevel>,
    #[serde(default)]
    pub activities: BTreeMap<Activity, AccountActivityConfig>,
}

/// Account override for one activity.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountActivityConfig {
    /// Falls back to the system default when unset.
    #[serde(default)]
    pub default: Option<bool>,
    /// Evaluated before any inherited system rules.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
    /// Append the system default rules after the account's own.
    #[serde(default = "default_true")]
    pub inherit: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub allow: bool,
    #[serde(default)]
    pub condition: ConditionConfig,
}

/// Present fields are AND-ed; an empty condition matches every call.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConditionConfig {
    #[serde(default)]
    pub component_type: Option<Vec<ComponentType>>,
    #[serde(default)]
    pub component_name: Option<Vec<String>>,
    #[serde(default)]
    pub gpp_sid: Option<Vec<u16>>,
    /// `COUNTRY` or `COUNTRY.REGION`.
    #[serde(default)]
    pub geo: Option<Vec<String>>,
    #[serde(default)]
    pub gpc: Option<String>,
    #[serde(default)]
    pub all: Option<Vec<ConditionConfig>>,
    #[serde(default)]
    pub any: Option<Vec<ConditionConfig>>,
}

//! Server config loader (strict parsing).

pub mod schema;

use std::fs;

use bidgate_core::error::{BidgateError, Result};

pub use schema::{
    AccountActivityConfig, AccountConfig, ActivityConfig, BidgateConfig, ConditionConfig,
    RuleConfig, ServerSection,
};

/// Env var overriding the config path.
pub const CONFIG_PATH_ENV: &str = "BIDGATE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "bidgate.yaml";

pub fn config_path() -> String {
    std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

pub fn load_from_file(path: &str) -> Result<BidgateConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| BidgateError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<BidgateConfig> {
    let cfg: BidgateConfig = serde_yaml::from_str(s)
        .map_err(|e| BidgateError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

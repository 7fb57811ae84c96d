use bidgate_core::activity::{ActivityInfrastructure, TraceLevel};
use bidgate_core::error::Result;

use crate::app_state::AppState;

/// Governance context for one request under one account.
#[derive(Debug)]
pub struct AccountContext {
    /// As supplied by the caller, even when unknown.
    pub account_id: String,
    /// False when the account is not configured and system defaults apply.
    pub known: bool,
    pub activities: ActivityInfrastructure,
}

/// Resolve the account's activity facade or abort the request context.
pub fn resolve_account(
    state: &AppState,
    account_id: &str,
    trace_level: Option<TraceLevel>,
) -> Result<AccountContext> {
    let known = state.resolver().knows_account(account_id);
    if !known {
        tracing::debug!(account = %account_id, "unknown account, using system defaults");
    }
    let activities = state.activity_infrastructure(account_id, trace_level)?;
    Ok(AccountContext {
        account_id: account_id.to_string(),
        known,
        activities,
    })
}

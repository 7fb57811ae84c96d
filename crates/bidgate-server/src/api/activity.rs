//! `POST /v1/activity/check`
//!
//! One infrastructure is built per call (i.e. per auction request) and
//! every check in the batch is evaluated against it, mirroring how an
//! orchestrator queries once per candidate partner.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use bidgate_core::activity::{
    Activity, ActivityInvocationPayload, ComponentType, RequestContext, TraceLevel,
};
use bidgate_core::error::{BidgateError, ClientCode, Result};

use crate::app_state::AppState;
use crate::context::resolve_account;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckRequest {
    pub account: String,
    #[serde(default)]
    pub trace_level: Option<TraceLevel>,
    #[serde(default)]
    pub request: Option<RequestContext>,
    pub checks: Vec<CheckItem>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckItem {
    pub activity: Activity,
    pub component_type: ComponentType,
    pub component_name: String,
}

/// Component names become metric labels.
pub const MAX_COMPONENT_NAME_LEN: usize = 64;

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub account: String,
    /// False when system defaults were applied.
    pub known_account: bool,
    /// One entry per check, in request order.
    pub allowed: Vec<bool>,
}

pub async fn check(State(state): State<AppState>, Json(req): Json<CheckRequest>) -> Response {
    match evaluate(&state, &req) {
        Ok(resp) => (StatusCode::OK, Json(resp)).into_response(),
        Err(e) => error_response(&e),
    }
}

pub fn evaluate(state: &AppState, req: &CheckRequest) -> Result<CheckResponse> {
    if req.checks.is_empty() {
        return Err(BidgateError::BadRequest("checks must not be empty".into()));
    }
    for (i, c) in req.checks.iter().enumerate() {
        validate_component_name(&c.component_name)
            .map_err(|e| e.context(format!("checks[{i}]")))?;
    }

    let ctx = resolve_account(state, &req.account, req.trace_level)?;

    let allowed = req
        .checks
        .iter()
        .map(|c| {
            let mut payload = ActivityInvocationPayload::new(c.component_type, &c.component_name);
            if let Some(r) = &req.request {
                payload = payload.with_request(r);
            }
            ctx.activities.is_allowed_with(c.activity, &payload)
        })
        .collect();

    Ok(CheckResponse {
        account: ctx.account_id,
        known_account: ctx.known,
        allowed,
    })
}

/// Bidder/module codes: ASCII alphanumerics plus `_`, `-`, `.`.
fn validate_component_name(name: &str) -> Result<()> {
    if name.is_empty() || name.len() > MAX_COMPONENT_NAME_LEN {
        return Err(BidgateError::BadRequest(format!(
            "component_name must be 1..={MAX_COMPONENT_NAME_LEN} bytes"
        )));
    }
    if !name
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.'))
    {
        return Err(BidgateError::BadRequest(format!(
            "component_name has invalid characters: {name:?}"
        )));
    }
    Ok(())
}

pub(crate) fn error_response(e: &BidgateError) -> Response {
    let code = e.client_code();
    let status = match code {
        ClientCode::BadRequest | ClientCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
        ClientCode::Misconfigured | ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!(error = %e, "activity check failed");
    }
    let body = json!({ "code": code.as_str(), "msg": e.to_string() });
    (status, Json(body)).into_response()
}

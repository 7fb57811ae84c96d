//! Rule conditions and their matching.
//!
//! Conditions form a closed set of variants. Component names and geo codes
//! compare ASCII case-insensitively. Contextual predicates (GPP sid, geo,
//! GPC) never match a payload that carries no request context.

use crate::error::{BidgateError, Result};

use super::payload::{ActivityInvocationPayload, RequestContext};
use super::vocab::ComponentType;

/// Compiled geo code: `USA` (any region) or `USA.CA`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoCode {
    pub country: String,
    pub region: Option<String>, // None => wildcard
}

impl GeoCode {
    pub fn parse(raw: &str) -> Result<Self> {
        let (country, region) = match raw.split_once('.') {
            Some((c, r)) => (c, Some(r)),
            None => (raw, None),
        };
        let bad_region = region.is_some_and(|r| r.is_empty() || r.contains('.'));
        if country.is_empty() || bad_region {
            return Err(BidgateError::BadRequest(format!(
                "invalid geo code: {raw} (expected COUNTRY or COUNTRY.REGION)"
            )));
        }
        Ok(Self {
            country: country.to_string(),
            region: region.map(str::to_string),
        })
    }

    fn matches(&self, request: &RequestContext) -> bool {
        let Some(country) = request.country.as_deref() else {
            return false;
        };
        if !self.country.eq_ignore_ascii_case(country) {
            return false;
        }
        match (&self.region, request.region.as_deref()) {
            (None, _) => true,
            (Some(want), Some(got)) => want.eq_ignore_ascii_case(got),
            (Some(_), None) => false,
        }
    }
}

/// Predicate over one call context.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Matches every call.
    Always,
    ComponentType(Vec<ComponentType>),
    ComponentName(Vec<String>),
    GppSid(Vec<u16>),
    Geo(Vec<GeoCode>),
    Gpc(String),
    /// Every nested condition matches (vacuously true when empty).
    All(Vec<Condition>),
    /// At least one nested condition matches.
    Any(Vec<Condition>),
}

impl Condition {
    pub fn matches(&self, payload: &ActivityInvocationPayload<'_>) -> bool {
        match self {
            Condition::Always => true,
            Condition::ComponentType(types) => types.contains(&payload.component_type),
            Condition::ComponentName(names) => names
                .iter()
                .any(|n| n.eq_ignore_ascii_case(payload.component_name)),
            Condition::GppSid(sids) => payload
                .request
                .is_some_and(|r| r.gpp_sids.iter().any(|sid| sids.contains(sid))),
            Condition::Geo(codes) => payload
                .request
                .is_some_and(|r| codes.iter().any(|code| code.matches(r))),
            Condition::Gpc(value) => payload
                .request
                .and_then(|r| r.gpc.as_deref())
                .is_some_and(|gpc| gpc == value),
            Condition::All(conds) => conds.iter().all(|c| c.matches(payload)),
            Condition::Any(conds) => conds.iter().any(|c| c.matches(payload)),
        }
    }
}

/// Condition bound to an allow/deny outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub condition: Condition,
    pub allowed: bool,
}

impl Rule {
    pub fn allow(condition: Condition) -> Self {
        Self { condition, allowed: true }
    }

    pub fn deny(condition: Condition) -> Self {
        Self { condition, allowed: false }
    }

    /// `Some(outcome)` when the condition matches, `None` to fall through.
    pub fn decide(&self, payload: &ActivityInvocationPayload<'_>) -> Option<bool> {
        self.condition.matches(payload).then_some(self.allowed)
    }
}

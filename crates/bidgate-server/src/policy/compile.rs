//! Rule compilation from config into evaluable conditions.
//!
//! Each present field of a condition becomes one predicate; multiple
//! predicates are AND-ed, none at all means "always". Empty lists are
//! rejected since they could never match and almost always signal a typo.

use bidgate_core::activity::{Condition, GeoCode, Rule};
use bidgate_core::error::{BidgateError, Result};

use crate::config::schema::{ConditionConfig, RuleConfig};

pub fn compile_rules(raw: &[RuleConfig]) -> Result<Vec<Rule>> {
    let mut out = Vec::with_capacity(raw.len());
    for (i, r) in raw.iter().enumerate() {
        let condition =
            compile_condition(&r.condition).map_err(|e| e.context(format!("rules[{i}]")))?;
        out.push(Rule {
            condition,
            allowed: r.allow,
        });
    }
    Ok(out)
}

pub fn compile_condition(raw: &ConditionConfig) -> Result<Condition> {
    let mut parts = Vec::new();

    if let Some(types) = &raw.component_type {
        parts.push(Condition::ComponentType(non_empty("component_type", types)?.to_vec()));
    }
    if let Some(names) = &raw.component_name {
        parts.push(Condition::ComponentName(non_empty("component_name", names)?.to_vec()));
    }
    if let Some(sids) = &raw.gpp_sid {
        parts.push(Condition::GppSid(non_empty("gpp_sid", sids)?.to_vec()));
    }
    if let Some(codes) = &raw.geo {
        let codes = non_empty("geo", codes)?
            .iter()
            .map(|c| GeoCode::parse(c))
            .collect::<Result<Vec<_>>>()?;
        parts.push(Condition::Geo(codes));
    }
    if let Some(gpc) = &raw.gpc {
        parts.push(Condition::Gpc(gpc.clone()));
    }
    if let Some(all) = &raw.all {
        parts.push(Condition::All(compile_nested(all)?));
    }
    if let Some(any) = &raw.any {
        parts.push(Condition::Any(compile_nested(non_empty("any", any)?)?));
    }

    Ok(match parts.len() {
        0 => Condition::Always,
        1 => parts.remove(0),
        _ => Condition::All(parts),
    })
}

fn compile_nested(raw: &[ConditionConfig]) -> Result<Vec<Condition>> {
    raw.iter().map(compile_condition).collect()
}

fn non_empty<'a, T>(field: &str, v: &'a [T]) -> Result<&'a [T]> {
    if v.is_empty() {
        return Err(BidgateError::BadRequest(format!("condition.{field} must not be empty")));
    }
    Ok(v)
}

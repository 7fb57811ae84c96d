//! Per-activity decision policy.

use std::sync::Arc;

use super::payload::ActivityInvocationPayload;
use super::rule::Rule;

/// Outcome of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityContextResult {
    pub allowed: bool,
    /// Rules inspected to reach the decision, at most the configured count.
    pub processed_rules: usize,
}

impl ActivityContextResult {
    pub fn of(allowed: bool, processed_rules: usize) -> Self {
        Self { allowed, processed_rules }
    }
}

/// Ordered rules plus the fallback outcome for one activity.
///
/// Rules are evaluated strictly in stored order and the first match wins;
/// exhausting the list yields `default_allowed`. Ordering is the producer's
/// job (overrides first, fallbacks last). Rules sit behind an `Arc` so a
/// resolved configuration can be handed to every request for free.
#[derive(Debug, Clone)]
pub struct ActivityConfiguration {
    default_allowed: bool,
    rules: Arc<[Rule]>,
}

impl Default for ActivityConfiguration {
    fn default() -> Self {
        Self::allow_all()
    }
}

impl ActivityConfiguration {
    pub fn new(default_allowed: bool, rules: Vec<Rule>) -> Self {
        Self {
            default_allowed,
            rules: rules.into(),
        }
    }

    /// No rules, default allow.
    pub fn allow_all() -> Self {
        Self::new(true, Vec::new())
    }

    pub fn default_allowed(&self) -> bool {
        self.default_allowed
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn evaluate(&self, payload: &ActivityInvocationPayload<'_>) -> ActivityContextResult {
        let mut processed = 0;
        for rule in self.rules.iter() {
            processed += 1;
            if let Some(allowed) = rule.decide(payload) {
                return ActivityContextResult::of(allowed, processed);
            }
        }
        ActivityContextResult::of(self.default_allowed, processed)
    }
}

//! Activity metrics registry.
//!
//! Counters with dynamic labels backed by `DashMap` + atomics, so every
//! partner task of a request can increment concurrently without locking a
//! global registry. Labels are flattened into sorted key vectors to keep
//! deterministic ordering.

use dashmap::{DashMap, DashSet};
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use bidgate_core::activity::Activity;
use bidgate_core::ActivityMetrics;

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let key = Self::key(labels);
        let counter = self.map.entry(key).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value (0 when never incremented).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&Self::key(labels))
            .map(|c| c.value().load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Number of distinct label sets.
    pub fn series(&self) -> usize {
        self.map.len()
    }

    fn key(labels: &[(&str, &str)]) -> Vec<(String, String)> {
        let mut key: Vec<(String, String)> = labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        key.sort();
        key
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        for r in self.map.iter() {
            let val = r.value().load(Ordering::Relaxed);
            let label_str = r
                .key()
                .iter()
                .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                .collect::<Vec<_>>()
                .join(",");
            if label_str.is_empty() {
                let _ = writeln!(out, "{} {}", name, val);
            } else {
                let _ = writeln!(out, "{}{{{}}} {}", name, label_str, val);
            }
        }
    }
}

const SCOPE_REQUEST: &str = "request";
const SCOPE_ACCOUNT: &str = "account";
const SCOPE_ADAPTER: &str = "adapter";

/// Distinct component labels kept before folding into `OVERFLOW_COMPONENT`.
pub const DEFAULT_MAX_COMPONENT_LABELS: usize = 512;
pub const OVERFLOW_COMPONENT: &str = "__overflow__";

/// Process-wide sink for activity governance counters.
pub struct ActivityMetricsRegistry {
    pub processed_rules: CounterVec,
    pub disallowed: CounterVec,
    pub infrastructure_failures: CounterVec,
    // soft cap: concurrent first-seen names may overshoot by a few
    component_labels: DashSet<String>,
    max_component_labels: usize,
}

impl Default for ActivityMetricsRegistry {
    fn default() -> Self {
        Self::with_component_cap(DEFAULT_MAX_COMPONENT_LABELS)
    }
}

impl ActivityMetricsRegistry {
    pub fn with_component_cap(max_component_labels: usize) -> Self {
        Self {
            processed_rules: CounterVec::default(),
            disallowed: CounterVec::default(),
            infrastructure_failures: CounterVec::default(),
            component_labels: DashSet::new(),
            max_component_labels,
        }
    }

    /// Component names are caller-supplied; bound the adapter label space.
    fn component_label<'a>(&self, component_name: &'a str) -> &'a str {
        if self.component_labels.contains(component_name) {
            return component_name;
        }
        if self.component_labels.len() >= self.max_component_labels {
            return OVERFLOW_COMPONENT;
        }
        self.component_labels.insert(component_name.to_string());
        component_name
    }

    pub fn record_infrastructure_failure(&self, account_id: &str) {
        self.infrastructure_failures.inc(&[("account", account_id)]);
    }

    /// Render all registered metrics.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.processed_rules
            .render("bidgate_activity_processed_rules_total", &mut out);
        self.disallowed
            .render("bidgate_activity_disallowed_total", &mut out);
        self.infrastructure_failures
            .render("bidgate_activity_infrastructure_failures_total", &mut out);
        out
    }
}

impl ActivityMetrics for ActivityMetricsRegistry {
    fn record_request_processed_rules(&self, count: usize) {
        self.processed_rules
            .add(&[("scope", SCOPE_REQUEST)], count as u64);
    }

    fn record_account_processed_rules(&self, account_id: &str, count: usize) {
        self.processed_rules.add(
            &[("scope", SCOPE_ACCOUNT), ("account", account_id)],
            count as u64,
        );
    }

    fn record_request_disallowed(&self, activity: Activity) {
        self.disallowed
            .inc(&[("scope", SCOPE_REQUEST), ("activity", activity.as_str())]);
    }

    fn record_account_disallowed(&self, account_id: &str, activity: Activity) {
        self.disallowed.inc(&[
            ("scope", SCOPE_ACCOUNT),
            ("account", account_id),
            ("activity", activity.as_str()),
        ]);
    }

    fn record_component_disallowed(&self, component_name: &str, activity: Activity) {
        self.disallowed.inc(&[
            ("scope", SCOPE_ADAPTER),
            ("component", self.component_label(component_name)),
            ("activity", activity.as_str()),
        ]);
    }
}

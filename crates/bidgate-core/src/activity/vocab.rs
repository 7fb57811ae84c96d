//! Closed vocabulary: governed activities, caller classes, trace levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BidgateError, Result};

/// A privacy-sensitive operation kind the server may perform.
///
/// The discriminant doubles as the ordinal used to index per-activity tables,
/// so `ALL` must list every variant in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    SyncUser = 0,
    CallBidder = 1,
    ModifyUfpd = 2,
    TransmitUfpd = 3,
    TransmitEids = 4,
    TransmitPreciseGeo = 5,
    TransmitTid = 6,
    ReportAnalytics = 7,
}

impl Activity {
    pub const COUNT: usize = 8;

    pub const ALL: [Activity; Activity::COUNT] = [
        Activity::SyncUser,
        Activity::CallBidder,
        Activity::ModifyUfpd,
        Activity::TransmitUfpd,
        Activity::TransmitEids,
        Activity::TransmitPreciseGeo,
        Activity::TransmitTid,
        Activity::ReportAnalytics,
    ];

    /// Ordinal in `[0, COUNT)`.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Activity::SyncUser => "sync_user",
            Activity::CallBidder => "call_bidder",
            Activity::ModifyUfpd => "modify_ufpd",
            Activity::TransmitUfpd => "transmit_ufpd",
            Activity::TransmitEids => "transmit_eids",
            Activity::TransmitPreciseGeo => "transmit_precise_geo",
            Activity::TransmitTid => "transmit_tid",
            Activity::ReportAnalytics => "report_analytics",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Activity {
    type Err = BidgateError;

    fn from_str(s: &str) -> Result<Self> {
        Activity::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| BidgateError::BadRequest(format!("unknown activity: {s}")))
    }
}

/// Classification of the module attempting an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    Bidder,
    Analytics,
    UserIdModule,
    RtdModule,
    GeneralModule,
}

impl ComponentType {
    pub const ALL: [ComponentType; 5] = [
        ComponentType::Bidder,
        ComponentType::Analytics,
        ComponentType::UserIdModule,
        ComponentType::RtdModule,
        ComponentType::GeneralModule,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ComponentType::Bidder => "bidder",
            ComponentType::Analytics => "analytics",
            ComponentType::UserIdModule => "user_id_module",
            ComponentType::RtdModule => "rtd_module",
            ComponentType::GeneralModule => "general_module",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentType {
    type Err = BidgateError;

    fn from_str(s: &str) -> Result<Self> {
        ComponentType::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| BidgateError::BadRequest(format!("unknown component type: {s}")))
    }
}

/// Operator-controlled verbosity. Gates account-scoped metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceLevel {
    #[default]
    Basic,
    Verbose,
}

impl TraceLevel {
    pub fn is_verbose(self) -> bool {
        matches!(self, TraceLevel::Verbose)
    }
}

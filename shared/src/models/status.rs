//! Restaurant Status Model (derived, never persisted)
//!
//! The single value the public storefront consumes to decide whether the
//! "place order" affordances are enabled. Recomputed by the server's status
//! watcher; consumers must treat it as read-only.

use serde::{Deserialize, Serialize};

use super::schedule::DayOfWeek;

/// Why the schedule matcher decided the way it did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoursReason {
    /// No schedule configured at all (fail safe: closed)
    NoSchedule,
    /// The day entry is marked closed
    DayClosed,
    /// Day is open but has no intervals
    NoIntervals,
    /// Day is open but no interval contains the probe time
    NoMatch,
    /// An interval matched
    Matched,
}

/// Diagnostic payload attached to a status evaluation.
///
/// Development aid only; production logic must never branch on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusDebug {
    /// Branch the evaluation ran against
    pub branch_id: Option<i64>,
    /// Local business-timezone day of week
    pub day: DayOfWeek,
    /// Local time-of-day probed ("HH:MM")
    pub local_time: String,
    /// Matcher outcome
    pub hours_reason: HoursReason,
    /// Intervals probed for the day ("09:00-14:00")
    pub intervals: Vec<String>,
    /// The interval that matched, if any
    pub matched_interval: Option<String>,
    /// Retained cash-register query error, if the check failed
    pub register_error: Option<String>,
    /// Evaluation wall-clock (Unix millis)
    pub evaluated_at: i64,
}

/// Derived order-acceptance status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantStatus {
    /// Alias of `can_accept_orders` kept for storefront compatibility
    pub is_open: bool,
    /// Current local time falls inside a configured open interval
    pub is_within_hours: bool,
    /// The active branch has at least one open till session
    pub has_cash_register: bool,
    /// A register check is in flight; acceptance is blocked meanwhile
    pub is_loading: bool,
    /// `is_within_hours && has_cash_register && !is_loading`
    pub can_accept_orders: bool,
    /// One of the fixed storefront strings
    pub status_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_info: Option<StatusDebug>,
}

impl RestaurantStatus {
    /// Strip diagnostics before handing the value to production clients
    pub fn without_debug(mut self) -> Self {
        self.debug_info = None;
        self
    }
}

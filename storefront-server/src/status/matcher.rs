//! Schedule Matcher
//!
//! Decides whether a probe instant falls inside a configured open interval.
//! Pure: the probe time is always injected, never read from the system
//! clock. No schedule at all means closed — the storefront must never
//! accept orders because configuration is missing.

use chrono::{DateTime, Datelike, NaiveTime};
use chrono_tz::Tz;
use shared::models::{DayOfWeek, HoursReason, WeeklySchedule};

/// Matcher outcome plus the diagnostics carried into the status debug payload
#[derive(Debug, Clone)]
pub struct HoursCheck {
    pub is_within_hours: bool,
    /// Business-timezone day the probe landed on
    pub day: DayOfWeek,
    /// Business-timezone time-of-day probed
    pub local_time: NaiveTime,
    pub reason: HoursReason,
    /// Intervals configured for the day ("09:00-14:00")
    pub intervals: Vec<String>,
    pub matched_interval: Option<String>,
}

impl HoursCheck {
    fn closed(day: DayOfWeek, local_time: NaiveTime, reason: HoursReason) -> Self {
        Self {
            is_within_hours: false,
            day,
            local_time,
            reason,
            intervals: Vec::new(),
            matched_interval: None,
        }
    }
}

/// Probe the schedule at `now`
pub fn evaluate(schedule: Option<&WeeklySchedule>, now: DateTime<Tz>) -> HoursCheck {
    let day = DayOfWeek::from(now.weekday());
    let local_time = now.time();

    let Some(schedule) = schedule else {
        return HoursCheck::closed(day, local_time, HoursReason::NoSchedule);
    };

    // A day with no entry at all behaves like a closed day
    let Some(entry) = schedule.day(day) else {
        return HoursCheck::closed(day, local_time, HoursReason::DayClosed);
    };

    let intervals: Vec<String> = entry.intervals.iter().map(|iv| iv.to_string()).collect();

    if !entry.is_open {
        return HoursCheck {
            intervals,
            ..HoursCheck::closed(day, local_time, HoursReason::DayClosed)
        };
    }

    if entry.intervals.is_empty() {
        // Marked open but nothing configured: nothing can match
        return HoursCheck::closed(day, local_time, HoursReason::NoIntervals);
    }

    match entry.intervals.iter().find(|iv| iv.contains(local_time)) {
        Some(matched) => HoursCheck {
            is_within_hours: true,
            day,
            local_time,
            reason: HoursReason::Matched,
            intervals,
            matched_interval: Some(matched.to_string()),
        },
        None => HoursCheck {
            is_within_hours: false,
            day,
            local_time,
            reason: HoursReason::NoMatch,
            intervals,
            matched_interval: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Madrid;
    use shared::models::{DayScheduleConfig, TimeIntervalConfig};

    fn schedule(entries: &[(DayOfWeek, bool, &[(&str, &str)])]) -> WeeklySchedule {
        let config: Vec<DayScheduleConfig> = entries
            .iter()
            .map(|(day, is_open, intervals)| DayScheduleConfig {
                day: *day,
                is_open: *is_open,
                intervals: intervals
                    .iter()
                    .map(|(o, c)| TimeIntervalConfig {
                        open: o.to_string(),
                        close: c.to_string(),
                    })
                    .collect(),
            })
            .collect();
        WeeklySchedule::validate(&config).unwrap()
    }

    // 2026-08-03 is a Monday
    fn monday_at(hour: u32, min: u32) -> DateTime<Tz> {
        Madrid.with_ymd_and_hms(2026, 8, 3, hour, min, 0).unwrap()
    }

    fn tuesday_at(hour: u32, min: u32) -> DateTime<Tz> {
        Madrid.with_ymd_and_hms(2026, 8, 4, hour, min, 0).unwrap()
    }

    #[test]
    fn no_schedule_is_always_closed() {
        let check = evaluate(None, monday_at(12, 0));
        assert!(!check.is_within_hours);
        assert_eq!(check.reason, HoursReason::NoSchedule);
    }

    #[test]
    fn split_shift_matching() {
        let s = schedule(&[(
            DayOfWeek::Monday,
            true,
            &[("09:00", "14:00"), ("18:00", "23:00")],
        )]);

        assert!(evaluate(Some(&s), monday_at(13, 59)).is_within_hours);
        assert!(!evaluate(Some(&s), monday_at(15, 0)).is_within_hours);
        assert!(evaluate(Some(&s), monday_at(22, 59)).is_within_hours);
    }

    #[test]
    fn close_bound_is_exclusive() {
        let s = schedule(&[(DayOfWeek::Monday, true, &[("09:00", "14:00")])]);
        assert!(evaluate(Some(&s), monday_at(9, 0)).is_within_hours);
        assert!(!evaluate(Some(&s), monday_at(14, 0)).is_within_hours);
    }

    #[test]
    fn day_entries_are_isolated() {
        let s = schedule(&[
            (DayOfWeek::Monday, true, &[("08:00", "22:00")]),
            (DayOfWeek::Tuesday, false, &[("08:00", "22:00")]),
        ]);

        assert!(evaluate(Some(&s), monday_at(12, 0)).is_within_hours);

        let tuesday = evaluate(Some(&s), tuesday_at(12, 0));
        assert!(!tuesday.is_within_hours);
        assert_eq!(tuesday.reason, HoursReason::DayClosed);
    }

    #[test]
    fn missing_day_entry_is_closed() {
        let s = schedule(&[(DayOfWeek::Monday, true, &[("08:00", "22:00")])]);
        let check = evaluate(Some(&s), tuesday_at(12, 0));
        assert!(!check.is_within_hours);
        assert_eq!(check.reason, HoursReason::DayClosed);
    }

    #[test]
    fn open_day_without_intervals_is_closed() {
        let s = schedule(&[(DayOfWeek::Monday, true, &[])]);
        let check = evaluate(Some(&s), monday_at(12, 0));
        assert!(!check.is_within_hours);
        assert_eq!(check.reason, HoursReason::NoIntervals);
    }

    #[test]
    fn malformed_interval_never_matches_but_rest_does() {
        // Lossy parse path: the bad interval is dropped, the good one works
        let config = vec![DayScheduleConfig {
            day: DayOfWeek::Monday,
            is_open: true,
            intervals: vec![
                TimeIntervalConfig {
                    open: "nonsense".into(),
                    close: "14:00".into(),
                },
                TimeIntervalConfig {
                    open: "18:00".into(),
                    close: "23:00".into(),
                },
            ],
        }];
        let s = WeeklySchedule::from_config_lossy(&config);

        assert!(!evaluate(Some(&s), monday_at(12, 0)).is_within_hours);
        assert!(evaluate(Some(&s), monday_at(19, 0)).is_within_hours);
    }

    #[test]
    fn debug_payload_names_the_matched_interval() {
        let s = schedule(&[(DayOfWeek::Monday, true, &[("09:00", "14:00")])]);
        let check = evaluate(Some(&s), monday_at(10, 30));
        assert_eq!(check.day, DayOfWeek::Monday);
        assert_eq!(check.intervals, vec!["09:00-14:00".to_string()]);
        assert_eq!(check.matched_interval.as_deref(), Some("09:00-14:00"));
    }
}

//! Weekly Schedule Model (营业时间)
//!
//! 每天独立开关 + 多个营业时段，支持午市/晚市分段。
//! Stored as a JSON column on the store settings row. The settings API
//! validates strictly ([`WeeklySchedule::validate`]); the read path parses
//! leniently ([`WeeklySchedule::from_config_lossy`]) so one bad interval
//! never takes the whole storefront down.

use std::fmt;

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Day identifier, serialized lowercase ("monday" .. "sunday")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
            DayOfWeek::Sunday => "sunday",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(w: Weekday) -> Self {
        match w {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw open/close pair as configured by the dashboard ("HH:MM" strings)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeIntervalConfig {
    pub open: String,
    pub close: String,
}

/// Raw per-day entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayScheduleConfig {
    pub day: DayOfWeek,
    /// 当天是否营业
    #[serde(default)]
    pub is_open: bool,
    /// 营业时段列表 (可为空: 标记营业但无时段 = 不接单)
    #[serde(default)]
    pub intervals: Vec<TimeIntervalConfig>,
}

/// Weekly schedule as persisted/exchanged (raw, unvalidated)
pub type WeeklyScheduleConfig = Vec<DayScheduleConfig>;

/// Schedule validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("invalid time '{0}': expected HH:MM")]
    InvalidTime(String),

    #[error("{day}: interval {open}-{close} closes before it opens")]
    InvertedInterval {
        day: DayOfWeek,
        open: String,
        close: String,
    },

    #[error("{day}: intervals {first} and {second} overlap")]
    OverlappingIntervals {
        day: DayOfWeek,
        first: String,
        second: String,
    },

    #[error("duplicate entry for {0}")]
    DuplicateDay(DayOfWeek),
}

/// Validated open interval, half-open `[open, close)`
///
/// Close must be strictly later than open on the same day; overnight
/// intervals (close before open) are rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    open: NaiveTime,
    close: NaiveTime,
}

impl TimeInterval {
    pub fn new(open: NaiveTime, close: NaiveTime) -> Option<Self> {
        if close > open { Some(Self { open, close }) } else { None }
    }

    /// Parse an "HH:MM" pair into a validated interval
    pub fn parse(day: DayOfWeek, open: &str, close: &str) -> Result<Self, ScheduleError> {
        let open_t = parse_hhmm(open)?;
        let close_t = parse_hhmm(close)?;
        Self::new(open_t, close_t).ok_or(ScheduleError::InvertedInterval {
            day,
            open: open.to_string(),
            close: close.to_string(),
        })
    }

    pub fn open(&self) -> NaiveTime {
        self.open
    }

    pub fn close(&self) -> NaiveTime {
        self.close
    }

    /// `[open, close)` containment
    pub fn contains(&self, t: NaiveTime) -> bool {
        self.open <= t && t < self.close
    }

    fn overlaps(&self, other: &TimeInterval) -> bool {
        self.open < other.close && other.open < self.close
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.open.format("%H:%M"),
            self.close.format("%H:%M")
        )
    }
}

/// Parse an "HH:MM" time-of-day string
pub fn parse_hhmm(s: &str) -> Result<NaiveTime, ScheduleError> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|_| ScheduleError::InvalidTime(s.to_string()))
}

/// Validated per-day hours
#[derive(Debug, Clone)]
pub struct DayHours {
    pub day: DayOfWeek,
    pub is_open: bool,
    pub intervals: Vec<TimeInterval>,
}

/// Validated weekly schedule
#[derive(Debug, Clone)]
pub struct WeeklySchedule {
    days: Vec<DayHours>,
}

impl WeeklySchedule {
    /// Strict validation for the settings API.
    ///
    /// Any malformed time, inverted interval, intra-day overlap or
    /// duplicate day entry rejects the whole payload.
    pub fn validate(config: &[DayScheduleConfig]) -> Result<Self, ScheduleError> {
        let mut days: Vec<DayHours> = Vec::with_capacity(config.len());

        for entry in config {
            if days.iter().any(|d| d.day == entry.day) {
                return Err(ScheduleError::DuplicateDay(entry.day));
            }

            let mut intervals = Vec::with_capacity(entry.intervals.len());
            for iv in &entry.intervals {
                intervals.push(TimeInterval::parse(entry.day, &iv.open, &iv.close)?);
            }

            intervals.sort_by_key(|iv| iv.open());
            for pair in intervals.windows(2) {
                if pair[0].overlaps(&pair[1]) {
                    return Err(ScheduleError::OverlappingIntervals {
                        day: entry.day,
                        first: pair[0].to_string(),
                        second: pair[1].to_string(),
                    });
                }
            }

            days.push(DayHours {
                day: entry.day,
                is_open: entry.is_open,
                intervals,
            });
        }

        Ok(Self { days })
    }

    /// Lenient parse for the read path.
    ///
    /// Malformed or inverted intervals are skipped with a warning so they
    /// simply never match; day entries themselves are always kept.
    pub fn from_config_lossy(config: &[DayScheduleConfig]) -> Self {
        let mut days: Vec<DayHours> = Vec::with_capacity(config.len());

        for entry in config {
            if days.iter().any(|d| d.day == entry.day) {
                tracing::warn!(day = %entry.day, "Duplicate schedule entry ignored");
                continue;
            }

            let mut intervals = Vec::with_capacity(entry.intervals.len());
            for iv in &entry.intervals {
                match TimeInterval::parse(entry.day, &iv.open, &iv.close) {
                    Ok(parsed) => intervals.push(parsed),
                    Err(e) => {
                        tracing::warn!(day = %entry.day, error = %e, "Skipping bad schedule interval");
                    }
                }
            }
            intervals.sort_by_key(|iv| iv.open());

            days.push(DayHours {
                day: entry.day,
                is_open: entry.is_open,
                intervals,
            });
        }

        Self { days }
    }

    /// Look up the entry for a given day, if configured
    pub fn day(&self, day: DayOfWeek) -> Option<&DayHours> {
        self.days.iter().find(|d| d.day == day)
    }

    pub fn days(&self) -> &[DayHours] {
        &self.days
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(day: DayOfWeek, is_open: bool, intervals: &[(&str, &str)]) -> DayScheduleConfig {
        DayScheduleConfig {
            day,
            is_open,
            intervals: intervals
                .iter()
                .map(|(o, c)| TimeIntervalConfig {
                    open: o.to_string(),
                    close: c.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn validate_accepts_split_shift() {
        let config = vec![cfg(
            DayOfWeek::Monday,
            true,
            &[("09:00", "14:00"), ("18:00", "23:00")],
        )];
        let schedule = WeeklySchedule::validate(&config).unwrap();
        let monday = schedule.day(DayOfWeek::Monday).unwrap();
        assert!(monday.is_open);
        assert_eq!(monday.intervals.len(), 2);
    }

    #[test]
    fn validate_rejects_malformed_time() {
        let config = vec![cfg(DayOfWeek::Monday, true, &[("9am", "14:00")])];
        assert_eq!(
            WeeklySchedule::validate(&config).unwrap_err(),
            ScheduleError::InvalidTime("9am".to_string())
        );
    }

    #[test]
    fn validate_rejects_inverted_interval() {
        // Overnight intervals are deliberately unsupported: same-day only.
        let config = vec![cfg(DayOfWeek::Friday, true, &[("22:00", "02:00")])];
        assert!(matches!(
            WeeklySchedule::validate(&config),
            Err(ScheduleError::InvertedInterval { .. })
        ));
    }

    #[test]
    fn validate_rejects_zero_length_interval() {
        let config = vec![cfg(DayOfWeek::Friday, true, &[("12:00", "12:00")])];
        assert!(matches!(
            WeeklySchedule::validate(&config),
            Err(ScheduleError::InvertedInterval { .. })
        ));
    }

    #[test]
    fn validate_rejects_overlapping_intervals() {
        let config = vec![cfg(
            DayOfWeek::Monday,
            true,
            &[("09:00", "14:00"), ("13:00", "17:00")],
        )];
        assert!(matches!(
            WeeklySchedule::validate(&config),
            Err(ScheduleError::OverlappingIntervals { .. })
        ));
    }

    #[test]
    fn validate_allows_touching_intervals() {
        let config = vec![cfg(
            DayOfWeek::Monday,
            true,
            &[("09:00", "14:00"), ("14:00", "17:00")],
        )];
        assert!(WeeklySchedule::validate(&config).is_ok());
    }

    #[test]
    fn validate_rejects_duplicate_day() {
        let config = vec![
            cfg(DayOfWeek::Monday, true, &[]),
            cfg(DayOfWeek::Monday, false, &[]),
        ];
        assert_eq!(
            WeeklySchedule::validate(&config).unwrap_err(),
            ScheduleError::DuplicateDay(DayOfWeek::Monday)
        );
    }

    #[test]
    fn lossy_parse_skips_bad_intervals_keeps_day() {
        let config = vec![cfg(
            DayOfWeek::Monday,
            true,
            &[("bogus", "14:00"), ("18:00", "23:00")],
        )];
        let schedule = WeeklySchedule::from_config_lossy(&config);
        let monday = schedule.day(DayOfWeek::Monday).unwrap();
        assert!(monday.is_open);
        assert_eq!(monday.intervals.len(), 1);
        assert_eq!(monday.intervals[0].to_string(), "18:00-23:00");
    }

    #[test]
    fn interval_containment_is_half_open() {
        let iv = TimeInterval::parse(DayOfWeek::Monday, "09:00", "14:00").unwrap();
        assert!(iv.contains(NaiveTime::from_hms_opt(9, 0, 0).unwrap()));
        assert!(iv.contains(NaiveTime::from_hms_opt(13, 59, 0).unwrap()));
        assert!(!iv.contains(NaiveTime::from_hms_opt(14, 0, 0).unwrap()));
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = vec![cfg(DayOfWeek::Sunday, false, &[("10:00", "16:00")])];
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"sunday\""));
        let back: WeeklyScheduleConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back[0].intervals[0].open, "10:00");
    }
}

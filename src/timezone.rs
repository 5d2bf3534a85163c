//! Day windows for the price query
//!
//! Both windows start at a local midnight. Midnight is resolved through the
//! zone's own rules, so a window spanning a DST change is 23 or 25 hours long.

use crate::error::{GasPriceError, Result};
use chrono::{DateTime, Days, FixedOffset, Local, NaiveDate, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt;
use std::str::FromStr;

/// Zone used to find "today"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timezone {
    /// Host clock
    Local,
    /// IANA zone, independent of the host setting
    Named(Tz),
}

impl FromStr for Timezone {
    type Err = GasPriceError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("local") {
            return Ok(Timezone::Local);
        }
        s.parse::<Tz>()
            .map(Timezone::Named)
            .map_err(|e| GasPriceError::config(format!("Unknown timezone '{}': {}", s, e)))
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timezone::Local => f.write_str("local"),
            Timezone::Named(tz) => f.write_str(tz.name()),
        }
    }
}

impl Timezone {
    /// Current instant in this zone
    pub fn now(&self) -> DateTime<FixedOffset> {
        match self {
            Timezone::Local => Local::now().fixed_offset(),
            Timezone::Named(tz) => Utc::now().with_timezone(tz).fixed_offset(),
        }
    }

    /// Windows for today and tomorrow as seen from the current instant
    pub fn day_windows(&self) -> Result<DayWindows> {
        match self {
            Timezone::Local => DayWindows::starting_on_day_of(&Local::now()),
            Timezone::Named(tz) => DayWindows::starting_on_day_of(&Utc::now().with_timezone(tz)),
        }
    }
}

/// Half-open interval `[from, till)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: DateTime<FixedOffset>,
    pub till: DateTime<FixedOffset>,
}

/// The two windows covered by one query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindows {
    pub current: TimeWindow,
    pub next: TimeWindow,
}

impl DayWindows {
    /// Windows anchored on the local calendar day of `now`
    pub fn starting_on_day_of<Z: TimeZone>(now: &DateTime<Z>) -> Result<Self> {
        let tz = now.timezone();
        let today = now.date_naive();
        let midnight = |days: u64| -> Result<DateTime<FixedOffset>> {
            today
                .checked_add_days(Days::new(days))
                .and_then(|date| start_of_day(&tz, date))
                .map(|dt| dt.fixed_offset())
                .ok_or_else(|| {
                    GasPriceError::validation(
                        "timezone",
                        format!("No local midnight for {} + {} days", today, days),
                    )
                })
        };

        let day_start = midnight(0)?;
        let next_day_start = midnight(1)?;
        let day_after_next_start = midnight(2)?;

        Ok(Self {
            current: TimeWindow {
                from: day_start,
                till: next_day_start,
            },
            next: TimeWindow {
                from: next_day_start,
                till: day_after_next_start,
            },
        })
    }
}

/// First existing local instant of `date`; midnight itself can fall in a DST gap
fn start_of_day<Z: TimeZone>(tz: &Z, date: NaiveDate) -> Option<DateTime<Z>> {
    (0..3).find_map(|hour| {
        let naive = date.and_hms_opt(hour, 0, 0)?;
        tz.from_local_datetime(&naive).earliest()
    })
}

/// ISO-8601 with offset and whole seconds, e.g. `2024-01-01T00:00:00+01:00`
pub fn format_timestamp(ts: &DateTime<FixedOffset>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, false)
}

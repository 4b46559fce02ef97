//! Form models: what the user typed, how it is checked, and the payload it
//! turns into.

pub mod account;
pub mod customer;
pub mod device;

use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, SecondsFormat, TimeZone,
    Utc,
};

/// Wall clock and local offset used to fill in and interpret times.
#[derive(Debug, Clone, Copy)]
pub struct FormClock {
    pub now: DateTime<Utc>,
    pub offset: FixedOffset,
}

impl FormClock {
    pub fn system(offset_minutes: i32) -> Self {
        Self::fixed(Utc::now(), offset_minutes)
    }

    pub fn fixed(now: DateTime<Utc>, offset_minutes: i32) -> Self {
        let offset = FixedOffset::east_opt(offset_minutes.saturating_mul(60)).unwrap_or(Utc.fix());
        Self { now, offset }
    }

    /// Current local time as `HH:mm:ss`.
    pub fn time_now(&self) -> String {
        self.now
            .with_timezone(&self.offset)
            .format("%H:%M:%S")
            .to_string()
    }

    pub fn iso_now(&self) -> String {
        iso(self.now)
    }

    /// Interpret a date or date-time. Zoned input keeps its zone; naive
    /// input is local to `offset`.
    pub fn parse_date(&self, raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })?;
        self.offset
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Calendar day of `dt` in local time.
    pub fn local_day(&self, dt: DateTime<Utc>) -> NaiveDate {
        dt.with_timezone(&self.offset).date_naive()
    }
}

/// `HH:mm:ss` or `HH:mm`.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}

/// ISO-8601 UTC with milliseconds, e.g. `2025-10-18T08:50:00.000Z`.
pub fn iso(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

//! Time normalization to Nepal Standard Time (UTC+05:45).
//!
//! Every "today" in the service is the civil date in this zone, never the
//! server's local zone.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Nepal has observed a fixed +05:45 offset without DST since 1986.
pub const NEPAL_OFFSET_SECONDS: i32 = 5 * 3600 + 45 * 60;

/// Source of "now" for services.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

const NEPAL_OFFSET: FixedOffset = match FixedOffset::east_opt(NEPAL_OFFSET_SECONDS) {
    Some(offset) => offset,
    None => panic!("offset out of range"),
};

pub fn nepal_offset() -> FixedOffset {
    NEPAL_OFFSET
}

pub fn to_local<Tz: TimeZone>(instant: &DateTime<Tz>) -> DateTime<FixedOffset> {
    instant.with_timezone(&nepal_offset())
}

/// Timestamps without an offset are taken to be UTC.
pub fn naive_as_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    Utc.from_utc_datetime(&naive)
}

/// Parse an instant sent by a client. Accepts RFC 3339 with an offset, an
/// ISO datetime without one (UTC), or a bare date (UTC midnight).
pub fn parse_instant(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(aware) = DateTime::parse_from_rfc3339(input) {
        return Some(aware.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive_as_utc(naive));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive_as_utc(naive));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(naive_as_utc)
}

pub fn local_date<Tz: TimeZone>(instant: &DateTime<Tz>) -> NaiveDate {
    to_local(instant).date_naive()
}

pub fn today(clock: &dyn Clock) -> NaiveDate {
    local_date(&clock.now())
}

/// 12-hour clock, e.g. `07:05 AM`.
pub fn format_clock<Tz: TimeZone>(instant: &DateTime<Tz>) -> String {
    to_local(instant).format("%I:%M %p").to_string()
}

//! Temporal types: Date, Time, Timestamp, ZonedTime, ZonedTimestamp, Instant
//!
//! All six types normalize to fixed-width integer representations:
//!
//! - `Date` — epoch milliseconds at midnight UTC (always day-aligned)
//! - `Time` — milliseconds since midnight, `0 <= ms < 86_400_000`
//! - `Timestamp` — epoch milliseconds
//! - `ZonedTime` / `ZonedTimestamp` — the same milliseconds plus the
//!   original fixed UTC offset in seconds
//! - `Instant` — epoch second + nanosecond-of-second pair
//!
//! ## Comparison Semantics
//!
//! Temporal values compare by their normalized instant, never by lexical
//! form or offset. `"10:00:00+02:00"` equals `"08:00:00Z"`. The offset is
//! carried only so output can render the value the way it arrived.
//!
//! ## Parsing
//!
//! `parse` accepts the canonical patterns only (locale-aware parsing is a
//! collaborator concern). Recognized-but-empty input returns `Ok(None)`;
//! malformed input is an error.

use crate::error::{Error, Result};
use crate::kind::Kind;
use chrono::{
    DateTime as ChronoDateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat,
    Timelike, Utc,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Milliseconds in one day.
pub const DAY_MILLIS: i64 = 86_400_000;

/// Render a UTC offset as `Z` or `±HH:MM`.
fn format_offset(offset_secs: i32) -> String {
    if offset_secs == 0 {
        "Z".to_string()
    } else {
        let hours = offset_secs.abs() / 3600;
        let mins = (offset_secs.abs() % 3600) / 60;
        let sign = if offset_secs >= 0 { '+' } else { '-' };
        format!("{}{:02}:{:02}", sign, hours, mins)
    }
}

/// Parse a trailing `Z` / `±HH:MM` / `±HHMM` offset.
///
/// Returns the remaining prefix and the offset in seconds, or `None` if the
/// input carries no offset suffix.
fn split_offset(s: &str) -> Option<(&str, i32)> {
    if let Some(prefix) = s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
        return Some((prefix, 0));
    }
    // Look for a sign that starts an offset (skip a leading date sign and
    // the `-` separators inside a date by only searching past position 7).
    let start = 8.min(s.len());
    let tail = s.get(start..)?;
    let pos = tail.rfind(['+', '-']).map(|p| p + start)?;
    let (prefix, suffix) = s.split_at(pos);
    let sign: i32 = if suffix.starts_with('-') { -1 } else { 1 };
    let digits = suffix[1..].replace(':', "");
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[0..2].parse().ok()?;
    let mins: i32 = digits[2..4].parse().ok()?;
    if hours > 18 || mins > 59 {
        return None;
    }
    Some((prefix, sign * (hours * 3600 + mins * 60)))
}

fn millis_of(time: NaiveTime) -> i64 {
    time.num_seconds_from_midnight() as i64 * 1000 + (time.nanosecond() / 1_000_000) as i64
}

fn parse_naive_time(s: &str, target: Kind) -> Result<NaiveTime> {
    for fmt in &["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"] {
        if let Ok(t) = NaiveTime::parse_from_str(s, fmt) {
            return Ok(t);
        }
    }
    Err(Error::parse(s, target, "expected HH:MM:SS[.fff]"))
}

fn parse_naive_datetime(s: &str, target: Kind) -> Result<NaiveDateTime> {
    for fmt in &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(ndt);
        }
    }
    Err(Error::parse(s, target, "expected YYYY-MM-DDTHH:MM:SS[.fff]"))
}

fn utc_from_millis(millis: i64) -> Option<ChronoDateTime<Utc>> {
    ChronoDateTime::<Utc>::from_timestamp_millis(millis)
}

// ============================================================================
// Date
// ============================================================================

/// Calendar date, stored as the epoch-millisecond instant of midnight UTC.
///
/// The payload is always day-aligned; constructors truncate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Date(i64);

impl Date {
    /// Construct from epoch milliseconds, truncating to midnight UTC.
    pub fn from_millis(millis: i64) -> Self {
        Self(millis.div_euclid(DAY_MILLIS) * DAY_MILLIS)
    }

    /// Construct from a calendar year/month/day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        Some(Self(
            date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis(),
        ))
    }

    /// Parse a `YYYY-MM-DD` date string (a trailing `Z` is tolerated).
    ///
    /// Empty input yields `Ok(None)`.
    pub fn parse(s: &str) -> Result<Option<Self>> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        let body = s.strip_suffix('Z').unwrap_or(s);
        let date = NaiveDate::parse_from_str(body, "%Y-%m-%d")
            .map_err(|e| Error::parse(s, Kind::Date, e.to_string()))?;
        Ok(Some(Self(
            date.and_hms_opt(0, 0, 0)
                .expect("midnight is always valid")
                .and_utc()
                .timestamp_millis(),
        )))
    }

    /// Epoch milliseconds of midnight UTC on this date.
    #[inline]
    pub const fn millis(self) -> i64 {
        self.0
    }

    /// Days since the Unix epoch.
    #[inline]
    pub const fn epoch_days(self) -> i64 {
        self.0 / DAY_MILLIS
    }

    // === Calendar accessors ===

    /// Year component.
    pub fn year(self) -> i32 {
        utc_from_millis(self.0).map_or(0, |dt| dt.year())
    }

    /// Month component (1-12).
    pub fn month(self) -> u32 {
        utc_from_millis(self.0).map_or(0, |dt| dt.month())
    }

    /// Day component (1-31).
    pub fn day(self) -> u32 {
        utc_from_millis(self.0).map_or(0, |dt| dt.day())
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match utc_from_millis(self.0) {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d")),
            None => write!(f, "date({})", self.0),
        }
    }
}

// ============================================================================
// Time
// ============================================================================

/// Time of day in milliseconds since midnight.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Time(i64);

impl Time {
    /// Construct from milliseconds since midnight, wrapping into a single day.
    pub fn from_millis(millis: i64) -> Self {
        Self(millis.rem_euclid(DAY_MILLIS))
    }

    /// Parse a `HH:MM:SS[.fff]` time string. Empty input yields `Ok(None)`.
    pub fn parse(s: &str) -> Result<Option<Self>> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        let t = parse_naive_time(s, Kind::Time)?;
        Ok(Some(Self(millis_of(t))))
    }

    /// Milliseconds since midnight.
    #[inline]
    pub const fn millis(self) -> i64 {
        self.0
    }

    /// Hour component (0-23).
    pub const fn hours(self) -> u32 {
        (self.0 / 3_600_000) as u32
    }

    /// Minute component (0-59).
    pub const fn minutes(self) -> u32 {
        ((self.0 / 60_000) % 60) as u32
    }

    /// Seconds component with the fractional millisecond part.
    pub fn seconds(self) -> f64 {
        ((self.0 % 60_000) as f64) / 1000.0
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0 / 1000;
        write!(
            f,
            "{:02}:{:02}:{:02}.{:03}",
            secs / 3600,
            (secs % 3600) / 60,
            secs % 60,
            self.0 % 1000
        )
    }
}

// ============================================================================
// Timestamp
// ============================================================================

/// Point in time as epoch milliseconds (UTC).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Construct from epoch milliseconds.
    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Parse an ISO-8601 timestamp.
    ///
    /// Accepts RFC3339 with an offset (normalized to UTC) and naive
    /// `YYYY-MM-DDTHH:MM:SS[.fff]` forms treated as UTC. Empty input yields
    /// `Ok(None)`.
    pub fn parse(s: &str) -> Result<Option<Self>> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        if let Ok(dt) = ChronoDateTime::parse_from_rfc3339(s) {
            return Ok(Some(Self(dt.with_timezone(&Utc).timestamp_millis())));
        }
        let ndt = parse_naive_datetime(s, Kind::Timestamp)?;
        Ok(Some(Self(ndt.and_utc().timestamp_millis())))
    }

    /// Epoch milliseconds.
    #[inline]
    pub const fn millis(self) -> i64 {
        self.0
    }

    // === Calendar accessors (UTC) ===

    /// Year component.
    pub fn year(self) -> i32 {
        utc_from_millis(self.0).map_or(0, |dt| dt.year())
    }

    /// Month component (1-12).
    pub fn month(self) -> u32 {
        utc_from_millis(self.0).map_or(0, |dt| dt.month())
    }

    /// Day component (1-31).
    pub fn day(self) -> u32 {
        utc_from_millis(self.0).map_or(0, |dt| dt.day())
    }

    /// Hour component (0-23).
    pub fn hours(self) -> u32 {
        utc_from_millis(self.0).map_or(0, |dt| dt.hour())
    }

    /// Minute component (0-59).
    pub fn minutes(self) -> u32 {
        utc_from_millis(self.0).map_or(0, |dt| dt.minute())
    }

    /// Seconds component with the fractional millisecond part.
    pub fn seconds(self) -> f64 {
        utc_from_millis(self.0)
            .map_or(0.0, |dt| dt.second() as f64 + dt.nanosecond() as f64 / 1e9)
    }

    /// The calendar date of this instant (midnight-truncated).
    pub fn date(self) -> Date {
        Date::from_millis(self.0)
    }

    /// The time of day of this instant.
    pub fn time(self) -> Time {
        Time::from_millis(self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match utc_from_millis(self.0) {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.3fZ")),
            None => write!(f, "timestamp({})", self.0),
        }
    }
}

// ============================================================================
// ZonedTime
// ============================================================================

/// Time of day qualified by a fixed UTC offset.
///
/// `millis` holds the UTC-normalized time-of-day; the offset is preserved
/// for display only. Equality and ordering ignore the offset.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct ZonedTime {
    millis: i64,
    offset_secs: i32,
}

impl ZonedTime {
    /// Construct from a UTC time-of-day in milliseconds and an offset.
    pub fn new(utc_millis: i64, offset_secs: i32) -> Self {
        Self {
            millis: utc_millis.rem_euclid(DAY_MILLIS),
            offset_secs,
        }
    }

    /// Construct from a local time-of-day in the given offset.
    pub fn from_local(local_millis: i64, offset_secs: i32) -> Self {
        Self::new(local_millis - offset_secs as i64 * 1000, offset_secs)
    }

    /// Parse a `HH:MM:SS[.fff](Z|±HH:MM)` string. Empty input yields `Ok(None)`.
    pub fn parse(s: &str) -> Result<Option<Self>> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        let (body, offset) = split_offset(s)
            .ok_or_else(|| Error::parse(s, Kind::ZonedTime, "missing UTC offset"))?;
        let t = parse_naive_time(body, Kind::ZonedTime)?;
        Ok(Some(Self::from_local(millis_of(t), offset)))
    }

    /// UTC-normalized milliseconds since midnight.
    #[inline]
    pub const fn millis(self) -> i64 {
        self.millis
    }

    /// Original UTC offset in seconds.
    #[inline]
    pub const fn offset_secs(self) -> i32 {
        self.offset_secs
    }

    /// The offset rendered as `Z` or `±HH:MM`.
    pub fn timezone(self) -> String {
        format_offset(self.offset_secs)
    }
}

impl PartialEq for ZonedTime {
    fn eq(&self, other: &Self) -> bool {
        self.millis == other.millis
    }
}

impl Eq for ZonedTime {}

impl Ord for ZonedTime {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.millis.cmp(&other.millis)
    }
}

impl PartialOrd for ZonedTime {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::hash::Hash for ZonedTime {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.millis.hash(state);
    }
}

impl fmt::Display for ZonedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let local = (self.millis + self.offset_secs as i64 * 1000).rem_euclid(DAY_MILLIS);
        let secs = local / 1000;
        write!(
            f,
            "{:02}:{:02}:{:02}.{:03}{}",
            secs / 3600,
            (secs % 3600) / 60,
            secs % 60,
            local % 1000,
            format_offset(self.offset_secs)
        )
    }
}

// ============================================================================
// ZonedTimestamp
// ============================================================================

/// Epoch-millisecond instant qualified by a fixed UTC offset.
///
/// Equality and ordering use the instant only; the offset is display-only.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct ZonedTimestamp {
    millis: i64,
    offset_secs: i32,
}

impl ZonedTimestamp {
    /// Construct from epoch milliseconds and an offset.
    #[inline]
    pub const fn new(millis: i64, offset_secs: i32) -> Self {
        Self { millis, offset_secs }
    }

    /// Parse an RFC3339 timestamp, preserving its offset.
    ///
    /// Empty input yields `Ok(None)`.
    pub fn parse(s: &str) -> Result<Option<Self>> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        if let Ok(dt) = ChronoDateTime::parse_from_rfc3339(s) {
            return Ok(Some(Self::new(
                dt.with_timezone(&Utc).timestamp_millis(),
                dt.offset().local_minus_utc(),
            )));
        }
        // Offset forms chrono's RFC3339 parser rejects (e.g. `+0500`)
        let (body, offset) = split_offset(s)
            .ok_or_else(|| Error::parse(s, Kind::ZonedTimestamp, "missing UTC offset"))?;
        let ndt = parse_naive_datetime(body, Kind::ZonedTimestamp)?;
        Ok(Some(Self::new(
            ndt.and_utc().timestamp_millis() - offset as i64 * 1000,
            offset,
        )))
    }

    /// Epoch milliseconds (UTC).
    #[inline]
    pub const fn millis(self) -> i64 {
        self.millis
    }

    /// Original UTC offset in seconds.
    #[inline]
    pub const fn offset_secs(self) -> i32 {
        self.offset_secs
    }

    /// The offset rendered as `Z` or `±HH:MM`.
    pub fn timezone(self) -> String {
        format_offset(self.offset_secs)
    }

    /// The UTC instant with the offset dropped.
    pub const fn timestamp(self) -> Timestamp {
        Timestamp::from_millis(self.millis)
    }
}

impl PartialEq for ZonedTimestamp {
    fn eq(&self, other: &Self) -> bool {
        self.millis == other.millis
    }
}

impl Eq for ZonedTimestamp {}

impl Ord for ZonedTimestamp {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.millis.cmp(&other.millis)
    }
}

impl PartialOrd for ZonedTimestamp {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::hash::Hash for ZonedTimestamp {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.millis.hash(state);
    }
}

impl fmt::Display for ZonedTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let local_millis = self.millis + self.offset_secs as i64 * 1000;
        match utc_from_millis(local_millis) {
            Some(dt) => write!(
                f,
                "{}{}",
                dt.format("%Y-%m-%dT%H:%M:%S%.3f"),
                format_offset(self.offset_secs)
            ),
            None => write!(f, "zonedtimestamp({})", self.millis),
        }
    }
}

// ============================================================================
// Instant
// ============================================================================

/// High-precision point in time: epoch second + nanosecond-of-second.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Instant {
    secs: i64,
    nanos: u32,
}

impl Instant {
    /// Construct from an epoch second and nanosecond-of-second.
    ///
    /// Nanoseconds are normalized into `0..1_000_000_000`.
    pub fn new(secs: i64, nanos: u32) -> Self {
        Self {
            secs: secs + (nanos / 1_000_000_000) as i64,
            nanos: nanos % 1_000_000_000,
        }
    }

    /// Construct from epoch milliseconds.
    pub fn from_millis(millis: i64) -> Self {
        Self {
            secs: millis.div_euclid(1000),
            nanos: (millis.rem_euclid(1000) * 1_000_000) as u32,
        }
    }

    /// Parse an RFC3339 instant. Empty input yields `Ok(None)`.
    pub fn parse(s: &str) -> Result<Option<Self>> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        let dt = ChronoDateTime::parse_from_rfc3339(s)
            .map_err(|e| Error::parse(s, Kind::Instant, e.to_string()))?;
        let utc = dt.with_timezone(&Utc);
        Ok(Some(Self {
            secs: utc.timestamp(),
            nanos: utc.timestamp_subsec_nanos(),
        }))
    }

    /// Epoch second.
    #[inline]
    pub const fn secs(self) -> i64 {
        self.secs
    }

    /// Nanosecond of second, `0..1_000_000_000`.
    #[inline]
    pub const fn nanos(self) -> u32 {
        self.nanos
    }

    /// Epoch milliseconds (truncating sub-millisecond precision).
    pub const fn millis(self) -> i64 {
        self.secs * 1000 + (self.nanos / 1_000_000) as i64
    }

    /// Millisecond reduction as f64 (keeps sub-millisecond fraction).
    pub fn millis_f64(self) -> f64 {
        self.secs as f64 * 1000.0 + self.nanos as f64 / 1_000_000.0
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match ChronoDateTime::<Utc>::from_timestamp(self.secs, self.nanos) {
            Some(dt) => write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::Nanos, true)),
            None => write!(f, "instant({},{})", self.secs, self.nanos),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_parse_display_roundtrip() {
        let d = Date::parse("2024-01-15").unwrap().unwrap();
        assert_eq!(d.to_string(), "2024-01-15");
        assert_eq!(d, Date::from_ymd(2024, 1, 15).unwrap());
        assert_eq!(d.millis() % DAY_MILLIS, 0);
    }

    #[test]
    fn test_date_truncates_to_midnight() {
        let noonish = Date::from_ymd(2024, 1, 15).unwrap().millis() + 12 * 3600 * 1000;
        assert_eq!(Date::from_millis(noonish), Date::from_ymd(2024, 1, 15).unwrap());
        // Negative epoch: truncation must go toward earlier days
        let before_epoch = -1;
        assert_eq!(
            Date::from_millis(before_epoch),
            Date::from_ymd(1969, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_date_empty_and_malformed() {
        assert_eq!(Date::parse("").unwrap(), None);
        assert_eq!(Date::parse("   ").unwrap(), None);
        assert!(Date::parse("2024-13-01").is_err());
        assert!(Date::parse("not-a-date").is_err());
    }

    #[test]
    fn test_time_parse_and_wrap() {
        let t = Time::parse("10:30:00.250").unwrap().unwrap();
        assert_eq!(t.millis(), (10 * 3600 + 30 * 60) as i64 * 1000 + 250);
        assert_eq!(t.to_string(), "10:30:00.250");
        assert_eq!(Time::from_millis(-1000).millis(), DAY_MILLIS - 1000);
        assert_eq!(Time::from_millis(DAY_MILLIS).millis(), 0);
    }

    #[test]
    fn test_timestamp_parse_variants() {
        let a = Timestamp::parse("2024-01-15T10:30:00Z").unwrap().unwrap();
        let b = Timestamp::parse("2024-01-15T10:30:00").unwrap().unwrap();
        let c = Timestamp::parse("2024-01-15T05:30:00-05:00").unwrap().unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.to_string(), "2024-01-15T10:30:00.000Z");
    }

    #[test]
    fn test_zoned_time_instant_equality() {
        let utc = ZonedTime::parse("08:00:00Z").unwrap().unwrap();
        let plus2 = ZonedTime::parse("10:00:00+02:00").unwrap().unwrap();
        assert_eq!(utc, plus2);
        assert_eq!(plus2.offset_secs(), 7200);
        assert_eq!(plus2.to_string(), "10:00:00.000+02:00");
    }

    #[test]
    fn test_zoned_time_requires_offset() {
        assert!(ZonedTime::parse("10:00:00").is_err());
    }

    #[test]
    fn test_zoned_timestamp_preserves_offset() {
        let zt = ZonedTimestamp::parse("2024-01-15T05:30:00-05:00")
            .unwrap()
            .unwrap();
        assert_eq!(zt.offset_secs(), -5 * 3600);
        assert_eq!(
            zt.millis(),
            Timestamp::parse("2024-01-15T10:30:00Z").unwrap().unwrap().millis()
        );
        assert_eq!(zt.to_string(), "2024-01-15T05:30:00.000-05:00");
    }

    #[test]
    fn test_zoned_timestamp_compact_offset() {
        // `+0500` is not RFC3339 but arrives from legacy producers
        let zt = ZonedTimestamp::parse("2024-01-15T15:30:00+0500")
            .unwrap()
            .unwrap();
        assert_eq!(zt.offset_secs(), 5 * 3600);
        assert_eq!(
            zt,
            ZonedTimestamp::parse("2024-01-15T10:30:00Z").unwrap().unwrap()
        );
    }

    #[test]
    fn test_instant_nanos() {
        let i = Instant::parse("2024-01-15T10:30:00.123456789Z")
            .unwrap()
            .unwrap();
        assert_eq!(i.nanos(), 123_456_789);
        assert_eq!(i.millis(), i.secs() * 1000 + 123);
        assert_eq!(i.to_string(), "2024-01-15T10:30:00.123456789Z");
        // Nanos normalization
        let j = Instant::new(10, 2_500_000_000);
        assert_eq!(j.secs(), 12);
        assert_eq!(j.nanos(), 500_000_000);
    }

    #[test]
    fn test_instant_negative_millis() {
        let i = Instant::from_millis(-1);
        assert_eq!(i.secs(), -1);
        assert_eq!(i.nanos(), 999_000_000);
        assert_eq!(i.millis(), -1);
    }

    #[test]
    fn test_offset_formatting() {
        assert_eq!(format_offset(0), "Z");
        assert_eq!(format_offset(3600), "+01:00");
        assert_eq!(format_offset(-19800), "-05:30");
    }

    #[test]
    fn test_calendar_accessors() {
        let ts = Timestamp::parse("2024-01-15T10:30:45.500Z").unwrap().unwrap();
        assert_eq!(ts.year(), 2024);
        assert_eq!(ts.month(), 1);
        assert_eq!(ts.day(), 15);
        assert_eq!(ts.hours(), 10);
        assert_eq!(ts.minutes(), 30);
        assert!((ts.seconds() - 45.5).abs() < 1e-9);
        assert_eq!(ts.date(), Date::from_ymd(2024, 1, 15).unwrap());
        assert_eq!(ts.time(), Time::parse("10:30:45.500").unwrap().unwrap());

        let d = Date::from_ymd(1999, 12, 31).unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (1999, 12, 31));

        let t = Time::parse("23:59:59.999").unwrap().unwrap();
        assert_eq!(t.hours(), 23);
        assert_eq!(t.minutes(), 59);
        assert!((t.seconds() - 59.999).abs() < 1e-9);

        let zt = ZonedTimestamp::parse("2024-01-15T05:30:00-05:00").unwrap().unwrap();
        assert_eq!(zt.timezone(), "-05:00");
        assert_eq!(
            zt.timestamp(),
            Timestamp::parse("2024-01-15T10:30:00Z").unwrap().unwrap()
        );
    }

    #[test]
    fn test_ordering_is_instant_based() {
        let early = ZonedTimestamp::parse("2024-01-15T00:00:00+05:00")
            .unwrap()
            .unwrap();
        let late = ZonedTimestamp::parse("2024-01-15T00:00:00Z").unwrap().unwrap();
        // +05:00 midnight is five hours before UTC midnight
        assert!(early < late);
    }
}

use crate::models::Value;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];

fn excel_epoch() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)
}

/// Excel serial (days since 1899-12-30, fraction = time of day) → datetime.
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 || serial > 2_958_465.0 {
        return None;
    }
    let millis = (serial * 86_400_000.0).round() as i64;
    excel_epoch()?.checked_add_signed(Duration::milliseconds(millis))
}

pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Parse a timestamp string; zoned values are converted to UTC.
pub fn parse_timestamp_str(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    for fmt in DATETIME_FORMATS.iter() {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in DATE_FORMATS.iter() {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// Timestamp of a cell: text is parsed, numbers are Excel serials.
pub fn parse_timestamp(v: &Value) -> Option<NaiveDateTime> {
    match v {
        Value::Text(s) => parse_timestamp_str(s),
        Value::Number(n) => excel_serial_to_datetime(*n),
        _ => None,
    }
}

/// Whole days between `ts` and `now`, floored; future timestamps clamp to 0.
pub fn recency_days(ts: &NaiveDateTime, now: &DateTime<Utc>) -> i64 {
    let elapsed = now.naive_utc() - *ts;
    elapsed.num_seconds().max(0).div_euclid(86_400)
}

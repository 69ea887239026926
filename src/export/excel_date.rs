// src/export/excel_date.rs

use crate::utils::date::parse_timestamp_str;
use chrono::{NaiveDate, NaiveDateTime, Timelike};

/// Prova a interpretare un testo come data/ora (es. `Last_Visit_Timestamp`),
/// restituendo il formato numerico Excel + il *seriale Excel*.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    // solo testi che "sembrano" date: evita di convertire id o numeri
    if s.len() < 8 || !s.contains(['-', '/']) {
        return None;
    }
    let dt = parse_timestamp_str(s)?;
    let serial = naive_datetime_to_excel_serial(&dt)?;
    if dt.time().num_seconds_from_midnight() == 0 {
        Some(("yyyy-mm-dd", serial))
    } else {
        Some(("yyyy-mm-dd hh:mm:ss", serial))
    }
}

fn naive_datetime_to_excel_serial(dt: &NaiveDateTime) -> Option<f64> {
    let excel_epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;

    let duration = *dt - excel_epoch;

    let days = duration.num_days() as f64;
    let secs = (duration.num_seconds() - duration.num_days() * 86400) as f64;

    Some(days + secs / 86400.0)
}

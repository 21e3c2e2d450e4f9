use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};

/// Parse the form's `dd/mm/yyyy` submission date.
///
/// Returns `None` unless the value splits into exactly three numeric parts
/// forming a real calendar date. Callers decide what a missing date means.
pub fn parse_submission_date(raw: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = raw.trim().split('/').collect();
    if parts.len() != 3 {
        return None;
    }

    let day = parts[0].trim().parse::<u32>().ok()?;
    let month = parts[1].trim().parse::<u32>().ok()?;
    let year = parts[2].trim().parse::<i32>().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse an ISO-8601 date (`YYYY-MM-DD`) or an RFC 3339 timestamp.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.naive_utc().date())
}

pub(crate) fn deserialize_optional_iso_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt {
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_iso_date(&raw).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("failed to parse '{raw}' as an ISO-8601 date"))
        }),
        None => Ok(None),
    }
}

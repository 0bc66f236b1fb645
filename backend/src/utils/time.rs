use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::AccrualError;

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Returns the current time in the configured timezone.
pub fn now_in_timezone(tz: &Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(tz)
}

/// Returns today's date in the configured timezone.
pub fn today_local(tz: &Tz) -> NaiveDate {
    now_in_timezone(tz).date_naive()
}

/// Parses a `YYYY-MM-DD` calendar date. `field` names the input in the error.
pub fn parse_iso_date(field: &'static str, value: &str) -> Result<NaiveDate, AccrualError> {
    let trimmed = value.trim();
    let invalid = || AccrualError::InvalidDate {
        field,
        value: value.to_string(),
    };

    // chrono accepts unpadded fields and signed years; stored dates are always 10 chars.
    if trimmed.len() != 10 {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT).map_err(|_| invalid())
}

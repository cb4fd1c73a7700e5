use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DateError {
    #[error("day offset {0} is out of range")]
    OutOfRange(i64),
}

/// One UTC calendar day, from 00:00:00 to 23:59:59.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayWindow {
    date: NaiveDate,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DayWindow {
    pub fn today(offset_days: i64) -> Result<Self, DateError> {
        Self::for_offset(Utc::now(), offset_days)
    }

    pub fn for_offset(reference: DateTime<Utc>, offset_days: i64) -> Result<Self, DateError> {
        let shifted = Duration::try_days(offset_days)
            .and_then(|delta| reference.checked_add_signed(delta))
            .ok_or(DateError::OutOfRange(offset_days))?;
        Self::for_date(shifted.date_naive()).ok_or(DateError::OutOfRange(offset_days))
    }

    pub fn for_date(date: NaiveDate) -> Option<Self> {
        let start = date.and_hms_opt(0, 0, 0)?.and_utc();
        let end = date.and_hms_opt(23, 59, 59)?.and_utc();
        Some(Self { date, start, end })
    }

    pub fn as_rfc3339(&self) -> (String, String) {
        (
            self.start.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.end.to_rfc3339_opts(SecondsFormat::Secs, true),
        )
    }

    pub fn label(&self) -> String {
        self.date.format("%B %d, %Y").to_string()
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

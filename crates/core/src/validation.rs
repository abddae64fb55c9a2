//! # Date/Time Validation
//!
//! Every request carrying a `(date, time)` pair is checked here before the
//! registry is touched. The time is tested first against a regular
//! expression; the date is only parsed once the time has passed.
//!
//! The time pattern is matched at the start of the input only, so a pattern
//! without a trailing `$` accepts any suffix after a valid prefix.

use chrono::NaiveDate;
use regex::Regex;

use crate::errors::ValidationError;

/// Default time-of-day pattern, e.g. `10:00 AM`.
pub const DEFAULT_TIME_PATTERN: &str = r"^(0?[1-9]|1[0-2]):[0-5][0-9] ?(AM|PM)$";

/// Default calendar date format, e.g. `2023-09-15`.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone)]
pub struct DateTimeValidator {
    time_pattern: Regex,
    date_format: String,
}

impl DateTimeValidator {
    /// Builds a validator from a time regex and a chrono date format string.
    ///
    /// # Errors
    ///
    /// Returns the regex compile error if `time_pattern` is not a valid
    /// regular expression.
    pub fn new(time_pattern: &str, date_format: impl Into<String>) -> Result<Self, regex::Error> {
        let time_pattern = Regex::new(&format!("^(?:{time_pattern})"))?;

        Ok(Self {
            time_pattern,
            date_format: date_format.into(),
        })
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// Checks a `(date, time)` pair, time first, and hands back both values.
    ///
    /// A missing value fails the same way a malformed one does.
    pub fn validate<'a>(
        &self,
        date: Option<&'a str>,
        time: Option<&'a str>,
    ) -> Result<(&'a str, &'a str), ValidationError> {
        let time = time
            .filter(|time| self.time_pattern.is_match(time))
            .ok_or(ValidationError::InvalidTime)?;

        let date = date.ok_or(ValidationError::InvalidDate)?;
        NaiveDate::parse_from_str(date, &self.date_format)
            .map_err(|_| ValidationError::InvalidDate)?;

        Ok((date, time))
    }
}

impl Default for DateTimeValidator {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_PATTERN, DEFAULT_DATE_FORMAT)
            .expect("default time pattern is a valid regex")
    }
}

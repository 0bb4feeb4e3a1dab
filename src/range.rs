use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{CalendarError, EthiopianDate, SLASH_SEPARATOR, YearMonth, format, prelude::*};

/// An inclusive span of Ethiopian dates.
/// The start date must be less than or equal to the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct EthiopianDateRange {
    start: EthiopianDate,
    end:   EthiopianDate,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: EthiopianDate, end: EthiopianDate },

    /// Error converting or validating an endpoint.
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl EthiopianDateRange {
    /// Creates a new date range with validation.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if start > end.
    pub fn new(start: EthiopianDate, end: EthiopianDate) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a range from Gregorian endpoints.
    ///
    /// # Errors
    /// Returns `RangeError::Calendar` if an endpoint is out of range, or
    /// `RangeError::InvalidRange` if start > end.
    pub fn from_gregorian(start: NaiveDate, end: NaiveDate) -> Result<Self, RangeError> {
        Self::new(
            EthiopianDate::from_gregorian(start)?,
            EthiopianDate::from_gregorian(end)?,
        )
    }

    /// Returns the start date of the range
    pub const fn start(&self) -> EthiopianDate {
        self.start
    }

    /// Returns the end date of the range
    pub const fn end(&self) -> EthiopianDate {
        self.end
    }

    /// Returns both start and end dates as a tuple
    pub const fn dates(&self) -> (EthiopianDate, EthiopianDate) {
        (self.start, self.end)
    }

    /// Gregorian endpoints of the range
    ///
    /// # Errors
    /// See [`EthiopianDate::to_gregorian`].
    pub fn to_gregorian(&self) -> Result<(NaiveDate, NaiveDate), CalendarError> {
        Ok((self.start.to_gregorian()?, self.end.to_gregorian()?))
    }

    /// Checks if the range contains a given date
    pub fn contains(&self, date: &EthiopianDate) -> bool {
        self.start <= *date && *date <= self.end
    }

    /// Checks if this range overlaps with another range
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Checks if this range is completely contained within another range
    pub fn is_within(&self, other: &Self) -> bool {
        other.start <= self.start && self.end <= other.end
    }

    /// Whether any day of the month lies inside the range.
    /// Compares (year, month) pairs only.
    pub fn touches_month(&self, year_month: YearMonth) -> bool {
        YearMonth::from(self.start) <= year_month && year_month <= YearMonth::from(self.end)
    }

    /// Number of days in the range, both ends included
    ///
    /// # Errors
    /// See [`EthiopianDate::to_gregorian`].
    pub fn days(&self) -> Result<i64, CalendarError> {
        let (start, end) = self.to_gregorian()?;
        Ok(end.signed_duration_since(start).num_days() + 1)
    }

    /// Compact Amharic rendering, see [`format_date_range`](crate::format_date_range)
    ///
    /// # Errors
    /// See [`EthiopianDate::to_gregorian`].
    pub fn to_display_string(&self) -> Result<String, CalendarError> {
        let (start, end) = self.to_gregorian()?;
        Ok(format::format_date_range(start, end))
    }
}

impl FromStr for EthiopianDateRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        // Endpoints use the export form, so SLASH_SEPARATOR is free to split them
        let separator_count = trimmed.matches(SLASH_SEPARATOR).count();

        match separator_count {
            0 => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{SLASH_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (start_str, end_str) = trimmed.split_once(SLASH_SEPARATOR).ok_or_else(|| {
                    RangeError::InvalidFormat(format!(
                        "Separator '{SLASH_SEPARATOR}' not found despite count == 1"
                    ))
                })?;

                let start = start_str.trim().parse::<EthiopianDate>()?;
                let end = end_str.trim().parse::<EthiopianDate>()?;

                Self::new(start, end)
            },
            _ => Err(RangeError::InvalidFormat(format!(
                "Too many '{SLASH_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl Serialize for EthiopianDateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for EthiopianDateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

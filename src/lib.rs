mod consts;
mod convert;
mod format;
mod picker;
mod prelude;
mod range;
mod types;

pub use consts::*;
pub use convert::{
    ethiopian_new_year, ethiopian_to_gregorian, get_current_ethiopian_date, gregorian_to_ethiopian,
    today,
};
pub use format::{
    day_name, format_date_range, format_date_time, format_for_card, format_for_export,
    format_for_form, format_for_table, format_month_year, format_relative, format_relative_to,
    format_year, get_input_placeholder, input_placeholder_for, month_name, parse_input,
    short_day_name, short_month_name,
};
pub use picker::{
    CalendarAction, CalendarState, DateBounds, MonthGrid, ViewMode, month_days, month_picker_rows,
};
pub use range::{EthiopianDateRange, RangeError};
pub use types::{
    Day, Month, Year, days_in_ethiopian_month, days_in_ethiopian_year, is_ethiopian_leap_year,
    is_gregorian_leap_year,
};

use crate::prelude::*;
use chrono::{Datelike, NaiveDate, Weekday};
use std::str::FromStr;

/// A validated date in the Ethiopian calendar.
/// Field order gives the lexicographic (year, month, day) ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct EthiopianDate {
    year: Year,
    month: Month,
    day: Day,
}

/// Errors produced by conversion and validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error("Invalid date format: {0}")]
    InvalidFormat(String),
    #[error("Invalid year: {0} (must be 1-{max})", max = MAX_YEAR)]
    InvalidYear(u16),
    #[error("Invalid month: {0} (must be 1-{max})", max = MAX_MONTH)]
    InvalidMonth(u8),
    #[error("Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[error("Gregorian year {0} is outside the supported Ethiopian range")]
    OutOfRange(i32),
    #[error("Empty date string")]
    EmptyInput,
}

/// A month of a specific Ethiopian year: the position a calendar view is showing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, serde::Serialize, serde::Deserialize,
)]
#[display(fmt = "{:04}-{:02}", "year.get()", "month.get()")]
pub struct YearMonth {
    pub year: Year,
    pub month: Month,
}

impl YearMonth {
    pub const fn new(year: Year, month: Month) -> Self {
        Self { year, month }
    }

    /// Validates raw numbers into a `YearMonth`
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidYear` or `InvalidMonth`.
    pub fn from_parts(year: u16, month: u8) -> Result<Self, CalendarError> {
        Ok(Self {
            year: Year::new(year)?,
            month: Month::new(month)?,
        })
    }

    pub const fn days(self) -> u8 {
        days_in_ethiopian_month(self.year.get(), self.month.get())
    }

    /// The month before this one, wrapping Meskerem back to the previous Pagumen.
    /// Returns `None` before year 1.
    pub fn pred(self) -> Option<Self> {
        if self.month.get() == MESKEREM {
            let year = self.year.pred()?;
            Month::new(PAGUMEN).ok().map(|month| Self { year, month })
        } else {
            Month::new(self.month.get() - 1)
                .ok()
                .map(|month| Self { month, ..self })
        }
    }

    /// The month after this one, wrapping Pagumen into the next Meskerem.
    /// Returns `None` past `MAX_YEAR`.
    pub fn succ(self) -> Option<Self> {
        if self.month.get() == PAGUMEN {
            let year = self.year.succ()?;
            Month::new(MESKEREM).ok().map(|month| Self { year, month })
        } else {
            Month::new(self.month.get() + 1)
                .ok()
                .map(|month| Self { month, ..self })
        }
    }
}

impl From<EthiopianDate> for YearMonth {
    fn from(date: EthiopianDate) -> Self {
        Self {
            year: date.year,
            month: date.month,
        }
    }
}

impl EthiopianDate {
    /// Creates a new date (types are already validated against each other)
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDay` if `day` does not exist in that month,
    /// which can happen when a `Day` built for a leap Pagumen is reused.
    pub fn new(year: Year, month: Month, day: Day) -> Result<Self, CalendarError> {
        types::Day::new(day.get(), year.get(), month.get())?;
        Ok(Self { year, month, day })
    }

    /// Creates a date from raw numbers, validating every component
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidYear`, `InvalidMonth` or `InvalidDay`.
    pub fn from_parts(year: u16, month: u8, day: u8) -> Result<Self, CalendarError> {
        Ok(Self {
            year: Year::new(year)?,
            month: Month::new(month)?,
            day: Day::new(day, year, month)?,
        })
    }

    /// Converts a Gregorian date
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` outside Ethiopian years `1..=MAX_YEAR`.
    pub fn from_gregorian(date: NaiveDate) -> Result<Self, CalendarError> {
        convert::gregorian_to_ethiopian(date)
    }

    /// Converts back to the Gregorian calendar
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` only if chrono cannot represent the result.
    pub fn to_gregorian(&self) -> Result<NaiveDate, CalendarError> {
        convert::to_gregorian(self)
    }

    /// Today's Ethiopian date
    ///
    /// # Errors
    /// See [`get_current_ethiopian_date`].
    pub fn today() -> Result<Self, CalendarError> {
        convert::get_current_ethiopian_date()
    }

    /// Returns the day component (as u8 for convenience)
    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// Returns the month component (as u8 for convenience)
    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    /// Returns the year component (as u16 for convenience)
    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn day_typed(&self) -> Day {
        self.day
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    pub const fn year_typed(&self) -> Year {
        self.year
    }

    /// 1-based position of the day within its year (1..=366)
    pub const fn day_of_year(&self) -> u16 {
        (self.month.get() as u16 - 1) * DAYS_IN_REGULAR_MONTH as u16 + self.day.get() as u16
    }

    pub const fn is_leap_year(&self) -> bool {
        is_ethiopian_leap_year(self.year.get())
    }

    pub const fn days_in_month(&self) -> u8 {
        days_in_ethiopian_month(self.year.get(), self.month.get())
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[self.month.index()]
    }

    /// The actual day of the week this date falls on
    ///
    /// # Errors
    /// See [`EthiopianDate::to_gregorian`].
    pub fn weekday(&self) -> Result<Weekday, CalendarError> {
        self.to_gregorian().map(|date| date.weekday())
    }

    /// Moves the date by a signed number of days
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the result leaves the supported range.
    pub fn checked_add_days(&self, days: i64) -> Result<Self, CalendarError> {
        let gregorian = self.to_gregorian()?;
        let out_of_range = || CalendarError::OutOfRange(gregorian.year());
        let magnitude = chrono::Days::new(days.unsigned_abs());
        let moved = if days >= 0 {
            gregorian.checked_add_days(magnitude)
        } else {
            gregorian.checked_sub_days(magnitude)
        }
        .ok_or_else(out_of_range)?;
        Self::from_gregorian(moved)
    }
}

impl FromStr for EthiopianDate {
    type Err = CalendarError;

    /// Parses the strict export form `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CalendarError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(CalendarError::InvalidFormat(format!(
                "expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, got {trimmed}"
            )));
        };

        let year = year
            .parse::<u16>()
            .map_err(|_| CalendarError::InvalidFormat((*year).to_owned()))?;
        let month = month
            .parse::<u8>()
            .map_err(|_| CalendarError::InvalidFormat((*month).to_owned()))?;
        let day = day
            .parse::<u8>()
            .map_err(|_| CalendarError::InvalidFormat((*day).to_owned()))?;

        Self::from_parts(year, month, day)
    }
}

impl TryFrom<NaiveDate> for EthiopianDate {
    type Error = CalendarError;

    fn try_from(value: NaiveDate) -> Result<Self, Self::Error> {
        Self::from_gregorian(value)
    }
}

impl TryFrom<EthiopianDate> for NaiveDate {
    type Error = CalendarError;

    fn try_from(value: EthiopianDate) -> Result<Self, Self::Error> {
        value.to_gregorian()
    }
}

impl TryFrom<(u16, u8, u8)> for EthiopianDate {
    type Error = CalendarError;

    fn try_from(value: (u16, u8, u8)) -> Result<Self, Self::Error> {
        Self::from_parts(value.0, value.1, value.2)
    }
}

impl serde::Serialize for EthiopianDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for EthiopianDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use super::*;

    pub fn eth(year: u16, month: u8, day: u8) -> EthiopianDate {
        EthiopianDate::from_parts(year, month, day).unwrap()
    }

    pub fn greg(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    pub fn year_month(year: u16, month: u8) -> YearMonth {
        YearMonth::from_parts(year, month).unwrap()
    }
}

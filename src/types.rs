use crate::CalendarError;
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_REGULAR_MONTH, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE, LEAP_YEAR_OFFSET,
    MAX_MONTH, MAX_YEAR, MIN_DAY, PAGUMEN, PAGUMEN_DAYS, PAGUMEN_DAYS_LEAP,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU16;
use std::num::NonZeroU8;

/// An Ethiopian year guaranteed to be in the range `1..=MAX_YEAR` (1..=9999)
/// Uses `NonZeroU16` internally, so 0 is not a valid year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's non-zero and <= `MAX_YEAR`
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, CalendarError> {
        let non_zero = NonZeroU16::new(value).ok_or(CalendarError::InvalidYear(value))?;
        if value > MAX_YEAR {
            return Err(CalendarError::InvalidYear(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the year value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }

    pub const fn is_leap(self) -> bool {
        is_ethiopian_leap_year(self.get())
    }

    /// Previous year, or `None` below year 1
    pub fn pred(self) -> Option<Self> {
        Self::new(self.get() - 1).ok()
    }

    /// Next year, or `None` past `MAX_YEAR`
    pub fn succ(self) -> Option<Self> {
        self.get().checked_add(1).and_then(|y| Self::new(y).ok())
    }
}

impl TryFrom<u16> for Year {
    type Error = CalendarError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An Ethiopian month guaranteed to be in the range `1..=MAX_MONTH` (1..=13)
/// Month 13 is Pagumen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, CalendarError> {
        let non_zero = NonZeroU8::new(value).ok_or(CalendarError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(CalendarError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// 0-based position in the name tables
    #[inline]
    pub const fn index(self) -> usize {
        (self.get() - 1) as usize
    }

    pub const fn is_pagumen(self) -> bool {
        self.get() == PAGUMEN
    }
}

impl TryFrom<u8> for Month {
    type Error = CalendarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day value guaranteed to be valid for a given year and month
/// Uses `NonZeroU8` internally, so 0 is not a valid day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating that it's non-zero and valid for the given year and month
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDay` if the value is 0 or invalid for the given year and month.
    pub fn new(value: u8, year: u16, month: u8) -> Result<Self, CalendarError> {
        let invalid = CalendarError::InvalidDay {
            year,
            month,
            day: value,
        };
        let non_zero = NonZeroU8::new(value).ok_or_else(|| invalid.clone())?;

        if month == 0 || month > MAX_MONTH || value > days_in_ethiopian_month(year, month) {
            return Err(invalid);
        }

        Ok(Self(non_zero))
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Day {
    type Error = CalendarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        // Without year/month context only the regular month length can be checked
        if value < MIN_DAY || value > DAYS_IN_REGULAR_MONTH {
            return Err(CalendarError::InvalidDay {
                year: 0,
                month: 0,
                day: value,
            });
        }
        let non_zero = NonZeroU8::new(value).ok_or(CalendarError::InvalidDay {
            year: 0,
            month: 0,
            day: value,
        })?;
        Ok(Self(non_zero))
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Helper functions

pub const fn is_gregorian_leap_year(year: i32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Whether Pagumen of the given Ethiopian year has six days.
///
/// Ethiopian year `E` ends in September of Gregorian year `E + 8`. The next
/// New Year slips to September 12 exactly when the Gregorian year after that
/// is leap, which is what lengthens Pagumen.
pub const fn is_ethiopian_leap_year(year: u16) -> bool {
    is_gregorian_leap_year(year as i32 + LEAP_YEAR_OFFSET)
}

/// Days in an Ethiopian month: 30 for months 1-12, 5 or 6 for Pagumen.
pub const fn days_in_ethiopian_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month != PAGUMEN {
        DAYS_IN_REGULAR_MONTH
    } else if is_ethiopian_leap_year(year) {
        PAGUMEN_DAYS_LEAP
    } else {
        PAGUMEN_DAYS
    }
}

pub const fn days_in_ethiopian_year(year: u16) -> u16 {
    if is_ethiopian_leap_year(year) { 366 } else { 365 }
}

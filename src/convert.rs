use chrono::{Datelike, Local, NaiveDate};

use crate::consts::{
    DAYS_IN_REGULAR_MONTH, NEW_YEAR_GREGORIAN_DAY, NEW_YEAR_GREGORIAN_DAY_LEAP,
    NEW_YEAR_GREGORIAN_MONTH, NEW_YEAR_OFFSET,
};
use crate::types::is_gregorian_leap_year;
use crate::{CalendarError, EthiopianDate};

/// Gregorian date of Meskerem 1 for the Ethiopian year beginning in `gregorian_year`.
///
/// September 12 when the following Gregorian year is a leap year, September 11
/// otherwise. Returns `None` if chrono cannot represent the date.
pub fn ethiopian_new_year(gregorian_year: i32) -> Option<NaiveDate> {
    let day = if is_gregorian_leap_year(gregorian_year + 1) {
        NEW_YEAR_GREGORIAN_DAY_LEAP
    } else {
        NEW_YEAR_GREGORIAN_DAY
    };
    NaiveDate::from_ymd_opt(gregorian_year, NEW_YEAR_GREGORIAN_MONTH, day)
}

fn new_year_anchor(gregorian_year: i32) -> Result<NaiveDate, CalendarError> {
    ethiopian_new_year(gregorian_year).ok_or(CalendarError::OutOfRange(gregorian_year))
}

/// Converts a Gregorian date to its Ethiopian equivalent.
///
/// # Errors
/// Returns `CalendarError::OutOfRange` if the Ethiopian year would fall outside `1..=MAX_YEAR`.
pub fn gregorian_to_ethiopian(date: NaiveDate) -> Result<EthiopianDate, CalendarError> {
    let gregorian_year = date.year();
    let out_of_range = || CalendarError::OutOfRange(gregorian_year);

    // Before Meskerem 1 the date still belongs to the year that began last September
    let mut anchor = new_year_anchor(gregorian_year)?;
    let mut year = gregorian_year - NEW_YEAR_OFFSET;
    if date < anchor {
        anchor = new_year_anchor(gregorian_year - 1)?;
        year -= 1;
    }

    let elapsed = date.signed_duration_since(anchor).num_days();
    let regular = i64::from(DAYS_IN_REGULAR_MONTH);
    let month = u8::try_from(elapsed / regular + 1).map_err(|_| out_of_range())?;
    let day = u8::try_from(elapsed % regular + 1).map_err(|_| out_of_range())?;
    let year = u16::try_from(year).map_err(|_| out_of_range())?;

    EthiopianDate::from_parts(year, month, day).map_err(|_| out_of_range())
}

/// Converts an Ethiopian (year, month, day) triple to a Gregorian date.
///
/// Out-of-range input is rejected, never rolled over into the next month.
///
/// # Errors
/// Returns `CalendarError::InvalidYear`, `InvalidMonth` or `InvalidDay` for an
/// invalid triple.
pub fn ethiopian_to_gregorian(year: u16, month: u8, day: u8) -> Result<NaiveDate, CalendarError> {
    EthiopianDate::from_parts(year, month, day)?.to_gregorian()
}

pub(crate) fn to_gregorian(date: &EthiopianDate) -> Result<NaiveDate, CalendarError> {
    let gregorian_year = i32::from(date.year()) + NEW_YEAR_OFFSET;
    let anchor = new_year_anchor(gregorian_year)?;
    let offset = u64::from(date.day_of_year() - 1);
    anchor
        .checked_add_days(chrono::Days::new(offset))
        .ok_or(CalendarError::OutOfRange(gregorian_year))
}

/// Today's local calendar date. The only wall-clock read in the crate.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Today's date in the Ethiopian calendar.
///
/// # Errors
/// Returns `CalendarError::OutOfRange` only if the system clock is far outside
/// the supported range.
pub fn get_current_ethiopian_date() -> Result<EthiopianDate, CalendarError> {
    gregorian_to_ethiopian(today())
}

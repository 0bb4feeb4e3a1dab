//! Navigation state for the day-grid calendar and the month picker.
//!
//! The widgets themselves live in the UI layer; this module holds the parts
//! with calendar rules in them: month and year paging with Pagumen rollover,
//! the day grid, the 13-button month layout and min/max bounds.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::consts::DAYS_IN_WEEK;
use crate::convert::{ethiopian_to_gregorian, gregorian_to_ethiopian};
use crate::range::{EthiopianDateRange, RangeError};
use crate::{CalendarError, EthiopianDate, Month, YearMonth};

/// Month picker layout: three rows of four regular months, Pagumen alone below.
static MONTH_PICKER_ROWS: [&[u8]; 4] = [&[1, 2, 3, 4], &[5, 6, 7, 8], &[9, 10, 11, 12], &[13]];

pub fn month_picker_rows() -> &'static [&'static [u8]] {
    &MONTH_PICKER_ROWS
}

/// Day numbers of a month, `1..=days_in_ethiopian_month`.
pub fn month_days(year_month: YearMonth) -> Vec<u8> {
    (1..=year_month.days()).collect()
}

/// Which grid the calendar is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Days,
    Months,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarAction {
    PreviousMonth,
    NextMonth,
    PreviousYear,
    NextYear,
    /// Day of the month in view
    SelectDay(u8),
    /// Month of the year in view, from the month picker
    SelectMonth(u8),
    ShowMonths,
    ShowDays,
    GoTo(YearMonth),
    /// Jump to and select the given local date
    Today(NaiveDate),
}

/// Optional Gregorian limits on what may be selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateBounds {
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
}

/// Ethiopian month holding a bound. A bound with no Ethiopian equivalent
/// constrains nothing.
fn bound_month(bound: NaiveDate) -> Option<YearMonth> {
    gregorian_to_ethiopian(bound).ok().map(YearMonth::from)
}

impl DateBounds {
    pub const fn new(min: Option<NaiveDate>, max: Option<NaiveDate>) -> Self {
        Self { min, max }
    }

    pub const fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    pub fn is_day_disabled(&self, date: NaiveDate) -> bool {
        self.min.is_some_and(|min| date < min) || self.max.is_some_and(|max| date > max)
    }

    /// A month is disabled when it lies wholly outside `[min, max]`, comparing
    /// Ethiopian (year, month) pairs.
    pub fn is_month_disabled(&self, year_month: YearMonth) -> bool {
        let below = self
            .min
            .and_then(bound_month)
            .is_some_and(|min| year_month < min);
        let above = self
            .max
            .and_then(bound_month)
            .is_some_and(|max| year_month > max);
        below || above
    }

    /// Bounds check combined with a caller-supplied predicate.
    pub fn is_disabled(&self, date: NaiveDate, predicate: impl Fn(NaiveDate) -> bool) -> bool {
        self.is_day_disabled(date) || predicate(date)
    }

    /// Both bounds as an Ethiopian range, when both are set.
    ///
    /// # Errors
    /// Returns `RangeError` if a bound is out of range or min > max.
    pub fn range(&self) -> Result<Option<EthiopianDateRange>, RangeError> {
        match (self.min, self.max) {
            (Some(min), Some(max)) => EthiopianDateRange::from_gregorian(min, max).map(Some),
            _ => Ok(None),
        }
    }
}

/// A month laid out in weeks, Monday first. `None` cells pad the first and
/// last week; days of neighbouring months are never shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year_month: YearMonth,
    pub cells: Vec<[Option<u8>; DAYS_IN_WEEK]>,
}

impl MonthGrid {
    /// Builds the grid for a month.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` only if the month has no Gregorian equivalent.
    pub fn new(year_month: YearMonth) -> Result<Self, CalendarError> {
        let first = ethiopian_to_gregorian(year_month.year.get(), year_month.month.get(), 1)?;
        let leading = first.weekday().num_days_from_monday() as usize;
        let days = usize::from(year_month.days());
        let rows = (leading + days).div_ceil(DAYS_IN_WEEK);

        let mut cells = vec![[None; DAYS_IN_WEEK]; rows];
        for (offset, day) in (1..=year_month.days()).enumerate() {
            let position = leading + offset;
            cells[position / DAYS_IN_WEEK][position % DAYS_IN_WEEK] = Some(day);
        }

        Ok(Self { year_month, cells })
    }

    /// Day numbers in grid order
    pub fn days(&self) -> impl Iterator<Item = u8> + '_ {
        self.cells.iter().flatten().filter_map(|cell| *cell)
    }

    /// Number of empty cells before day 1
    pub fn leading_blanks(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .take_while(|cell| cell.is_none())
            .count()
    }
}

/// State of a calendar widget. Transitions go through [`CalendarState::reduce`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarState {
    pub view: YearMonth,
    pub selected: Option<NaiveDate>,
    pub mode: ViewMode,
    pub bounds: DateBounds,
}

impl CalendarState {
    pub const fn new(view: YearMonth) -> Self {
        Self {
            view,
            selected: None,
            mode: ViewMode::Days,
            bounds: DateBounds::unbounded(),
        }
    }

    /// A calendar opened on the month holding `date`, with nothing selected.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if `date` has no Ethiopian equivalent.
    pub fn showing(date: NaiveDate) -> Result<Self, CalendarError> {
        Ok(Self::new(gregorian_to_ethiopian(date)?.into()))
    }

    /// A calendar opened on `selected`, with it selected.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if `selected` has no Ethiopian equivalent.
    pub fn with_selected(selected: NaiveDate) -> Result<Self, CalendarError> {
        let mut state = Self::showing(selected)?;
        state.selected = Some(selected);
        Ok(state)
    }

    #[must_use]
    pub const fn with_bounds(mut self, bounds: DateBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn selected_ethiopian(&self) -> Option<EthiopianDate> {
        self.selected
            .and_then(|date| gregorian_to_ethiopian(date).ok())
    }

    /// Day grid of the month in view.
    ///
    /// # Errors
    /// See [`MonthGrid::new`].
    pub fn grid(&self) -> Result<MonthGrid, CalendarError> {
        MonthGrid::new(self.view)
    }

    /// Whether the month picker button for `month` of the year in view is disabled.
    pub fn is_month_disabled(&self, month: Month) -> bool {
        self.bounds.is_month_disabled(YearMonth::new(self.view.year, month))
    }

    pub fn is_date_disabled(&self, date: NaiveDate, predicate: impl Fn(NaiveDate) -> bool) -> bool {
        self.bounds.is_disabled(date, predicate)
    }

    /// Applies one user action. Actions that would leave the supported year
    /// range or pick a disabled or nonexistent date leave the state unchanged.
    #[must_use]
    pub fn reduce(self, action: CalendarAction) -> Self {
        let next = match action {
            CalendarAction::PreviousMonth => self.view.pred().map(|view| Self { view, ..self }),
            CalendarAction::NextMonth => self.view.succ().map(|view| Self { view, ..self }),
            CalendarAction::PreviousYear => self.view.year.pred().map(|year| Self {
                view: YearMonth { year, ..self.view },
                ..self
            }),
            CalendarAction::NextYear => self.view.year.succ().map(|year| Self {
                view: YearMonth { year, ..self.view },
                ..self
            }),
            CalendarAction::SelectDay(day) => self.select_day(day),
            CalendarAction::SelectMonth(month) => Month::new(month)
                .ok()
                .filter(|month| !self.is_month_disabled(*month))
                .map(|month| Self {
                    view: YearMonth::new(self.view.year, month),
                    mode: ViewMode::Days,
                    ..self
                }),
            CalendarAction::ShowMonths => Some(Self {
                mode: ViewMode::Months,
                ..self
            }),
            CalendarAction::ShowDays => Some(Self {
                mode: ViewMode::Days,
                ..self
            }),
            CalendarAction::GoTo(view) => Some(Self { view, ..self }),
            CalendarAction::Today(today) => gregorian_to_ethiopian(today)
                .ok()
                .filter(|_| !self.bounds.is_day_disabled(today))
                .map(|date| Self {
                    view: date.into(),
                    selected: Some(today),
                    mode: ViewMode::Days,
                    ..self
                }),
        };

        match next {
            Some(next) => {
                trace!(?action, view = %next.view, mode = ?next.mode, "calendar transition");
                next
            },
            None => {
                trace!(?action, view = %self.view, "calendar action ignored");
                self
            },
        }
    }

    fn select_day(self, day: u8) -> Option<Self> {
        let date = ethiopian_to_gregorian(self.view.year.get(), self.view.month.get(), day).ok()?;
        if self.bounds.is_day_disabled(date) {
            return None;
        }
        Some(Self {
            selected: Some(date),
            ..self
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{eth, greg, year_month};
    use crate::{MAX_YEAR, days_in_ethiopian_month};

    fn state(year: u16, month: u8) -> CalendarState {
        CalendarState::new(year_month(year, month))
    }

    #[test]
    fn test_previous_month_from_meskerem_wraps_to_pagumen() {
        let next = state(2016, 1).reduce(CalendarAction::PreviousMonth);
        assert_eq!(next.view, year_month(2015, 13));
    }

    #[test]
    fn test_next_month_from_pagumen_wraps_to_meskerem() {
        let next = state(2016, 13).reduce(CalendarAction::NextMonth);
        assert_eq!(next.view, year_month(2017, 1));
    }

    #[test]
    fn test_month_steps_within_year() {
        assert_eq!(
            state(2016, 5).reduce(CalendarAction::NextMonth).view,
            year_month(2016, 6)
        );
        assert_eq!(
            state(2016, 5).reduce(CalendarAction::PreviousMonth).view,
            year_month(2016, 4)
        );
        assert_eq!(
            state(2016, 12).reduce(CalendarAction::NextMonth).view,
            year_month(2016, 13)
        );
    }

    #[test]
    fn test_thirteen_steps_is_one_year() {
        let mut s = state(2016, 4);
        for _ in 0..13 {
            s = s.reduce(CalendarAction::NextMonth);
        }
        assert_eq!(s.view, year_month(2017, 4));
        for _ in 0..13 {
            s = s.reduce(CalendarAction::PreviousMonth);
        }
        assert_eq!(s.view, year_month(2016, 4));
    }

    #[test]
    fn test_year_paging_keeps_month() {
        assert_eq!(
            state(2016, 13).reduce(CalendarAction::NextYear).view,
            year_month(2017, 13)
        );
        assert_eq!(
            state(2016, 3).reduce(CalendarAction::PreviousYear).view,
            year_month(2015, 3)
        );
    }

    #[test]
    fn test_navigation_saturates_at_year_bounds() {
        let first = state(1, 1);
        assert_eq!(first.reduce(CalendarAction::PreviousMonth), first);
        assert_eq!(first.reduce(CalendarAction::PreviousYear), first);

        let last = state(MAX_YEAR, 13);
        assert_eq!(last.reduce(CalendarAction::NextMonth), last);
        assert_eq!(last.reduce(CalendarAction::NextYear), last);
    }

    #[test]
    fn test_select_day_emits_gregorian_date() {
        let s = state(2017, 1).reduce(CalendarAction::SelectDay(1));
        assert_eq!(s.selected, Some(greg(2024, 9, 11)));
        assert_eq!(s.selected_ethiopian(), Some(eth(2017, 1, 1)));
        assert_eq!(s.grid().unwrap().year_month, s.view);
    }

    #[test]
    fn test_select_nonexistent_day_is_ignored() {
        let s = state(2016, 13);
        assert_eq!(s.reduce(CalendarAction::SelectDay(6)), s);
        assert_eq!(s.reduce(CalendarAction::SelectDay(0)), s);
        assert_eq!(state(2016, 1).reduce(CalendarAction::SelectDay(31)).selected, None);

        let leap = state(2015, 13).reduce(CalendarAction::SelectDay(6));
        assert_eq!(leap.selected, Some(greg(2023, 9, 11)));
    }

    #[test]
    fn test_selection_survives_paging() {
        let s = state(2016, 1)
            .reduce(CalendarAction::SelectDay(15))
            .reduce(CalendarAction::NextMonth);
        assert_eq!(s.view, year_month(2016, 2));
        assert_eq!(s.selected_ethiopian(), Some(eth(2016, 1, 15)));
    }

    #[test]
    fn test_month_picker_flow() {
        let s = state(2016, 1).reduce(CalendarAction::ShowMonths);
        assert_eq!(s.mode, ViewMode::Months);

        let s = s.reduce(CalendarAction::NextYear);
        assert_eq!(s.view, year_month(2017, 1));

        let s = s.reduce(CalendarAction::SelectMonth(13));
        assert_eq!(s.view, year_month(2017, 13));
        assert_eq!(s.mode, ViewMode::Days);

        assert_eq!(s.reduce(CalendarAction::SelectMonth(14)), s);
        assert_eq!(s.reduce(CalendarAction::ShowDays).mode, ViewMode::Days);
    }

    #[test]
    fn test_go_to_and_today() {
        let s = state(2016, 1).reduce(CalendarAction::GoTo(year_month(2010, 7)));
        assert_eq!(s.view, year_month(2010, 7));

        let s = s
            .reduce(CalendarAction::ShowMonths)
            .reduce(CalendarAction::Today(greg(2024, 9, 11)));
        assert_eq!(s.view, year_month(2017, 1));
        assert_eq!(s.selected, Some(greg(2024, 9, 11)));
        assert_eq!(s.mode, ViewMode::Days);
    }

    #[test]
    fn test_showing_and_with_selected() {
        let s = CalendarState::showing(greg(2023, 9, 11)).unwrap();
        assert_eq!(s.view, year_month(2015, 13));
        assert_eq!(s.selected, None);

        let s = CalendarState::with_selected(greg(2023, 9, 12)).unwrap();
        assert_eq!(s.view, year_month(2016, 1));
        assert_eq!(s.selected, Some(greg(2023, 9, 12)));

        assert!(CalendarState::showing(greg(5, 1, 1)).is_err());
    }

    #[test]
    fn test_month_picker_rows_cover_every_month_once() {
        let rows = month_picker_rows();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3], &[13]);
        let all: Vec<u8> = rows.iter().flat_map(|row| row.iter().copied()).collect();
        assert_eq!(all, (1..=13).collect::<Vec<u8>>());
    }

    #[test]
    fn test_month_days_complete() {
        for year in 1990..=2030 {
            for month in 1..=13 {
                let ym = year_month(year, month);
                let days = month_days(ym);
                let expected: Vec<u8> = (1..=days_in_ethiopian_month(year, month)).collect();
                assert_eq!(days, expected, "{ym}");
            }
        }
    }

    #[test]
    fn test_grid_holds_exactly_the_month() {
        for year in 2000..=2030 {
            for month in 1..=13 {
                let ym = year_month(year, month);
                let grid = MonthGrid::new(ym).unwrap();
                let days: Vec<u8> = grid.days().collect();
                assert_eq!(days, month_days(ym), "{ym}");
                assert!(grid.cells.last().is_some_and(|row| row.iter().any(Option::is_some)));
            }
        }
    }

    #[test]
    fn test_grid_alignment() {
        // Meskerem 1, 2017 is Wednesday 2024-09-11
        let grid = MonthGrid::new(year_month(2017, 1)).unwrap();
        assert_eq!(grid.leading_blanks(), 2);
        assert_eq!(grid.cells[0], [None, None, Some(1), Some(2), Some(3), Some(4), Some(5)]);
        assert_eq!(grid.cells.len(), 5);

        // Pagumen 2016 starts Friday 2024-09-06
        let grid = MonthGrid::new(year_month(2016, 13)).unwrap();
        assert_eq!(grid.leading_blanks(), 4);
        assert_eq!(grid.cells, vec![
            [None, None, None, None, Some(1), Some(2), Some(3)],
            [Some(4), Some(5), None, None, None, None, None],
        ]);
    }

    #[test]
    fn test_bounds_disable_days() {
        let bounds = DateBounds::new(Some(greg(2024, 1, 1)), Some(greg(2024, 12, 31)));
        assert!(bounds.is_day_disabled(greg(2023, 12, 31)));
        assert!(!bounds.is_day_disabled(greg(2024, 1, 1)));
        assert!(!bounds.is_day_disabled(greg(2024, 12, 31)));
        assert!(bounds.is_day_disabled(greg(2025, 1, 1)));
        assert!(!DateBounds::unbounded().is_day_disabled(greg(1900, 1, 1)));
    }

    #[test]
    fn test_bounds_disable_months_by_year_month() {
        // 2024-01-01 is 22 Tahsas 2016, 2024-12-31 is 22 Tahsas 2017
        let bounds = DateBounds::new(Some(greg(2024, 1, 1)), Some(greg(2024, 12, 31)));
        assert!(bounds.is_month_disabled(year_month(2016, 3)));
        assert!(!bounds.is_month_disabled(year_month(2016, 4)));
        assert!(!bounds.is_month_disabled(year_month(2016, 13)));
        assert!(!bounds.is_month_disabled(year_month(2017, 4)));
        assert!(bounds.is_month_disabled(year_month(2017, 5)));
        assert!(bounds.is_month_disabled(year_month(2015, 13)));
    }

    #[test]
    fn test_bounds_with_custom_predicate() {
        let bounds = DateBounds::new(Some(greg(2024, 1, 1)), None);
        let weekends = |date: NaiveDate| date.weekday().num_days_from_monday() >= 5;
        assert!(bounds.is_disabled(greg(2024, 9, 14), weekends));
        assert!(!bounds.is_disabled(greg(2024, 9, 11), weekends));
        assert!(bounds.is_disabled(greg(2023, 9, 11), |_| false));
    }

    #[test]
    fn test_bounds_range() {
        let bounds = DateBounds::new(Some(greg(2023, 9, 12)), Some(greg(2024, 9, 10)));
        let range = bounds.range().unwrap().unwrap();
        assert_eq!(range.dates(), (eth(2016, 1, 1), eth(2016, 13, 5)));
        assert_eq!(DateBounds::new(Some(greg(2023, 9, 12)), None).range(), Ok(None));
        assert!(DateBounds::new(Some(greg(2024, 9, 10)), Some(greg(2023, 9, 12)))
            .range()
            .is_err());
    }

    #[test]
    fn test_bounds_block_selection() {
        let bounds = DateBounds::new(Some(greg(2024, 1, 1)), Some(greg(2024, 12, 31)));
        let s = state(2016, 4).with_bounds(bounds);
        // 21 Tahsas 2016 is 2023-12-31
        assert_eq!(s.reduce(CalendarAction::SelectDay(21)), s);
        assert_eq!(
            s.reduce(CalendarAction::SelectDay(22)).selected,
            Some(greg(2024, 1, 1))
        );

        let months = s.reduce(CalendarAction::ShowMonths);
        assert!(months.is_month_disabled(Month::new(3).unwrap()));
        assert_eq!(months.reduce(CalendarAction::SelectMonth(3)), months);
        assert_eq!(months.reduce(CalendarAction::SelectMonth(5)).view, year_month(2016, 5));

        assert_eq!(s.reduce(CalendarAction::Today(greg(2025, 6, 1))), s);
        assert!(s.is_date_disabled(greg(2024, 9, 14), |date| date.weekday().num_days_from_monday() >= 5));
    }

    #[test]
    fn test_state_serde() {
        let s = state(2016, 13)
            .with_bounds(DateBounds::new(Some(greg(2024, 1, 1)), None))
            .reduce(CalendarAction::SelectDay(2));
        let json = serde_json::to_string(&s).unwrap();
        let parsed: CalendarState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, s);
        assert!(json.contains("\"mode\":\"days\""));
    }
}

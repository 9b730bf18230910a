use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::utils::date::MONTH_NAMES;

/// Days shown as bookable on every month of the mock calendar.
pub const SIMULATED_AVAILABLE_DAYS: [u32; 6] = [1, 2, 3, 14, 19, 27];

/// Day of every month closed for maintenance.
pub const MAINTENANCE_DAY: u32 = 3;

/// Month the picker opens on, identical for server render and hydration.
pub const OPENING_MONTH: (i32, u32) = (2025, 10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayStatus {
    Maintenance,
    Available,
    Unlisted,
}

/// One month of the date picker grid, weeks starting on Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthView {
    first: NaiveDate,
}

impl MonthView {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    pub fn opening() -> Self {
        let (year, month) = OPENING_MONTH;
        Self::new(year, month).unwrap_or_else(|| Self::containing(NaiveDate::default()))
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn days_in_month(&self) -> u32 {
        let next = self.first + Months::new(1);
        (next - self.first).num_days() as u32
    }

    /// Empty cells before day 1 in a Monday-first grid.
    pub fn leading_blanks(&self) -> u32 {
        self.first.weekday().num_days_from_monday()
    }

    pub fn shift(&self, delta: i32) -> Self {
        let months = Months::new(delta.unsigned_abs());
        let first = if delta >= 0 {
            self.first.checked_add_months(months)
        } else {
            self.first.checked_sub_months(months)
        };
        Self {
            first: first.unwrap_or(self.first),
        }
    }

    pub fn title(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.first.month0() as usize], self.year())
    }

    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        self.first.with_day(day)
    }

    pub fn is_simulated_available(&self, day: u32) -> bool {
        day <= self.days_in_month() && SIMULATED_AVAILABLE_DAYS.contains(&day)
    }

    /// Maintenance wins over the simulated list; every other day can be picked.
    pub fn day_status(&self, day: u32) -> DayStatus {
        if day == MAINTENANCE_DAY {
            DayStatus::Maintenance
        } else if self.is_simulated_available(day) {
            DayStatus::Available
        } else {
            DayStatus::Unlisted
        }
    }

    pub fn is_selectable(&self, day: u32) -> bool {
        (1..=self.days_in_month()).contains(&day) && self.day_status(day) != DayStatus::Maintenance
    }

    /// Grid cells in display order; `None` pads the first week.
    pub fn cells(&self) -> Vec<Option<u32>> {
        (0..self.leading_blanks())
            .map(|_| None)
            .chain((1..=self.days_in_month()).map(Some))
            .collect()
    }
}

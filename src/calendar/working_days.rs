//! Working-day counts for a calendar year.
//!
//! Every date of the year is classified exactly once: weekend day, holiday
//! falling on a weekday, or working day. Holidays that land on a Saturday or
//! Sunday are counted as weekend days only.

use serde::{Deserialize, Serialize};

use super::date::{CalendarDate, days_in_year};
use super::holidays::{Holiday, HolidayRules, holidays_for_year};

/// Day counts for one calendar year.
///
/// # Invariant
///
/// `total_days == weekend_days + holiday_days + working_days`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarYearStats {
    /// The calendar year.
    pub year: i32,
    /// 365 or 366.
    pub total_days: u32,
    /// Saturdays and Sundays.
    pub weekend_days: u32,
    /// Holidays that fall on a weekday.
    pub holiday_days: u32,
    /// Days that are neither weekend days nor holidays.
    pub working_days: u32,
    /// Every holiday date of the year, including those on a weekend.
    pub holidays: Vec<Holiday>,
}

/// Computes the working-day statistics of `year` under French public holidays.
///
/// # Example
///
/// ```
/// use tjm_engine::calendar::compute_year_stats;
///
/// let stats = compute_year_stats(2024);
/// assert_eq!(stats.total_days, 366);
/// assert_eq!(stats.weekend_days, 104);
/// assert_eq!(stats.holiday_days, 10);
/// assert_eq!(stats.working_days, 252);
/// ```
pub fn compute_year_stats(year: i32) -> CalendarYearStats {
    compute_year_stats_with(year, &HolidayRules::french())
}

/// Computes the working-day statistics of `year` under the given holiday rules.
pub fn compute_year_stats_with(year: i32, rules: &HolidayRules) -> CalendarYearStats {
    let holidays = holidays_for_year(year, rules);
    let total_days = days_in_year(year);
    let first = CalendarDate::first_of_year(year);

    let mut weekend_days = 0;
    let mut holiday_days = 0;
    for offset in 0..total_days {
        let date = first.add_days(i64::from(offset));
        if date.weekday().is_weekend() {
            weekend_days += 1;
        } else if holidays.iter().any(|h| h.date == date) {
            holiday_days += 1;
        }
    }

    CalendarYearStats {
        year,
        total_days,
        weekend_days,
        holiday_days,
        working_days: total_days - weekend_days - holiday_days,
        holidays,
    }
}

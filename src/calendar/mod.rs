//! French working-days calendar.
//!
//! This module counts weekend days, public holidays and working days for a
//! Gregorian year. It carries its own calendar arithmetic (leap years,
//! day-of-week, Easter) and does not depend on a date library.

mod date;
mod easter;
mod holidays;
mod working_days;

pub use date::{CalendarDate, Weekday, days_in_month, days_in_year, is_leap_year};
pub use easter::easter_sunday;
pub use holidays::{EasterHoliday, FixedHoliday, Holiday, HolidayRules, holidays_for_year};
pub use working_days::{CalendarYearStats, compute_year_stats, compute_year_stats_with};

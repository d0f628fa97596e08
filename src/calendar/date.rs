//! Pure Gregorian calendar arithmetic.
//!
//! This module provides the [`CalendarDate`] type and the helpers the working-days
//! calendar needs: leap years, month lengths, day-of-week and date offsets. Dates
//! are converted to and from a day count relative to 1970-01-01, which keeps
//! offsets and weekday extraction to plain integer math.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Day of the week, numbered the ISO way (Monday = 1 .. Sunday = 7).
///
/// # Example
///
/// ```
/// use tjm_engine::calendar::Weekday;
///
/// assert_eq!(Weekday::Saturday.iso_number(), 6);
/// assert!(Weekday::Sunday.is_weekend());
/// assert!(!Weekday::Friday.is_weekend());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    /// ISO weekday 1.
    Monday,
    /// ISO weekday 2.
    Tuesday,
    /// ISO weekday 3.
    Wednesday,
    /// ISO weekday 4.
    Thursday,
    /// ISO weekday 5.
    Friday,
    /// ISO weekday 6.
    Saturday,
    /// ISO weekday 7.
    Sunday,
}

impl Weekday {
    /// Returns the ISO 8601 weekday number (Monday = 1, Sunday = 7).
    pub fn iso_number(self) -> u32 {
        match self {
            Weekday::Monday => 1,
            Weekday::Tuesday => 2,
            Weekday::Wednesday => 3,
            Weekday::Thursday => 4,
            Weekday::Friday => 5,
            Weekday::Saturday => 6,
            Weekday::Sunday => 7,
        }
    }

    /// Returns `true` for Saturday and Sunday.
    pub fn is_weekend(self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }

    fn from_iso_number(n: u32) -> Self {
        match n {
            1 => Weekday::Monday,
            2 => Weekday::Tuesday,
            3 => Weekday::Wednesday,
            4 => Weekday::Thursday,
            5 => Weekday::Friday,
            6 => Weekday::Saturday,
            _ => Weekday::Sunday,
        }
    }
}

/// Returns `true` if `year` is a Gregorian leap year.
///
/// ```
/// use tjm_engine::calendar::is_leap_year;
///
/// assert!(is_leap_year(2024));
/// assert!(is_leap_year(2000));
/// assert!(!is_leap_year(1900));
/// assert!(!is_leap_year(2025));
/// ```
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in the given year (365 or 366).
pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Number of days in the given month, or 0 for a month outside 1..=12.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// A validated Gregorian calendar date.
///
/// Serializes as an ISO `YYYY-MM-DD` string.
///
/// # Example
///
/// ```
/// use tjm_engine::calendar::{CalendarDate, Weekday};
///
/// let date = CalendarDate::new(2024, 3, 31).unwrap();
/// assert_eq!(date.weekday(), Weekday::Sunday);
/// assert_eq!(date.add_days(1).to_string(), "2024-04-01");
/// assert_eq!(date.month_day(), (3, 31));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: i32,
    month: u32,
    day: u32,
}

impl CalendarDate {
    /// Builds a date, returning `None` if the month or day is out of range.
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        if day == 0 || day > days_in_month(year, month) {
            return None;
        }
        Some(Self { year, month, day })
    }

    /// Builds a date from components already known to be in range.
    pub(super) fn from_valid_parts(year: i32, month: u32, day: u32) -> Self {
        debug_assert!(day >= 1 && day <= days_in_month(year, month));
        Self { year, month, day }
    }

    /// January 1st of `year`.
    pub fn first_of_year(year: i32) -> Self {
        Self::from_valid_parts(year, 1, 1)
    }

    /// The year component.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month component (1..=12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The day-of-month component (1..=31).
    pub fn day(&self) -> u32 {
        self.day
    }

    /// The `(month, day)` pair used to match fixed annual holidays.
    pub fn month_day(&self) -> (u32, u32) {
        (self.month, self.day)
    }

    /// 1-based ordinal day within the year.
    pub fn day_of_year(&self) -> u32 {
        let preceding: u32 = (1..self.month).map(|m| days_in_month(self.year, m)).sum();
        preceding + self.day
    }

    /// Day of the week.
    pub fn weekday(&self) -> Weekday {
        // 1970-01-01 was a Thursday (ISO 4).
        let n = (self.to_epoch_days() + 3).rem_euclid(7) as u32 + 1;
        Weekday::from_iso_number(n)
    }

    /// Returns the date `days` days later (or earlier, when negative).
    pub fn add_days(&self, days: i64) -> Self {
        Self::from_epoch_days(self.to_epoch_days() + days)
    }

    /// Days since 1970-01-01 in the proleptic Gregorian calendar.
    pub fn to_epoch_days(&self) -> i64 {
        let year = i64::from(self.year) - i64::from(self.month <= 2);
        let era = year.div_euclid(400);
        let year_of_era = year - era * 400;
        let month = i64::from(self.month);
        let shifted_month = if month > 2 { month - 3 } else { month + 9 };
        let day_of_year = (153 * shifted_month + 2) / 5 + i64::from(self.day) - 1;
        let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
        era * 146_097 + day_of_era - 719_468
    }

    /// Inverse of [`CalendarDate::to_epoch_days`].
    pub fn from_epoch_days(days: i64) -> Self {
        let z = days + 719_468;
        let era = z.div_euclid(146_097);
        let day_of_era = z - era * 146_097;
        let year_of_era =
            (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
        let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
        let mp = (5 * day_of_year + 2) / 153;
        let day = (day_of_year - (153 * mp + 2) / 5 + 1) as u32;
        let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
        let year = year_of_era + era * 400 + i64::from(month <= 2);

        Self {
            year: year as i32,
            month,
            day,
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for CalendarDate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("invalid date '{}', expected YYYY-MM-DD", s);
        let mut parts = s.splitn(3, '-');
        let year = parts
            .next()
            .and_then(|p| p.parse::<i32>().ok())
            .ok_or_else(invalid)?;
        let month = parts
            .next()
            .and_then(|p| p.parse::<u32>().ok())
            .ok_or_else(invalid)?;
        let day = parts
            .next()
            .and_then(|p| p.parse::<u32>().ok())
            .ok_or_else(invalid)?;
        CalendarDate::new(year, month, day).ok_or_else(invalid)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    #[test]
    fn test_leap_year_rules() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(is_leap_year(1600));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2100));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn test_days_in_month_february() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2023, 13), 0);
    }

    #[test]
    fn test_new_rejects_invalid_dates() {
        assert!(CalendarDate::new(2023, 2, 29).is_none());
        assert!(CalendarDate::new(2023, 4, 31).is_none());
        assert!(CalendarDate::new(2023, 0, 1).is_none());
        assert!(CalendarDate::new(2023, 1, 0).is_none());
        assert!(CalendarDate::new(2024, 2, 29).is_some());
    }

    #[test]
    fn test_epoch_anchor() {
        assert_eq!(date(1970, 1, 1).to_epoch_days(), 0);
        assert_eq!(date(1970, 1, 2).to_epoch_days(), 1);
        assert_eq!(date(1969, 12, 31).to_epoch_days(), -1);
        assert_eq!(date(2000, 3, 1).to_epoch_days(), 11_017);
    }

    #[test]
    fn test_epoch_days_round_trip_across_leap_boundaries() {
        for days in [-800_000, -1, 0, 59, 60, 11_016, 19_782, 47_540] {
            let d = CalendarDate::from_epoch_days(days);
            assert_eq!(d.to_epoch_days(), days, "round trip failed for {}", d);
        }
    }

    #[test]
    fn test_weekday_known_dates() {
        assert_eq!(date(1970, 1, 1).weekday(), Weekday::Thursday);
        assert_eq!(date(2024, 1, 1).weekday(), Weekday::Monday);
        assert_eq!(date(2024, 3, 31).weekday(), Weekday::Sunday);
        assert_eq!(date(2024, 7, 14).weekday(), Weekday::Sunday);
        assert_eq!(date(2025, 1, 1).weekday(), Weekday::Wednesday);
        assert_eq!(date(2000, 1, 1).weekday(), Weekday::Saturday);
        assert_eq!(date(1900, 1, 1).weekday(), Weekday::Monday);
    }

    #[test]
    fn test_add_days_crosses_month_and_year() {
        assert_eq!(date(2024, 3, 31).add_days(39), date(2024, 5, 9));
        assert_eq!(date(2024, 3, 31).add_days(50), date(2024, 5, 20));
        assert_eq!(date(2023, 12, 31).add_days(1), date(2024, 1, 1));
        assert_eq!(date(2024, 2, 28).add_days(1), date(2024, 2, 29));
        assert_eq!(date(2024, 1, 1).add_days(-1), date(2023, 12, 31));
    }

    #[test]
    fn test_day_of_year() {
        assert_eq!(date(2024, 1, 1).day_of_year(), 1);
        assert_eq!(date(2024, 3, 1).day_of_year(), 61);
        assert_eq!(date(2023, 3, 1).day_of_year(), 60);
        assert_eq!(date(2024, 12, 31).day_of_year(), 366);
    }

    #[test]
    fn test_display_and_parse() {
        let d = date(2024, 5, 8);
        assert_eq!(d.to_string(), "2024-05-08");
        assert_eq!("2024-05-08".parse::<CalendarDate>().unwrap(), d);
        assert!("2024-02-30".parse::<CalendarDate>().is_err());
        assert!("not-a-date".parse::<CalendarDate>().is_err());
    }

    #[test]
    fn test_serde_uses_iso_string() {
        let d = date(2025, 4, 21);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "\"2025-04-21\"");
        let back: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }
}

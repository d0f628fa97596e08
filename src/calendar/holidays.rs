//! Public holiday rules.
//!
//! A [`HolidayRules`] value describes which dates are public holidays: fixed
//! month-day holidays that recur every year, and holidays defined as an offset
//! from Easter Sunday. The French rule set is built in; other rule sets can be
//! loaded from configuration.

use serde::{Deserialize, Serialize};

use super::date::CalendarDate;
use super::easter::easter_sunday;

/// A holiday that falls on the same month and day every year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedHoliday {
    /// Month (1..=12).
    pub month: u32,
    /// Day of month.
    pub day: u32,
    /// Display name.
    pub name: String,
}

/// A holiday defined relative to Easter Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EasterHoliday {
    /// Days after Easter Sunday (0 is Easter Sunday itself).
    pub offset: i64,
    /// Display name.
    pub name: String,
}

/// The set of holiday rules applied by the working-days calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRules {
    /// Holidays with a fixed month and day.
    pub fixed: Vec<FixedHoliday>,
    /// Holidays computed from the date of Easter.
    pub easter_offsets: Vec<EasterHoliday>,
}

impl HolidayRules {
    /// French public holidays: eight fixed dates plus Easter Sunday, Easter Monday,
    /// Ascension and Whit Monday.
    pub fn french() -> Self {
        let fixed = [
            (1, 1, "New Year's Day"),
            (5, 1, "Labour Day"),
            (5, 8, "Victory in Europe Day"),
            (7, 14, "Bastille Day"),
            (8, 15, "Assumption"),
            (11, 1, "All Saints' Day"),
            (11, 11, "Armistice Day"),
            (12, 25, "Christmas Day"),
        ]
        .into_iter()
        .map(|(month, day, name)| FixedHoliday {
            month,
            day,
            name: name.to_string(),
        })
        .collect();

        let easter_offsets = [
            (0, "Easter Sunday"),
            (1, "Easter Monday"),
            (39, "Ascension Day"),
            (50, "Whit Monday"),
        ]
        .into_iter()
        .map(|(offset, name)| EasterHoliday {
            offset,
            name: name.to_string(),
        })
        .collect();

        Self {
            fixed,
            easter_offsets,
        }
    }
}

impl Default for HolidayRules {
    fn default() -> Self {
        Self::french()
    }
}

/// A concrete holiday date within a year.
///
/// # Example
///
/// ```
/// use tjm_engine::calendar::{holidays_for_year, HolidayRules};
///
/// let holidays = holidays_for_year(2024, &HolidayRules::french());
/// let bastille = holidays.iter().find(|h| h.name == "Bastille Day").unwrap();
/// assert_eq!(bastille.date.to_string(), "2024-07-14");
/// assert!(bastille.on_weekend);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: CalendarDate,
    /// Display name.
    pub name: String,
    /// Whether the holiday falls on a Saturday or Sunday.
    pub on_weekend: bool,
}

/// Lists every holiday date of `year` under `rules`, sorted by date.
///
/// A date matched by more than one rule (e.g. Ascension on May 1st) is listed once,
/// under the name of the first matching rule. Easter-relative holidays that land
/// outside `year` are dropped. Fixed holidays that do not exist in `year`
/// (February 29th in a common year) are skipped.
pub fn holidays_for_year(year: i32, rules: &HolidayRules) -> Vec<Holiday> {
    let easter = easter_sunday(year);

    let fixed = rules
        .fixed
        .iter()
        .filter_map(|h| CalendarDate::new(year, h.month, h.day).map(|d| (d, &h.name)));
    let movable = rules
        .easter_offsets
        .iter()
        .map(|h| (easter.add_days(h.offset), &h.name))
        .filter(|(d, _)| d.year() == year);

    let mut holidays: Vec<Holiday> = Vec::new();
    for (date, name) in fixed.chain(movable) {
        if holidays.iter().any(|h| h.date == date) {
            continue;
        }
        holidays.push(Holiday {
            date,
            name: name.clone(),
            on_weekend: date.weekday().is_weekend(),
        });
    }
    holidays.sort_by_key(|h| h.date);
    holidays
}

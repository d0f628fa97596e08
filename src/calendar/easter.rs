//! Easter Sunday computation.

use super::date::CalendarDate;

/// Computes the date of Easter Sunday for a Gregorian year.
///
/// Uses the anonymous Gregorian algorithm published by Meeus, Jones and Butcher.
///
/// # Example
///
/// ```
/// use tjm_engine::calendar::{easter_sunday, CalendarDate};
///
/// assert_eq!(easter_sunday(2024), CalendarDate::new(2024, 3, 31).unwrap());
/// assert_eq!(easter_sunday(2025), CalendarDate::new(2025, 4, 20).unwrap());
/// ```
pub fn easter_sunday(year: i32) -> CalendarDate {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b.div_euclid(4);
    let e = b.rem_euclid(4);
    let f = (b + 8).div_euclid(25);
    let g = (b - f + 1).div_euclid(3);
    let h = (19 * a + b - d - g + 15).rem_euclid(30);
    let i = c.div_euclid(4);
    let k = c.rem_euclid(4);
    let l = (32 + 2 * e + 2 * i - h - k).rem_euclid(7);
    let m = (a + 11 * h + 22 * l).div_euclid(451);
    let n = h + l - 7 * m + 114;
    let month = n.div_euclid(31) as u32;
    let day = (n.rem_euclid(31) + 1) as u32;

    // Always between March 22 and April 25.
    CalendarDate::from_valid_parts(year, month, day)
}

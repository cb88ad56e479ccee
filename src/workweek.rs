use std::fmt;
use time::{Date, Month};

/// Number of work weeks after which the numbering starts over at 1
const WEEKS_PER_CYCLE: i64 = 52;

const DAYS_IN_WEEK: i64 = 7;

/// A work-week number in the range `1..=52`
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct WorkWeek(u8);

impl WorkWeek {
    pub(crate) fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for WorkWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("WW{}", self.0))
    }
}

/// Returns the work week of `current` when the week containing `start` is
/// counted as week 1.
///
/// Both dates are first moved back to the Monday of their week, so every day
/// of a Monday-to-Sunday week gets the same number.  Weeks are counted
/// cyclically: the 53rd week after `start` is week 1 again, and weeks before
/// `start` count backwards from 52.
pub(crate) fn work_week(current: Date, start: Date) -> WorkWeek {
    // Julian day numbers keep this total even for dates whose Monday would
    // fall before `Date::MIN`.
    let weeks = (monday_julian_day(current) - monday_julian_day(start)).div_euclid(DAYS_IN_WEEK);
    let n = weeks.rem_euclid(WEEKS_PER_CYCLE) + 1;
    WorkWeek(u8::try_from(n).expect("work week should be between 1 and 52"))
}

fn monday_julian_day(date: Date) -> i64 {
    i64::from(date.to_julian_day()) - i64::from(date.weekday().number_days_from_monday())
}

/// Which date's week counts as week 1 of a given year
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Anchor {
    /// The week containing January 1 of each year
    #[default]
    YearStart,
    /// The week containing this date, for every year
    Fixed(Date),
}

impl Anchor {
    pub(crate) fn start_for(self, year: i32) -> Date {
        match self {
            Anchor::YearStart => Date::from_calendar_date(year, Month::January, 1)
                .expect("January 1 should exist for every representable year"),
            Anchor::Fixed(date) => date,
        }
    }

    pub(crate) fn work_week(self, date: Date) -> WorkWeek {
        self.work_week_in(date, date.year())
    }

    /// Like `work_week()`, but numbered from the anchor of `year` rather than
    /// the year of `date`
    pub(crate) fn work_week_in(self, date: Date, year: i32) -> WorkWeek {
        work_week(date, self.start_for(year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::iter::successors;
    use time::{macros::date, Duration};

    const FIRST_MONDAY_2025: Date = date!(2024 - 12 - 30);

    #[test]
    fn test_first_weeks_of_2025() {
        for (d, ww) in [
            (date!(2024 - 12 - 30), 1),
            (date!(2025 - 01 - 01), 1),
            (date!(2025 - 01 - 03), 1),
            (date!(2025 - 01 - 05), 1),
            (date!(2025 - 01 - 06), 2),
            (date!(2025 - 01 - 10), 2),
            (date!(2025 - 03 - 14), 11),
        ] {
            assert_eq!(work_week(d, FIRST_MONDAY_2025).get(), ww, "{d}");
        }
    }

    #[test]
    fn test_wraps_after_52_weeks() {
        let week53 = FIRST_MONDAY_2025 + Duration::weeks(52);
        assert_eq!(work_week(week53, FIRST_MONDAY_2025).get(), 1);
        let week54 = FIRST_MONDAY_2025 + Duration::weeks(53);
        assert_eq!(work_week(week54, FIRST_MONDAY_2025).get(), 2);
        assert_eq!(work_week(date!(2025 - 12 - 31), FIRST_MONDAY_2025).get(), 1);
    }

    #[test]
    fn test_before_start_wraps_backwards() {
        let start = date!(2025 - 01 - 06);
        assert_eq!(work_week(date!(2025 - 01 - 05), start).get(), 52);
        assert_eq!(work_week(date!(2024 - 12 - 30), start).get(), 52);
        assert_eq!(work_week(date!(2024 - 12 - 29), start).get(), 51);
        assert_eq!(work_week(start - Duration::weeks(52), start).get(), 1);
    }

    #[test]
    fn test_start_is_week_one() {
        for start in [
            date!(2024 - 12 - 30),
            date!(2025 - 01 - 01),
            date!(2025 - 01 - 05),
            date!(1999 - 07 - 15),
        ] {
            assert_eq!(work_week(start, start).get(), 1, "{start}");
        }
    }

    #[test]
    fn test_same_week_same_number() {
        let start = date!(2023 - 02 - 17);
        let monday = date!(2031 - 09 - 01);
        let expected = work_week(monday, start);
        for d in successors(Some(monday), |d| d.next_day()).take(7) {
            assert_eq!(work_week(d, start), expected, "{d}");
        }
        let next_monday = monday + Duration::weeks(1);
        assert_ne!(work_week(next_monday, start), expected);
    }

    #[test]
    fn test_periodic() {
        let start = date!(2025 - 01 - 01);
        for d in [
            date!(1970 - 01 - 01),
            date!(2024 - 02 - 29),
            date!(2025 - 06 - 15),
            date!(2100 - 12 - 31),
        ] {
            assert_eq!(
                work_week(d + Duration::weeks(52), start),
                work_week(d, start),
                "{d}"
            );
        }
    }

    #[test]
    fn test_always_in_range() {
        let start = date!(2025 - 01 - 01);
        for d in [Date::MIN, Date::MAX, date!(0000 - 01 - 01), start] {
            let ww = work_week(d, start).get();
            assert!((1..=52).contains(&ww), "{d} gave {ww}");
            let ww = work_week(start, d).get();
            assert!((1..=52).contains(&ww), "{d} gave {ww}");
        }
        for d in successors(Some(date!(2024 - 11 - 01)), |d| d.next_day()).take(800) {
            let ww = work_week(d, start).get();
            assert!((1..=52).contains(&ww), "{d} gave {ww}");
        }
    }

    #[test]
    fn test_display() {
        let ww = work_week(date!(2025 - 03 - 14), FIRST_MONDAY_2025);
        assert_eq!(ww.to_string(), "WW11");
        assert_eq!(format!("{ww:<6}|"), "WW11  |");
    }

    #[test]
    fn test_year_start_anchor() {
        let anchor = Anchor::YearStart;
        assert_eq!(anchor.start_for(2025), date!(2025 - 01 - 01));
        assert_eq!(anchor.work_week(date!(2025 - 01 - 01)).get(), 1);
        assert_eq!(anchor.work_week(date!(2025 - 03 - 14)).get(), 11);
        assert_eq!(anchor.work_week(date!(2025 - 12 - 31)).get(), 1);
        // 2026-01-01 is a Thursday, so the Monday before it starts WW1.
        assert_eq!(anchor.work_week(date!(2026 - 01 - 01)).get(), 1);
        assert_eq!(
            anchor.work_week_in(date!(2025 - 12 - 29), 2026).get(),
            1
        );
        assert_eq!(anchor.work_week(date!(2025 - 12 - 28)).get(), 52);
    }

    #[test]
    fn test_fixed_anchor() {
        let anchor = Anchor::Fixed(date!(2025 - 04 - 01));
        assert_eq!(anchor.start_for(1990), date!(2025 - 04 - 01));
        assert_eq!(anchor.work_week(date!(2025 - 04 - 04)).get(), 1);
        assert_eq!(anchor.work_week(date!(2025 - 04 - 07)).get(), 2);
        assert_eq!(anchor.work_week(date!(2025 - 03 - 30)).get(), 52);
    }
}

use crate::workweek::{Anchor, WorkWeek};
use std::iter::successors;
use time::{Date, Month, Weekday};

pub(crate) const DAYS_IN_WEEK: usize = 7;

pub(crate) trait WeekdayExt {
    fn index0(&self) -> u16;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u16 {
        self.number_days_from_monday().into()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GridDay {
    pub(crate) date: Date,
    /// `false` for the days of the previous or next month that pad out the
    /// first and last rows
    pub(crate) in_month: bool,
}

impl GridDay {
    pub(crate) fn day(&self) -> u8 {
        self.date.day()
    }

    pub(crate) fn weekday(&self) -> Weekday {
        self.date.weekday()
    }
}

/// One Monday-to-Sunday row of a month grid
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
// Invariant: At least one element of `days` is Some, and at least one day is
// in the grid's month
pub(crate) struct GridWeek {
    days: [Option<GridDay>; DAYS_IN_WEEK],
    work_week: WorkWeek,
}

impl GridWeek {
    pub(crate) fn work_week(&self) -> WorkWeek {
        self.work_week
    }

    pub(crate) fn days(&self) -> impl Iterator<Item = GridDay> + '_ {
        self.days.iter().flatten().copied()
    }

    pub(crate) fn get(&self, wd: Weekday) -> Option<GridDay> {
        self.days.get(usize::from(wd.index0())).copied().flatten()
    }

    fn last(&self) -> Date {
        self.days()
            .last()
            .expect("GridWeek should contain at least one Some")
            .date
    }
}

/// The rows of one month, Monday first, each labelled with its work week
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthGrid {
    year: i32,
    month: Month,
    weeks: Vec<GridWeek>,
}

impl MonthGrid {
    /// Builds the grid of the month containing `date`.  Work weeks are
    /// numbered from the anchor of that month's year.
    pub(crate) fn new(date: Date, anchor: Anchor) -> MonthGrid {
        let (year, month) = (date.year(), date.month());
        let mut weeks = Vec::with_capacity(6);
        let mut cursor = Some(date.replace_day(1).unwrap_or(date));
        while let Some(d) = cursor {
            let Some(week) = make_week(d, year, month, anchor) else {
                break;
            };
            weeks.push(week);
            cursor = week.last().next_day();
        }
        MonthGrid { year, month, weeks }
    }

    pub(crate) fn year(&self) -> i32 {
        self.year
    }

    pub(crate) fn month(&self) -> Month {
        self.month
    }

    pub(crate) fn weeks(&self) -> &[GridWeek] {
        &self.weeks
    }
}

// Returns the row containing `date`, or `None` if none of its days belong to
// the given month
fn make_week(date: Date, year: i32, month: Month, anchor: Anchor) -> Option<GridWeek> {
    let mut days = [None; DAYS_IN_WEEK];
    let i = usize::from(date.weekday().index0());
    let before = iter_days_before(date).take(i);
    let after = iter_days_after(date).take(DAYS_IN_WEEK - i - 1);
    for d in before.chain(std::iter::once(date)).chain(after) {
        let slot = usize::from(d.weekday().index0());
        assert!(slot < DAYS_IN_WEEK, "weekday index should be below 7");
        days[slot] = Some(GridDay {
            date: d,
            in_month: d.year() == year && d.month() == month,
        });
    }
    let first_in_month = days.iter().flatten().find(|gd| gd.in_month)?;
    let work_week = anchor.work_week_in(first_in_month.date, year);
    Some(GridWeek { days, work_week })
}

fn iter_days_after(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day()).skip(1)
}

fn iter_days_before(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.previous_day()).skip(1)
}

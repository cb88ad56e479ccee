use crate::calendar::MonthGrid;
use crate::workweek::{Anchor, WorkWeek};
use std::fmt;
use time::{error::ComponentRange, Date, Month, Weekday};

static MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

static WORKDAYS: [Weekday; 5] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
];

static HEADER: &str = "WW   Mon Tue Wed Thu Fri";

/// Plain-text work-week calendar of the weekdays of one year
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct YearListing(Vec<MonthGrid>);

impl YearListing {
    pub(crate) fn new(year: i32, anchor: Anchor) -> Result<YearListing, ComponentRange> {
        MONTHS
            .iter()
            .map(|&month| {
                Date::from_calendar_date(year, month, 1).map(|d| MonthGrid::new(d, anchor))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(YearListing)
    }
}

impl fmt::Display for YearListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for grid in &self.0 {
            if !std::mem::replace(&mut first, false) {
                writeln!(f)?;
            }
            writeln!(f, "{} {}", grid.month(), grid.year())?;
            writeln!(f, "{HEADER}")?;
            for week in grid.weeks() {
                let days = WORKDAYS.map(|wd| week.get(wd).filter(|gd| gd.in_month));
                // Weeks whose only days in the month fall on a weekend
                if days.iter().all(Option::is_none) {
                    continue;
                }
                write!(f, "{:<4}", week.work_week())?;
                for gd in days {
                    match gd {
                        Some(gd) => write!(f, "{:>4}", gd.day())?,
                        None => write!(f, "    ")?,
                    }
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// One-line description of the work week a date falls in
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct WeekSummary {
    date: Date,
    work_week: WorkWeek,
}

impl WeekSummary {
    pub(crate) fn new(date: Date, anchor: Anchor) -> WeekSummary {
        WeekSummary {
            date,
            work_week: anchor.work_week(date),
        }
    }
}

impl fmt::Display for WeekSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): Work Week {} of {}",
            self.date,
            self.date.weekday(),
            self.work_week.get(),
            self.date.year()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::iter::successors;
    use time::macros::date;

    fn listing_2025() -> String {
        YearListing::new(2025, Anchor::YearStart)
            .map(|l| l.to_string())
            .unwrap_or_default()
    }

    #[test]
    fn test_january_2025() {
        let listing = listing_2025();
        let january = listing.split("\n\n").next().unwrap_or_default();
        assert_eq!(
            january,
            concat!(
                "January 2025\n",
                "WW   Mon Tue Wed Thu Fri\n",
                "WW1            1   2   3\n",
                "WW2    6   7   8   9  10\n",
                "WW3   13  14  15  16  17\n",
                "WW4   20  21  22  23  24\n",
                "WW5   27  28  29  30  31",
            )
        );
    }

    #[test]
    fn test_weekend_only_rows_skipped() {
        // March 2025 starts on a Saturday, so its first row has no weekdays
        let listing = listing_2025();
        let march = listing
            .split("\n\n")
            .find(|m| m.starts_with("March 2025"))
            .unwrap_or_default();
        let mut lines = march.lines().skip(2);
        assert_eq!(lines.next(), Some("WW10   3   4   5   6   7"));
        assert_eq!(lines.last(), Some("WW14  31                "));
    }

    #[test]
    fn test_whole_year() {
        let listing = listing_2025();
        assert_eq!(listing.split("\n\n").count(), 12);
        for month in MONTHS {
            assert!(listing.contains(&format!("{month} 2025\n")), "{month}");
        }
        assert!(!listing.contains("Sat"));
        assert!(!listing.contains("Sun"));
        for ww in 53..100 {
            assert!(!listing.contains(&format!("WW{ww}")), "WW{ww}");
        }
        let january = listing.split("\n\n").next().unwrap_or_default();
        assert_eq!(january.matches("WW1 ").count(), 1);
        // December 29-31 fall in the 53rd week, which wraps to 1
        assert!(listing.ends_with("WW1   29  30  31        \n"));
    }

    #[test]
    fn test_year_out_of_range() {
        assert!(YearListing::new(10000, Anchor::YearStart).is_err());
    }

    #[test]
    fn test_week_summary() {
        for (d, expected) in [
            (date!(2025 - 03 - 14), "2025-03-14 (Friday): Work Week 11 of 2025"),
            (date!(2025 - 01 - 01), "2025-01-01 (Wednesday): Work Week 1 of 2025"),
            (date!(2025 - 01 - 06), "2025-01-06 (Monday): Work Week 2 of 2025"),
            (date!(2025 - 12 - 31), "2025-12-31 (Wednesday): Work Week 1 of 2025"),
        ] {
            assert_eq!(WeekSummary::new(d, Anchor::YearStart).to_string(), expected);
        }
    }

    #[test]
    fn test_summary_agrees_with_listing() {
        let listing = listing_2025();
        for d in successors(Some(date!(2025 - 01 - 01)), |d| d.next_day())
            .take_while(|d| d.year() == 2025)
            .filter(|d| d.weekday().number_days_from_monday() < 5)
        {
            let ww = Anchor::YearStart.work_week(d).get();
            let summary = WeekSummary::new(d, Anchor::YearStart).to_string();
            assert!(summary.contains(&format!("Work Week {ww} ")), "{summary}");
            let month = listing
                .split("\n\n")
                .find(|m| m.starts_with(&format!("{} 2025", d.month())))
                .unwrap_or_default();
            let row = month
                .lines()
                .find(|line| {
                    line.starts_with("WW")
                        && line.split_whitespace().skip(1).any(|t| t == d.day().to_string())
                })
                .unwrap_or_default();
            assert!(row.starts_with(&format!("WW{ww} ")), "{d}: {row:?}");
        }
    }
}

use crate::workweek::Anchor;
use std::path::PathBuf;
use std::time::Duration;
use time::{format_description::FormatItem, macros::format_description, Date};

pub(crate) static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// How often the clock is re-read by default, matching the hourly refresh of
/// a desk calendar
pub(crate) const DEFAULT_REFRESH: Duration = Duration::from_secs(60 * 60);

/// Settings shared by all modes of the program
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Options {
    pub(crate) anchor: Anchor,
    pub(crate) refresh: Duration,
    pub(crate) log_file: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            anchor: Anchor::YearStart,
            refresh: DEFAULT_REFRESH,
            log_file: None,
        }
    }
}

pub(crate) fn parse_date(value: String) -> Result<Date, lexopt::Error> {
    Date::parse(&value, &YMD_FMT).map_err(|e| lexopt::Error::ParsingFailed {
        value,
        error: Box::new(e),
    })
}

pub(crate) fn parse_refresh(value: String) -> Result<Duration, lexopt::Error> {
    match value.parse::<u64>() {
        Ok(0) => Err(lexopt::Error::ParsingFailed {
            value,
            error: "refresh interval must be at least one second".into(),
        }),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(lexopt::Error::ParsingFailed {
            value,
            error: Box::new(e),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(String::from("2024-12-30")).ok(),
            Some(date!(2024 - 12 - 30))
        );
        assert!(parse_date(String::from("2024-02-30")).is_err());
        assert!(parse_date(String::from("30/12/2024")).is_err());
    }

    #[test]
    fn test_parse_refresh() {
        assert_eq!(
            parse_refresh(String::from("90")).ok(),
            Some(Duration::from_secs(90))
        );
        assert!(parse_refresh(String::from("0")).is_err());
        assert!(parse_refresh(String::from("-5")).is_err());
        assert!(parse_refresh(String::from("soon")).is_err());
    }
}

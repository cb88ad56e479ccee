mod app;
mod calendar;
mod clock;
mod config;
mod help;
mod jumpto;
mod listing;
mod logging;
mod theme;
mod workweek;
use crate::app::App;
use crate::calendar::NoteView;
use crate::clock::{Clock, LocalClock};
use crate::config::{parse_date, parse_refresh, Options};
use crate::listing::{WeekSummary, YearListing};
use crate::workweek::Anchor;
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use time::Date;

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        date: Option<Date>,
        options: Options,
    },
    Week {
        date: Option<Date>,
        options: Options,
    },
    Year {
        year: i32,
        options: Options,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut options = Options::default();
        let mut week = false;
        let mut year = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('a') | Arg::Long("anchor") => {
                    options.anchor = Anchor::Fixed(parse_date(parser.value()?.string()?)?);
                }
                Arg::Short('r') | Arg::Long("refresh") => {
                    options.refresh = parse_refresh(parser.value()?.string()?)?;
                }
                Arg::Long("log-file") => options.log_file = Some(parser.value()?.into()),
                Arg::Short('w') | Arg::Long("week") => week = true,
                Arg::Short('y') | Arg::Long("year") => year = Some(parser.value()?.parse()?),
                Arg::Value(value) if date.is_none() => {
                    date = Some(parse_date(value.string()?)?);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        match (week, year) {
            (true, Some(_)) => Err(lexopt::Error::from(
                "--week and --year cannot be used together",
            )),
            (true, None) => Ok(Command::Week { date, options }),
            (false, Some(year)) if date.is_none() => Ok(Command::Year { year, options }),
            (false, Some(_)) => Err(lexopt::Error::from("--year does not take a date")),
            (false, None) => Ok(Command::Run { date, options }),
        }
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run { date, options } => {
                if let Some(path) = &options.log_file {
                    logging::init(path)?;
                }
                let today = LocalClock
                    .today()
                    .context("failed to determine local date")?;
                tracing::info!(%today, anchor = ?options.anchor, "starting calendar");
                let mut view = NoteView::new(today, options.anchor);
                if let Some(date) = date {
                    view = view.start_month(date);
                }
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(view, LocalClock, options.refresh).run(&mut terminal)?;
                    Ok(())
                })
            }
            Command::Week { date, options } => {
                let date = date.map_or_else(
                    || {
                        LocalClock
                            .today()
                            .context("failed to determine local date")
                    },
                    Ok,
                )?;
                println!("{}", WeekSummary::new(date, options.anchor));
                Ok(())
            }
            Command::Year { year, options } => {
                let listing = YearListing::new(year, options.anchor)
                    .with_context(|| format!("cannot list year {year}"))?;
                print!("{listing}");
                Ok(())
            }
            Command::Help => {
                println!("Usage: wwcal [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Terminal sticky-note calendar labelled with work-week numbers");
                println!();
                println!("Options:");
                println!("  -a, --anchor DATE     Count work weeks from the week of DATE for every year");
                println!("  -r, --refresh SECS    Re-read the clock every SECS seconds (default 3600)");
                println!("      --log-file PATH   Write log output to PATH");
                println!("  -w, --week            Print the work week of today (or of the given date)");
                println!("  -y, --year YEAR       Print the Mon-Fri work-week calendar of YEAR");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = execute!(std::io::stdout(), EnableMouseCapture)
        .context("failed to enable mouse capture")
        .and_then(|()| func(terminal));
    let disabled = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();
    let r = r?;
    disabled.context("failed to disable mouse capture")?;
    Ok(r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;
    use time::macros::date;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_args(args.iter().copied()))
    }

    #[test]
    fn test_no_args() {
        assert_eq!(
            parse(&[]).ok(),
            Some(Command::Run {
                date: None,
                options: Options::default()
            })
        );
    }

    #[test]
    fn test_run_with_options() {
        assert_eq!(
            parse(&[
                "--anchor",
                "2024-12-30",
                "-r",
                "60",
                "--log-file",
                "wwcal.log",
                "2025-03-14"
            ])
            .ok(),
            Some(Command::Run {
                date: Some(date!(2025 - 03 - 14)),
                options: Options {
                    anchor: Anchor::Fixed(date!(2024 - 12 - 30)),
                    refresh: Duration::from_secs(60),
                    log_file: Some(PathBuf::from("wwcal.log")),
                }
            })
        );
    }

    #[test]
    fn test_week() {
        assert_eq!(
            parse(&["-w", "2025-03-14"]).ok(),
            Some(Command::Week {
                date: Some(date!(2025 - 03 - 14)),
                options: Options::default()
            })
        );
    }

    #[test]
    fn test_year() {
        assert_eq!(
            parse(&["--year", "2025"]).ok(),
            Some(Command::Year {
                year: 2025,
                options: Options::default()
            })
        );
        assert!(parse(&["--year", "2025", "2025-03-14"]).is_err());
        assert!(parse(&["--year", "2025", "--week"]).is_err());
        assert!(parse(&["--year", "twenty"]).is_err());
    }

    #[test]
    fn test_bad_args() {
        assert!(parse(&["2025-13-01"]).is_err());
        assert!(parse(&["2025-01-01", "2025-01-02"]).is_err());
        assert!(parse(&["--refresh", "0"]).is_err());
        assert!(parse(&["--frobnicate"]).is_err());
    }

    #[test]
    fn test_help_wins() {
        assert_eq!(parse(&["2025-01-01", "-h"]).ok(), Some(Command::Help));
        assert_eq!(parse(&["-V"]).ok(), Some(Command::Version));
    }
}

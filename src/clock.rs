use time::{error::IndeterminateOffset, Date, OffsetDateTime};

/// Source of the current date
pub(crate) trait Clock {
    fn today(&self) -> Result<Date, IndeterminateOffset>;
}

/// The system clock in the local time zone
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> Result<Date, IndeterminateOffset> {
        Ok(OffsetDateTime::now_local()?.date())
    }
}

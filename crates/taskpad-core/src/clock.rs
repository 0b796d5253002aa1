use chrono::{DateTime, Local};

pub const HEADER_DATE_FORMAT: &str = "%A, %B %d, %Y";

pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

#[must_use]
pub fn header_date(clock: &dyn Clock) -> String {
    clock.now().format(HEADER_DATE_FORMAT).to_string()
}

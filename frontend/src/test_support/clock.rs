use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

/// Clock pinned to local noon of a fixed day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Local>,
}

impl FixedClock {
    /// Clock whose local date is `today`.
    pub fn on(today: NaiveDate) -> Self {
        let noon = match today.and_hms_opt(12, 0, 0) {
            Some(noon) => noon,
            None => panic!("noon exists on every day"),
        };
        let now = match Local.from_local_datetime(&noon).earliest() {
            Some(now) => now,
            None => panic!("local noon is ambiguous or missing on {today}"),
        };
        Self { now }
    }

    /// Clock on the given calendar day.
    pub fn ymd(year: i32, month: u32, day: u32) -> Self {
        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(today) => Self::on(today),
            None => panic!("invalid fixture date {year}-{month}-{day}"),
        }
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.now
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now.with_timezone(&Utc)
    }
}

use super::{CalendarArithmetic, UnresolvableDate, YearMonth};
use time::{error::IndeterminateOffset, util::days_in_month, Date, OffsetDateTime, UtcOffset};

/// The proleptic Gregorian calendar as implemented by the `time` crate,
/// evaluated at a fixed UTC offset
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Gregorian {
    offset: UtcOffset,
    clock: Clock,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Clock {
    System,
    Pinned(Date),
    Unavailable,
}

impl Gregorian {
    pub const fn new(offset: UtcOffset) -> Gregorian {
        Gregorian {
            offset,
            clock: Clock::System,
        }
    }

    pub const fn utc() -> Gregorian {
        Gregorian::new(UtcOffset::UTC)
    }

    /// Use the system's current local UTC offset as the reference timezone.
    ///
    /// This fails when the offset cannot be determined soundly, e.g. in a
    /// multithreaded process on some Unix platforms.
    pub fn local() -> Result<Gregorian, IndeterminateOffset> {
        UtcOffset::current_local_offset().map(Gregorian::new)
    }

    /// Report `today` as the current date instead of consulting the system
    /// clock
    pub const fn pinned(mut self, today: Date) -> Gregorian {
        self.clock = Clock::Pinned(today);
        self
    }

    /// Behave as though the current date cannot be determined
    pub const fn without_today(mut self) -> Gregorian {
        self.clock = Clock::Unavailable;
        self
    }

    pub const fn offset(&self) -> UtcOffset {
        self.offset
    }
}

impl Default for Gregorian {
    fn default() -> Gregorian {
        Gregorian::utc()
    }
}

impl CalendarArithmetic for Gregorian {
    fn today(&self) -> Option<Date> {
        match self.clock {
            Clock::System => self.date_of(OffsetDateTime::now_utc()),
            Clock::Pinned(date) => Some(date),
            Clock::Unavailable => None,
        }
    }

    fn day_count(&self, ym: YearMonth) -> Result<u8, UnresolvableDate> {
        Date::from_calendar_date(ym.year(), ym.month(), 1)
            .map_err(|_| UnresolvableDate::Month(ym))?;
        Ok(days_in_month(ym.month(), ym.year()))
    }

    fn resolve(&self, ym: YearMonth, day: u8) -> Result<Date, UnresolvableDate> {
        Date::from_calendar_date(ym.year(), ym.month(), day)
            .map_err(|_| UnresolvableDate::Day { month: ym, day })
    }

    fn date_of(&self, moment: OffsetDateTime) -> Option<Date> {
        moment.checked_to_offset(self.offset).map(OffsetDateTime::date)
    }
}

mod gregorian;
pub use self::gregorian::Gregorian;
use std::fmt;
use thiserror::Error;
use time::{Date, Month, OffsetDateTime, Weekday};

pub(crate) const DAYS_IN_WEEK: usize = 7;

/// Date arithmetic that the month pages are generated against.
///
/// All answers are given in a single reference timezone chosen by the
/// implementation, so that "today" and the calendar date of a record's
/// timestamp are unambiguous.
pub trait CalendarArithmetic {
    /// Today's date, or `None` if the current date cannot be determined
    fn today(&self) -> Option<Date>;

    /// Number of days in the given month
    fn day_count(&self, ym: YearMonth) -> Result<u8, UnresolvableDate>;

    fn resolve(&self, ym: YearMonth, day: u8) -> Result<Date, UnresolvableDate>;

    fn weekday_of(&self, date: Date) -> Weekday {
        date.weekday()
    }

    /// The calendar date on which `moment` falls in the reference timezone
    fn date_of(&self, moment: OffsetDateTime) -> Option<Date>;

    fn is_same_day(&self, a: Date, b: Date) -> bool {
        a == b
    }
}

impl<T: CalendarArithmetic + ?Sized> CalendarArithmetic for &T {
    fn today(&self) -> Option<Date> {
        (**self).today()
    }

    fn day_count(&self, ym: YearMonth) -> Result<u8, UnresolvableDate> {
        (**self).day_count(ym)
    }

    fn resolve(&self, ym: YearMonth, day: u8) -> Result<Date, UnresolvableDate> {
        (**self).resolve(ym, day)
    }

    fn weekday_of(&self, date: Date) -> Weekday {
        (**self).weekday_of(date)
    }

    fn date_of(&self, moment: OffsetDateTime) -> Option<Date> {
        (**self).date_of(moment)
    }

    fn is_same_day(&self, a: Date, b: Date) -> bool {
        (**self).is_same_day(a, b)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct YearMonth {
    year: i32,
    month: Month,
}

impl YearMonth {
    pub const fn new(year: i32, month: Month) -> YearMonth {
        YearMonth { year, month }
    }

    pub fn from_date(date: Date) -> YearMonth {
        YearMonth::new(date.year(), date.month())
    }

    pub const fn year(self) -> i32 {
        self.year
    }

    pub const fn month(self) -> Month {
        self.month
    }

    /// The following month, rolling December over into January of the next
    /// year
    pub fn next(self) -> YearMonth {
        match self.month {
            Month::December => YearMonth::new(self.year.saturating_add(1), Month::January),
            m => YearMonth::new(self.year, m.next()),
        }
    }

    /// The preceding month, rolling January back into December of the
    /// previous year
    pub fn previous(self) -> YearMonth {
        match self.month {
            Month::January => YearMonth::new(self.year.saturating_sub(1), Month::December),
            m => YearMonth::new(self.year, m.previous()),
        }
    }

    pub fn label(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year = self.year;
        let month = u8::from(self.month);
        write!(f, "{year:04}-{month:02}")
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum UnresolvableDate {
    #[error("{0} is outside the supported calendar range")]
    Month(YearMonth),
    #[error("{month} has no day {day}")]
    Day { month: YearMonth, day: u8 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month::*;

    #[test]
    fn test_next_wraps_year() {
        assert_eq!(
            YearMonth::new(2023, December).next(),
            YearMonth::new(2024, January)
        );
        assert_eq!(
            YearMonth::new(2024, January).next(),
            YearMonth::new(2024, February)
        );
    }

    #[test]
    fn test_previous_wraps_year() {
        assert_eq!(
            YearMonth::new(2024, January).previous(),
            YearMonth::new(2023, December)
        );
        assert_eq!(
            YearMonth::new(2024, March).previous(),
            YearMonth::new(2024, February)
        );
    }

    #[test]
    fn test_label() {
        assert_eq!(YearMonth::new(2024, January).label(), "2024-01");
        assert_eq!(YearMonth::new(987, November).label(), "0987-11");
    }

    #[test]
    fn test_error_messages() {
        let ym = YearMonth::new(2024, February);
        assert_eq!(
            UnresolvableDate::Day { month: ym, day: 30 }.to_string(),
            "2024-02 has no day 30"
        );
        assert_eq!(
            UnresolvableDate::Month(YearMonth::new(10000, May)).to_string(),
            "10000-05 is outside the supported calendar range"
        );
    }
}

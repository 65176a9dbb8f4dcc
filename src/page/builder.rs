use super::{DayCell, MonthPage};
use crate::calendar::{CalendarArithmetic, YearMonth, DAYS_IN_WEEK};
use crate::record::{DatedRecord, RecordStore};
use crate::week_order::WeekOrder;
use std::sync::Arc;
use time::{Date, Weekday};

/// Number of weeks in a grid when not otherwise configured, and the fewest a
/// grid may have
pub const DEFAULT_GRID_WEEKS: usize = 6;

/// Builds [`MonthPage`]s against a calendar
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PageFactory<C> {
    calendar: C,
    match_record_year: bool,
    grid_len: usize,
}

impl<C: CalendarArithmetic> PageFactory<C> {
    pub fn new(calendar: C) -> Self {
        PageFactory {
            calendar,
            match_record_year: true,
            grid_len: DEFAULT_GRID_WEEKS * DAYS_IN_WEEK,
        }
    }

    /// If `false`, records attach to their month and day in every year
    /// instead of only in the year they are dated
    pub fn with_match_record_year(mut self, flag: bool) -> Self {
        self.match_record_year = flag;
        self
    }

    /// Pad every page to at least `weeks` full weeks.  Values below
    /// [`DEFAULT_GRID_WEEKS`] are raised to it.
    pub fn with_grid_weeks(mut self, weeks: usize) -> Self {
        self.grid_len = weeks.max(DEFAULT_GRID_WEEKS).saturating_mul(DAYS_IN_WEEK);
        self
    }

    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    /// Build the page for `ym`, padded so that its first day falls under
    /// `first_weekday`'s column, with the matching `records` attached to each
    /// day.
    ///
    /// If the calendar cannot resolve the month or one of its days, the
    /// returned page has no cells.
    pub fn build_month<R: DatedRecord>(
        &self,
        ym: YearMonth,
        first_weekday: Weekday,
        order: &WeekOrder,
        records: &RecordStore<R>,
    ) -> MonthPage<R> {
        let day_count = match self.calendar.day_count(ym) {
            Ok(n) => n,
            Err(e) => {
                log::debug!("Producing empty page: {e}");
                return MonthPage::empty(ym);
            }
        };
        let today = self.calendar.today();
        let candidates = self.records_in_month(ym, records);
        let mut cells = Vec::with_capacity(self.grid_len.max(usize::from(day_count)));
        for day in 1..=day_count {
            let date = match self.calendar.resolve(ym, day) {
                Ok(date) => date,
                Err(e) => {
                    log::debug!("Producing empty page: {e}");
                    return MonthPage::empty(ym);
                }
            };
            let weekday = self.calendar.weekday_of(date);
            let is_today = today.is_some_and(|t| self.calendar.is_same_day(date, t));
            let attached = candidates
                .iter()
                .filter(|(d, _)| d.day() == day)
                .map(|(_, r)| Arc::clone(r))
                .collect();
            cells.push(DayCell::day(date, weekday, attached, is_today));
        }
        let Some(opening) = cells.first().and_then(DayCell::weekday) else {
            return MonthPage::empty(ym);
        };

        // This is the absolute difference of the two positions rather than
        // the distance going forwards around the week.  The two agree
        // whenever `order` starts with `first_weekday`, which is how
        // `MonthWindow` always calls this.
        let lead = order
            .position(opening)
            .unwrap_or(0)
            .abs_diff(order.position(first_weekday).unwrap_or(0));
        cells.splice(0..0, std::iter::repeat_with(DayCell::blank).take(lead));

        let trail = (DAYS_IN_WEEK - cells.len() % DAYS_IN_WEEK) % DAYS_IN_WEEK;
        cells.extend(std::iter::repeat_with(DayCell::blank).take(trail));
        if cells.len() < self.grid_len {
            let fill = self.grid_len - cells.len();
            cells.extend(std::iter::repeat_with(DayCell::blank).take(fill));
        }
        log::trace!(
            "Built page {ym}: {lead} leading blanks, {day_count} days, {} cells",
            cells.len()
        );
        MonthPage::new(ym, cells)
    }

    // Records falling in `ym` (in any year, unless matching on year), paired
    // with the date each one falls on
    fn records_in_month<'a, R: DatedRecord>(
        &self,
        ym: YearMonth,
        records: &'a RecordStore<R>,
    ) -> Vec<(Date, &'a Arc<R>)> {
        records
            .iter()
            .filter_map(|r| self.calendar.date_of(r.date()).map(|d| (d, r)))
            .filter(|(d, _)| {
                d.month() == ym.month() && (!self.match_record_year || d.year() == ym.year())
            })
            .collect()
    }
}

mod builder;
pub use self::builder::{PageFactory, DEFAULT_GRID_WEEKS};
use crate::calendar::{YearMonth, DAYS_IN_WEEK};
use std::sync::Arc;
use time::{Date, Month, Weekday};
use uuid::Uuid;

/// The year, month, and day reported by a blank cell
pub const BLANK_COMPONENT: i32 = -1;

/// One position in a month grid: either a real day of the month or blank
/// padding before/after it.
#[derive(Debug)]
pub struct DayCell<R> {
    id: Uuid,
    // None for blank cells
    day: Option<CalendarDay<R>>,
}

#[derive(Debug)]
struct CalendarDay<R> {
    date: Date,
    weekday: Weekday,
    holiday_name: String,
    records: Vec<Arc<R>>,
    is_today: bool,
}

impl<R> DayCell<R> {
    pub(crate) fn blank() -> DayCell<R> {
        DayCell {
            id: Uuid::new_v4(),
            day: None,
        }
    }

    pub(crate) fn day(date: Date, weekday: Weekday, records: Vec<Arc<R>>, is_today: bool) -> Self {
        DayCell {
            id: Uuid::new_v4(),
            day: Some(CalendarDay {
                date,
                weekday,
                holiday_name: String::new(),
                records,
                is_today,
            }),
        }
    }

    /// Label the cell as a holiday.  Blank cells are returned unchanged.
    pub fn with_holiday_name<S: Into<String>>(mut self, name: S) -> DayCell<R> {
        if let Some(day) = self.day.as_mut() {
            day.holiday_name = name.into();
        }
        self
    }

    /// Synthetic identifier, unique per generated cell.  Regenerating a page
    /// yields new identifiers.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_blank(&self) -> bool {
        self.day.is_none()
    }

    pub fn year(&self) -> i32 {
        self.day
            .as_ref()
            .map_or(BLANK_COMPONENT, |d| d.date.year())
    }

    pub fn month(&self) -> i32 {
        self.day
            .as_ref()
            .map_or(BLANK_COMPONENT, |d| i32::from(u8::from(d.date.month())))
    }

    pub fn day_of_month(&self) -> i32 {
        self.day
            .as_ref()
            .map_or(BLANK_COMPONENT, |d| i32::from(d.date.day()))
    }

    pub fn date(&self) -> Option<Date> {
        self.day.as_ref().map(|d| d.date)
    }

    pub fn weekday(&self) -> Option<Weekday> {
        self.day.as_ref().map(|d| d.weekday)
    }

    /// Empty unless an external source has marked the day as a holiday
    pub fn holiday_name(&self) -> &str {
        self.day.as_ref().map_or("", |d| d.holiday_name.as_str())
    }

    pub fn is_holiday(&self) -> bool {
        !self.holiday_name().is_empty()
    }

    pub fn records(&self) -> &[Arc<R>] {
        self.day
            .as_ref()
            .map(|d| d.records.as_slice())
            .unwrap_or_default()
    }

    pub fn is_today(&self) -> bool {
        self.day.as_ref().is_some_and(|d| d.is_today)
    }
}

impl<R> PartialEq for DayCell<R> {
    // Records are compared by count only, and ids are ignored.
    fn eq(&self, other: &DayCell<R>) -> bool {
        self.year() == other.year()
            && self.month() == other.month()
            && self.day_of_month() == other.day_of_month()
            && self.is_today() == other.is_today()
            && self.holiday_name() == other.holiday_name()
            && self.records().len() == other.records().len()
    }
}

impl<R> Eq for DayCell<R> {}

/// The padded grid of day cells for one calendar month
#[derive(Debug)]
pub struct MonthPage<R> {
    year_month: YearMonth,
    cells: Vec<DayCell<R>>,
}

impl<R> MonthPage<R> {
    pub(crate) fn new(year_month: YearMonth, cells: Vec<DayCell<R>>) -> MonthPage<R> {
        MonthPage { year_month, cells }
    }

    /// A page for a month that could not be resolved.  It has no cells at
    /// all.
    pub(crate) fn empty(year_month: YearMonth) -> MonthPage<R> {
        MonthPage::new(year_month, Vec::new())
    }

    pub fn year_month(&self) -> YearMonth {
        self.year_month
    }

    pub fn year(&self) -> i32 {
        self.year_month.year()
    }

    pub fn month(&self) -> Month {
        self.year_month.month()
    }

    /// `YYYY-MM`
    pub fn label(&self) -> String {
        self.year_month.label()
    }

    pub fn cells(&self) -> &[DayCell<R>] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&DayCell<R>> {
        self.cells.get(index)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The grid's rows, seven cells each
    pub fn weeks(&self) -> std::slice::ChunksExact<'_, DayCell<R>> {
        self.cells.chunks_exact(DAYS_IN_WEEK)
    }

    /// The non-blank cells, in day order
    pub fn days(&self) -> impl Iterator<Item = &DayCell<R>> + '_ {
        self.cells.iter().filter(|c| !c.is_blank())
    }

    pub fn day(&self, day: u8) -> Option<&DayCell<R>> {
        self.days().find(|c| c.day_of_month() == i32::from(day))
    }

    pub fn leading_blanks(&self) -> usize {
        self.cells.iter().take_while(|c| c.is_blank()).count()
    }

    /// Consume the page and return one whose days are labelled with the
    /// holiday names produced by `lookup`
    pub fn with_holidays<F>(self, mut lookup: F) -> MonthPage<R>
    where
        F: FnMut(Date) -> Option<String>,
    {
        let cells = self
            .cells
            .into_iter()
            .map(|cell| match cell.date().and_then(&mut lookup) {
                Some(name) => cell.with_holiday_name(name),
                None => cell,
            })
            .collect();
        MonthPage::new(self.year_month, cells)
    }
}

impl<R> PartialEq for MonthPage<R> {
    fn eq(&self, other: &MonthPage<R>) -> bool {
        self.year_month == other.year_month && self.cells == other.cells
    }
}

impl<R> Eq for MonthPage<R> {}

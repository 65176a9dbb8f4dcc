use crate::calendar::YearMonth;
use crate::page::DEFAULT_GRID_WEEKS;
use time::{Month, Weekday};

/// Settings fixed for the lifetime of a [`MonthWindow`](crate::MonthWindow)
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct WindowConfig {
    radius: usize,
    capacity: usize,
    grid_weeks: usize,
    match_record_year: bool,
}

impl WindowConfig {
    /// Month shown when the current date is unknown and no other start is
    /// given
    pub const DEFAULT_START: YearMonth = YearMonth::new(2023, Month::January);

    pub const DEFAULT_FIRST_WEEKDAY: Weekday = Weekday::Sunday;

    /// Months kept on either side of the centre month when the window is
    /// (re)built
    pub const DEFAULT_RADIUS: usize = 2;

    /// Most months resident at once
    pub const DEFAULT_CAPACITY: usize = 5;

    pub const fn new() -> WindowConfig {
        WindowConfig {
            radius: WindowConfig::DEFAULT_RADIUS,
            capacity: WindowConfig::DEFAULT_CAPACITY,
            grid_weeks: DEFAULT_GRID_WEEKS,
            match_record_year: true,
        }
    }

    pub const fn with_radius(mut self, radius: usize) -> WindowConfig {
        self.radius = radius;
        self
    }

    pub const fn with_capacity(mut self, capacity: usize) -> WindowConfig {
        self.capacity = capacity;
        self
    }

    pub const fn with_grid_weeks(mut self, weeks: usize) -> WindowConfig {
        self.grid_weeks = weeks;
        self
    }

    /// Whether a record must fall in a page's year to be attached.  When
    /// `false`, records recur yearly on their month and day.
    pub const fn with_match_record_year(mut self, flag: bool) -> WindowConfig {
        self.match_record_year = flag;
        self
    }

    pub const fn radius(&self) -> usize {
        self.radius
    }

    /// Number of months built by a full window setup: the centre month plus
    /// `radius` on each side
    pub const fn span(&self) -> usize {
        self.radius.saturating_mul(2).saturating_add(1)
    }

    /// The most months kept resident.  Never less than [`span`](Self::span).
    pub const fn capacity(&self) -> usize {
        let span = self.span();
        if self.capacity < span {
            span
        } else {
            self.capacity
        }
    }

    /// Weeks in every month grid.  Never less than [`DEFAULT_GRID_WEEKS`].
    pub const fn grid_weeks(&self) -> usize {
        if self.grid_weeks < DEFAULT_GRID_WEEKS {
            DEFAULT_GRID_WEEKS
        } else {
            self.grid_weeks
        }
    }

    pub const fn match_record_year(&self) -> bool {
        self.match_record_year
    }
}

impl Default for WindowConfig {
    fn default() -> WindowConfig {
        WindowConfig::new()
    }
}

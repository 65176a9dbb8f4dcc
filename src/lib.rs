//! A sliding window of month grids.
//!
//! A [`MonthWindow`] keeps a small, bounded run of consecutive
//! [`MonthPage`]s resident and tracks which one is on display.  Paging past
//! either end of the run builds the next month and evicts one from the far
//! end, so a consumer can scroll indefinitely while only a handful of grids
//! exist at once.  Dated records supplied by the caller are attached to the
//! day cells they fall on.
mod calendar;
mod config;
mod page;
mod published;
mod record;
mod week_order;
mod window;
pub use crate::calendar::{CalendarArithmetic, Gregorian, UnresolvableDate, YearMonth};
pub use crate::config::WindowConfig;
pub use crate::page::{DayCell, MonthPage, PageFactory, BLANK_COMPONENT, DEFAULT_GRID_WEEKS};
pub use crate::record::{DatedRecord, RecordStore};
pub use crate::week_order::WeekOrder;
pub use crate::window::MonthWindow;

use crate::calendar::{CalendarArithmetic, YearMonth};
use crate::config::WindowConfig;
use crate::page::{MonthPage, PageFactory};
use crate::published::Published;
use crate::record::{DatedRecord, RecordStore};
use crate::week_order::WeekOrder;
use std::iter::successors;
use time::Weekday;

/// A bounded run of consecutive month pages, one of which is on display.
///
/// Every mutating method leaves the pages contiguous and in ascending order,
/// keeps the displayed index in bounds whenever there are pages, and then
/// publishes whatever changed to subscribers.
#[derive(Debug)]
pub struct MonthWindow<C, R> {
    factory: PageFactory<C>,
    config: WindowConfig,
    records: RecordStore<R>,
    pages: Published<Vec<MonthPage<R>>>,
    displayed: Published<usize>,
    week_order: Published<WeekOrder>,
}

impl<C: CalendarArithmetic, R: DatedRecord> MonthWindow<C, R> {
    pub fn new(calendar: C) -> Self {
        MonthWindow::with_config(calendar, WindowConfig::new())
    }

    pub fn with_config(calendar: C, config: WindowConfig) -> Self {
        let factory = PageFactory::new(calendar)
            .with_match_record_year(config.match_record_year())
            .with_grid_weeks(config.grid_weeks());
        MonthWindow {
            factory,
            config,
            records: RecordStore::default(),
            pages: Published::new(Vec::new()),
            displayed: Published::new(0),
            week_order: Published::new(WeekOrder::default()),
        }
    }

    /// Load `records`, lay weeks out starting on `first_weekday`, and fill the
    /// window around the current month, or around `start` if the current date
    /// is unknown
    pub fn initialize<I>(&mut self, start: YearMonth, first_weekday: Weekday, records: I)
    where
        I: IntoIterator<Item = R>,
    {
        self.records = RecordStore::new(records);
        self.set_first_weekday(first_weekday);
        let center = self
            .factory
            .calendar()
            .today()
            .map_or(start, YearMonth::from_date);
        self.setup_window(center);
    }

    pub fn initialize_default<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = R>,
    {
        self.initialize(
            WindowConfig::DEFAULT_START,
            WindowConfig::DEFAULT_FIRST_WEEKDAY,
            records,
        );
    }

    /// Build just the current month's page, for display before the window
    /// has been set up.  This does not modify the window.
    pub fn fetch_initial_page(&self) -> Vec<MonthPage<R>> {
        let ym = self
            .factory
            .calendar()
            .today()
            .map_or(WindowConfig::DEFAULT_START, YearMonth::from_date);
        vec![self.build(ym)]
    }

    /// Replace the resident pages with `2 * radius + 1` consecutive months
    /// centred on `center`, and display `center`
    pub fn setup_window(&mut self, center: YearMonth) {
        let first = successors(Some(center), |ym| Some(ym.previous()))
            .nth(self.config.radius())
            .unwrap_or(center);
        let pages = successors(Some(first), |ym| Some(ym.next()))
            .take(self.config.span())
            .map(|ym| self.build(ym))
            .collect::<Vec<_>>();
        let index = pages
            .iter()
            .position(|p| p.year_month() == center)
            .unwrap_or(0);
        log::debug!(
            "Window set up around {center}: {} months starting at {first}",
            pages.len()
        );
        self.pages.replace(pages);
        self.displayed.replace(index);
        self.publish();
    }

    /// Show the next month.
    ///
    /// When the displayed page is the last or next-to-last resident page, the
    /// window is extended by one month instead and the index is left alone.
    /// If that extension evicts the oldest page, the unchanged index then
    /// refers to the following month; if it does not (the window is still
    /// under capacity), the displayed month stays the same until the next
    /// call.
    pub fn page_forward(&mut self) {
        let len = self.pages.get().len();
        if len == 0 {
            return;
        }
        let index = *self.displayed.get();
        if index + 2 >= len {
            self.extend_forward();
        } else {
            self.displayed.replace(index + 1);
            self.publish();
        }
    }

    /// Show the previous month.
    ///
    /// When the displayed page is the first or second resident page, the
    /// window is extended backwards by one month instead and the index is
    /// left alone, so that it now refers to the month before.
    pub fn page_backward(&mut self) {
        if self.pages.get().is_empty() {
            return;
        }
        let index = *self.displayed.get();
        if index <= 1 {
            self.extend_backward();
        } else {
            self.displayed.replace(index - 1);
            self.publish();
        }
    }

    /// Append the month after the last resident page, evicting the first
    /// page if the window is over capacity
    pub fn extend_forward(&mut self) {
        let Some(last) = self.pages.get().last().map(MonthPage::year_month) else {
            return;
        };
        let page = self.build(last.next());
        let capacity = self.config.capacity();
        let evicted = self.pages.modify(|pages| {
            pages.push(page);
            (pages.len() > capacity).then(|| pages.remove(0).year_month())
        });
        match evicted {
            Some(ym) => log::debug!("Extended window to {}, evicting {ym}", last.next()),
            None => log::debug!("Extended window to {}", last.next()),
        }
        self.publish();
    }

    /// Prepend the month before the first resident page, evicting the last
    /// page if the window is over capacity
    pub fn extend_backward(&mut self) {
        let Some(first) = self.pages.get().first().map(MonthPage::year_month) else {
            return;
        };
        let page = self.build(first.previous());
        let capacity = self.config.capacity();
        let evicted = self.pages.modify(|pages| {
            pages.insert(0, page);
            if pages.len() > capacity {
                pages.pop().as_ref().map(MonthPage::year_month)
            } else {
                None
            }
        });
        match evicted {
            Some(ym) => log::debug!("Extended window to {}, evicting {ym}", first.previous()),
            None => log::debug!("Extended window to {}", first.previous()),
        }
        self.publish();
    }

    /// Lay weeks out starting on `wd` and regenerate every resident page to
    /// match.  Returns the new week order.
    pub fn set_first_weekday(&mut self, wd: Weekday) -> WeekOrder {
        let order = self.week_order.get().rotate_to_front(wd);
        self.week_order.replace(order);
        let pages = self.rebuild_resident();
        log::debug!("Weeks now start on {wd}; rebuilt {} months", pages.len());
        self.pages.replace(pages);
        self.publish();
        order
    }

    /// Display the current month, rebuilding the window around it if it is
    /// not resident.  Does nothing if the current month is already displayed
    /// or the current date is unknown.
    pub fn jump_to_today(&mut self) {
        let Some(today) = self.factory.calendar().today() else {
            return;
        };
        let ym = YearMonth::from_date(today);
        if self.displayed_page().map(MonthPage::year_month) == Some(ym) {
            return;
        }
        if let Some(index) = self.pages.get().iter().position(|p| p.year_month() == ym) {
            self.displayed.replace(index);
            self.publish();
        } else {
            log::debug!("{ym} is not resident; recentering window");
            self.setup_window(ym);
        }
    }

    /// Swap in a new set of records and regenerate every resident page with
    /// them
    pub fn replace_records<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = R>,
    {
        self.records = RecordStore::new(records);
        let pages = self.rebuild_resident();
        self.pages.replace(pages);
        self.publish();
    }

    pub fn pages(&self) -> &[MonthPage<R>] {
        self.pages.get()
    }

    pub fn page(&self, index: usize) -> Option<&MonthPage<R>> {
        self.pages.get().get(index)
    }

    pub fn displayed_index(&self) -> usize {
        *self.displayed.get()
    }

    pub fn displayed_page(&self) -> Option<&MonthPage<R>> {
        self.page(self.displayed_index())
    }

    pub fn week_order(&self) -> WeekOrder {
        *self.week_order.get()
    }

    pub fn config(&self) -> WindowConfig {
        self.config
    }

    pub fn calendar(&self) -> &C {
        self.factory.calendar()
    }

    pub fn records(&self) -> &RecordStore<R> {
        &self.records
    }

    /// Call `callback` with the resident pages now and after every change
    pub fn subscribe_pages<F>(&mut self, mut callback: F)
    where
        F: FnMut(&[MonthPage<R>]) + Send + 'static,
        R: 'static,
    {
        self.pages
            .subscribe(move |pages: &Vec<MonthPage<R>>| callback(pages));
    }

    /// Call `callback` with the displayed index now and after every change
    pub fn subscribe_displayed_index<F>(&mut self, callback: F)
    where
        F: FnMut(&usize) + Send + 'static,
    {
        self.displayed.subscribe(callback);
    }

    /// Call `callback` with the week order now and after every change
    pub fn subscribe_week_order<F>(&mut self, callback: F)
    where
        F: FnMut(&WeekOrder) + Send + 'static,
    {
        self.week_order.subscribe(callback);
    }

    fn build(&self, ym: YearMonth) -> MonthPage<R> {
        let order = self.week_order.get();
        self.factory.build_month(ym, order.first(), order, &self.records)
    }

    fn rebuild_resident(&self) -> Vec<MonthPage<R>> {
        self.pages
            .get()
            .iter()
            .map(|p| self.build(p.year_month()))
            .collect()
    }

    // Subscribers are only notified once every value has been updated
    fn publish(&mut self) {
        self.pages.flush();
        self.displayed.flush();
        self.week_order.flush();
    }
}

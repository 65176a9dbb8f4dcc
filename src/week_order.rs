use crate::calendar::DAYS_IN_WEEK;
use time::Weekday::{self, *};

/// The order in which the days of the week are laid out across a grid row.
/// The first element is the weekday shown in the leftmost column.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct WeekOrder([Weekday; DAYS_IN_WEEK]);

impl WeekOrder {
    pub const SUNDAY_FIRST: WeekOrder = WeekOrder([
        Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday,
    ]);

    pub const fn first(&self) -> Weekday {
        self.0[0]
    }

    pub fn position(&self, wd: Weekday) -> Option<usize> {
        self.0.iter().position(|&d| d == wd)
    }

    /// Return a new order that starts at `wd` and otherwise keeps the days in
    /// the same cyclic order.  If `wd` does not occur, the order is returned
    /// unchanged.
    pub fn rotate_to_front(&self, wd: Weekday) -> WeekOrder {
        let Some(i) = self.position(wd) else {
            return *self;
        };
        let mut days = self.0;
        days.rotate_left(i);
        WeekOrder(days)
    }

    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, Weekday>> {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[Weekday] {
        &self.0
    }
}

impl Default for WeekOrder {
    fn default() -> WeekOrder {
        WeekOrder::SUNDAY_FIRST
    }
}

impl IntoIterator for WeekOrder {
    type Item = Weekday;
    type IntoIter = std::array::IntoIter<Weekday, DAYS_IN_WEEK>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a WeekOrder {
    type Item = Weekday;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Weekday>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_sunday_first() {
        let order = WeekOrder::default();
        assert_eq!(order.first(), Sunday);
        assert_eq!(order.position(Saturday), Some(6));
    }

    #[test]
    fn test_rotate_to_front() {
        let order = WeekOrder::default().rotate_to_front(Wednesday);
        assert_eq!(
            order.as_slice(),
            [Wednesday, Thursday, Friday, Saturday, Sunday, Monday, Tuesday]
        );
    }

    #[test]
    fn test_rotate_to_front_already_first() {
        assert_eq!(
            WeekOrder::default().rotate_to_front(Sunday),
            WeekOrder::default()
        );
    }

    #[test]
    fn test_rotate_rotated_order() {
        let order = WeekOrder::default()
            .rotate_to_front(Friday)
            .rotate_to_front(Monday);
        assert_eq!(
            order.iter().collect::<Vec<_>>(),
            [Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday]
        );
    }

    #[test]
    fn test_rotate_missing_weekday_is_noop() {
        let order = WeekOrder([Monday; DAYS_IN_WEEK]);
        assert_eq!(order.rotate_to_front(Sunday), order);
    }
}

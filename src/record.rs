use std::sync::Arc;
use time::OffsetDateTime;

/// Anything that can be pinned to a day of the calendar.
///
/// The calendar never looks at a record beyond this one accessor; the calendar
/// date is derived from the timestamp in the calendar's reference timezone.
pub trait DatedRecord {
    fn date(&self) -> OffsetDateTime;
}

impl DatedRecord for OffsetDateTime {
    fn date(&self) -> OffsetDateTime {
        *self
    }
}

impl<T: DatedRecord + ?Sized> DatedRecord for &T {
    fn date(&self) -> OffsetDateTime {
        (**self).date()
    }
}

impl<T: DatedRecord + ?Sized> DatedRecord for Arc<T> {
    fn date(&self) -> OffsetDateTime {
        (**self).date()
    }
}

/// The caller's collection of records.  Records are shared with (never copied
/// into or mutated by) the day cells they are attached to.
#[derive(Debug)]
pub struct RecordStore<R> {
    records: Vec<Arc<R>>,
}

impl<R> RecordStore<R> {
    pub fn new<I>(records: I) -> RecordStore<R>
    where
        I: IntoIterator<Item = R>,
    {
        RecordStore {
            records: records.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<R>> {
        self.records.iter()
    }
}

impl<R> Clone for RecordStore<R> {
    fn clone(&self) -> RecordStore<R> {
        RecordStore {
            records: self.records.clone(),
        }
    }
}

impl<R> Default for RecordStore<R> {
    fn default() -> RecordStore<R> {
        RecordStore {
            records: Vec::new(),
        }
    }
}

impl<R> FromIterator<R> for RecordStore<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> RecordStore<R> {
        RecordStore::new(iter)
    }
}

impl<'a, R> IntoIterator for &'a RecordStore<R> {
    type Item = &'a Arc<R>;
    type IntoIter = std::slice::Iter<'a, Arc<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

use std::fmt;

type Subscriber<T> = Box<dyn FnMut(&T) + Send>;

/// A value whose changes are pushed to subscribers.
///
/// New subscribers are immediately called with the current value.  Changes
/// are staged with [`Published::replace`] and only delivered on
/// [`Published::flush`], so that an owner can update several values before
/// any subscriber sees any of them.
pub(crate) struct Published<T> {
    value: T,
    staged: bool,
    subscribers: Vec<Subscriber<T>>,
}

impl<T> Published<T> {
    pub(crate) fn new(value: T) -> Self {
        Published {
            value,
            staged: false,
            subscribers: Vec::new(),
        }
    }

    pub(crate) fn get(&self) -> &T {
        &self.value
    }

    pub(crate) fn subscribe<F>(&mut self, mut callback: F)
    where
        F: FnMut(&T) + Send + 'static,
    {
        callback(&self.value);
        self.subscribers.push(Box::new(callback));
    }

    pub(crate) fn replace(&mut self, value: T) -> T {
        self.staged = true;
        std::mem::replace(&mut self.value, value)
    }

    pub(crate) fn modify<F, U>(&mut self, func: F) -> U
    where
        F: FnOnce(&mut T) -> U,
    {
        self.staged = true;
        func(&mut self.value)
    }

    pub(crate) fn flush(&mut self) {
        if std::mem::take(&mut self.staged) {
            for callback in &mut self.subscribers {
                callback(&self.value);
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Published<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Published")
            .field("value", &self.value)
            .field("staged", &self.staged)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

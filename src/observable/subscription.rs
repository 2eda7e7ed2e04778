use std::fmt;

use crate::observable::observer::Observer;

/// Handle returned by [`Observable::subscribe`](crate::observable::Observable::subscribe).
///
/// Dropping the handle leaves the subscription running; call
/// [`unsubscribe`](Subscription::unsubscribe) to cancel it.
pub struct Subscription<T, E> {
    observer: Observer<T, E>,
}

impl<T, E> Subscription<T, E> {
    pub(crate) fn new(observer: Observer<T, E>) -> Self {
        Self { observer }
    }

    pub fn unsubscribe(&self) {
        self.observer.unsubscribe();
    }

    /// Whether the underlying observer has terminated, by any trigger.
    pub fn is_closed(&self) -> bool {
        self.observer.is_unsubscribed()
    }
}

impl<T, E> fmt::Debug for Subscription<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("closed", &self.is_closed())
            .finish()
    }
}

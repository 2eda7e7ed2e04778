use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::observable::observer::Observer;

pub type NextFn<T> = Arc<dyn Fn(&T) + Send + Sync + 'static>;
pub type ErrorFn<E> = Arc<dyn Fn(&E) + Send + Sync + 'static>;
pub type CompleteFn = Arc<dyn Fn() + Send + Sync + 'static>;

/// Cleanup handed back by a producer; runs at most once.
pub type Teardown = Box<dyn FnOnce() + Send + 'static>;

/// Subscribe-time side effect of an observable. Receives the live observer and
/// returns the teardown for that subscription.
pub type Producer<T, E> = Arc<dyn Fn(&Observer<T, E>) -> Teardown + Send + Sync + 'static>;

/// Teardown that does nothing.
pub fn noop_teardown() -> Teardown {
    Box::new(|| {})
}

/// Optional callbacks for the three event kinds. A missing callback means the
/// event kind is ignored. Error payloads are `std::error::Error` values.
pub struct HandlerSet<T, E> {
    pub next: Option<NextFn<T>>,
    pub error: Option<ErrorFn<E>>,
    pub complete: Option<CompleteFn>,
}

impl<T, E> HandlerSet<T, E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_next<F>(mut self, callback: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.next = Some(Arc::new(callback));
        self
    }

    pub fn with_error<F>(mut self, callback: F) -> Self
    where
        E: Error,
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.error = Some(Arc::new(callback));
        self
    }

    pub fn with_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.complete = Some(Arc::new(callback));
        self
    }
}

impl<T, E> Default for HandlerSet<T, E> {
    fn default() -> Self {
        Self {
            next: None,
            error: None,
            complete: None,
        }
    }
}

impl<T, E> Clone for HandlerSet<T, E> {
    fn clone(&self) -> Self {
        Self {
            next: self.next.clone(),
            error: self.error.clone(),
            complete: self.complete.clone(),
        }
    }
}

impl<T, E> fmt::Debug for HandlerSet<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerSet")
            .field("next", &self.next.is_some())
            .field("error", &self.error.is_some())
            .field("complete", &self.complete.is_some())
            .finish()
    }
}

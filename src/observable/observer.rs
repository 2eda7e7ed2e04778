//! Per-subscription dispatcher.
//!
//! An [`Observer`] moves from active to terminated exactly once, through
//! `error`, `complete` or `unsubscribe`. After that no handler runs again and the
//! teardown supplied by the producer has run at most once. Handlers and
//! teardowns are always invoked with no lock held, so they may call back into
//! the observer.

use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::observable::config::LateTeardown;
use crate::observable::logger::LOGGER;
use crate::observable::types::{HandlerSet, Teardown};

enum TeardownSlot {
    Unset,
    Armed(Teardown),
    Spent,
}

struct ObserverInner<T, E> {
    handlers: HandlerSet<T, E>,
    unsubscribed: AtomicBool,
    terminal_claimed: AtomicBool,
    teardown: Mutex<TeardownSlot>,
}

/// Live end of a subscription, handed to the producer.
///
/// Clones share state, so a producer may keep one to emit after `subscribe`
/// has returned.
pub struct Observer<T, E> {
    inner: Arc<ObserverInner<T, E>>,
}

impl<T, E> Clone for Observer<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, E> Observer<T, E> {
    pub(crate) fn new(handlers: HandlerSet<T, E>) -> Self {
        Self {
            inner: Arc::new(ObserverInner {
                handlers,
                unsubscribed: AtomicBool::new(false),
                terminal_claimed: AtomicBool::new(false),
                teardown: Mutex::new(TeardownSlot::Unset),
            }),
        }
    }

    pub fn is_unsubscribed(&self) -> bool {
        self.inner.unsubscribed.load(Ordering::SeqCst)
    }

    /// Delivers `value` to the next handler while the observer is active.
    ///
    /// Values emitted from inside a terminal handler are dropped as well.
    pub fn next(&self, value: &T) {
        if self.is_unsubscribed() || self.inner.terminal_claimed.load(Ordering::SeqCst) {
            return;
        }
        if let Some(next) = &self.inner.handlers.next {
            next(value);
        }
    }

    /// Signals normal termination, then unsubscribes. Ignored once terminated.
    pub fn complete(&self) {
        if !self.claim_terminal("complete") {
            return;
        }
        if let Some(on_complete) = &self.inner.handlers.complete {
            on_complete();
        }
        self.unsubscribe();
    }

    /// Stops all further dispatch and runs the teardown if one is pending.
    ///
    /// The flag is raised before the teardown runs, so emissions from inside the
    /// teardown are dropped. Safe to call any number of times.
    pub fn unsubscribe(&self) {
        if !self.inner.unsubscribed.swap(true, Ordering::SeqCst) {
            LOGGER.debug("observer unsubscribed");
        }
        if let Some(teardown) = self.take_armed_teardown() {
            teardown();
        }
    }

    /// Stores the producer's teardown. Only the first assignment counts.
    ///
    /// When the producer already terminated this observer, `policy` decides
    /// whether the teardown waits for an explicit `unsubscribe()` or runs now.
    pub(crate) fn set_teardown(&self, teardown: Teardown, policy: LateTeardown) {
        let run_now = {
            let mut slot = self.lock_teardown();
            if !matches!(*slot, TeardownSlot::Unset) {
                LOGGER.warn("teardown already assigned; ignoring the replacement");
                return;
            }
            if self.is_unsubscribed() && policy == LateTeardown::RunImmediately {
                *slot = TeardownSlot::Spent;
                Some(teardown)
            } else {
                *slot = TeardownSlot::Armed(teardown);
                None
            }
        };
        if let Some(teardown) = run_now {
            teardown();
        }
    }

    // The first terminal event wins even if its handler re-enters.
    fn claim_terminal(&self, kind: &str) -> bool {
        let claimed = !self.is_unsubscribed()
            && self
                .inner
                .terminal_claimed
                .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok();
        if !claimed {
            LOGGER.debug(format!("dropped {kind} event on a terminated observer"));
        }
        claimed
    }

    fn take_armed_teardown(&self) -> Option<Teardown> {
        let mut slot = self.lock_teardown();
        match std::mem::replace(&mut *slot, TeardownSlot::Spent) {
            TeardownSlot::Armed(teardown) => Some(teardown),
            previous => {
                *slot = previous;
                None
            }
        }
    }

    fn lock_teardown(&self) -> MutexGuard<'_, TeardownSlot> {
        self.inner
            .teardown
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

impl<T, E> Observer<T, E>
where
    E: Error,
{
    /// Delivers the terminal error, then unsubscribes. Ignored once terminated.
    pub fn error(&self, error: E) {
        if !self.claim_terminal("error") {
            return;
        }
        if let Some(on_error) = &self.inner.handlers.error {
            on_error(&error);
        }
        self.unsubscribe();
    }
}

impl<T, E> fmt::Debug for Observer<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field("handlers", &self.inner.handlers)
            .field("is_unsubscribed", &self.is_unsubscribed())
            .finish()
    }
}

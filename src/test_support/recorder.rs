use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::observable::{HandlerSet, Teardown};

/// One callback invocation seen by a [`Recorder`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event<T, E> {
    Next(T),
    Error(E),
    Complete,
}

/// Captures every handler invocation, in order, for later assertions.
pub struct Recorder<T, E> {
    events: Arc<Mutex<Vec<Event<T, E>>>>,
}

impl<T, E> Recorder<T, E>
where
    T: Clone + Send + 'static,
    E: Error + Clone + Send + 'static,
{
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A handler set with all three callbacks feeding this recorder.
    pub fn handlers(&self) -> HandlerSet<T, E> {
        let on_next = Arc::clone(&self.events);
        let on_error = Arc::clone(&self.events);
        let on_complete = Arc::clone(&self.events);
        HandlerSet::new()
            .with_next(move |value: &T| on_next.lock().unwrap().push(Event::Next(value.clone())))
            .with_error(move |error: &E| {
                on_error.lock().unwrap().push(Event::Error(error.clone()))
            })
            .with_complete(move || on_complete.lock().unwrap().push(Event::Complete))
    }

    pub fn events(&self) -> Vec<Event<T, E>> {
        self.events.lock().unwrap().clone()
    }

    pub fn values(&self) -> Vec<T> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                Event::Next(value) => Some(value.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn completions(&self) -> usize {
        self.count(|event| matches!(event, Event::Complete))
    }

    pub fn errors(&self) -> usize {
        self.count(|event| matches!(event, Event::Error(_)))
    }

    pub fn terminal_count(&self) -> usize {
        self.completions() + self.errors()
    }

    fn count(&self, predicate: impl Fn(&Event<T, E>) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| predicate(e)).count()
    }
}

/// Hands out teardowns that bump a shared counter.
#[derive(Clone, Default)]
pub struct TeardownCounter {
    count: Arc<AtomicUsize>,
}

impl TeardownCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn teardown(&self) -> Teardown {
        let count = Arc::clone(&self.count);
        Box::new(move || {
            count.fetch_add(1, Ordering::SeqCst);
        })
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

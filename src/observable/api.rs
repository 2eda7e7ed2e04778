use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::observable::config::ObservableConfig;
use crate::observable::error::ObservableError;
use crate::observable::logger::LOGGER;
use crate::observable::observer::Observer;
use crate::observable::subscription::Subscription;
use crate::observable::types::{HandlerSet, Producer, Teardown};

/// A reusable, cold source of values.
///
/// Each call to [`subscribe`](Observable::subscribe) runs the producer again
/// against a fresh [`Observer`]; nothing is shared between subscriptions except
/// what the producer closure itself captures.
pub struct Observable<T, E = ObservableError> {
    producer: Producer<T, E>,
    config: ObservableConfig,
}

impl<T, E> Clone for Observable<T, E> {
    fn clone(&self) -> Self {
        Self {
            producer: Arc::clone(&self.producer),
            config: self.config,
        }
    }
}

impl<T, E> Observable<T, E>
where
    T: 'static,
    E: Error + 'static,
{
    pub fn new<F>(producer: F) -> Self
    where
        F: Fn(&Observer<T, E>) -> Teardown + Send + Sync + 'static,
    {
        Self {
            producer: Arc::new(producer),
            config: ObservableConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ObservableConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> ObservableConfig {
        self.config
    }

    /// Runs the producer synchronously against a new observer built from
    /// `handlers`.
    ///
    /// The producer's teardown is attached only after the producer returns. If
    /// the producer completed or errored in the meantime, the configured
    /// [`LateTeardown`](crate::observable::LateTeardown) policy decides when
    /// that teardown runs.
    pub fn subscribe(&self, handlers: HandlerSet<T, E>) -> Subscription<T, E> {
        let observer = Observer::new(handlers);
        let teardown = (self.producer)(&observer);
        observer.set_teardown(teardown, self.config.late_teardown);
        Subscription::new(observer)
    }
}

impl<T, E> Observable<T, E>
where
    T: Send + Sync + 'static,
    E: Error + 'static,
{
    /// Emits every element of `values` in order, then completes.
    ///
    /// The values are stored once and shared by all subscriptions. The
    /// teardown logs `unsubscribed` at info level.
    #[allow(clippy::should_implement_trait)]
    pub fn from<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let values: Arc<[T]> = values.into_iter().collect();
        Self::new(move |observer| {
            for value in values.iter() {
                observer.next(value);
            }
            observer.complete();
            let teardown: Teardown = Box::new(|| LOGGER.info("unsubscribed"));
            teardown
        })
    }
}

impl<T, E> fmt::Debug for Observable<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::{set_user_log_handler_fn, LogLevel, LogRecord, TEST_GUARD};
    use crate::observable::config::LateTeardown;
    use crate::observable::error::{internal_error, producer_failed};
    use crate::observable::types::noop_teardown;
    use crate::test_support::{sample_requests, Event, Method, Recorder, Request, TeardownCounter};
    use std::sync::{LazyLock, Mutex, MutexGuard};

    fn logging_guard() -> MutexGuard<'static, ()> {
        TEST_GUARD.lock().unwrap_or_else(|poison| poison.into_inner())
    }

    #[test]
    fn from_emits_in_order_then_completes() {
        let source: Observable<&'static str> = Observable::from(["v1", "v2", "v3"]);
        let recorder = Recorder::new();
        source.subscribe(recorder.handlers());

        assert_eq!(
            recorder.events(),
            vec![
                Event::Next("v1"),
                Event::Next("v2"),
                Event::Next("v3"),
                Event::Complete,
            ]
        );
        assert_eq!(recorder.errors(), 0);
    }

    #[test]
    fn from_requests_pushes_every_request_before_completion() {
        let requests: Observable<Request> = Observable::from(sample_requests());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let completions = Arc::new(Mutex::new(Vec::new()));

        let handlers = HandlerSet::new()
            .with_next({
                let seen = Arc::clone(&seen);
                move |request: &Request| seen.lock().unwrap().push(request.clone())
            })
            .with_complete({
                let seen = Arc::clone(&seen);
                let completions = Arc::clone(&completions);
                move || completions.lock().unwrap().push(seen.lock().unwrap().len())
            });
        let subscription = requests.subscribe(handlers);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.as_slice(), sample_requests().as_slice());
        assert_eq!(seen[0].method, Method::Post);
        assert_eq!(seen[1].id.as_deref(), Some("3f5h67s4s"));
        assert_eq!(completions.lock().unwrap().as_slice(), &[2]);
        assert!(subscription.is_closed());
    }

    #[test]
    fn empty_handler_set_is_accepted() {
        let _guard = logging_guard();
        let source: Observable<u8> = Observable::from([1]);
        let subscription = source.subscribe(HandlerSet::new());
        assert!(subscription.is_closed());
        subscription.unsubscribe();
    }

    #[test]
    fn unsubscribe_before_deferred_emission_suppresses_everything() {
        let pending: Arc<Mutex<Option<Observer<u32, ObservableError>>>> =
            Arc::new(Mutex::new(None));
        let counter = TeardownCounter::new();
        let source = Observable::new({
            let pending = Arc::clone(&pending);
            let counter = counter.clone();
            move |observer: &Observer<u32, ObservableError>| {
                *pending.lock().unwrap() = Some(observer.clone());
                counter.teardown()
            }
        });

        let recorder = Recorder::new();
        let subscription = source.subscribe(recorder.handlers());
        subscription.unsubscribe();

        let observer = pending.lock().unwrap().take().unwrap();
        observer.next(&1);
        observer.complete();

        assert!(recorder.events().is_empty());
        assert_eq!(counter.count(), 1);
        subscription.unsubscribe();
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn second_error_from_producer_is_dropped() {
        let err1 = producer_failed("err1");
        let source = Observable::new({
            let err1 = err1.clone();
            move |observer: &Observer<u32, ObservableError>| {
                observer.error(err1.clone());
                observer.error(producer_failed("err2"));
                noop_teardown()
            }
        });

        let errors = Arc::new(Mutex::new(Vec::new()));
        let handlers = HandlerSet::new().with_error({
            let errors = Arc::clone(&errors);
            move |error: &ObservableError| errors.lock().unwrap().push(error.clone())
        });
        source.subscribe(handlers);

        assert_eq!(errors.lock().unwrap().as_slice(), &[err1]);
    }

    #[test]
    fn each_subscription_runs_the_producer_independently() {
        let runs = Arc::new(Mutex::new(0u32));
        let source = Observable::new({
            let runs = Arc::clone(&runs);
            move |observer: &Observer<u32, ObservableError>| {
                let mut runs = runs.lock().unwrap();
                *runs += 1;
                observer.next(&runs);
                noop_teardown()
            }
        });

        let first = Recorder::new();
        let second = Recorder::new();
        let first_subscription = source.subscribe(first.handlers());
        first_subscription.unsubscribe();
        let second_subscription = source.clone().subscribe(second.handlers());

        assert_eq!(first.values(), vec![1]);
        assert_eq!(second.values(), vec![2]);
        assert!(first_subscription.is_closed());
        assert!(!second_subscription.is_closed());
    }

    #[test]
    fn synchronous_completion_defers_teardown_by_default() {
        let counter = TeardownCounter::new();
        let source = Observable::new({
            let counter = counter.clone();
            move |observer: &Observer<u32, ObservableError>| {
                observer.complete();
                counter.teardown()
            }
        });
        assert_eq!(source.config().late_teardown, LateTeardown::Deferred);

        let subscription = source.subscribe(Recorder::new().handlers());
        assert!(subscription.is_closed());
        assert_eq!(counter.count(), 0);

        subscription.unsubscribe();
        subscription.unsubscribe();
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn synchronous_error_runs_teardown_at_once_when_configured() {
        let counter = TeardownCounter::new();
        let source = Observable::new({
            let counter = counter.clone();
            move |observer: &Observer<u32, ObservableError>| {
                observer.error(internal_error("boom"));
                counter.teardown()
            }
        })
        .with_config(ObservableConfig::new().with_late_teardown(LateTeardown::RunImmediately));

        let recorder = Recorder::new();
        let subscription = source.subscribe(recorder.handlers());
        assert_eq!(counter.count(), 1);
        assert_eq!(recorder.errors(), 1);

        subscription.unsubscribe();
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn from_teardown_logs_on_explicit_unsubscribe() {
        let _guard = logging_guard();
        LazyLock::force(&LOGGER);
        let captured = Arc::new(Mutex::new(Vec::new()));
        set_user_log_handler_fn(
            Some({
                let captured = Arc::clone(&captured);
                move |record: LogRecord| {
                    if record.logger_name == LOGGER.name() && record.message == "unsubscribed" {
                        captured.lock().unwrap().push(record.level);
                    }
                }
            }),
            Some(LogLevel::Debug),
        );

        let source: Observable<u8> = Observable::from([1, 2]);
        let subscription = source.subscribe(HandlerSet::new());
        assert!(captured.lock().unwrap().is_empty());

        subscription.unsubscribe();
        subscription.unsubscribe();
        assert_eq!(captured.lock().unwrap().as_slice(), &[LogLevel::Info]);

        set_user_log_handler_fn(None::<fn(LogRecord)>, None);
    }
}

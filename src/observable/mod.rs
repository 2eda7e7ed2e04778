//! # Observable module
//!
//! A minimal push-based stream primitive: an [`Observable`] runs a producer
//! synchronously against a per-subscription [`Observer`], which forwards values
//! to the caller's [`HandlerSet`] until the first terminal event or an explicit
//! [`Subscription::unsubscribe`].
//!
//! ## Guarantees
//!
//! - Values reach the handlers in exactly the order the producer emits them.
//! - At most one of the error and complete handlers runs, at most once.
//! - After termination no handler runs again.
//! - The producer's teardown runs at most once.
//!
//! There is no scheduling, no backpressure, no multicast and no operator
//! algebra. Every `subscribe` call is an independent, cold run of the producer.
//!
//! ## Late teardowns
//!
//! A producer hands back its teardown only when it returns. If it already
//! completed or errored the observer by then, the teardown is, by default, kept
//! until the caller calls `unsubscribe()` ([`LateTeardown::Deferred`]). Use
//! [`ObservableConfig::with_late_teardown`] with [`LateTeardown::RunImmediately`]
//! to run it straight away instead.
//!
//! ## Example Usage
//!
//! ```rust
//! use push_observable::observable::{HandlerSet, Observable};
//! use std::sync::{Arc, Mutex};
//!
//! let requests: Observable<&str> = Observable::from(["POST /user", "GET /user/3f5h67s4s"]);
//!
//! let handled = Arc::new(Mutex::new(Vec::new()));
//! let handlers = HandlerSet::new()
//!     .with_next({
//!         let handled = Arc::clone(&handled);
//!         move |request: &&str| handled.lock().unwrap().push(request.to_string())
//!     })
//!     .with_complete(|| println!("complete"));
//!
//! let subscription = requests.subscribe(handlers);
//! subscription.unsubscribe();
//!
//! assert_eq!(handled.lock().unwrap().len(), 2);
//! ```

mod api;
mod config;
mod error;
mod logger;
mod observer;
mod subscription;
mod types;

pub use api::Observable;
pub use config::{LateTeardown, ObservableConfig, LATE_TEARDOWN_ENV};
pub use error::{
    internal_error, invalid_argument, producer_failed, ObservableError, ObservableErrorCode,
    ObservableResult,
};
pub use observer::Observer;
pub use subscription::Subscription;
pub use types::{noop_teardown, CompleteFn, ErrorFn, HandlerSet, NextFn, Producer, Teardown};

//! Test utilities shared across crate-level unit tests.

pub mod recorder;
pub mod requests;

pub use recorder::{Event, Recorder, TeardownCounter};
pub use requests::{sample_requests, Method, Request};

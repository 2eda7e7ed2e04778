#![doc = include_str!("../README.md")]

pub mod logger;
pub mod observable;

pub use observable::{HandlerSet, Observable, Observer, Subscription};

#[cfg(test)]
pub(crate) mod test_support;

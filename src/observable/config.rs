use std::fmt;
use std::str::FromStr;

use crate::observable::error::{invalid_argument, ObservableError, ObservableResult};

/// Environment variable read by [`ObservableConfig::from_env`].
pub const LATE_TEARDOWN_ENV: &str = "PUSH_OBSERVABLE_LATE_TEARDOWN";

/// What happens to a teardown returned by a producer that already completed or
/// errored its observer before returning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LateTeardown {
    /// Keep the teardown; it runs once on the next explicit `unsubscribe()`.
    #[default]
    Deferred,
    /// Run the teardown as soon as it is handed back by the producer.
    RunImmediately,
}

impl LateTeardown {
    pub fn as_str(self) -> &'static str {
        match self {
            LateTeardown::Deferred => "deferred",
            LateTeardown::RunImmediately => "immediate",
        }
    }
}

impl fmt::Display for LateTeardown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LateTeardown {
    type Err = ObservableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deferred" | "defer" => Ok(LateTeardown::Deferred),
            "immediate" | "run-immediately" => Ok(LateTeardown::RunImmediately),
            other => Err(invalid_argument(format!(
                "unknown late teardown policy \"{other}\" (expected \"deferred\" or \"immediate\")"
            ))),
        }
    }
}

/// Options applied to every subscription of an observable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ObservableConfig {
    pub late_teardown: LateTeardown,
}

impl ObservableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_late_teardown(mut self, policy: LateTeardown) -> Self {
        self.late_teardown = policy;
        self
    }

    /// Builds a config from [`LATE_TEARDOWN_ENV`], keeping defaults for unset variables.
    pub fn from_env() -> ObservableResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> ObservableResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(LATE_TEARDOWN_ENV) {
            config.late_teardown = raw.parse()?;
        }
        Ok(config)
    }
}

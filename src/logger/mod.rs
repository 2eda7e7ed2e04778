//! Named loggers with a process-wide level and an optional user callback.
//!
//! Every component owns a [`Logger`] (usually a `LazyLock` static). Records below
//! the logger's level are dropped by the default handler; the rest are printed
//! with an RFC 3339 timestamp. Applications can observe every record through
//! [`set_user_log_handler_fn`].

use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, LazyLock, Mutex, RwLock, Weak};

static GLOBAL_LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);
static INSTANCES: LazyLock<Mutex<Vec<Weak<LoggerInner>>>> =
    LazyLock::new(|| Mutex::new(Vec::new()));

type SharedLogHandler = Arc<dyn Fn(&Logger, LogLevel, &[LogArgument]) + Send + Sync + 'static>;

#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

impl Logger {
    pub fn new(name: impl Into<String>) -> Self {
        let inner = Arc::new(LoggerInner::new(name.into()));
        INSTANCES
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .push(Arc::downgrade(&inner));
        Self { inner }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn log_level(&self) -> LogLevel {
        LogLevel::from_u8(self.inner.log_level.load(Ordering::SeqCst))
    }

    pub fn set_log_level<L>(&self, level: L) -> Result<(), LogError>
    where
        L: IntoLogLevel,
    {
        let level = level.into_log_level()?;
        self.inner.log_level.store(level as u8, Ordering::SeqCst);
        Ok(())
    }

    /// Replaces the handler that formats and prints records for this logger.
    pub fn set_log_handler<F>(&self, handler: F)
    where
        F: Fn(&Logger, LogLevel, &[LogArgument]) + Send + Sync + 'static,
    {
        *self
            .inner
            .log_handler
            .write()
            .unwrap_or_else(|poison| poison.into_inner()) = Arc::new(handler);
    }

    pub fn reset_log_handler(&self) {
        *self
            .inner
            .log_handler
            .write()
            .unwrap_or_else(|poison| poison.into_inner()) = default_log_handler_arc();
    }

    pub fn has_user_log_handler(&self) -> bool {
        self.user_log_handler().is_some()
    }

    pub fn debug(&self, arg: impl IntoLogArgument) {
        self.dispatch(LogLevel::Debug, vec![arg.into_log_argument()]);
    }

    pub fn info(&self, arg: impl IntoLogArgument) {
        self.dispatch(LogLevel::Info, vec![arg.into_log_argument()]);
    }

    pub fn info_with<I, T>(&self, args: I)
    where
        I: IntoIterator<Item = T>,
        T: IntoLogArgument,
    {
        let arguments = args
            .into_iter()
            .map(IntoLogArgument::into_log_argument)
            .collect();
        self.dispatch(LogLevel::Info, arguments);
    }

    pub fn warn(&self, arg: impl IntoLogArgument) {
        self.dispatch(LogLevel::Warn, vec![arg.into_log_argument()]);
    }

    pub fn error(&self, arg: impl IntoLogArgument) {
        self.dispatch(LogLevel::Error, vec![arg.into_log_argument()]);
    }

    fn log_handler(&self) -> SharedLogHandler {
        self.inner
            .log_handler
            .read()
            .unwrap_or_else(|poison| poison.into_inner())
            .clone()
    }

    fn user_log_handler(&self) -> Option<SharedLogHandler> {
        self.inner
            .user_log_handler
            .read()
            .unwrap_or_else(|poison| poison.into_inner())
            .clone()
    }

    fn set_user_log_handler(&self, handler: Option<SharedLogHandler>) {
        *self
            .inner
            .user_log_handler
            .write()
            .unwrap_or_else(|poison| poison.into_inner()) = handler;
    }

    // Handlers are cloned out first so a handler may log without deadlocking.
    fn dispatch(&self, level: LogLevel, arguments: Vec<LogArgument>) {
        if let Some(handler) = self.user_log_handler() {
            handler(self, level, &arguments);
        }
        (self.log_handler())(self, level, &arguments);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.inner.name)
            .field("log_level", &self.log_level())
            .finish()
    }
}

struct LoggerInner {
    name: String,
    log_level: AtomicU8,
    log_handler: RwLock<SharedLogHandler>,
    user_log_handler: RwLock<Option<SharedLogHandler>>,
}

impl LoggerInner {
    fn new(name: String) -> Self {
        Self {
            name,
            log_level: AtomicU8::new(GLOBAL_LOG_LEVEL.load(Ordering::SeqCst)),
            log_handler: RwLock::new(default_log_handler_arc()),
            user_log_handler: RwLock::new(None),
        }
    }
}

fn default_log_handler_arc() -> SharedLogHandler {
    Arc::new(default_log_handler)
}

fn default_log_handler(logger: &Logger, level: LogLevel, args: &[LogArgument]) {
    if level < logger.log_level() || level == LogLevel::Silent {
        return;
    }

    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let header = format!("[{}]  {}:", now, logger.name());
    let message = build_message(args);
    let line = if message.is_empty() {
        header
    } else {
        format!("{header} {message}")
    };

    match level {
        LogLevel::Warn | LogLevel::Error => eprintln!("{line}"),
        _ => println!("{line}"),
    }
}

fn build_message(args: &[LogArgument]) -> String {
    args.iter()
        .filter_map(LogArgument::to_message_fragment)
        .collect::<Vec<_>>()
        .join(" ")
}

fn for_each_logger<F>(mut f: F)
where
    F: FnMut(Logger),
{
    let mut instances = INSTANCES.lock().unwrap_or_else(|poison| poison.into_inner());
    instances.retain(|weak| match weak.upgrade() {
        Some(inner) => {
            f(Logger { inner });
            true
        }
        None => false,
    });
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
    Silent = 4,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Silent => "silent",
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Debug,
            1 => LogLevel::Info,
            2 => LogLevel::Warn,
            3 => LogLevel::Error,
            _ => LogLevel::Silent,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}

impl FromStr for LogLevel {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "silent" | "off" => Ok(LogLevel::Silent),
            other => Err(LogError::InvalidLogLevel(other.to_string())),
        }
    }
}

pub trait IntoLogLevel {
    fn into_log_level(self) -> Result<LogLevel, LogError>;
}

impl IntoLogLevel for LogLevel {
    fn into_log_level(self) -> Result<LogLevel, LogError> {
        Ok(self)
    }
}

impl IntoLogLevel for &str {
    fn into_log_level(self) -> Result<LogLevel, LogError> {
        LogLevel::from_str(self)
    }
}

impl IntoLogLevel for String {
    fn into_log_level(self) -> Result<LogLevel, LogError> {
        LogLevel::from_str(&self)
    }
}

/// A record as seen by a user log callback.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
    pub args: Vec<Value>,
    pub logger_name: String,
}

type LogCallback = Arc<dyn Fn(LogRecord) + Send + Sync + 'static>;

#[derive(Debug, Clone, PartialEq)]
pub enum LogArgument {
    Text(String),
    Value(Value),
    Null,
}

impl LogArgument {
    pub fn to_message_fragment(&self) -> Option<String> {
        match self {
            LogArgument::Text(text) | LogArgument::Value(Value::String(text)) => {
                Some(text.clone())
            }
            LogArgument::Value(Value::Null) | LogArgument::Null => None,
            LogArgument::Value(other) => Some(other.to_string()),
        }
    }

    pub fn to_callback_value(&self) -> Value {
        match self {
            LogArgument::Text(text) => Value::String(text.clone()),
            LogArgument::Value(value) => value.clone(),
            LogArgument::Null => Value::Null,
        }
    }
}

pub trait IntoLogArgument {
    fn into_log_argument(self) -> LogArgument;
}

impl IntoLogArgument for LogArgument {
    fn into_log_argument(self) -> LogArgument {
        self
    }
}

impl IntoLogArgument for String {
    fn into_log_argument(self) -> LogArgument {
        LogArgument::Text(self)
    }
}

impl IntoLogArgument for &str {
    fn into_log_argument(self) -> LogArgument {
        LogArgument::Text(self.to_owned())
    }
}

impl IntoLogArgument for Value {
    fn into_log_argument(self) -> LogArgument {
        LogArgument::Value(self)
    }
}

impl IntoLogArgument for bool {
    fn into_log_argument(self) -> LogArgument {
        LogArgument::Value(Value::Bool(self))
    }
}

impl IntoLogArgument for u64 {
    fn into_log_argument(self) -> LogArgument {
        LogArgument::Value(Value::from(self))
    }
}

impl IntoLogArgument for i64 {
    fn into_log_argument(self) -> LogArgument {
        LogArgument::Value(Value::from(self))
    }
}

impl<T> IntoLogArgument for Option<T>
where
    T: IntoLogArgument,
{
    fn into_log_argument(self) -> LogArgument {
        match self {
            Some(value) => value.into_log_argument(),
            None => LogArgument::Null,
        }
    }
}

pub fn log_arg<T>(value: T) -> LogArgument
where
    T: IntoLogArgument,
{
    value.into_log_argument()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogError {
    InvalidLogLevel(String),
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogError::InvalidLogLevel(level) => {
                write!(f, "Invalid value \"{level}\" assigned to the log level")
            }
        }
    }
}

impl std::error::Error for LogError {}

/// Sets the level of every live logger and of loggers created afterwards.
pub fn set_log_level<L>(level: L) -> Result<(), LogError>
where
    L: IntoLogLevel,
{
    let level = level.into_log_level()?;
    GLOBAL_LOG_LEVEL.store(level as u8, Ordering::SeqCst);
    for_each_logger(|logger| {
        logger.inner.log_level.store(level as u8, Ordering::SeqCst);
    });
    Ok(())
}

/// Installs (or with `None`, removes) a callback on every live logger.
///
/// The callback sees records at or above `level`, falling back to each logger's
/// own level when `level` is `None`.
pub fn set_user_log_handler_fn<F>(callback: Option<F>, level: Option<LogLevel>)
where
    F: Fn(LogRecord) + Send + Sync + 'static,
{
    let Some(callback) = callback.map(|cb| Arc::new(cb) as LogCallback) else {
        for_each_logger(|logger| logger.set_user_log_handler(None));
        return;
    };

    for_each_logger(|logger| {
        let callback = Arc::clone(&callback);
        let handler: SharedLogHandler = Arc::new(
            move |instance: &Logger, record_level: LogLevel, args: &[LogArgument]| {
                let threshold = level.unwrap_or_else(|| instance.log_level());
                if record_level < threshold {
                    return;
                }
                callback(LogRecord {
                    level: record_level,
                    message: build_message(args),
                    args: args.iter().map(LogArgument::to_callback_value).collect(),
                    logger_name: instance.name().to_owned(),
                });
            },
        );
        logger.set_user_log_handler(Some(handler));
    });
}

#[cfg(test)]
pub(crate) static TEST_GUARD: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

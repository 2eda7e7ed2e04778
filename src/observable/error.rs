use serde::Serialize;
use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObservableErrorCode {
    Internal,
    InvalidArgument,
    ProducerFailed,
}

impl ObservableErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObservableErrorCode::Internal => "observable/internal",
            ObservableErrorCode::InvalidArgument => "observable/invalid-argument",
            ObservableErrorCode::ProducerFailed => "observable/producer-failed",
        }
    }
}

/// Default error payload delivered through an observer's error channel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ObservableError {
    pub code: ObservableErrorCode,
    message: String,
}

impl ObservableError {
    pub fn new(code: ObservableErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for ObservableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code_str())
    }
}

impl std::error::Error for ObservableError {}

pub type ObservableResult<T> = Result<T, ObservableError>;

pub fn internal_error(message: impl Into<String>) -> ObservableError {
    ObservableError::new(ObservableErrorCode::Internal, message)
}

pub fn invalid_argument(message: impl Into<String>) -> ObservableError {
    ObservableError::new(ObservableErrorCode::InvalidArgument, message)
}

pub fn producer_failed(message: impl Into<String>) -> ObservableError {
    ObservableError::new(ObservableErrorCode::ProducerFailed, message)
}

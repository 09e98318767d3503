//! Lifecycle wrapper for values produced by asynchronous requests

/// Message used when a failure carries no description of its own.
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred. Please try again later.";

/// State of a value that is fetched asynchronously.
///
/// This is a plain value: callers decide when to move between variants.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<T> {
    Idle,
    Loading,
    Error(String),
    Success(T),
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        RequestState::Idle
    }
}

impl<T> RequestState<T> {
    /// Builds an `Error` state from any failure, falling back to
    /// [`DEFAULT_ERROR_MESSAGE`] when the failure has no description.
    pub fn from_error(error: &anyhow::Error) -> Self {
        let message = error.to_string();
        if message.trim().is_empty() {
            RequestState::Error(DEFAULT_ERROR_MESSAGE.to_string())
        } else {
            RequestState::Error(message)
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, RequestState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, RequestState::Error(_))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RequestState::Success(_))
    }

    pub fn success_data(&self) -> Option<&T> {
        match self {
            RequestState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn into_success(self) -> Option<T> {
        match self {
            RequestState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            RequestState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RequestState<U> {
        match self {
            RequestState::Idle => RequestState::Idle,
            RequestState::Loading => RequestState::Loading,
            RequestState::Error(message) => RequestState::Error(message),
            RequestState::Success(data) => RequestState::Success(f(data)),
        }
    }
}

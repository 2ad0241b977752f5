//! Error types for portfolio-provider
//!
//! Read-side failures are folded into [`ApiError`] and surfaced through
//! [`State::Error`](crate::state::State::Error). Cancellation has no variant
//! here: an aborted request is a
//! [`CycleOutcome::Canceled`](crate::runtime::CycleOutcome::Canceled), never an error.

use std::fmt;

use serde::Serialize;

/// Failure of a request issued through a [`Transport`](crate::transport::Transport)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request did not complete within the configured timeout
    #[error("Request timed out")]
    Timeout,
    /// DNS failure, refused connection or any other transport failure
    #[error("Network error: {0}")]
    Network(String),
    /// The backend answered with a non-2xx status
    #[error("Server responded with status {status}: {body}")]
    Status { status: u16, body: String },
    /// The response body did not match the expected schema
    #[error("Failed to decode response: {0}")]
    Deserialize(String),
    /// The contact endpoint answered 2xx but reported `success: false`
    #[error("The server rejected the request")]
    Rejected,
    /// The client could not be configured
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApiError {
    /// HTTP status of a server error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true for 5xx answers
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|status| (500..600).contains(&status))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::Deserialize(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Deserialize(err.to_string())
    }
}

/// A contact form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Subject => "subject",
            ContactField::Message => "message",
        };
        f.write_str(name)
    }
}

/// One failed field check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: ContactField,
    pub message: &'static str,
}

/// Per-field validation failures of a contact form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub(crate) fn push(&mut self, field: ContactField, message: &'static str) {
        self.errors.push(FieldError { field, message });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Message for a given field, if it failed validation
    pub fn message_for(&self, field: ContactField) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Failure of a contact submission
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContactError {
    /// The form was rejected locally; nothing was sent
    #[error("Invalid contact form: {0}")]
    Validation(ValidationErrors),
    /// The request was sent and failed
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ContactError {
    pub fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            ContactError::Validation(errors) => Some(errors),
            ContactError::Api(_) => None,
        }
    }

    /// The transport failure, if the form was sent
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            ContactError::Api(error) => Some(error),
            ContactError::Validation(_) => None,
        }
    }
}

/// Errors from the process-wide client registry
#[derive(Debug, thiserror::Error)]
pub enum GlobalError {
    #[error("Global client not initialized. Call portfolio_provider::init() first.")]
    NotInitialized,
    #[error("Global client already initialized")]
    AlreadyInitialized,
    #[error("Failed to initialize global client: {0}")]
    InitializationFailed(#[from] ApiError),
}

/// Errors from the notification service
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotificationError {
    #[error("Subscriber limit of {0} reached")]
    TooManySubscribers(usize),
}

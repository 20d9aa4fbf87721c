use std::error::Error as StdError;

use crate::services::todo_service::TodoServiceError;

pub const INVALID_ID: &str = "invalid id";
pub const TITLE_REQUIRED: &str = "title is required";
pub const INVALID_INPUT: &str = "invalid input";
pub const TODO_NOT_FOUND: &str = "todo not found";
pub const INTERNAL_SERVER_ERROR: &str = "internal server error";

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    /// `source` is for logs only and never rendered to the client.
    Internal {
        message: String,
        source: Option<BoxError>,
    },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal_with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Internal {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Maps a service failure onto the transport taxonomy. `failure` is the
    /// generic message shown when the store itself failed.
    pub fn from_service(err: TodoServiceError, failure: &'static str) -> Self {
        match err {
            TodoServiceError::InvalidInput => Self::bad_request(INVALID_INPUT),
            TodoServiceError::NotFound => Self::not_found(TODO_NOT_FOUND),
            TodoServiceError::Store(source) => Self::internal_with_source(failure, source),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(message) | Self::NotFound(message) => message.as_str(),
            Self::Internal { message, .. } => message.as_str(),
        }
    }

    pub fn source_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        match self {
            Self::Internal {
                source: Some(source),
                ..
            } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

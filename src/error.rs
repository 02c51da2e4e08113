use axum::http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HtmxViewError>;

#[derive(Debug, Error)]
pub enum HtmxViewError {
    #[error("Reverse for '{name}' not found: {reason}")]
    NoReverseMatch { name: String, reason: String },

    #[error("Duplicate route name: {name}")]
    DuplicateRoute { name: String },

    #[error("Invalid route template '{template}': {message}")]
    InvalidTemplate { template: String, message: String },

    #[error("Path argument '{name}' is missing")]
    MissingPathArgument { name: String },

    #[error("Path argument '{name}' could not be converted from '{value}'")]
    InvalidPathArgument { name: String, value: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl HtmxViewError {
    pub fn no_reverse_match(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NoReverseMatch {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Status the error maps to when it escapes a handler.
    ///
    /// Path argument failures mean the URL did not match any route, so they
    /// surface the same way an unknown URL does.
    pub fn status(&self) -> StatusCode {
        match self {
            HtmxViewError::MissingPathArgument { .. }
            | HtmxViewError::InvalidPathArgument { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl axum::response::IntoResponse for HtmxViewError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!(error = %self, "path did not resolve");
            return status.into_response();
        }
        tracing::error!(error = %self, "htmx view failure");
        (status, self.to_string()).into_response()
    }
}

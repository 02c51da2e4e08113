use async_trait::async_trait;
use axum::{
    http::{Method, StatusCode, request::Parts},
    response::{IntoResponse, Response},
};

mod method;

pub use method::MethodGuard;

/// Standard Result type for Guard
/// Ok(()) means allowed
/// Err(GuardError) means denied
pub type GuardResult = Result<(), GuardError>;

#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    #[error("Method {actual} not allowed, expected {expected}")]
    MethodNotAllowed { expected: Method, actual: Method },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl IntoResponse for GuardError {
    fn into_response(self) -> Response {
        match self {
            // Rejected verbs get no body at all.
            GuardError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED.into_response(),
            GuardError::Forbidden(message) => (StatusCode::FORBIDDEN, message).into_response(),
            GuardError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message).into_response(),
        }
    }
}

/// The Guard trait
///
/// Guards run in order before an action handler; the first denial answers the
/// request and the handler is never called.
#[async_trait]
pub trait Guard: Send + Sync + 'static {
    async fn can_activate(&self, parts: &Parts) -> GuardResult;
}

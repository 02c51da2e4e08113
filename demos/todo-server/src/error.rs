use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use htmx_view::HtmxViewError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TodoError {
    #[error("todo item {0} not found")]
    NotFound(i32),

    #[error("database error: {0}")]
    Database(#[from] DbErr),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error(transparent)]
    Form(#[from] FormRejection),

    #[error(transparent)]
    View(#[from] HtmxViewError),
}

pub type TodoResult<T> = Result<T, TodoError>;

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        match self {
            TodoError::NotFound(id) => {
                tracing::debug!(id, "todo item not found");
                (StatusCode::NOT_FOUND, "Not Found").into_response()
            }
            TodoError::Form(rejection) => rejection.into_response(),
            TodoError::View(err) => err.into_response(),
            err => {
                tracing::error!(error = %err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

//! To-do list server built on `htmx-view`.
//!
//! ```text
//! GET  /                              todo
//! POST /todos/create/                 todo->create
//! POST /todos/toggle/<int:todo_id>/   todo->toggle
//! POST /todos/delete/<int:todo_id>/   todo->delete
//! ```

pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod forms;
pub mod shutdown;
pub mod templates;
pub mod views;

use crate::error::TodoResult;
use crate::templates::Templates;
use crate::views::TodoView;
use axum::Router;
use htmx_view::{HtmxView, UrlConf};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the application router on top of an open database.
pub fn app(db: DatabaseConnection) -> TodoResult<Router> {
    let view = Arc::new(TodoView::new(db, Templates::new()?));

    let router = UrlConf::new()
        .path("", "todo", Arc::clone(&view).as_view())?
        .include(view.htmx_urls("todos", "todo")?)?
        .into_router()
        .layer(TraceLayer::new_for_http());
    Ok(router)
}

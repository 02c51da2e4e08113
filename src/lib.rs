//! # htmx-view
//!
//! Multi-action views for axum, made for htmx front ends.
//!
//! One view type serves its own page through plain verb handlers and exposes
//! any number of *actions*: methods prefixed with `hx_` that each get a route
//! of their own. The `#[htmx_view]` attribute finds those methods at compile
//! time and builds a static route table out of them:
//!
//! - the route path is `<base>/<action>/` plus one segment per remaining
//!   parameter, typed `int`, `uuid` or `str` from the parameter's Rust type,
//! - the route name is `<base name>-><action>`,
//! - `#[post]`, `#[get]`, ... on an action answer any other verb with an empty 405.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use htmx_view::prelude::*;
//!
//! pub struct TodoView {
//!     db: DatabaseConnection,
//! }
//!
//! #[htmx_view]
//! impl TodoView {
//!     async fn get(&self, request: Request) -> Response {
//!         // full page
//!     }
//!
//!     #[post]
//!     async fn hx_create(&self, request: Request) -> Response {
//!         // POST /todos/create/
//!     }
//!
//!     #[post]
//!     async fn hx_toggle(&self, request: Request, todo_id: i64) -> Response {
//!         // POST /todos/toggle/<int:todo_id>/
//!     }
//! }
//!
//! let view = Arc::new(TodoView { db });
//! let router: Router = UrlConf::new()
//!     .path("", "todo", Arc::clone(&view).as_view())?
//!     .include(view.htmx_urls("todos", "todo")?)?
//!     .into_router();
//! ```

extern crate self as htmx_view;

pub mod action;
pub mod error;
pub mod guard;
pub mod response;
pub mod url;

// Re-export core types
pub use action::{ActionRoute, ActionSet, HtmxView, PathArgs};
pub use error::{HtmxViewError, Result};
pub use url::{ConverterTag, RoutePattern, UrlConf, UrlParameter, UrlResolver};

// Re-export macros
pub use htmx_view_macro::htmx_view;

// Re-export commonly used types from dependencies
pub use async_trait::async_trait;
pub use axum;
pub use axum::http;

/// Prelude module for convenient imports
///
/// ```
/// use htmx_view::prelude::*;
/// ```
pub mod prelude {
    pub use crate::action::{ActionRoute, ActionSet, HtmxView, PathArgs};
    pub use crate::error::{HtmxViewError, Result};
    pub use crate::guard::{Guard, GuardError, GuardResult, MethodGuard};
    pub use htmx_view_macro::htmx_view;
    pub use crate::response::{Fragment, HxRequestExt, Swap, empty};
    pub use crate::url::{ConverterTag, RoutePattern, UrlConf, UrlParameter, UrlResolver};
    pub use async_trait::async_trait;
    pub use axum::{
        Router,
        extract::Request,
        http::{Method, StatusCode},
        response::{IntoResponse, Response},
    };
    pub use std::sync::Arc;
}

use crate::action::{ActionRoute, ActionSet};
use crate::error::Result;
use axum::routing::MethodRouter;
use std::sync::Arc;

/// A view type exposing several actions next to its verb handlers.
///
/// Usually implemented by the `#[htmx_view]` attribute, which collects every
/// `hx_`-prefixed method of an `impl` block into [`HtmxView::actions`] and the
/// methods named after HTTP verbs into [`HtmxView::as_view`].
///
/// # Example
/// ```rust,ignore
/// #[htmx_view]
/// impl TodoView {
///     async fn get(&self, request: Request) -> Response { /* full page */ }
///
///     #[post]
///     async fn hx_toggle(&self, request: Request, todo_id: i64) -> Response { /* fragment */ }
/// }
///
/// let view = Arc::new(TodoView::new(db));
/// let actions = Arc::clone(&view).htmx_urls("todos", "todo")?;
/// // actions now holds `todo->toggle` at `todos/toggle/<int:todo_id>/`
/// ```
pub trait HtmxView: Send + Sync + Sized + 'static {
    /// Every action of the view, each bound to `self`.
    fn actions(self: Arc<Self>) -> Vec<ActionRoute>;

    /// Verb-based routing for the view's own URL. Verbs the view does not
    /// handle answer 405.
    fn as_view<S>(self: Arc<Self>) -> MethodRouter<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        MethodRouter::new()
    }

    /// The view's action table under `path`, with routes named `<name>-><action>`.
    fn htmx_urls(self: Arc<Self>, path: &str, name: &str) -> Result<ActionSet> {
        ActionSet::new(path, name).extend(self.actions())
    }

    fn htmx_urls_with_separator(
        self: Arc<Self>,
        path: &str,
        name: &str,
        separator: &str,
    ) -> Result<ActionSet> {
        ActionSet::new(path, name)
            .with_separator(separator)
            .extend(self.actions())
    }
}

use proc_macro::TokenStream;

mod signature;
mod view;

/// Attribute macro turning an `impl` block into an htmx view
///
/// Every method whose name starts with `hx_` becomes an action route named by
/// the rest of its name. Its parameters, apart from `&self` and the request,
/// become typed path segments in declared order:
///
/// | Rust type | converter |
/// |---|---|
/// | `i8` … `i128`, `u8` … `u128`, `isize`, `usize` | `int` |
/// | `Uuid` | `uuid` |
/// | anything else (parsed with `FromStr`) | `str` |
///
/// A request parameter is recognised by its name (`request`, `_request`) or
/// its type (`Request`).
///
/// `#[get]`, `#[post]`, `#[put]`, `#[patch]` or `#[delete]` on an action
/// restricts it to that verb; other verbs get an empty 405. An action without
/// one accepts every verb.
///
/// Methods named `get`, `post`, `put`, `patch` or `delete` taking
/// `(&self, Request)` become the view's own verb handlers (`as_view`). Any
/// other signature on a verb-named method is a compile error.
///
/// # Example
/// ```rust,ignore
/// use htmx_view::prelude::*;
///
/// #[htmx_view]
/// impl TodoView {
///     async fn get(&self, request: Request) -> Response { ... }
///
///     #[post]
///     async fn hx_toggle(&self, request: Request, todo_id: i64) -> Response { ... }
/// }
/// ```
///
/// The prefix can be changed with `#[htmx_view(prefix = "action_")]`.
#[proc_macro_attribute]
pub fn htmx_view(attr: TokenStream, item: TokenStream) -> TokenStream {
    view::htmx_view_attribute(attr, item)
}

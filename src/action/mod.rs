//! Actions: several routes served by one view.

mod args;
mod route;
mod set;
mod view;

pub use args::PathArgs;
pub use route::{ActionFuture, ActionRoute};
pub use set::{ActionSet, DEFAULT_SEPARATOR};
pub use view::HtmxView;

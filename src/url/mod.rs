//! Route templates, typed path converters and URL reversal.

mod conf;
mod param;
mod pattern;

pub use conf::{UrlConf, UrlResolver};
pub use param::{ConverterTag, UrlParameter};
pub use pattern::RoutePattern;

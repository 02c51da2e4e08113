//! htmx-aware responses.

use axum::{
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, request::Parts},
    response::{Html, IntoResponse, Response},
};
use strum_macros::{AsRefStr, Display};

/// Request and response header names used by htmx.
pub mod headers {
    pub const HX_REQUEST: &str = "hx-request";
    pub const HX_TARGET: &str = "hx-target";
    pub const HX_TRIGGER: &str = "hx-trigger";
    pub const HX_RETARGET: &str = "hx-retarget";
    pub const HX_RESWAP: &str = "hx-reswap";
}

/// Values accepted by the `HX-Reswap` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
pub enum Swap {
    #[strum(serialize = "innerHTML")]
    InnerHtml,
    #[strum(serialize = "outerHTML")]
    OuterHtml,
    #[strum(serialize = "beforebegin")]
    BeforeBegin,
    #[strum(serialize = "afterbegin")]
    AfterBegin,
    #[strum(serialize = "beforeend")]
    BeforeEnd,
    #[strum(serialize = "afterend")]
    AfterEnd,
    #[strum(serialize = "delete")]
    Delete,
    #[strum(serialize = "none")]
    None,
}

/// An HTML fragment response
///
/// Defaults to HTTP 200 OK. The out-of-band helpers tell the htmx client to
/// put the fragment somewhere other than the element that sent the request.
///
/// # Example
/// ```
/// use htmx_view::response::{Fragment, Swap};
///
/// let response = Fragment::new("<form>…</form>")
///     .retarget("this")
///     .reswap(Swap::OuterHtml);
/// ```
#[derive(Debug, Clone)]
pub struct Fragment {
    body: String,
    status: StatusCode,
    headers: Vec<(&'static str, String)>,
}

impl Fragment {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            status: StatusCode::OK,
            headers: Vec::new(),
        }
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// `HX-Retarget`: CSS selector (or `this`) to swap into instead of the request's target.
    pub fn retarget(self, target: impl Into<String>) -> Self {
        self.header(headers::HX_RETARGET, target.into())
    }

    /// `HX-Reswap`: how the fragment is swapped in.
    pub fn reswap(self, swap: Swap) -> Self {
        self.header(headers::HX_RESWAP, swap.to_string())
    }

    /// `HX-Trigger`: client-side event fired once the response is received.
    pub fn trigger(self, event: impl Into<String>) -> Self {
        self.header(headers::HX_TRIGGER, event.into())
    }

    fn header(mut self, name: &'static str, value: String) -> Self {
        self.headers.push((name, value));
        self
    }
}

impl IntoResponse for Fragment {
    fn into_response(self) -> Response {
        let mut response = (self.status, Html(self.body)).into_response();
        for (name, value) in self.headers {
            match HeaderValue::try_from(value) {
                Ok(value) => {
                    response
                        .headers_mut()
                        .insert(HeaderName::from_static(name), value);
                }
                Err(err) => tracing::warn!(header = name, error = %err, "dropping invalid htmx header"),
            }
        }
        response
    }
}

/// A response with no body, e.g. 204 after a delete.
pub fn empty(status: StatusCode) -> Response {
    status.into_response()
}

/// Read the htmx request headers.
pub trait HxRequestExt {
    fn hx_headers(&self) -> &HeaderMap;

    /// Whether the request was issued by htmx.
    fn is_htmx(&self) -> bool {
        self.hx_headers()
            .get(headers::HX_REQUEST)
            .is_some_and(|value| value == "true")
    }

    /// Id of the element the request targets, if htmx sent one.
    fn hx_target(&self) -> Option<&str> {
        self.hx_headers()
            .get(headers::HX_TARGET)
            .and_then(|value| value.to_str().ok())
    }
}

impl<B> HxRequestExt for axum::http::Request<B> {
    fn hx_headers(&self) -> &HeaderMap {
        self.headers()
    }
}

impl HxRequestExt for Parts {
    fn hx_headers(&self) -> &HeaderMap {
        &self.headers
    }
}

use crate::action::PathArgs;
use crate::guard::{Guard, MethodGuard};
use crate::url::UrlParameter;
use axum::{
    extract::Request,
    http::Method,
    response::{IntoResponse, Response},
    routing::{MethodRouter, any},
};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub type ActionFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

type BoxedHandler = Arc<dyn Fn(Request, PathArgs) -> ActionFuture + Send + Sync>;

/// One action of a view: its name, the verb it accepts, its typed path
/// parameters and the handler bound to it.
#[derive(Clone)]
pub struct ActionRoute {
    name: String,
    method: Option<Method>,
    params: Vec<UrlParameter>,
    guards: Vec<Arc<dyn Guard>>,
    handler: BoxedHandler,
}

impl ActionRoute {
    /// With `method` set, any other verb is answered with an empty 405 before
    /// the handler runs. Without it every verb reaches the handler.
    pub fn new<H, Fut>(
        name: impl Into<String>,
        method: Option<Method>,
        params: Vec<UrlParameter>,
        handler: H,
    ) -> Self
    where
        H: Fn(Request, PathArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let mut guards: Vec<Arc<dyn Guard>> = Vec::new();
        if let Some(method) = &method {
            guards.push(Arc::new(MethodGuard::new(method.clone())));
        }
        Self {
            name: name.into(),
            method,
            params,
            guards,
            handler: Arc::new(move |request: Request, args: PathArgs| -> ActionFuture {
                Box::pin(handler(request, args))
            }),
        }
    }

    /// Add a guard that runs after the verb check.
    pub fn with_guard(mut self, guard: impl Guard) -> Self {
        self.guards.push(Arc::new(guard));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn method(&self) -> Option<&Method> {
        self.method.as_ref()
    }

    pub fn params(&self) -> &[UrlParameter] {
        &self.params
    }

    /// Run the guards, then the handler.
    pub async fn call(&self, request: Request, args: PathArgs) -> Response {
        let (parts, body) = request.into_parts();
        for guard in &self.guards {
            if let Err(err) = guard.can_activate(&parts).await {
                tracing::debug!(action = %self.name, error = %err, "guard rejected request");
                return err.into_response();
            }
        }
        tracing::debug!(action = %self.name, method = %parts.method, "dispatching action");
        (self.handler)(Request::from_parts(parts, body), args).await
    }

    async fn handle(&self, request: Request) -> Response {
        let (mut parts, body) = request.into_parts();
        let args = match PathArgs::extract(&self.params, &mut parts).await {
            Ok(args) => args,
            Err(err) => return err.into_response(),
        };
        self.call(Request::from_parts(parts, body), args).await
    }

    /// Every verb is routed here so the guards, not the router, decide on 405.
    pub(crate) fn into_method_router<S>(self) -> MethodRouter<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let route = Arc::new(self);
        any(move |request: Request| {
            let route = Arc::clone(&route);
            async move { route.handle(request).await }
        })
    }
}

impl fmt::Debug for ActionRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRoute")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("params", &self.params)
            .field("guards", &self.guards.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::{GuardError, GuardResult};
    use crate::url::ConverterTag;
    use async_trait::async_trait;
    use axum::{
        body::{Body, to_bytes},
        http::{self, StatusCode, request::Parts},
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn request(method: Method) -> Request {
        http::Request::builder()
            .method(method)
            .uri("/todos/toggle/1/")
            .body(Body::empty())
            .unwrap()
    }

    fn counting_route(method: Option<Method>, hits: Arc<AtomicUsize>) -> ActionRoute {
        ActionRoute::new(
            "toggle",
            method,
            vec![UrlParameter::new("todo_id", ConverterTag::Int)],
            move |_request, args: PathArgs| {
                let hits = Arc::clone(&hits);
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    format!("toggled {}", args.get("todo_id").unwrap_or("?")).into_response()
                }
            },
        )
    }

    fn args() -> PathArgs {
        let params = [UrlParameter::new("todo_id", ConverterTag::Int)];
        PathArgs::resolve(&params, [("todo_id", "1")]).unwrap()
    }

    #[tokio::test]
    async fn test_gated_route_runs_handler_for_expected_verb() {
        let hits = Arc::new(AtomicUsize::new(0));
        let route = counting_route(Some(Method::POST), Arc::clone(&hits));
        let response = route.call(request(Method::POST), args()).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"toggled 1");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_gated_route_skips_handler_for_other_verbs() {
        let hits = Arc::new(AtomicUsize::new(0));
        let route = counting_route(Some(Method::POST), Arc::clone(&hits));
        let response = route.call(request(Method::GET), args()).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_ungated_route_accepts_any_verb() {
        let hits = Arc::new(AtomicUsize::new(0));
        let route = counting_route(None, Arc::clone(&hits));
        for method in [Method::GET, Method::POST, Method::DELETE] {
            let response = route.call(request(method), args()).await;
            assert_eq!(response.status(), StatusCode::OK);
        }
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    struct DenyAll;

    #[async_trait]
    impl Guard for DenyAll {
        async fn can_activate(&self, _parts: &Parts) -> GuardResult {
            Err(GuardError::Forbidden("nope".into()))
        }
    }

    #[tokio::test]
    async fn test_extra_guards_run_after_method_check() {
        let hits = Arc::new(AtomicUsize::new(0));
        let route = counting_route(Some(Method::POST), Arc::clone(&hits)).with_guard(DenyAll);

        let wrong_verb = route.call(request(Method::GET), args()).await;
        assert_eq!(wrong_verb.status(), StatusCode::METHOD_NOT_ALLOWED);

        let denied = route.call(request(Method::POST), args()).await;
        assert_eq!(denied.status(), StatusCode::FORBIDDEN);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}

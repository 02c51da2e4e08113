use crate::action::{ActionSet, PathArgs};
use crate::error::{HtmxViewError, Result};
use crate::url::param::UrlParameter;
use crate::url::pattern::RoutePattern;
use axum::{
    Extension, Router,
    extract::Request,
    http::Extensions,
    middleware::{self, Next},
    response::IntoResponse,
    routing::MethodRouter,
};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// The URL configuration of an application: plain named routes plus the
/// action sets of its views.
///
/// # Example
/// ```rust,ignore
/// let conf = UrlConf::new()
///     .path("", "todo", Arc::clone(&view).as_view())?
///     .include(view.htmx_urls("todos", "todo")?)?;
/// let resolver = conf.resolver();
/// let router: Router = conf.into_router();
/// ```
pub struct UrlConf<S = ()> {
    router: Router<S>,
    patterns: BTreeMap<String, RoutePattern>,
    paths: HashSet<String>,
}

impl<S> UrlConf<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            patterns: BTreeMap::new(),
            paths: HashSet::new(),
        }
    }

    /// Mount a method router under a named template.
    ///
    /// Typed placeholders are checked before the route runs; a segment its
    /// converter rejects answers 404.
    pub fn path(mut self, template: &str, name: &str, route: MethodRouter<S>) -> Result<Self> {
        let pattern = RoutePattern::parse(name, template)?;
        let params: Vec<UrlParameter> = pattern.params().cloned().collect();
        let route = if params.is_empty() {
            route
        } else {
            let params = Arc::new(params);
            route.route_layer(middleware::from_fn(move |request: Request, next: Next| {
                let params = Arc::clone(&params);
                async move {
                    let (mut parts, body) = request.into_parts();
                    if let Err(err) = PathArgs::extract(&params, &mut parts).await {
                        return err.into_response();
                    }
                    next.run(Request::from_parts(parts, body)).await
                }
            }))
        };
        self.mount(pattern, route)?;
        Ok(self)
    }

    /// Mount every action of a view.
    pub fn include(mut self, actions: ActionSet) -> Result<Self> {
        for (pattern, route) in actions.into_routes() {
            self.mount(pattern, route.into_method_router())?;
        }
        Ok(self)
    }

    fn mount(&mut self, pattern: RoutePattern, route: MethodRouter<S>) -> Result<()> {
        if self.patterns.contains_key(pattern.name()) {
            return Err(HtmxViewError::DuplicateRoute {
                name: pattern.name().to_string(),
            });
        }
        let path = pattern.router_path();
        if !self.paths.insert(pattern.shape()) {
            return Err(HtmxViewError::InvalidTemplate {
                template: pattern.template(),
                message: format!("{path} is already mounted"),
            });
        }

        tracing::debug!(name = %pattern.name(), template = %pattern.template(), "mounting route");
        let router = std::mem::take(&mut self.router);
        self.router = router.route(&path, route);
        self.patterns.insert(pattern.name().to_string(), pattern);
        Ok(())
    }

    pub fn resolver(&self) -> UrlResolver {
        UrlResolver {
            patterns: Arc::new(self.patterns.clone()),
        }
    }

    /// The finished router. Every request carries a [`UrlResolver`] extension.
    pub fn into_router(self) -> Router<S> {
        let resolver = self.resolver();
        self.router.layer(Extension(resolver))
    }
}

impl<S> Default for UrlConf<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only route table used to build URLs from route names.
#[derive(Debug, Clone, Default)]
pub struct UrlResolver {
    patterns: Arc<BTreeMap<String, RoutePattern>>,
}

impl UrlResolver {
    /// Resolver attached to a request by [`UrlConf::into_router`].
    pub fn from_extensions(extensions: &Extensions) -> Result<Self> {
        extensions.get::<UrlResolver>().cloned().ok_or_else(|| {
            HtmxViewError::Internal("no UrlResolver on request; mount routes with UrlConf".into())
        })
    }

    pub fn reverse<I>(&self, name: &str, args: I) -> Result<String>
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        self.patterns
            .get(name)
            .ok_or_else(|| HtmxViewError::no_reverse_match(name, "no route with that name"))?
            .reverse(args)
    }

    pub fn patterns(&self) -> impl Iterator<Item = &RoutePattern> {
        self.patterns.values()
    }
}

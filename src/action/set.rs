use crate::action::ActionRoute;
use crate::error::{HtmxViewError, Result};
use crate::url::RoutePattern;
use axum::Router;
use std::collections::BTreeMap;

/// Joins the base route name and the action name: `todo` + `toggle` → `todo->toggle`.
pub const DEFAULT_SEPARATOR: &str = "->";

/// The route table of one view: every action mounted under a base path and
/// named after a base name.
///
/// Actions are kept ordered by name, so the table reads the same no matter
/// in which order the actions were declared.
#[derive(Debug, Clone)]
pub struct ActionSet {
    path: String,
    name: String,
    separator: String,
    actions: BTreeMap<String, ActionRoute>,
}

impl ActionSet {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            separator: DEFAULT_SEPARATOR.to_string(),
            actions: BTreeMap::new(),
        }
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn action(mut self, route: ActionRoute) -> Result<Self> {
        if self.actions.contains_key(route.name()) {
            return Err(HtmxViewError::DuplicateRoute {
                name: self.route_name(route.name()),
            });
        }
        tracing::debug!(view = %self.name, action = %route.name(), "registering action");
        self.actions.insert(route.name().to_string(), route);
        Ok(self)
    }

    pub fn extend<I>(self, routes: I) -> Result<Self>
    where
        I: IntoIterator<Item = ActionRoute>,
    {
        routes.into_iter().try_fold(self, |set, route| set.action(route))
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn route_name(&self, action: &str) -> String {
        format!("{}{}{}", self.name, self.separator, action)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Look up the handler registered under a full route name such as `todo->create`.
    pub fn get(&self, route_name: &str) -> Option<&ActionRoute> {
        let action = route_name
            .strip_prefix(self.name.as_str())?
            .strip_prefix(self.separator.as_str())?;
        self.actions.get(action)
    }

    fn pattern_for(&self, route: &ActionRoute) -> RoutePattern {
        RoutePattern::for_action(
            &self.path,
            self.route_name(route.name()),
            route.name(),
            route.params(),
        )
    }

    pub fn patterns(&self) -> Vec<RoutePattern> {
        self.actions.values().map(|route| self.pattern_for(route)).collect()
    }

    pub fn into_routes(self) -> Vec<(RoutePattern, ActionRoute)> {
        let patterns = self.patterns();
        patterns.into_iter().zip(self.actions.into_values()).collect()
    }

    /// Mount the actions on their own, without a [`UrlConf`](crate::url::UrlConf).
    ///
    /// Requests routed this way carry no `UrlResolver`.
    pub fn into_router<S>(self) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        self.into_routes()
            .into_iter()
            .fold(Router::new(), |router, (pattern, route)| {
                router.route(&pattern.router_path(), route.into_method_router())
            })
    }
}

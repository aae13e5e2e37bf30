use parking_lot::RwLock;
use std::sync::Arc;

use crate::context::{Context, ParamStore};
use crate::endpoint::{Controller, Endpoint, HandlerResult, resolve_actions};
use crate::enums::{FilterStage, HttpMethod, RouteMethod};
use crate::errors::RouterResult;
use crate::filter::{FilterEntry, FilterOptions, FilterOutcome};
use crate::path::{canonical_pattern, request_path, route_pattern};
use crate::registry::{RegistryMetrics, RouteRegistry, StaticServer};
use crate::router::{Namespace, RouterOptions};

const PREFIX_TAIL: &str = "?:all(.*)";

#[derive(Debug)]
pub struct Router {
    inner: RwLock<Arc<RouteRegistry>>,
    options: RouterOptions,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Router {
    pub fn new(options: Option<RouterOptions>) -> Self {
        Self {
            inner: RwLock::new(Arc::new(RouteRegistry::new())),
            options: options.unwrap_or_default(),
        }
    }

    pub fn try_new(options: RouterOptions) -> RouterResult<Self> {
        options.validate()?;
        Ok(Self::new(Some(options)))
    }

    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    pub fn snapshot(&self) -> Arc<RouteRegistry> {
        self.inner.read().clone()
    }

    pub fn metrics(&self) -> RegistryMetrics {
        self.inner.read().metrics()
    }

    fn write<R>(&self, f: impl FnOnce(&mut RouteRegistry) -> RouterResult<R>) -> RouterResult<R> {
        let mut guard = self.inner.write();
        f(Arc::make_mut(&mut guard))
    }

    #[tracing::instrument(level = "debug", skip(self, routes), fields(pattern = %pattern, methods = routes.len()))]
    fn register(&self, pattern: &str, routes: Vec<(RouteMethod, Endpoint)>) -> RouterResult<()> {
        let limit = self.options.max_param_count;
        let pattern = route_pattern(pattern, self.options.case_sensitive);
        self.write(|registry| registry.insert_route(&routes, &pattern, limit))
    }

    pub fn add(&self, method: impl Into<RouteMethod>, pattern: &str, endpoint: Endpoint) -> RouterResult<()> {
        self.register(pattern, vec![(method.into(), endpoint)])
    }

    pub fn get<F>(&self, pattern: &str, handler: F) -> RouterResult<()>
    where
        F: Fn(&mut Context) -> HandlerResult + Send + Sync + 'static,
    {
        self.add(HttpMethod::Get, pattern, Endpoint::handler(handler))
    }

    pub fn post<F>(&self, pattern: &str, handler: F) -> RouterResult<()>
    where
        F: Fn(&mut Context) -> HandlerResult + Send + Sync + 'static,
    {
        self.add(HttpMethod::Post, pattern, Endpoint::handler(handler))
    }

    pub fn put<F>(&self, pattern: &str, handler: F) -> RouterResult<()>
    where
        F: Fn(&mut Context) -> HandlerResult + Send + Sync + 'static,
    {
        self.add(HttpMethod::Put, pattern, Endpoint::handler(handler))
    }

    pub fn delete<F>(&self, pattern: &str, handler: F) -> RouterResult<()>
    where
        F: Fn(&mut Context) -> HandlerResult + Send + Sync + 'static,
    {
        self.add(HttpMethod::Delete, pattern, Endpoint::handler(handler))
    }

    pub fn patch<F>(&self, pattern: &str, handler: F) -> RouterResult<()>
    where
        F: Fn(&mut Context) -> HandlerResult + Send + Sync + 'static,
    {
        self.add(HttpMethod::Patch, pattern, Endpoint::handler(handler))
    }

    pub fn head<F>(&self, pattern: &str, handler: F) -> RouterResult<()>
    where
        F: Fn(&mut Context) -> HandlerResult + Send + Sync + 'static,
    {
        self.add(HttpMethod::Head, pattern, Endpoint::handler(handler))
    }

    pub fn options_route<F>(&self, pattern: &str, handler: F) -> RouterResult<()>
    where
        F: Fn(&mut Context) -> HandlerResult + Send + Sync + 'static,
    {
        self.add(HttpMethod::Options, pattern, Endpoint::handler(handler))
    }

    pub fn any<F>(&self, pattern: &str, handler: F) -> RouterResult<()>
    where
        F: Fn(&mut Context) -> HandlerResult + Send + Sync + 'static,
    {
        self.add(RouteMethod::Any, pattern, Endpoint::handler(handler))
    }

    pub fn add_controller(
        &self,
        pattern: &str,
        controller: Arc<dyn Controller>,
        mapping: Option<&str>,
    ) -> RouterResult<()> {
        let routes = controller_routes(controller, mapping)?;
        self.register(pattern, routes)
    }

    /// Routes `pattern` and everything below it to `endpoint` for any method.
    /// The remainder below the prefix is bound to `:all`.
    pub fn handle_prefix(&self, pattern: &str, endpoint: Endpoint) -> RouterResult<()> {
        let base = canonical_pattern(pattern);
        let full = format!("{}/{PREFIX_TAIL}", base.trim_end_matches('/'));
        self.add(RouteMethod::Any, &full, endpoint)
    }

    pub fn insert_filter<F>(&self, pattern: &str, stage: FilterStage, filter: F) -> RouterResult<()>
    where
        F: Fn(&mut Context) -> FilterOutcome + Send + Sync + 'static,
    {
        self.insert_filter_with(pattern, stage, filter, FilterOptions::default())
    }

    #[tracing::instrument(level = "debug", skip(self, filter), fields(pattern = %pattern, stage = ?stage))]
    pub fn insert_filter_with<F>(
        &self,
        pattern: &str,
        stage: FilterStage,
        filter: F,
        options: FilterOptions,
    ) -> RouterResult<()>
    where
        F: Fn(&mut Context) -> FilterOutcome + Send + Sync + 'static,
    {
        let pattern = route_pattern(pattern, self.options.case_sensitive);
        let entry = FilterEntry::new(&pattern, stage, filter, options)?;
        self.write(|registry| {
            registry.insert_filter(entry);
            Ok(())
        })
    }

    #[tracing::instrument(level = "debug", skip(self, method), fields(pattern = %pattern))]
    pub fn remove_route(&self, method: impl Into<RouteMethod>, pattern: &str) -> RouterResult<usize> {
        let method = method.into();
        let pattern = route_pattern(pattern, self.options.case_sensitive);
        self.write(|registry| registry.remove_route(method, &pattern))
    }

    #[tracing::instrument(level = "debug", skip(self, namespace), fields(prefix = %namespace.prefix()))]
    pub fn add_namespace(&self, namespace: Namespace) -> RouterResult<()> {
        let limit = self.options.max_param_count;
        let case_sensitive = self.options.case_sensitive;
        let built = namespace.build(case_sensitive)?;
        let prefix = route_pattern(namespace.prefix(), case_sensitive);
        self.write(|registry| registry.graft(&prefix, &built, limit))
    }

    pub fn set_static_server(&self, server: Arc<dyn StaticServer>) {
        let mut guard = self.inner.write();
        Arc::make_mut(&mut guard).set_static_server(Some(server));
    }

    pub fn find(&self, method: HttpMethod, path: &str) -> Option<(Endpoint, ParamStore)> {
        let registry = self.snapshot();
        let path = request_path(path, self.options.case_sensitive);
        let mut params = ParamStore::new();
        let endpoint = registry.find(method, &path, &mut params)?.clone();
        Some((endpoint, params))
    }
}

pub(crate) fn controller_routes(
    controller: Arc<dyn Controller>,
    mapping: Option<&str>,
) -> RouterResult<Vec<(RouteMethod, Endpoint)>> {
    Ok(resolve_actions(controller.as_ref(), mapping)?
        .into_iter()
        .map(|(method, action)| {
            (
                method,
                Endpoint::Action {
                    controller: controller.clone(),
                    action,
                },
            )
        })
        .collect())
}

use http::StatusCode;
use std::sync::Arc;

use crate::context::Context;
use crate::endpoint::{Controller, Endpoint, HandlerResult};
use crate::enums::{FilterStage, HttpMethod, RouteMethod};
use crate::errors::RouterResult;
use crate::filter::{FilterEntry, FilterOptions, FilterOutcome};
use crate::path::route_pattern;
use crate::registry::RouteRegistry;
use crate::router::service::controller_routes;
use crate::tree::{CompiledRoute, compile_prefix};

const NAMESPACE_FILTER_PATTERN: &str = "*";

#[derive(Debug)]
pub struct Namespace {
    prefix: String,
    mounts: Vec<Mount>,
}

#[derive(Debug)]
enum Mount {
    Route {
        pattern: String,
        routes: Vec<(RouteMethod, Endpoint)>,
    },
    Filter {
        entry: FilterEntry,
        first: bool,
    },
    Child(Namespace),
}

impl Namespace {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            mounts: Vec::new(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub(crate) fn build(&self, case_sensitive: bool) -> RouterResult<RouteRegistry> {
        let mut registry = RouteRegistry::new();
        for mount in &self.mounts {
            match mount {
                Mount::Route { pattern, routes } => {
                    let pattern = route_pattern(pattern, case_sensitive);
                    registry.insert_route(routes, &pattern, usize::MAX)?;
                }
                Mount::Filter { entry, first: true } => registry.prepend_filter(entry.clone()),
                Mount::Filter { entry, first: false } => registry.insert_filter(entry.clone()),
                Mount::Child(child) => {
                    let built = child.build(case_sensitive)?;
                    let prefix = route_pattern(&child.prefix, case_sensitive);
                    registry.graft(&prefix, &built, usize::MAX)?;
                }
            }
        }
        Ok(registry)
    }

    fn register(mut self, pattern: &str, routes: Vec<(RouteMethod, Endpoint)>) -> RouterResult<Self> {
        CompiledRoute::compile(pattern)?;
        self.mounts.push(Mount::Route {
            pattern: pattern.to_string(),
            routes,
        });
        Ok(self)
    }

    pub fn route(self, method: impl Into<RouteMethod>, pattern: &str, endpoint: Endpoint) -> RouterResult<Self> {
        self.register(pattern, vec![(method.into(), endpoint)])
    }

    pub fn get<F>(self, pattern: &str, handler: F) -> RouterResult<Self>
    where
        F: Fn(&mut Context) -> HandlerResult + Send + Sync + 'static,
    {
        self.route(HttpMethod::Get, pattern, Endpoint::handler(handler))
    }

    pub fn post<F>(self, pattern: &str, handler: F) -> RouterResult<Self>
    where
        F: Fn(&mut Context) -> HandlerResult + Send + Sync + 'static,
    {
        self.route(HttpMethod::Post, pattern, Endpoint::handler(handler))
    }

    pub fn put<F>(self, pattern: &str, handler: F) -> RouterResult<Self>
    where
        F: Fn(&mut Context) -> HandlerResult + Send + Sync + 'static,
    {
        self.route(HttpMethod::Put, pattern, Endpoint::handler(handler))
    }

    pub fn delete<F>(self, pattern: &str, handler: F) -> RouterResult<Self>
    where
        F: Fn(&mut Context) -> HandlerResult + Send + Sync + 'static,
    {
        self.route(HttpMethod::Delete, pattern, Endpoint::handler(handler))
    }

    pub fn any<F>(self, pattern: &str, handler: F) -> RouterResult<Self>
    where
        F: Fn(&mut Context) -> HandlerResult + Send + Sync + 'static,
    {
        self.route(RouteMethod::Any, pattern, Endpoint::handler(handler))
    }

    pub fn controller(
        self,
        pattern: &str,
        controller: Arc<dyn Controller>,
        mapping: Option<&str>,
    ) -> RouterResult<Self> {
        let routes = controller_routes(controller, mapping)?;
        self.register(pattern, routes)
    }

    pub fn filter<F>(mut self, stage: FilterStage, filter: F) -> RouterResult<Self>
    where
        F: Fn(&mut Context) -> FilterOutcome + Send + Sync + 'static,
    {
        let entry = FilterEntry::new(
            NAMESPACE_FILTER_PATTERN,
            stage,
            filter,
            FilterOptions::default(),
        )?;
        self.mounts.push(Mount::Filter { entry, first: false });
        Ok(self)
    }

    /// Gates the namespace: requests for which `cond` is false get a 405
    /// before routing. Runs ahead of the namespace's other filters.
    pub fn cond<F>(mut self, cond: F) -> RouterResult<Self>
    where
        F: Fn(&Context) -> bool + Send + Sync + 'static,
    {
        let entry = FilterEntry::new(
            NAMESPACE_FILTER_PATTERN,
            FilterStage::BeforeRouter,
            move |ctx: &mut Context| {
                if cond(ctx) {
                    FilterOutcome::Continue
                } else {
                    ctx.response_mut().set_status(StatusCode::METHOD_NOT_ALLOWED);
                    FilterOutcome::Abort
                }
            },
            FilterOptions::default(),
        )?;
        self.mounts.push(Mount::Filter { entry, first: true });
        Ok(self)
    }

    pub fn namespace(mut self, child: Namespace) -> RouterResult<Self> {
        compile_prefix(&child.prefix)?;
        self.mounts.push(Mount::Child(child));
        Ok(self)
    }
}

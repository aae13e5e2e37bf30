use std::fmt;
use std::sync::Arc;

use crate::context::{Context, ParamStore};
use crate::endpoint::Endpoint;
use crate::enums::{FILTER_STAGE_COUNT, FilterStage, HTTP_METHOD_COUNT, HttpMethod, RouteMethod};
use crate::errors::{RouterError, RouterResult};
use crate::filter::{FilterChain, FilterEntry};
use crate::registry::RegistryMetrics;
use crate::tree::{CompiledRoute, PatternTree};

/// Serves a request from static content before routing, returning `true`
/// when it answered.
pub trait StaticServer: Send + Sync {
    fn serve(&self, ctx: &mut Context) -> bool;
}

// one tree per method plus the `*` tree
const TREE_COUNT: usize = HTTP_METHOD_COUNT + 1;

#[derive(Clone, Default)]
pub struct RouteRegistry {
    trees: [Option<PatternTree<Endpoint>>; TREE_COUNT],
    filters: [FilterChain; FILTER_STAGE_COUNT],
    static_server: Option<Arc<dyn StaticServer>>,
    metrics: RegistryMetrics,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_route(
        &mut self,
        methods: &[(RouteMethod, Endpoint)],
        pattern: &str,
        max_param_count: usize,
    ) -> RouterResult<()> {
        let route = CompiledRoute::compile(pattern)?;
        let count = route.max_param_count();
        if count > max_param_count {
            return Err(RouterError::TooManyParams {
                pattern: pattern.to_string(),
                count,
                limit: max_param_count,
            });
        }

        for (method, endpoint) in methods {
            self.trees[method.tree_index()]
                .get_or_insert_with(PatternTree::new)
                .insert_compiled(&route, endpoint.clone());
        }
        self.metrics.record_insert(methods.len());
        Ok(())
    }

    pub fn remove_route(&mut self, method: RouteMethod, pattern: &str) -> RouterResult<usize> {
        let removed = match self.trees[method.tree_index()].as_mut() {
            Some(tree) => tree.remove_route(pattern)?,
            None => 0,
        };
        self.metrics.record_removal(removed);
        Ok(removed)
    }

    pub fn insert_filter(&mut self, entry: FilterEntry) {
        self.filters[entry.stage() as usize].push(entry);
        self.metrics.record_filter();
    }

    pub fn prepend_filter(&mut self, entry: FilterEntry) {
        self.filters[entry.stage() as usize].push_front(entry);
        self.metrics.record_filter();
    }

    pub fn set_static_server(&mut self, server: Option<Arc<dyn StaticServer>>) {
        self.static_server = server;
    }

    pub fn static_server(&self) -> Option<&Arc<dyn StaticServer>> {
        self.static_server.as_ref()
    }

    pub fn filters(&self, stage: FilterStage) -> &FilterChain {
        &self.filters[stage as usize]
    }

    pub fn tree(&self, method: RouteMethod) -> Option<&PatternTree<Endpoint>> {
        self.trees[method.tree_index()].as_ref()
    }

    /// The request method's tree first, then the `*` tree.
    pub fn find(&self, method: HttpMethod, path: &str, params: &mut ParamStore) -> Option<&Endpoint> {
        [RouteMethod::Only(method), RouteMethod::Any]
            .into_iter()
            .filter_map(|m| self.tree(m))
            .find_map(|tree| tree.match_path(path, params))
    }

    pub fn graft(
        &mut self,
        prefix: &str,
        other: &RouteRegistry,
        max_param_count: usize,
    ) -> RouterResult<()> {
        let mut next = self.clone();

        for (slot, tree) in next.trees.iter_mut().zip(other.trees.iter()) {
            let Some(tree) = tree.as_ref().filter(|t| !t.is_empty()) else {
                continue;
            };
            let merged = slot.get_or_insert_with(PatternTree::new);
            merged.add_tree(prefix, tree)?;
            if let Some(leaf) = merged
                .leaves()
                .into_iter()
                .find(|leaf| leaf.shape().param_count() > max_param_count)
            {
                return Err(RouterError::TooManyParams {
                    pattern: leaf.pattern().to_string(),
                    count: leaf.shape().param_count(),
                    limit: max_param_count,
                });
            }
            next.metrics.record_insert(tree.leaf_count());
        }
        for stage in FilterStage::ALL {
            for entry in other.filters(stage).iter() {
                next.insert_filter(entry.with_prefix(prefix)?);
            }
        }
        next.metrics.record_namespace();

        *self = next;
        Ok(())
    }

    pub fn metrics(&self) -> RegistryMetrics {
        self.metrics
    }
}

impl fmt::Debug for RouteRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteRegistry")
            .field("trees", &self.trees.iter().filter(|t| t.is_some()).count())
            .field("filters", &self.filters)
            .field("static_server", &self.static_server.is_some())
            .field("metrics", &self.metrics)
            .finish()
    }
}

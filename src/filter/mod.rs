mod chain;

pub use chain::FilterChain;

use bitflags::bitflags;
use std::fmt;
use std::sync::Arc;

use crate::context::{Context, ParamStore};
use crate::endpoint::HandlerError;
use crate::enums::FilterStage;
use crate::path::join_canonical;
use crate::tree::{PatternTree, TreeResult};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FilterOptions: u8 {
        /// Stop the stage, and the pipeline, once the response has started.
        const RETURN_ON_OUTPUT = 0b0000_0001;
        /// Restore the request parameters after the filter runs.
        const RESET_PARAMS = 0b0000_0010;
    }
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self::RETURN_ON_OUTPUT
    }
}

#[derive(Debug)]
pub enum FilterOutcome {
    Continue,
    /// Short-circuit the rest of the pipeline without an error.
    Abort,
    Fail(HandlerError),
}

pub type FilterFn = Arc<dyn Fn(&mut Context) -> FilterOutcome + Send + Sync>;

#[derive(Clone)]
pub struct FilterEntry {
    pattern: Arc<str>,
    stage: FilterStage,
    tree: PatternTree<()>,
    filter: FilterFn,
    options: FilterOptions,
}

impl FilterEntry {
    pub fn new<F>(pattern: &str, stage: FilterStage, filter: F, options: FilterOptions) -> TreeResult<Self>
    where
        F: Fn(&mut Context) -> FilterOutcome + Send + Sync + 'static,
    {
        Self::from_fn(pattern, stage, Arc::new(filter), options)
    }

    pub fn from_fn(
        pattern: &str,
        stage: FilterStage,
        filter: FilterFn,
        options: FilterOptions,
    ) -> TreeResult<Self> {
        let mut tree = PatternTree::new();
        tree.add_route(pattern, ())?;
        Ok(Self {
            pattern: Arc::from(pattern),
            stage,
            tree,
            filter,
            options,
        })
    }

    pub(crate) fn with_prefix(&self, prefix: &str) -> TreeResult<Self> {
        let mut tree = PatternTree::new();
        tree.add_tree(prefix, &self.tree)?;
        Ok(Self {
            pattern: Arc::from(join_canonical(prefix, &self.pattern)),
            stage: self.stage,
            tree,
            filter: self.filter.clone(),
            options: self.options,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn stage(&self) -> FilterStage {
        self.stage
    }

    pub fn options(&self) -> FilterOptions {
        self.options
    }

    pub(crate) fn matches(&self, path: &str, params: &mut ParamStore) -> bool {
        self.tree.match_path(path, params).is_some()
    }

    pub(crate) fn call(&self, ctx: &mut Context) -> FilterOutcome {
        (self.filter)(ctx)
    }
}

impl fmt::Debug for FilterEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterEntry")
            .field("pattern", &self.pattern)
            .field("stage", &self.stage)
            .field("options", &self.options)
            .finish()
    }
}

//! Segment trie mapping route patterns to values.
//!
//! Literal edges are exact segment matches, a node has at most one wildcard
//! edge, and every terminal registration is a [`LeafBinding`] that knows how
//! to turn the values collected along wildcard edges into named parameters.

mod compile;
mod error;
mod graft;
mod leaf;
mod matcher;
mod node;
mod remove;
mod traversal;

pub use compile::CompiledRoute;
pub use error::{TreeError, TreeResult};
pub use leaf::{LeafBinding, LeafShape};
pub use node::NodeId;

pub(crate) use compile::Step;
pub(crate) use graft::compile_prefix;
pub(crate) use node::PatternNode;

#[derive(Debug, Clone)]
pub struct PatternTree<T> {
    nodes: Vec<PatternNode<T>>,
    free: Vec<NodeId>,
    leaf_count: usize,
}

impl<T> Default for PatternTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PatternTree<T> {
    pub fn new() -> Self {
        Self {
            nodes: vec![PatternNode::default()],
            free: Vec::new(),
            leaf_count: 0,
        }
    }

    /// Registers `value` under `pattern`. On error the tree is unchanged.
    pub fn add_route(&mut self, pattern: &str, value: T) -> TreeResult<()>
    where
        T: Clone,
    {
        let route = CompiledRoute::compile(pattern)?;
        self.insert_compiled(&route, value);
        Ok(())
    }

    pub fn insert_compiled(&mut self, route: &CompiledRoute, value: T)
    where
        T: Clone,
    {
        for variant in route.variants() {
            let node = self.walk_or_create(NodeId::ROOT, &variant.steps);
            self.node_mut(node)
                .leaves
                .push(LeafBinding::new(variant.shape.clone(), value.clone()));
            self.leaf_count += 1;
        }
        tracing::trace!(
            pattern = route.pattern(),
            variants = route.variant_count(),
            "route inserted"
        );
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaf_count == 0
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &PatternNode<T> {
        &self.nodes[id.index()]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut PatternNode<T> {
        &mut self.nodes[id.index()]
    }

    fn alloc(&mut self) -> NodeId {
        match self.free.pop() {
            Some(id) => id,
            None => {
                self.nodes.push(PatternNode::default());
                NodeId::new(self.nodes.len() - 1)
            }
        }
    }

    pub(crate) fn release(&mut self, id: NodeId) {
        *self.node_mut(id) = PatternNode::default();
        self.free.push(id);
    }

    pub(crate) fn literal_child_or_insert(&mut self, parent: NodeId, segment: &str) -> NodeId {
        if let Some(&child) = self.node(parent).literal_children.get(segment) {
            return child;
        }
        let child = self.alloc();
        self.node_mut(parent)
            .literal_children
            .insert(segment.into(), child);
        child
    }

    pub(crate) fn wildcard_child_or_insert(&mut self, parent: NodeId) -> NodeId {
        if let Some(child) = self.node(parent).wildcard_child {
            return child;
        }
        let child = self.alloc();
        self.node_mut(parent).wildcard_child = Some(child);
        child
    }

    pub(crate) fn walk_or_create(&mut self, start: NodeId, steps: &[Step]) -> NodeId {
        steps.iter().fold(start, |node, step| match step {
            Step::Literal(segment) => self.literal_child_or_insert(node, segment),
            Step::Wildcard => self.wildcard_child_or_insert(node),
        })
    }
}

use hashbrown::HashMap as FastHashMap;
use smallvec::SmallVec;

use super::LeafBinding;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) const ROOT: NodeId = NodeId(0);

    #[inline]
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub(crate) struct PatternNode<T> {
    pub(crate) literal_children: FastHashMap<Box<str>, NodeId>,
    pub(crate) wildcard_child: Option<NodeId>,
    pub(crate) leaves: SmallVec<[LeafBinding<T>; 1]>,
}

impl<T> Default for PatternNode<T> {
    fn default() -> Self {
        Self {
            literal_children: FastHashMap::new(),
            wildcard_child: None,
            leaves: SmallVec::new(),
        }
    }
}

impl<T> PatternNode<T> {
    #[inline]
    pub(crate) fn is_prunable(&self) -> bool {
        self.leaves.is_empty() && self.literal_children.is_empty() && self.wildcard_child.is_none()
    }
}

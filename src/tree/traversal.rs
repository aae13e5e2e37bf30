use super::{LeafBinding, NodeId, PatternNode, PatternTree};

const TRAVERSAL_STACK_CAPACITY: usize = 64;

impl<T> PatternTree<T> {
    pub(crate) fn traverse<'a, F>(&'a self, mut action: F)
    where
        F: FnMut(NodeId, &'a PatternNode<T>),
    {
        let mut stack: Vec<NodeId> = Vec::with_capacity(TRAVERSAL_STACK_CAPACITY);
        stack.push(NodeId::ROOT);

        while let Some(id) = stack.pop() {
            let node = self.node(id);
            action(id, node);

            stack.extend(node.literal_children.values().copied());
            if let Some(child) = node.wildcard_child {
                stack.push(child);
            }
        }
    }

    pub fn leaves(&self) -> Vec<&LeafBinding<T>> {
        let mut out = Vec::with_capacity(self.leaf_count());
        self.traverse(|_, node| out.extend(node.leaves.iter()));
        out
    }
}

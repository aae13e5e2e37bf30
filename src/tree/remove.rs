use super::{CompiledRoute, NodeId, PatternTree, Step, TreeResult};

impl<T> PatternTree<T> {
    /// Removes every leaf registered under `pattern` and prunes the nodes
    /// that no longer lead anywhere. Returns the number of leaves removed.
    #[tracing::instrument(level = "trace", skip(self), fields(pattern = %pattern))]
    pub fn remove_route(&mut self, pattern: &str) -> TreeResult<usize> {
        let route = CompiledRoute::compile(pattern)?;
        let mut removed = 0;

        'variants: for variant in route.variants() {
            let mut node = NodeId::ROOT;
            let mut trail: Vec<(NodeId, &Step)> = Vec::with_capacity(variant.steps.len());

            for step in &variant.steps {
                let current = self.node(node);
                let next = match step {
                    Step::Literal(segment) => current.literal_children.get(segment).copied(),
                    Step::Wildcard => current.wildcard_child,
                };
                let Some(next) = next else {
                    continue 'variants;
                };
                trail.push((node, step));
                node = next;
            }

            let leaves = &mut self.node_mut(node).leaves;
            let before = leaves.len();
            leaves.retain(|leaf| leaf.pattern() != route.pattern());
            let count = before - leaves.len();

            removed += count;
            self.leaf_count -= count;
            self.prune(node, &trail);
        }

        Ok(removed)
    }

    fn prune(&mut self, mut node: NodeId, trail: &[(NodeId, &Step)]) {
        for &(parent, step) in trail.iter().rev() {
            if !self.node(node).is_prunable() {
                break;
            }
            let owner = self.node_mut(parent);
            match step {
                Step::Literal(segment) => {
                    owner.literal_children.remove(segment);
                }
                Step::Wildcard => owner.wildcard_child = None,
            }
            self.release(node);
            node = parent;
        }
    }
}

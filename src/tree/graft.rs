use hashbrown::HashMap as FastHashMap;
use smallvec::SmallVec;

use crate::path::{join_canonical, split_path};
use crate::pattern::{Capture, SegmentSpec, parse_segment};

use super::{LeafBinding, NodeId, PatternTree, Step, TreeError, TreeResult};

type PendingLeaves<T> = FastHashMap<NodeId, SmallVec<[LeafBinding<T>; 1]>>;

impl<T: Clone> PatternTree<T> {
    #[tracing::instrument(level = "trace", skip(self, subtree), fields(prefix = %prefix, leaves = subtree.leaf_count()))]
    pub fn add_tree(&mut self, prefix: &str, subtree: &PatternTree<T>) -> TreeResult<()> {
        let (steps, captures) = compile_prefix(prefix)?;

        // rebuild every leaf first; a failure here leaves `self` untouched
        let mut pending: PendingLeaves<T> = FastHashMap::new();
        let mut failure = None;
        subtree.traverse(|id, node| {
            for leaf in node.leaves.iter() {
                let pattern = join_canonical(prefix, leaf.pattern());
                match leaf.shape().with_prefix(pattern, &captures) {
                    Ok(shape) => pending
                        .entry(id)
                        .or_default()
                        .push(LeafBinding::new(shape, leaf.value().clone())),
                    Err(err) => {
                        failure.get_or_insert(err);
                    }
                }
            }
        });
        if let Some(err) = failure {
            return Err(err.into());
        }

        let target = self.walk_or_create(NodeId::ROOT, &steps);
        self.merge(target, subtree, pending);
        Ok(())
    }

    fn merge(&mut self, target: NodeId, subtree: &PatternTree<T>, mut pending: PendingLeaves<T>) {
        let mut stack = vec![(target, NodeId::ROOT)];

        while let Some((into, from)) = stack.pop() {
            if let Some(leaves) = pending.remove(&from) {
                self.leaf_count += leaves.len();
                self.node_mut(into).leaves.extend(leaves);
            }

            let source = subtree.node(from);
            for (segment, &child) in source.literal_children.iter() {
                let next = self.literal_child_or_insert(into, segment);
                stack.push((next, child));
            }
            if let Some(child) = source.wildcard_child {
                let next = self.wildcard_child_or_insert(into);
                stack.push((next, child));
            }
        }
    }
}

pub(crate) fn compile_prefix(prefix: &str) -> TreeResult<(Vec<Step>, Vec<Capture>)> {
    let segments = split_path(prefix);
    if segments.is_empty() {
        return Err(TreeError::EmptyPrefix {
            prefix: prefix.to_string(),
        });
    }

    let mut steps = Vec::with_capacity(segments.len());
    let mut captures = Vec::new();
    for seg in segments {
        let spec = parse_segment(seg)?;
        match &spec {
            SegmentSpec::Literal(text) => steps.push(Step::Literal(text.as_str().into())),
            SegmentSpec::Param {
                optional: false, ..
            } => {
                steps.push(Step::Wildcard);
                captures.extend(Capture::for_segment(&spec, false));
            }
            _ => {
                return Err(TreeError::UnsupportedPrefixSegment {
                    prefix: prefix.to_string(),
                    segment: seg.to_string(),
                });
            }
        }
    }
    Ok((steps, captures))
}

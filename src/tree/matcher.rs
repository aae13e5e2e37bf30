use smallvec::SmallVec;

use crate::context::ParamStore;
use crate::path::next_segment;

use super::leaf::Bindings;
use super::{LeafBinding, NodeId, PatternTree};

const ALLOWED_EXTENSIONS: [&str; 3] = [".json", ".xml", ".html"];

type Values<'p> = SmallVec<[&'p str; 8]>;

struct Matched<'t, T> {
    leaf: &'t LeafBinding<T>,
    bindings: Bindings<'t>,
    ext: Option<&'static str>,
}

impl<T> Matched<'_, T> {
    fn apply(self, params: &mut ParamStore) {
        let mut written: SmallVec<[&str; 4]> = SmallVec::new();
        for (name, value) in self.bindings {
            if written.contains(&name) {
                params.add(name, value);
            } else {
                params.set(name, value);
                written.push(name);
            }
        }
        if let Some(ext) = self.ext {
            params.set(crate::pattern::EXT_PARAM, ext);
        }
    }
}

impl<T> PatternTree<T> {
    /// Resolves `path` (which must start with '/') to a value. Parameters are
    /// written into `params` only when a leaf matches.
    pub fn match_path(&self, path: &str, params: &mut ParamStore) -> Option<&T> {
        self.match_leaf(path, params).map(LeafBinding::value)
    }

    pub fn match_leaf(&self, path: &str, params: &mut ParamStore) -> Option<&LeafBinding<T>> {
        let rest = path.strip_prefix('/')?;
        let mut values = Values::new();
        let matched = self.match_node(NodeId::ROOT, rest, rest, None, &mut values)?;
        let leaf = matched.leaf;
        matched.apply(params);
        Some(leaf)
    }

    // `carried` is the unsplit path from the value bound on the way into a
    // wildcard node.
    fn match_node<'t, 'p>(
        &'t self,
        id: NodeId,
        tree_pattern: &'p str,
        pattern: &'p str,
        carried: Option<&'p str>,
        values: &mut Values<'p>,
    ) -> Option<Matched<'t, T>> {
        let node = self.node(id);
        let pattern = pattern.trim_start_matches('/');

        if pattern.is_empty() {
            if let Some(found) = match_leaves(&node.leaves, tree_pattern, values) {
                return Some(found);
            }
            let wildcard = node.wildcard_child?;
            return match_leaves(&self.node(wildcard).leaves, tree_pattern, values);
        }

        let (seg, rest) = next_segment(pattern);
        let after_literal = rest.strip_prefix('/').unwrap_or(rest);

        if let Some(&child) = node.literal_children.get(seg)
            && let Some(found) = self.match_node(child, after_literal, rest, None, values)
        {
            return Some(found);
        }

        if !node.literal_children.is_empty() {
            for ext in ALLOWED_EXTENSIONS {
                if let Some(stem) = seg.strip_suffix(ext)
                    && let Some(&child) = node.literal_children.get(stem)
                    && let Some(mut found) = self.match_node(child, after_literal, rest, None, values)
                {
                    found.ext = Some(&ext[1..]);
                    return Some(found);
                }
            }
        }

        if let Some(wildcard) = node.wildcard_child {
            let mark = values.len();
            values.push(seg);
            let found = self.match_node(wildcard, tree_pattern, rest, Some(pattern), values);
            values.truncate(mark);
            if found.is_some() {
                return found;
            }
        }

        // a leaf here may still accept the remaining segments as one flat value
        // list; regex leaves see the remainder unsplit
        if !node.leaves.is_empty() {
            let (kept, raw) = match carried {
                Some(raw) => (values.len().saturating_sub(1), raw),
                None => (values.len(), pattern),
            };
            let mark = values.len();
            values.push(seg);
            values.extend(rest.split('/').filter(|s| !s.is_empty()));
            let flat: &[&str] = values;
            let found = node.leaves.iter().find_map(|leaf| {
                let shape = leaf.shape();
                let bindings = if shape.regex().is_some() {
                    shape.try_bind_raw(&flat[..kept], raw)
                } else {
                    shape.try_bind(tree_pattern, flat)
                }?;
                Some(Matched {
                    leaf,
                    bindings,
                    ext: None,
                })
            });
            values.truncate(mark);
            return found;
        }

        None
    }
}

fn match_leaves<'t, T>(
    leaves: &'t [LeafBinding<T>],
    tree_pattern: &str,
    values: &[&str],
) -> Option<Matched<'t, T>> {
    leaves.iter().find_map(|leaf| {
        leaf.shape()
            .try_bind(tree_pattern, values)
            .map(|bindings| Matched {
                leaf,
                bindings,
                ext: None,
            })
    })
}

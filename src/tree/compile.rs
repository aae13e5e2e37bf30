use crate::path::{canonical_pattern, split_path};
use crate::pattern::{Capture, PatternResult, SegmentSpec, parse_segment};

use super::{LeafShape, TreeResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Step {
    Literal(Box<str>),
    Wildcard,
}

#[derive(Debug, Clone)]
pub(crate) struct RouteVariant {
    pub(crate) steps: Vec<Step>,
    pub(crate) shape: LeafShape,
}

#[derive(Debug, Clone)]
pub struct CompiledRoute {
    pattern: String,
    variants: Vec<RouteVariant>,
}

#[derive(Debug, Clone, Default)]
struct Partial {
    steps: Vec<Step>,
    captures: Vec<Capture>,
    after_splat: bool,
}

impl Partial {
    fn push(&mut self, spec: &SegmentSpec) {
        match Capture::for_segment(spec, self.after_splat) {
            Some(capture) => {
                self.after_splat |= capture.is_splat();
                self.steps.push(Step::Wildcard);
                self.captures.push(capture);
            }
            None => {
                if let SegmentSpec::Literal(text) = spec {
                    self.steps.push(Step::Literal(text.as_str().into()));
                }
            }
        }
    }
}

impl CompiledRoute {
    #[tracing::instrument(level = "trace", fields(pattern = %pattern))]
    pub fn compile(pattern: &str) -> TreeResult<Self> {
        let canonical = canonical_pattern(pattern);
        let specs = split_path(pattern)
            .into_iter()
            .map(parse_segment)
            .collect::<PatternResult<Vec<_>>>()?;

        let mut partials = Vec::new();
        expand(&specs, Partial::default(), &mut partials);

        let variants = partials
            .into_iter()
            .map(|partial| {
                Ok(RouteVariant {
                    steps: partial.steps,
                    shape: LeafShape::new(canonical.clone(), partial.captures)?,
                })
            })
            .collect::<PatternResult<Vec<_>>>()?;

        Ok(Self {
            pattern: canonical,
            variants,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    pub fn max_param_count(&self) -> usize {
        self.variants
            .iter()
            .map(|v| v.shape.param_count())
            .max()
            .unwrap_or(0)
    }

    pub(crate) fn variants(&self) -> &[RouteVariant] {
        &self.variants
    }
}

// optional segments fork: the variant without the segment is emitted first
fn expand(specs: &[SegmentSpec], partial: Partial, out: &mut Vec<Partial>) {
    let Some((spec, rest)) = specs.split_first() else {
        out.push(partial);
        return;
    };

    if spec.is_optional() {
        expand(rest, partial.clone(), out);
    }
    let mut next = partial;
    next.push(spec);
    expand(rest, next, out);
}

use memchr::memrchr;
use smallvec::{SmallVec, smallvec};

use crate::pattern::{Capture, LeafRegex, PatternResult, requires_regex};

pub(crate) type Bindings<'t> = SmallVec<[(&'t str, String); 4]>;

#[derive(Debug, Clone)]
pub struct LeafShape {
    pattern: Box<str>,
    captures: Vec<Capture>,
    names: SmallVec<[Box<str>; 4]>,
    regex: Option<LeafRegex>,
}

impl LeafShape {
    pub(crate) fn new(pattern: String, captures: Vec<Capture>) -> PatternResult<Self> {
        let regex = if requires_regex(&captures) {
            Some(LeafRegex::compile(&captures)?)
        } else {
            None
        };
        let names = captures
            .iter()
            .flat_map(|c| c.names.iter().cloned())
            .collect();

        Ok(Self {
            pattern: pattern.into_boxed_str(),
            captures,
            names,
            regex,
        })
    }

    pub(crate) fn with_prefix(&self, pattern: String, prefix: &[Capture]) -> PatternResult<Self> {
        let captures = prefix
            .iter()
            .chain(self.captures.iter())
            .cloned()
            .collect();
        Self::new(pattern, captures)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|n| n.as_ref())
    }

    pub fn param_count(&self) -> usize {
        self.names.len()
    }

    pub fn regex(&self) -> Option<&LeafRegex> {
        self.regex.as_ref()
    }

    pub(crate) fn try_bind<'t>(&'t self, tree_pattern: &str, values: &[&str]) -> Option<Bindings<'t>> {
        if self.regex.is_some() {
            return self.bind_regex(&values.join("/"));
        }

        match self.captures.as_slice() {
            [] => values.is_empty().then(Bindings::new),
            [only] if only.is_splat() => {
                Some(smallvec![(self.names[0].as_ref(), tree_pattern.to_string())])
            }
            [.., last] if last.is_path_ext() => self.bind_path_ext(values),
            _ if self.names.len() == values.len() => Some(
                self.names
                    .iter()
                    .zip(values)
                    .map(|(name, value)| (name.as_ref(), value.to_string()))
                    .collect(),
            ),
            _ => None,
        }
    }

    pub(crate) fn try_bind_raw<'t>(&'t self, values: &[&str], raw: &str) -> Option<Bindings<'t>> {
        let mut joined = values.join("/");
        if !joined.is_empty() {
            joined.push('/');
        }
        joined.push_str(raw.trim_end_matches('/'));
        self.bind_regex(&joined)
    }

    fn bind_regex<'t>(&'t self, joined: &str) -> Option<Bindings<'t>> {
        let bound = self.regex.as_ref()?.bind(joined)?;
        Some(
            self.names
                .iter()
                .zip(bound)
                .filter_map(|(name, value)| value.map(|v| (name.as_ref(), v.to_string())))
                .collect(),
        )
    }

    // trailing `*.*`: leading names bind positionally, the rest of the values
    // fold into :path, and the text after the last '.' becomes :ext
    fn bind_path_ext<'t>(&'t self, values: &[&str]) -> Option<Bindings<'t>> {
        let k = self.names.len() - 2;
        if values.len() < k + 1 {
            return None;
        }

        let mut out: Bindings<'t> = self.names[..k]
            .iter()
            .zip(values)
            .map(|(name, value)| (name.as_ref(), value.to_string()))
            .collect();

        let (last, init) = values[k..].split_last()?;
        let (stem, ext) = match memrchr(b'.', last.as_bytes()) {
            Some(dot) => (&last[..dot], Some(&last[dot + 1..])),
            None => (*last, None),
        };
        let path = init
            .iter()
            .copied()
            .chain(std::iter::once(stem))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("/");

        out.push((self.names[k].as_ref(), path));
        if let Some(ext) = ext {
            out.push((self.names[k + 1].as_ref(), ext.to_string()));
        }
        Some(out)
    }
}

#[derive(Debug, Clone)]
pub struct LeafBinding<T> {
    shape: LeafShape,
    value: T,
}

impl<T> LeafBinding<T> {
    pub(crate) fn new(shape: LeafShape, value: T) -> Self {
        Self { shape, value }
    }

    pub fn shape(&self) -> &LeafShape {
        &self.shape
    }

    pub fn pattern(&self) -> &str {
        self.shape.pattern()
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}

use smallvec::{SmallVec, smallvec};
use std::sync::Arc;

pub const SPLAT_PARAM: &str = ":splat";
pub const PATH_PARAM: &str = ":path";
pub const EXT_PARAM: &str = ":ext";

pub type ParamNames = SmallVec<[Box<str>; 2]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentPart {
    Literal(String),
    Param {
        name: String,
        constraint: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamFragment {
    source: Box<str>,
    // group position of each name, relative to the fragment's first group
    offsets: SmallVec<[usize; 2]>,
    groups: usize,
}

impl ParamFragment {
    pub(crate) fn new(source: String, offsets: SmallVec<[usize; 2]>, groups: usize) -> Self {
        Self {
            source: source.into_boxed_str(),
            offsets,
            groups,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    pub fn groups(&self) -> usize {
        self.groups
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentSpec {
    Literal(String),
    Splat,
    PathExt,
    Param {
        optional: bool,
        names: ParamNames,
        fragment: Option<Arc<ParamFragment>>,
    },
}

impl SegmentSpec {
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Param { optional: true, .. })
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureKind {
    Plain,
    Splat,
    PathExt,
    Fragment(Arc<ParamFragment>),
    /// Literal segment that follows a splat; it consumes a wildcard value but
    /// binds nothing.
    Literal(Box<str>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub kind: CaptureKind,
    pub names: ParamNames,
}

impl Capture {
    pub fn plain(name: Box<str>) -> Self {
        Self {
            kind: CaptureKind::Plain,
            names: smallvec![name],
        }
    }

    pub fn splat() -> Self {
        Self {
            kind: CaptureKind::Splat,
            names: smallvec![SPLAT_PARAM.into()],
        }
    }

    pub fn path_ext() -> Self {
        Self {
            kind: CaptureKind::PathExt,
            names: smallvec![PATH_PARAM.into(), EXT_PARAM.into()],
        }
    }

    pub fn fragment(names: ParamNames, fragment: Arc<ParamFragment>) -> Self {
        Self {
            kind: CaptureKind::Fragment(fragment),
            names,
        }
    }

    pub fn literal(text: &str) -> Self {
        Self {
            kind: CaptureKind::Literal(text.into()),
            names: SmallVec::new(),
        }
    }

    pub(crate) fn for_segment(spec: &SegmentSpec, after_splat: bool) -> Option<Self> {
        match spec {
            SegmentSpec::Literal(text) => after_splat.then(|| Self::literal(text)),
            SegmentSpec::Splat => Some(Self::splat()),
            SegmentSpec::PathExt => Some(Self::path_ext()),
            SegmentSpec::Param {
                names,
                fragment: None,
                ..
            } => names.first().cloned().map(Self::plain),
            SegmentSpec::Param {
                names,
                fragment: Some(fragment),
                ..
            } => Some(Self::fragment(names.clone(), fragment.clone())),
        }
    }

    pub fn is_splat(&self) -> bool {
        matches!(self.kind, CaptureKind::Splat)
    }

    pub fn is_path_ext(&self) -> bool {
        matches!(self.kind, CaptureKind::PathExt)
    }

    pub(crate) fn group_count(&self) -> usize {
        match &self.kind {
            CaptureKind::Plain | CaptureKind::Splat => 1,
            CaptureKind::PathExt => 2,
            CaptureKind::Fragment(fragment) => fragment.groups(),
            CaptureKind::Literal(_) => 0,
        }
    }
}

use regex::Regex;
use smallvec::SmallVec;

use super::{Capture, CaptureKind, PatternError, PatternResult};

const PLAIN_SOURCE: &str = "([^/]+)";
const SPLAT_SOURCE: &str = "(.+)";
// a trailing splat may match nothing, as it does when bound positionally
const TRAILING_SPLAT_SOURCE: &str = "(?:/|$)(.*)";
const PATH_EXT_SOURCE: &str = r"(.+?)(?:\.([^./]*))?";

pub fn requires_regex(captures: &[Capture]) -> bool {
    let has_splat = captures.iter().any(Capture::is_splat);
    let path_ext_not_last = captures
        .iter()
        .rev()
        .skip(1)
        .any(Capture::is_path_ext);

    path_ext_not_last
        || (has_splat && captures.len() > 1)
        || captures
            .iter()
            .any(|c| matches!(c.kind, CaptureKind::Fragment(_) | CaptureKind::Literal(_)))
}

// Last capture when it is a splat and every capture ahead of it stays
// within one segment.
fn trailing_splat_index(captures: &[Capture]) -> Option<usize> {
    let (last, init) = captures.split_last()?;
    let single_segment = init.iter().all(|c| matches!(c.kind, CaptureKind::Plain));
    (last.is_splat() && single_segment).then(|| captures.len() - 1)
}

#[derive(Debug, Clone)]
pub struct LeafRegex {
    regex: Regex,
    // capture group of each parameter name, in leaf order
    groups: SmallVec<[usize; 4]>,
}

impl LeafRegex {
    pub fn compile(captures: &[Capture]) -> PatternResult<Self> {
        let mut source = String::from("^");
        let mut groups = SmallVec::new();
        let mut next_group = 1usize;

        let trailing_splat = trailing_splat_index(captures);

        for (i, capture) in captures.iter().enumerate() {
            if Some(i) == trailing_splat {
                source.push_str(if i > 0 { TRAILING_SPLAT_SOURCE } else { "(.*)" });
                groups.push(next_group);
                next_group += capture.group_count();
                continue;
            }
            if i > 0 {
                source.push('/');
            }
            match &capture.kind {
                CaptureKind::Plain => {
                    source.push_str(PLAIN_SOURCE);
                    groups.push(next_group);
                }
                CaptureKind::Splat => {
                    source.push_str(SPLAT_SOURCE);
                    groups.push(next_group);
                }
                CaptureKind::PathExt => {
                    source.push_str(PATH_EXT_SOURCE);
                    groups.push(next_group);
                    groups.push(next_group + 1);
                }
                CaptureKind::Fragment(fragment) => {
                    source.push_str(fragment.source());
                    groups.extend(fragment.offsets().iter().map(|off| next_group + off));
                }
                CaptureKind::Literal(text) => source.push_str(&regex::escape(text)),
            }
            next_group += capture.group_count();
        }
        source.push('$');

        let regex = Regex::new(&source).map_err(|err| PatternError::LeafRegexInvalid {
            source_regex: source.clone(),
            reason: err.to_string(),
        })?;

        Ok(Self { regex, groups })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Values for each parameter, in leaf order. `None` entries are groups
    /// that did not participate (an absent extension).
    pub fn bind<'v>(&self, joined: &'v str) -> Option<SmallVec<[Option<&'v str>; 4]>> {
        let caps = self.regex.captures(joined)?;
        Some(
            self.groups
                .iter()
                .map(|g| caps.get(*g).map(|m| m.as_str()))
                .collect(),
        )
    }
}

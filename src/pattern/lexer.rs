use regex::Regex;
use smallvec::{SmallVec, smallvec};
use std::sync::Arc;

use super::{ParamFragment, ParamNames, PatternError, PatternResult, SegmentPart, SegmentSpec};

const INT_CONSTRAINT: &str = "[0-9]+";
const STRING_CONSTRAINT: &str = r"[\w]+";
const DEFAULT_CONSTRAINT: &str = ".+";

/// Recognised forms: `*`, `*.*`, `:name`, `?:name`, `:name:int`,
/// `:name:string`, `:name(regex)` and compounds such as
/// `file-:id([0-9]+).html`. Anything without a ':' is a literal.
#[tracing::instrument(level = "trace", fields(segment = %seg))]
pub fn parse_segment(seg: &str) -> PatternResult<SegmentSpec> {
    match seg {
        "*" => return Ok(SegmentSpec::Splat),
        "*.*" => return Ok(SegmentSpec::PathExt),
        _ if seg.starts_with('*') => {
            return Err(PatternError::InvalidWildcard {
                segment: seg.to_string(),
            });
        }
        _ => {}
    }

    let (optional, body) = match seg.strip_prefix('?') {
        Some(rest) if rest.starts_with(':') => (true, rest),
        _ => (false, seg),
    };

    if !body.contains(':') {
        return Ok(SegmentSpec::Literal(seg.to_string()));
    }

    let parts = tokenize(seg, body)?;

    if let [SegmentPart::Param {
        name,
        constraint: None,
    }] = parts.as_slice()
    {
        return Ok(SegmentSpec::Param {
            optional,
            names: smallvec![name.as_str().into()],
            fragment: None,
        });
    }

    let (names, fragment) = build_fragment(seg, &parts)?;
    Ok(SegmentSpec::Param {
        optional,
        names,
        fragment: Some(Arc::new(fragment)),
    })
}

fn tokenize(seg: &str, body: &str) -> PatternResult<Vec<SegmentPart>> {
    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut rest = body;
    let mut open = 0usize;

    while let Some(c) = rest.chars().next() {
        if c != ':' {
            match c {
                '(' => open += 1,
                ')' if open == 0 => {
                    return Err(PatternError::ParenUnbalanced {
                        segment: seg.to_string(),
                    });
                }
                ')' => open -= 1,
                _ => {}
            }
            literal.push(c);
            rest = &rest[c.len_utf8()..];
            continue;
        }

        let after = &rest[1..];
        let name_len = after
            .bytes()
            .take_while(|b| is_name_byte(*b))
            .count();
        if name_len == 0 {
            return Err(PatternError::ParameterNameEmpty {
                segment: seg.to_string(),
            });
        }
        if !literal.is_empty() {
            parts.push(SegmentPart::Literal(std::mem::take(&mut literal)));
        }

        let name = format!(":{}", &after[..name_len]);
        rest = &after[name_len..];

        let constraint = if let Some(tail) = strip_type_suffix(rest, ":int") {
            rest = tail;
            Some(INT_CONSTRAINT.to_string())
        } else if let Some(tail) = strip_type_suffix(rest, ":string") {
            rest = tail;
            Some(STRING_CONSTRAINT.to_string())
        } else if rest.starts_with('(') {
            let (inner, tail) = read_group(seg, rest)?;
            if inner.is_empty() {
                return Err(PatternError::ConstraintEmpty {
                    segment: seg.to_string(),
                    name,
                });
            }
            rest = tail;
            Some(inner.to_string())
        } else {
            None
        };

        parts.push(SegmentPart::Param { name, constraint });
    }

    if open > 0 {
        return Err(PatternError::ParenUnbalanced {
            segment: seg.to_string(),
        });
    }
    if !literal.is_empty() {
        parts.push(SegmentPart::Literal(literal));
    }
    Ok(parts)
}

#[inline]
fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn strip_type_suffix<'a>(rest: &'a str, suffix: &str) -> Option<&'a str> {
    let tail = rest.strip_prefix(suffix)?;
    match tail.bytes().next() {
        Some(b) if is_name_byte(b) => None,
        _ => Some(tail),
    }
}

fn read_group<'a>(seg: &str, rest: &'a str) -> PatternResult<(&'a str, &'a str)> {
    let mut depth = 0usize;
    let mut escaped = false;

    for (i, b) in rest.bytes().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' => escaped = true,
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&rest[1..i], &rest[i + 1..]));
                }
            }
            _ => {}
        }
    }

    Err(PatternError::ConstraintUnclosed {
        segment: seg.to_string(),
    })
}

fn build_fragment(seg: &str, parts: &[SegmentPart]) -> PatternResult<(ParamNames, ParamFragment)> {
    let mut names = ParamNames::new();
    let mut offsets: SmallVec<[usize; 2]> = SmallVec::new();
    let mut source = String::new();
    let mut groups = 0usize;

    for part in parts {
        match part {
            SegmentPart::Literal(text) => source.push_str(&regex::escape(text)),
            SegmentPart::Param { name, constraint } => {
                let inner = constraint.as_deref().unwrap_or(DEFAULT_CONSTRAINT);
                let nested = Regex::new(inner)
                    .map_err(|err| PatternError::RegexConstraintInvalid {
                        segment: seg.to_string(),
                        name: name.clone(),
                        reason: err.to_string(),
                    })?
                    .captures_len()
                    - 1;

                offsets.push(groups);
                groups += 1 + nested;
                source.push('(');
                source.push_str(inner);
                source.push(')');
                names.push(name.as_str().into());
            }
        }
    }

    Ok((names, ParamFragment::new(source, offsets, groups)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(spec: &SegmentSpec) -> Vec<&str> {
        match spec {
            SegmentSpec::Param { names, .. } => names.iter().map(|n| n.as_ref()).collect(),
            other => panic!("expected param segment, got {other:?}"),
        }
    }

    #[test]
    fn parse_segment_when_plain_text_then_literal() {
        assert_eq!(
            parse_segment("users").expect("literal should parse"),
            SegmentSpec::Literal("users".into())
        );
        assert_eq!(
            parse_segment("?q").expect("question mark literal should parse"),
            SegmentSpec::Literal("?q".into())
        );
    }

    #[test]
    fn parse_segment_when_wildcards_then_splat_and_path_ext() {
        assert_eq!(parse_segment("*").expect("splat"), SegmentSpec::Splat);
        assert_eq!(parse_segment("*.*").expect("path ext"), SegmentSpec::PathExt);
        match parse_segment("*abc").expect_err("bad wildcard") {
            PatternError::InvalidWildcard { segment } => assert_eq!(segment, "*abc"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_segment_when_plain_param_then_no_fragment() {
        let spec = parse_segment(":id").expect("param should parse");
        assert_eq!(names(&spec), vec![":id"]);
        assert!(!spec.is_optional());
        assert!(matches!(spec, SegmentSpec::Param { fragment: None, .. }));
    }

    #[test]
    fn parse_segment_when_optional_marker_then_optional() {
        let spec = parse_segment("?:id").expect("optional param should parse");
        assert!(spec.is_optional());
        assert_eq!(names(&spec), vec![":id"]);
    }

    #[test]
    fn parse_segment_when_typed_param_then_fragment_uses_type_regex() {
        let spec = parse_segment(":id:int").expect("int param should parse");
        match spec {
            SegmentSpec::Param {
                fragment: Some(fragment),
                ..
            } => assert_eq!(fragment.source(), "([0-9]+)"),
            other => panic!("unexpected segment: {other:?}"),
        }

        let spec = parse_segment(":name:string").expect("string param should parse");
        match spec {
            SegmentSpec::Param {
                fragment: Some(fragment),
                ..
            } => assert_eq!(fragment.source(), r"([\w]+)"),
            other => panic!("unexpected segment: {other:?}"),
        }
    }

    #[test]
    fn parse_segment_when_compound_then_literals_escaped_and_groups_offset() {
        let spec = parse_segment("asana:id([0-9]+)-:page((a|b)+).html")
            .expect("compound segment should parse");
        assert_eq!(names(&spec), vec![":id", ":page"]);
        match spec {
            SegmentSpec::Param {
                fragment: Some(fragment),
                ..
            } => {
                assert_eq!(fragment.source(), r"asana([0-9]+)\-((a|b)+)\.html");
                assert_eq!(fragment.offsets(), &[0, 1]);
                assert_eq!(fragment.groups(), 3);
            }
            other => panic!("unexpected segment: {other:?}"),
        }
    }

    #[test]
    fn parse_segment_when_compound_without_constraint_then_defaults_to_any() {
        let spec = parse_segment(":a_:b").expect("compound should parse");
        assert_eq!(names(&spec), vec![":a_", ":b"]);

        let spec = parse_segment("v:ver.json").expect("prefixed param should parse");
        match spec {
            SegmentSpec::Param {
                fragment: Some(fragment),
                ..
            } => assert_eq!(fragment.source(), r"v(.+)\.json"),
            other => panic!("unexpected segment: {other:?}"),
        }
    }

    #[test]
    fn parse_segment_when_constraint_malformed_then_errors() {
        match parse_segment(":id([0-9]+").expect_err("unclosed constraint") {
            PatternError::ConstraintUnclosed { .. } => {}
            other => panic!("unexpected error: {other:?}"),
        }
        match parse_segment(":id()").expect_err("empty constraint") {
            PatternError::ConstraintEmpty { name, .. } => assert_eq!(name, ":id"),
            other => panic!("unexpected error: {other:?}"),
        }
        match parse_segment(":id([)").expect_err("invalid regex") {
            PatternError::RegexConstraintInvalid { name, .. } => assert_eq!(name, ":id"),
            other => panic!("unexpected error: {other:?}"),
        }
        match parse_segment(":id([0-9]+))").expect_err("stray closing paren") {
            PatternError::ParenUnbalanced { segment } => assert_eq!(segment, ":id([0-9]+))"),
            other => panic!("unexpected error: {other:?}"),
        }
        match parse_segment("(v:id").expect_err("stray opening paren") {
            PatternError::ParenUnbalanced { .. } => {}
            other => panic!("unexpected error: {other:?}"),
        }
        match parse_segment("a:").expect_err("missing name") {
            PatternError::ParameterNameEmpty { .. } => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

use memchr::memchr;
use std::borrow::Cow;

pub fn split_path(pattern: &str) -> Vec<&str> {
    pattern
        .trim_matches(|c| c == '/' || c == ' ')
        .split('/')
        .filter(|seg| !seg.is_empty())
        .collect()
}

pub fn canonical_pattern(pattern: &str) -> String {
    let segments = split_path(pattern);
    if segments.is_empty() {
        return "/".to_string();
    }
    let mut out = String::with_capacity(pattern.len() + 1);
    for seg in segments {
        out.push('/');
        out.push_str(seg);
    }
    out
}

pub fn join_canonical(prefix: &str, pattern: &str) -> String {
    let prefix = canonical_pattern(prefix);
    let pattern = canonical_pattern(pattern);
    match (prefix.as_str(), pattern.as_str()) {
        ("/", _) => pattern,
        (_, "/") => prefix,
        _ => prefix + &pattern,
    }
}

#[inline]
pub(crate) fn next_segment(path: &str) -> (&str, &str) {
    match memchr(b'/', path.as_bytes()) {
        Some(pos) => (&path[..pos], &path[pos..]),
        None => (path, ""),
    }
}

pub(crate) fn request_path(path: &str, case_sensitive: bool) -> Cow<'_, str> {
    if case_sensitive || !path.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(path.to_ascii_lowercase())
    }
}

/// The pattern a route is registered under. When routing ignores case the
/// literal text is lower-cased; parameter names, type suffixes and regex
/// constraints are kept as written.
pub(crate) fn route_pattern(pattern: &str, case_sensitive: bool) -> Cow<'_, str> {
    if case_sensitive || !pattern.bytes().any(|b| b.is_ascii_uppercase()) {
        return Cow::Borrowed(pattern);
    }

    let mut out = String::with_capacity(pattern.len());
    let mut depth = 0usize;
    let mut escaped = false;
    let mut in_name = false;

    for c in pattern.chars() {
        if depth > 0 {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '(' => depth += 1,
                ')' => depth -= 1,
                _ => {}
            }
            out.push(c);
            continue;
        }

        match c {
            ':' => in_name = true,
            '(' if in_name => {
                in_name = false;
                depth = 1;
            }
            c if in_name && (c.is_ascii_alphanumeric() || c == '_') => {}
            _ => in_name = false,
        }
        out.push(if in_name { c } else { c.to_ascii_lowercase() });
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_path_when_slashes_redundant_then_drops_empty_segments() {
        assert!(split_path("/").is_empty());
        assert!(split_path("").is_empty());
        assert_eq!(split_path("/admin/"), vec!["admin"]);
        assert_eq!(split_path("//admin//users/"), vec!["admin", "users"]);
    }

    #[test]
    fn canonical_pattern_when_joined_then_single_slashes() {
        assert_eq!(canonical_pattern("admin/users/"), "/admin/users");
        assert_eq!(join_canonical("/v1/", "/"), "/v1");
        assert_eq!(join_canonical("/", "/x"), "/x");
        assert_eq!(join_canonical("v1", "shop/:id"), "/v1/shop/:id");
    }

    #[test]
    fn next_segment_when_nested_then_keeps_remainder_slash() {
        assert_eq!(next_segment("a/b/c"), ("a", "/b/c"));
        assert_eq!(next_segment("tail"), ("tail", ""));
    }

    #[test]
    fn request_path_when_case_insensitive_then_lowercases() {
        assert_eq!(request_path("/Users/ID", false), "/users/id");
        assert!(matches!(request_path("/users", false), Cow::Borrowed(_)));
        assert_eq!(request_path("/Users", true), "/Users");
    }

    #[test]
    fn route_pattern_when_case_insensitive_then_only_literals_fold() {
        assert_eq!(route_pattern("/Users/:userId", false), "/users/:userId");
        assert_eq!(
            route_pattern("/Shop/Item:ID([A-Z]+)-:page:int.HTML", false),
            "/shop/item:ID([A-Z]+)-:page:int.html"
        );
        assert_eq!(route_pattern("/v1/:Ver/*", false), "/v1/:Ver/*");
        assert_eq!(route_pattern("/Users", true), "/Users");
    }
}

use std::fmt;
use std::str::FromStr;

use crate::errors::RouterError;

pub const HTTP_METHOD_COUNT: usize = 9;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum HttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
    Patch = 4,
    Head = 5,
    Options = 6,
    Connect = 7,
    Trace = 8,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; HTTP_METHOD_COUNT] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Head,
        HttpMethod::Options,
        HttpMethod::Connect,
        HttpMethod::Trace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Connect => "CONNECT",
            Self::Trace => "TRACE",
        }
    }

    pub fn default_action(&self) -> &'static str {
        match self {
            Self::Get => "Get",
            Self::Post => "Post",
            Self::Put => "Put",
            Self::Delete => "Delete",
            Self::Patch => "Patch",
            Self::Head => "Head",
            Self::Options => "Options",
            Self::Connect => "Connect",
            Self::Trace => "Trace",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| RouterError::UnsupportedMethod {
                method: s.to_string(),
            })
    }
}

impl TryFrom<&http::Method> for HttpMethod {
    type Error = RouterError;

    fn try_from(method: &http::Method) -> Result<Self, Self::Error> {
        method.as_str().parse()
    }
}

/// Which per-method tree a route is registered into. `Any` is the `*` tree
/// consulted when the request method's own tree has no match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum RouteMethod {
    Any,
    Only(HttpMethod),
}

impl RouteMethod {
    #[inline]
    pub(crate) fn tree_index(&self) -> usize {
        match self {
            Self::Only(m) => *m as usize,
            Self::Any => HTTP_METHOD_COUNT,
        }
    }
}

impl From<HttpMethod> for RouteMethod {
    fn from(method: HttpMethod) -> Self {
        Self::Only(method)
    }
}

impl FromStr for RouteMethod {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "*" {
            Ok(Self::Any)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("*"),
            Self::Only(m) => m.fmt(f),
        }
    }
}

pub const FILTER_STAGE_COUNT: usize = 5;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FilterStage {
    BeforeStatic = 0,
    BeforeRouter = 1,
    BeforeExec = 2,
    AfterExec = 3,
    FinishRouter = 4,
}

impl FilterStage {
    pub const ALL: [FilterStage; FILTER_STAGE_COUNT] = [
        FilterStage::BeforeStatic,
        FilterStage::BeforeRouter,
        FilterStage::BeforeExec,
        FilterStage::AfterExec,
        FilterStage::FinishRouter,
    ];
}

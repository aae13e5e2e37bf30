//! Embeddable HTTP request router.
//!
//! Routes live in one [`PatternTree`](tree::PatternTree) per method plus a
//! `*` tree. Requests run through a staged filter pipeline around the
//! matched endpoint; see [`Router::dispatch`].

pub mod context;
pub mod endpoint;
pub mod enums;
pub mod errors;
pub mod filter;
pub mod path;
pub mod pattern;
pub mod registry;
pub mod router;
pub mod tree;

pub use context::{Context, ParamStore, Response};
pub use endpoint::{Controller, Endpoint, HandlerError, HandlerResult};
pub use enums::{FilterStage, HttpMethod, RouteMethod};
pub use errors::{RouterError, RouterResult};
pub use filter::{FilterEntry, FilterOptions, FilterOutcome};
pub use registry::StaticServer;
pub use router::{
    DispatchError, DispatchOutcome, Namespace, Router, RouterOptions, RouterOptionsBuilder,
    RouterOptionsError,
};
pub use tree::PatternTree;

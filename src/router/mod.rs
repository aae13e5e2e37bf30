mod adapter;
mod dispatch;
mod errors;
mod namespace;
mod options;
mod service;

pub use dispatch::DispatchOutcome;
pub use errors::DispatchError;
pub use namespace::Namespace;
pub use options::{RouterOptions, RouterOptionsBuilder, RouterOptionsError};
pub use service::Router;

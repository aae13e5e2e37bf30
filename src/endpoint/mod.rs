mod mapping;

pub(crate) use mapping::resolve_actions;

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::context::Context;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{message}")]
    Failed { message: String },
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl HandlerError {
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }
}

pub type HandlerResult = Result<(), HandlerError>;

pub type HandlerFn = Arc<dyn Fn(&mut Context) -> HandlerResult + Send + Sync>;

pub trait Controller: Send + Sync {
    fn actions(&self) -> &[&'static str];

    fn call(&self, action: &str, ctx: &mut Context) -> HandlerResult;
}

#[derive(Clone)]
pub enum Endpoint {
    Handler(HandlerFn),
    /// Action name resolved against the controller at registration time.
    Action {
        controller: Arc<dyn Controller>,
        action: Arc<str>,
    },
}

impl Endpoint {
    pub fn handler<F>(f: F) -> Self
    where
        F: Fn(&mut Context) -> HandlerResult + Send + Sync + 'static,
    {
        Self::Handler(Arc::new(f))
    }

    pub fn invoke(&self, ctx: &mut Context) -> HandlerResult {
        match self {
            Self::Handler(f) => f(ctx),
            Self::Action { controller, action } => controller.call(action, ctx),
        }
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handler(_) => f.write_str("Endpoint::Handler"),
            Self::Action { action, .. } => f
                .debug_struct("Endpoint::Action")
                .field("action", action)
                .finish(),
        }
    }
}

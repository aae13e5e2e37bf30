use thiserror::Error;

use crate::router::RouterOptionsError;
use crate::tree::TreeError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouterError {
    #[error("unsupported http method '{method}'")]
    UnsupportedMethod { method: String },
    #[error("action '{action}' named in mapping '{mapping}' is not provided by the controller")]
    UnknownAction { action: String, mapping: String },
    #[error("method mapping '{mapping}' is malformed; expected 'get,post:Action;*:Other'")]
    MalformedMapping { mapping: String },
    #[error("pattern '{pattern}' binds {count} parameters; the limit is {limit}")]
    TooManyParams {
        pattern: String,
        count: usize,
        limit: usize,
    },
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error(transparent)]
    Options(#[from] RouterOptionsError),
}

pub type RouterResult<T> = Result<T, RouterError>;

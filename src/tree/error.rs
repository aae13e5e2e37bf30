use thiserror::Error;

use crate::pattern::PatternError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error("graft prefix '{prefix}' has no segments")]
    EmptyPrefix { prefix: String },
    #[error(
        "graft prefix '{prefix}' contains segment '{segment}'; only literals and required parameters are allowed"
    )]
    UnsupportedPrefixSegment { prefix: String, segment: String },
}

pub type TreeResult<T> = Result<T, TreeError>;

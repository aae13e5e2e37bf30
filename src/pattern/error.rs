use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("segment '{segment}' uses an unsupported wildcard form (only '*' and '*.*' are allowed)")]
    InvalidWildcard { segment: String },
    #[error("parameter name in segment '{segment}' is empty")]
    ParameterNameEmpty { segment: String },
    #[error("constraint in segment '{segment}' is missing a closing ')'")]
    ConstraintUnclosed { segment: String },
    #[error("segment '{segment}' has an unbalanced parenthesis outside a constraint")]
    ParenUnbalanced { segment: String },
    #[error("constraint for parameter '{name}' in segment '{segment}' is empty")]
    ConstraintEmpty { segment: String, name: String },
    #[error("constraint for parameter '{name}' in segment '{segment}' is not a valid regex: {reason}")]
    RegexConstraintInvalid {
        segment: String,
        name: String,
        reason: String,
    },
    #[error("combined route regex '{source_regex}' failed to compile: {reason}")]
    LeafRegexInvalid { source_regex: String, reason: String },
}

pub type PatternResult<T> = Result<T, PatternError>;

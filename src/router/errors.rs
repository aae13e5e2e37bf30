use thiserror::Error;

use crate::endpoint::HandlerError;
use crate::enums::{FilterStage, HttpMethod};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("filter failed during {stage:?} for '{path}': {source}")]
    Filter {
        stage: FilterStage,
        path: String,
        #[source]
        source: HandlerError,
    },
    #[error("handler failed for {method} '{path}': {source}")]
    Handler {
        method: HttpMethod,
        path: String,
        #[source]
        source: HandlerError,
    },
}

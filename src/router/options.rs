use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_MAX_PARAM_COUNT: usize = 32;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RouterOptions {
    /// When false, request paths are lowercased before matching.
    pub case_sensitive: bool,
    pub max_param_count: usize,
    /// Logs route resolution and short-circuits at debug level.
    pub debug: bool,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            max_param_count: DEFAULT_MAX_PARAM_COUNT,
            debug: false,
        }
    }
}

impl RouterOptions {
    pub fn builder() -> RouterOptionsBuilder {
        RouterOptionsBuilder::default()
    }

    pub fn validate(&self) -> Result<(), RouterOptionsError> {
        if self.max_param_count == 0 {
            return Err(RouterOptionsError::MaxParamCountInvalid { provided: 0 });
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct RouterOptionsBuilder {
    options: RouterOptions,
}

impl RouterOptionsBuilder {
    pub fn case_sensitive(mut self, value: bool) -> Self {
        self.options.case_sensitive = value;
        self
    }

    pub fn max_param_count(mut self, value: usize) -> Self {
        self.options.max_param_count = value;
        self
    }

    pub fn debug(mut self, value: bool) -> Self {
        self.options.debug = value;
        self
    }

    pub fn build(self) -> Result<RouterOptions, RouterOptionsError> {
        let options = self.options;
        options.validate()?;
        Ok(options)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouterOptionsError {
    #[error("max_param_count must be at least 1 (got {provided})")]
    MaxParamCountInvalid { provided: usize },
}

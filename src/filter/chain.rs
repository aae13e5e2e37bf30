use crate::context::Context;

use super::{FilterEntry, FilterOptions, FilterOutcome};

#[derive(Debug, Clone, Default)]
pub struct FilterChain {
    entries: Vec<FilterEntry>,
}

impl FilterChain {
    pub fn push(&mut self, entry: FilterEntry) {
        self.entries.push(entry);
    }

    pub fn push_front(&mut self, entry: FilterEntry) {
        self.entries.insert(0, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterEntry> {
        self.entries.iter()
    }

    /// Runs every filter whose pattern matches `path`.
    ///
    /// A filter flagged `RETURN_ON_OUTPUT` ends the chain with `Abort` when
    /// the response has started, checked both before and after it runs.
    pub fn run(&self, path: &str, ctx: &mut Context) -> FilterOutcome {
        for entry in &self.entries {
            let return_on_output = entry.options().contains(FilterOptions::RETURN_ON_OUTPUT);
            if return_on_output && ctx.response().is_started() {
                return FilterOutcome::Abort;
            }

            let saved = entry
                .options()
                .contains(FilterOptions::RESET_PARAMS)
                .then(|| ctx.params().clone());

            let outcome = if entry.matches(path, ctx.params_mut()) {
                entry.call(ctx)
            } else {
                FilterOutcome::Continue
            };

            if let Some(saved) = saved {
                *ctx.params_mut() = saved;
            }

            match outcome {
                FilterOutcome::Continue => {}
                other => return other,
            }

            if return_on_output && ctx.response().is_started() {
                return FilterOutcome::Abort;
            }
        }
        FilterOutcome::Continue
    }
}

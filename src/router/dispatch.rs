use std::panic::{self, AssertUnwindSafe};

use crate::context::Context;
use crate::enums::FilterStage;
use crate::filter::FilterOutcome;
use crate::path::request_path;
use crate::registry::RouteRegistry;
use crate::router::{DispatchError, Router};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Completed,
    NotFound,
    StaticServed,
}

impl Router {
    /// Runs one request through the pipeline:
    /// BeforeStatic, static serving, BeforeRouter, route match, BeforeExec,
    /// the endpoint, AfterExec, FinishRouter.
    ///
    /// FinishRouter filters still run when a later stage fails or the
    /// endpoint panics; the panic is resumed afterwards.
    #[tracing::instrument(level = "trace", skip(self, ctx), fields(method = %ctx.method(), path = %ctx.path()))]
    pub fn dispatch(&self, ctx: &mut Context) -> Result<DispatchOutcome, DispatchError> {
        let registry = self.snapshot();
        let path = request_path(ctx.path(), self.options().case_sensitive).into_owned();
        Pipeline {
            registry: &registry,
            path: &path,
            debug: self.options().debug,
        }
        .run(ctx)
    }
}

struct Pipeline<'a> {
    registry: &'a RouteRegistry,
    path: &'a str,
    debug: bool,
}

impl Pipeline<'_> {
    fn run(&self, ctx: &mut Context) -> Result<DispatchOutcome, DispatchError> {
        if !self.run_stage(FilterStage::BeforeStatic, ctx)? {
            return Ok(DispatchOutcome::Completed);
        }

        if let Some(server) = self.registry.static_server()
            && server.serve(ctx)
        {
            return Ok(DispatchOutcome::StaticServed);
        }

        if !self.run_stage(FilterStage::BeforeRouter, ctx)? {
            return Ok(DispatchOutcome::Completed);
        }

        let Some(endpoint) = self.registry.find(ctx.method(), self.path, ctx.params_mut()) else {
            if self.debug {
                tracing::debug!(method = %ctx.method(), path = self.path, "no route matched");
            }
            return Ok(DispatchOutcome::NotFound);
        };
        if self.debug {
            tracing::debug!(method = %ctx.method(), path = self.path, endpoint = ?endpoint, "route matched");
        }

        match self.run_stage(FilterStage::BeforeExec, ctx) {
            Ok(true) => {}
            Ok(false) => return Ok(DispatchOutcome::Completed),
            Err(err) => return Err(self.finish_after_failure(ctx, err)),
        }

        match panic::catch_unwind(AssertUnwindSafe(|| endpoint.invoke(ctx))) {
            Ok(Ok(())) => {}
            Ok(Err(source)) => {
                let err = DispatchError::Handler {
                    method: ctx.method(),
                    path: self.path.to_string(),
                    source,
                };
                return Err(self.finish_after_failure(ctx, err));
            }
            Err(payload) => {
                tracing::error!(method = %ctx.method(), path = self.path, "endpoint panicked");
                if let Err(err) = self.run_stage(FilterStage::FinishRouter, ctx) {
                    tracing::warn!(error = %err, "finish filter failed after endpoint panic");
                }
                panic::resume_unwind(payload);
            }
        }

        match self.run_stage(FilterStage::AfterExec, ctx) {
            Ok(true) => {}
            Ok(false) => return Ok(DispatchOutcome::Completed),
            Err(err) => return Err(self.finish_after_failure(ctx, err)),
        }

        self.run_stage(FilterStage::FinishRouter, ctx)?;
        Ok(DispatchOutcome::Completed)
    }

    fn run_stage(&self, stage: FilterStage, ctx: &mut Context) -> Result<bool, DispatchError> {
        let chain = self.registry.filters(stage);
        if chain.is_empty() {
            return Ok(true);
        }

        match chain.run(self.path, ctx) {
            FilterOutcome::Continue => Ok(true),
            FilterOutcome::Abort => {
                if self.debug {
                    tracing::debug!(stage = ?stage, path = self.path, "filter ended the pipeline");
                }
                Ok(false)
            }
            FilterOutcome::Fail(source) => Err(DispatchError::Filter {
                stage,
                path: self.path.to_string(),
                source,
            }),
        }
    }

    fn finish_after_failure(&self, ctx: &mut Context, err: DispatchError) -> DispatchError {
        if let Err(finish_err) = self.run_stage(FilterStage::FinishRouter, ctx) {
            tracing::warn!(error = %finish_err, original = %err, "finish filter failed after an earlier failure");
        }
        err
    }
}

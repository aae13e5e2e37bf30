use http::StatusCode;

use crate::context::Context;
use crate::router::{DispatchOutcome, Router};

impl Router {
    /// Answers an `http::Request` in one call.
    ///
    /// Unknown methods get 405, unmatched paths 404 and dispatch failures 500,
    /// each only when nothing was written to the response yet.
    pub fn serve<B: AsRef<[u8]>>(&self, request: &http::Request<B>) -> http::Response<Vec<u8>> {
        let mut ctx = match Context::from_request(request) {
            Ok(ctx) => ctx,
            Err(err) => {
                tracing::debug!(error = %err, "request rejected before dispatch");
                let mut response = http::Response::new(Vec::new());
                *response.status_mut() = StatusCode::METHOD_NOT_ALLOWED;
                return response;
            }
        };

        let fallback = match self.dispatch(&mut ctx) {
            Ok(DispatchOutcome::NotFound) => Some(StatusCode::NOT_FOUND),
            Ok(_) => None,
            Err(err) => {
                tracing::error!(error = %err, "request dispatch failed");
                Some(StatusCode::INTERNAL_SERVER_ERROR)
            }
        };

        if let Some(status) = fallback
            && !ctx.response().is_started()
        {
            ctx.response_mut().set_status(status);
        }
        ctx.into_response()
    }
}

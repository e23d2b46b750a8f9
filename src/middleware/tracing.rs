use tracing::debug;

use super::Middleware;
use crate::context::Context;
use crate::request::Request;

/// Emits a debug event when a request enters the route chain and another with
/// the resulting status once the handler has run.
pub struct TracingMiddleware;

impl Middleware for TracingMiddleware {
    fn before(&self, req: &Request, ctx: &mut Context) {
        debug!(
            method = ?req.method(),
            path = %req.path(),
            path_params = ?ctx.params(),
            "Route chain entered"
        );
    }

    fn after(&self, req: &Request, ctx: &mut Context) {
        debug!(
            method = ?req.method(),
            path = %req.path(),
            status = ctx.status(),
            content_type = %ctx.content_type(),
            body_bytes = ctx.body().len(),
            "Route chain completed"
        );
    }
}

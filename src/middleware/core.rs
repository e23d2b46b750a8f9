use crate::context::Context;
use crate::request::Request;

/// The final step of a route: fills in the response.
pub trait Handler: Send + Sync {
    fn handle(&self, req: &Request, ctx: &mut Context);
}

impl<F> Handler for F
where
    F: Fn(&Request, &mut Context) + Send + Sync,
{
    fn handle(&self, req: &Request, ctx: &mut Context) {
        self(req, ctx)
    }
}

/// Hooks run around a route's handler.
///
/// `before` hooks run in registration order ahead of the handler; `after`
/// hooks run in the same order once the handler has returned.
pub trait Middleware: Send + Sync {
    fn before(&self, _req: &Request, _ctx: &mut Context) {}
    fn after(&self, _req: &Request, _ctx: &mut Context) {}
}

impl<F> Middleware for F
where
    F: Fn(&Request, &mut Context) + Send + Sync,
{
    fn before(&self, req: &Request, ctx: &mut Context) {
        self(req, ctx)
    }
}

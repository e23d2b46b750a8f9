use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error};

use crate::context::Context;
use crate::middleware::Handler;
use crate::request::Request;
use crate::router::{Resolution, Route, Router};
use crate::templates::TemplateEngine;

/// Executes the global hook and route chain for each request.
///
/// Holds no per-request state and is shared by every connection.
#[derive(Clone, Default)]
pub struct Dispatcher {
    default_response: Option<Arc<dyn Handler>>,
    global_hook: Option<Arc<dyn Handler>>,
    not_found: Option<Arc<dyn Handler>>,
    templates: Option<Arc<dyn TemplateEngine>>,
}

impl Dispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `handler` first on every request, including unmatched ones, to
    /// replace the `200 OK` / `text/plain` starting response.
    #[must_use]
    pub fn with_default_response(mut self, handler: impl Handler + 'static) -> Self {
        self.default_response = Some(Arc::new(handler));
        self
    }

    /// Build the response for requests that match no route or asset.
    /// Without one the fixed `404 Not Found` page is used.
    #[must_use]
    pub fn with_not_found(mut self, handler: impl Handler + 'static) -> Self {
        self.not_found = Some(Arc::new(handler));
        self
    }

    /// Run `hook` for every matched request (routes and static assets) before
    /// any route-specific logic.
    #[must_use]
    pub fn with_global_hook(mut self, hook: impl Handler + 'static) -> Self {
        self.global_hook = Some(Arc::new(hook));
        self
    }

    /// Template engine made available to [`Context::html`].
    #[must_use]
    pub fn with_templates(mut self, templates: Arc<dyn TemplateEngine>) -> Self {
        self.templates = Some(templates);
        self
    }

    /// Resolve `req` against `router` and build its response.
    pub fn dispatch(&self, router: &Router, req: &Request) -> Context {
        let mut ctx = Context::with_templates(self.templates.clone());
        let started = Instant::now();

        match router.resolve(req) {
            Resolution::Route { route, params } => {
                ctx.set_params(params);
                self.guarded(req, &mut ctx, |ctx| {
                    self.run_default_response(req, ctx);
                    self.run_route(route, req, ctx);
                });
            }
            Resolution::Asset { body, content_type } => {
                self.guarded(req, &mut ctx, |ctx| {
                    self.run_default_response(req, ctx);
                    self.run_global_hook(req, ctx);
                    ctx.set_body(body);
                    if let Some(content_type) = content_type {
                        ctx.set_content_type(content_type);
                    }
                });
            }
            Resolution::NotFound => self.guarded(req, &mut ctx, |ctx| {
                self.run_default_response(req, ctx);
                match &self.not_found {
                    Some(handler) => handler.handle(req, ctx),
                    None => ctx.not_found(),
                }
            }),
        }

        debug!(
            method = ?req.method(),
            path = %req.path(),
            status = ctx.status(),
            duration_us = started.elapsed().as_micros() as u64,
            "Request dispatched"
        );
        ctx
    }

    fn run_route(&self, route: &Route, req: &Request, ctx: &mut Context) {
        self.run_global_hook(req, ctx);
        for mw in route.middleware() {
            mw.before(req, ctx);
        }
        route.handler().handle(req, ctx);
        for mw in route.middleware() {
            mw.after(req, ctx);
        }
    }

    fn run_default_response(&self, req: &Request, ctx: &mut Context) {
        if let Some(handler) = &self.default_response {
            handler.handle(req, ctx);
        }
    }

    fn run_global_hook(&self, req: &Request, ctx: &mut Context) {
        if let Some(hook) = &self.global_hook {
            hook.handle(req, ctx);
        }
    }

    /// Run `chain` and replace the response with a 500 if it panics.
    fn guarded<F>(&self, req: &Request, ctx: &mut Context, chain: F)
    where
        F: FnOnce(&mut Context),
    {
        if let Err(panic) = catch_unwind(AssertUnwindSafe(|| chain(ctx))) {
            error!(
                method = ?req.method(),
                path = %req.path(),
                panic_message = %panic_message(panic.as_ref()),
                "Handler panicked"
            );
            ctx.internal_error();
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

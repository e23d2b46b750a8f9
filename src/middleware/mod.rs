//! # Middleware Module
//!
//! Per-route request/response hooks.
//!
//! A route's middleware run in registration order before its handler, each
//! with mutable access to the response [`Context`](crate::context::Context).
//! There is no explicit way to abort the chain: a middleware that wants to
//! short-circuit sets the status and body, and the remaining middleware and
//! the handler still run.
//!
//! Any `Fn(&Request, &mut Context)` closure is both a [`Handler`] and a
//! [`Middleware`] (as a `before` hook).
//!
//! ## Bundled middleware
//!
//! - [`TracingMiddleware`] - debug events around the handler
//! - [`DefaultHeaders`] - appends a fixed set of response headers

mod core;
mod default_headers;
mod tracing;

pub use core::{Handler, Middleware};
pub use default_headers::DefaultHeaders;
pub use tracing::TracingMiddleware;

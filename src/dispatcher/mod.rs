//! # Dispatcher Module
//!
//! Runs the handler chain for a resolved request and produces the response
//! [`Context`](crate::context::Context).
//!
//! ## Request Flow
//!
//! 1. A default context is created (`200 OK`, `text/plain`)
//! 2. The router resolves the request to a route, a static asset or nothing
//! 3. For a route: global hook, route middleware `before` hooks in order, the
//!    handler, then the `after` hooks
//! 4. For a static asset: global hook, then the file body and content type
//! 5. For nothing: the fixed `404 Not Found` response
//!
//! ## Error Handling
//!
//! The whole chain runs inside a panic boundary. A panic anywhere in the
//! hook, middleware or handler discards the partial response and yields a
//! fixed `500 Internal Server Error`; the server keeps running.

mod core;

pub use core::Dispatcher;

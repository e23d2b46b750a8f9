//! # Server Module
//!
//! Raw-socket HTTP/1.1 serving on `may` coroutines.
//!
//! - [`HttpServer`] binds a listener and spawns one coroutine per accepted
//!   connection.
//! - [`AppService`] reads one request per connection, dispatches it and writes
//!   one response before closing. There is no keep-alive and no chunking.
//! - [`response`] renders a [`Context`](crate::context::Context) onto the wire.

pub mod http_server;
pub mod response;
pub mod service;

pub use http_server::{HttpServer, ServerHandle, DEFAULT_STACK_SIZE};
pub use response::{serialize, status_reason};
pub use service::{AppService, DEFAULT_MAX_REQUEST_SIZE};

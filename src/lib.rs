//! # brrtlite
//!
//! **brrtlite** is a minimal HTTP/1.1 server built directly on raw TCP sockets
//! and `may` coroutines. It owns the whole request lifecycle: decoding bytes
//! into a [`Request`], matching it against a frozen route table, running the
//! hook/middleware/handler chain on a [`Context`], and writing one response
//! before closing the connection.
//!
//! ## Architecture
//!
//! - **[`request`]** - byte buffer to structured request (method, path, query,
//!   headers, form fields, cookies)
//! - **[`router`]** - append-only [`RouteTable`] frozen into a read-only [`Router`];
//!   templates with `name:token` parameters are compiled once at registration
//! - **[`dispatcher`]** - global hook, route middleware and handler behind a
//!   panic boundary
//! - **[`context`]** / **[`cookie`]** - response-side state and `Set-Cookie` rendering
//! - **[`server`]** - accept loop, per-connection service and response serializer
//! - **[`static_files`]** / **[`templates`]** - asset serving and HTML rendering
//! - **[`runtime_config`]**, **[`logging`]**, **[`cli`]** - the binary's ambient stack
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Client
//!     participant Server as HttpServer
//!     participant Service as AppService
//!     participant Router
//!     participant Dispatcher
//!     participant Handler
//!
//!     Client->>Server: TCP connect
//!     Server->>Service: spawn coroutine
//!     Service->>Service: single read, Request::parse
//!     Service->>Dispatcher: dispatch(&router, &req)
//!     Dispatcher->>Router: resolve(&req)
//!     Router-->>Dispatcher: Route / Asset / NotFound
//!     Dispatcher->>Handler: hook, middleware, handler
//!     Handler-->>Dispatcher: mutated Context
//!     Dispatcher-->>Service: Context
//!     Service->>Client: serialize, single write, close
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use brrtlite::{AppService, Context, Dispatcher, HttpServer, Request, RouteTable};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut table = RouteTable::new();
//!     table.get("/ping", |_req: &Request, ctx: &mut Context| ctx.text("pong"))?;
//!     table.get("/user/name:str", |_req: &Request, ctx: &mut Context| {
//!         let name = ctx.param("name", "").to_string();
//!         ctx.text(format!("hello {name}"));
//!     })?;
//!
//!     let service = AppService::new(Arc::new(table.freeze()), Arc::new(Dispatcher::new()));
//!     let handle = HttpServer::new(service).start("127.0.0.1:8080")?;
//!     handle.wait_ready()?;
//!     handle.join().ok();
//!     Ok(())
//! }
//! ```
//!
//! ## Limitations
//!
//! One request and one response per connection; no keep-alive, no chunked
//! bodies, no streaming reads. A request larger than the configured read
//! buffer, or split across TCP segments, is parsed as whatever the first read
//! returned.

pub mod cli;
pub mod context;
pub mod cookie;
pub mod demo;
pub mod dispatcher;
pub mod ids;
pub mod logging;
pub mod middleware;
pub mod request;
pub mod router;
pub mod runtime_config;
pub mod server;
pub mod static_files;
pub mod templates;

pub use context::Context;
pub use cookie::{Cookie, SameSite};
pub use dispatcher::Dispatcher;
pub use middleware::{Handler, Middleware};
pub use request::Request;
pub use router::{Resolution, RouteTable, Router};
pub use server::{AppService, HttpServer, ServerHandle};

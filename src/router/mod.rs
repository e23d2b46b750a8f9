//! # Router Module
//!
//! Route registration and request matching.
//!
//! ## Overview
//!
//! Routes are registered on a [`RouteTable`] during startup and the table is
//! then frozen into a [`Router`], which is shared read-only by every
//! connection. Registration after the server starts is impossible by
//! construction: the builder is consumed by [`RouteTable::freeze`].
//!
//! ## Templates
//!
//! A template is a literal path whose segments may declare parameters as
//! `name:token`, for example `/user/name:str/id:int`. The token documents the
//! expected value but is never checked. Templates are compiled once into a
//! [`PathTemplate`] when registered.
//!
//! ## Matching order
//!
//! 1. exact literal match of path and method, first registered wins
//! 2. parameterized match, first registered wins
//! 3. static asset for `GET` requests under the configured prefix
//! 4. not found
//!
//! ## Example
//!
//! ```rust
//! use brrtlite::context::Context;
//! use brrtlite::request::Request;
//! use brrtlite::router::{Resolution, RouteTable};
//!
//! let mut table = RouteTable::new();
//! table
//!     .get("/user/name:str/id:int", |_req: &Request, ctx: &mut Context| ctx.text("hi"))
//!     .expect("valid template");
//! let router = table.freeze();
//!
//! let req = Request::parse(b"GET /user/miku/1 HTTP/1.1\r\n\r\n");
//! match router.resolve(&req) {
//!     Resolution::Route { params, .. } => {
//!         assert_eq!(params[0].1, "miku");
//!         assert_eq!(params[1].1, "1");
//!     }
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

mod core;
mod template;

pub use core::{ParamVec, Resolution, Route, RouteTable, Router, MAX_INLINE_PARAMS};
pub use template::{PathTemplate, RouteError};

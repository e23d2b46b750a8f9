//! # Request Module
//!
//! Turns the raw bytes read off a connection into a structured [`Request`].
//!
//! ## Overview
//!
//! The parser works on the complete buffer returned by a single socket read. It
//! never fails: anything missing or malformed resolves to an empty value, and
//! every lookup takes a caller-supplied default.
//!
//! Each artifact has its own small scanner:
//!
//! - **Request line** - method token (`GET`, `POST`, `PUT`, `DELETE`, `OPTIONS`)
//!   and the request target
//! - **Header block** - `Name: value` lines up to the first blank line
//! - **Query string** - `&`-separated pairs split on the first `=`
//! - **Form body** - `application/x-www-form-urlencoded` or `multipart/form-data`
//! - **Cookies** - `;`-separated pairs from the `Cookie` header
//!
//! ## Known limitations
//!
//! A request that does not fit in the read buffer, or that arrives across
//! several TCP segments, is parsed as whatever was received in the first read.
//! Query and form values containing a literal `=` are truncated at it
//! (`k=x=y` yields `k` → `x`).
//!
//! ## Example
//!
//! ```rust
//! use brrtlite::request::Request;
//!
//! let req = Request::parse(b"GET /user?id=7 HTTP/1.1\r\nCookie: sid=abc\r\n\r\n");
//! assert_eq!(req.path(), "/user");
//! assert_eq!(req.query("id", ""), "7");
//! assert_eq!(req.cookie("sid", ""), "abc");
//! ```

mod core;
mod form;
mod parser;
#[cfg(test)]
mod tests;

pub use core::{FormField, Request, SUPPORTED_METHODS};

//! # Context Module
//!
//! [`Context`] is the mutable response state threaded through the global
//! hook, route middleware and handler of a single request, then handed to the
//! serializer. It also carries the path parameters extracted while matching.
//!
//! A fresh context starts as `200 OK` with a `text/plain` content type and an
//! empty body. Headers keep their insertion order; adding a header whose name
//! already exists emits both.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, warn};

use crate::cookie::Cookie;
use crate::router::ParamVec;
use crate::server::response::status_reason;
use crate::templates::TemplateEngine;

/// Commonly used `Content-Type` values.
pub mod content_type {
    pub const BINARY: &str = "application/octet-stream";
    pub const WASM: &str = "application/wasm";
    pub const HTML: &str = "text/html";
    pub const JSON: &str = "application/json";
    pub const JSON_PROBLEM: &str = "application/problem+json";
    pub const JAVASCRIPT: &str = "text/javascript";
    pub const CSS: &str = "text/css";
    pub const TEXT: &str = "text/plain";
    pub const XML: &str = "text/xml";
    pub const MARKDOWN: &str = "text/markdown";
    pub const YAML: &str = "application/x-yaml";
    pub const FORM: &str = "application/x-www-form-urlencoded";
    pub const MULTIPART: &str = "multipart/form-data";
}

/// Body of the fixed 404 response.
pub const NOT_FOUND_BODY: &str = "Not Found";
/// Body of the fixed 500 response produced when a handler panics.
pub const INTERNAL_ERROR_BODY: &str = "Internal Server Error";

#[derive(Clone)]
pub struct Context {
    status: u16,
    status_text: String,
    content_type: String,
    body: Vec<u8>,
    headers: Vec<(String, String)>,
    params: ParamVec,
    templates: Option<Arc<dyn TemplateEngine>>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("status", &self.status)
            .field("status_text", &self.status_text)
            .field("content_type", &self.content_type)
            .field("body_len", &self.body.len())
            .field("headers", &self.headers)
            .field("params", &self.params)
            .finish()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: 200,
            status_text: status_reason(200).to_string(),
            content_type: content_type::TEXT.to_string(),
            body: Vec::new(),
            headers: Vec::new(),
            params: ParamVec::new(),
            templates: None,
        }
    }

    /// A default context that renders HTML through `templates`.
    #[must_use]
    pub fn with_templates(templates: Option<Arc<dyn TemplateEngine>>) -> Self {
        Self {
            templates,
            ..Self::new()
        }
    }

    #[inline]
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    #[inline]
    #[must_use]
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Set the status code; the reason phrase follows from the code.
    pub fn set_status(&mut self, status: u16) {
        self.status = status;
        self.status_text = status_reason(status).to_string();
    }

    /// Set the status code with a custom reason phrase.
    pub fn set_status_with_text(&mut self, status: u16, text: impl Into<String>) {
        self.status = status;
        self.status_text = text.into();
    }

    #[inline]
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn set_content_type(&mut self, content_type: impl Into<String>) {
        self.content_type = content_type.into();
    }

    #[inline]
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn set_body(&mut self, body: impl Into<Vec<u8>>) {
        self.body = body.into();
    }

    /// Replace the body with text, leaving the content type untouched.
    pub fn text(&mut self, body: impl Into<String>) {
        self.body = body.into().into_bytes();
    }

    /// Response headers in insertion order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Append a response header. Existing headers with the same name are kept.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    pub fn set_cookie(&mut self, cookie: &Cookie) {
        self.set_header("Set-Cookie", cookie.to_header_value());
    }

    /// Expire a cookie by sending it back empty with `Max-Age=0`.
    pub fn remove_cookie(&mut self, name: &str) {
        self.set_cookie(&Cookie::new(name, ""));
    }

    /// Sessions are plain cookies without `Max-Age`.
    pub fn set_session(&mut self, name: &str, value: &str) {
        self.set_cookie(&Cookie::session(name, value));
    }

    pub fn remove_session(&mut self, name: &str) {
        self.remove_cookie(name);
    }

    /// `307 Temporary Redirect` to `location`.
    pub fn redirect(&mut self, location: &str) {
        self.set_status(307);
        self.set_header("Location", location);
    }

    /// Serialize `value` as the JSON body.
    ///
    /// A serialization failure is logged and leaves an empty body.
    pub fn json<T: Serialize + ?Sized>(&mut self, value: &T) {
        self.content_type = content_type::JSON.to_string();
        self.body = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(error = %e, "JSON serialization failed");
                Vec::new()
            }
        };
    }

    /// Render the template `name` with `data` as the HTML body.
    ///
    /// Rendering failures, or a context with no template engine, are logged
    /// and leave an empty body.
    pub fn html<T: Serialize + ?Sized>(&mut self, name: &str, data: &T) {
        self.content_type = content_type::HTML.to_string();
        self.body = Vec::new();

        let Some(engine) = self.templates.as_ref() else {
            warn!(template = %name, "No template engine configured");
            return;
        };
        let data = match serde_json::to_value(data) {
            Ok(value) => value,
            Err(e) => {
                error!(template = %name, error = %e, "Template data serialization failed");
                return;
            }
        };
        match engine.render(name, &data) {
            Ok(rendered) => self.body = rendered.into_bytes(),
            Err(e) => error!(template = %name, error = %e, "Template rendering failed"),
        }
    }

    /// Value of the path parameter `name` extracted for the matched route.
    #[must_use]
    pub fn param<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
            .unwrap_or(default)
    }

    #[must_use]
    pub fn params(&self) -> &ParamVec {
        &self.params
    }

    pub(crate) fn set_params(&mut self, params: ParamVec) {
        self.params = params;
    }

    /// Fixed `404 Not Found` HTML response.
    pub fn not_found(&mut self) {
        self.set_status(404);
        self.content_type = content_type::HTML.to_string();
        self.text(NOT_FOUND_BODY);
    }

    /// Fixed `500 Internal Server Error` response. Headers set so far are dropped.
    pub fn internal_error(&mut self) {
        self.set_status(500);
        self.content_type = content_type::TEXT.to_string();
        self.headers.clear();
        self.text(INTERNAL_ERROR_BODY);
    }
}

use super::Middleware;
use crate::context::Context;
use crate::request::Request;

/// Appends a fixed list of headers to every response of the route.
///
/// ```rust
/// use brrtlite::middleware::DefaultHeaders;
///
/// let headers = DefaultHeaders::new()
///     .header("X-Frame-Options", "DENY")
///     .header("Cache-Control", "no-store");
/// assert_eq!(headers.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DefaultHeaders {
    headers: Vec<(String, String)>,
}

impl DefaultHeaders {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

impl Middleware for DefaultHeaders {
    fn before(&self, _req: &Request, ctx: &mut Context) {
        for (name, value) in &self.headers {
            ctx.set_header(name.as_str(), value.as_str());
        }
    }
}

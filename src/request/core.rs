use http::Method;
use tracing::debug;

use super::form;
use super::parser::{self, Pair};

/// Methods recognised at the start of a request, in match order.
pub const SUPPORTED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];

/// A single decoded form field.
///
/// URL-encoded forms only ever populate `name` and `value`. Multipart parts
/// additionally carry the `filename` attribute and the part's own
/// `Content-Type` when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub value: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
}

/// Structured view of one HTTP request.
///
/// Built once per connection by [`Request::parse`] and never mutated
/// afterwards. Lookups return the first matching entry, or the supplied
/// default when nothing matches.
#[derive(Debug, Clone, Default)]
pub struct Request {
    method: Option<Method>,
    path: String,
    query: Vec<Pair>,
    headers: Vec<Pair>,
    form: Vec<FormField>,
    cookies: Vec<Pair>,
}

impl Request {
    /// Parse the bytes received from a connection.
    ///
    /// Invalid UTF-8 is replaced rather than rejected; a buffer with no
    /// recognisable request line produces a request with no method and an
    /// empty path, which will not match any route.
    #[must_use]
    pub fn parse(bytes: &[u8]) -> Self {
        let text = String::from_utf8_lossy(bytes);
        let text = text.as_ref();

        let (method, target) = parser::parse_request_line(text);
        let target = parser::decode_component(target);
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path.to_string(), parser::parse_query(query)),
            None => (target, Vec::new()),
        };

        let headers = parser::parse_headers(text);

        let mut req = Request {
            method,
            path,
            query,
            headers,
            form: Vec::new(),
            cookies: Vec::new(),
        };

        req.form = match req.header("Content-Type", "") {
            form::URLENCODED => form::parse_urlencoded(text),
            form::MULTIPART => form::parse_multipart(text),
            _ => Vec::new(),
        };
        req.cookies = parser::parse_cookies(req.header("Cookie", ""));

        debug!(
            method = ?req.method,
            path = %req.path,
            bytes = bytes.len(),
            header_count = req.headers.len(),
            query_count = req.query.len(),
            form_count = req.form.len(),
            cookie_count = req.cookies.len(),
            "HTTP request parsed"
        );

        req
    }

    /// The request method, if it was one of [`SUPPORTED_METHODS`].
    #[inline]
    #[must_use]
    pub fn method(&self) -> Option<&Method> {
        self.method.as_ref()
    }

    /// Percent-decoded request path without the query string.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Value of the first query parameter called `name`.
    #[must_use]
    pub fn query<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        parser::lookup(&self.query, name).unwrap_or(default)
    }

    /// All query pairs in the order they appeared.
    #[must_use]
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// Value of the first header called `name` (ASCII case-insensitive).
    ///
    /// Leading/trailing whitespace and a trailing `; boundary=...` marker are
    /// stripped. An empty value counts as absent.
    #[must_use]
    pub fn header<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| parser::strip_boundary(v))
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }

    /// Raw header pairs in the order they appeared.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Value of the first form field called `name`.
    #[must_use]
    pub fn form<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.form_field(name)
            .map(|f| f.value.as_str())
            .unwrap_or(default)
    }

    /// Uploaded file name of the first form field called `name`.
    ///
    /// A field that exists but carries no file name yields `""`, not the default.
    #[must_use]
    pub fn form_file_name<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.form_field(name)
            .map(|f| f.file_name.as_deref().unwrap_or(""))
            .unwrap_or(default)
    }

    /// Content type of the first multipart field called `name`.
    #[must_use]
    pub fn form_file_content_type<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.form_field(name)
            .map(|f| f.content_type.as_deref().unwrap_or(""))
            .unwrap_or(default)
    }

    /// All decoded form fields in body order.
    #[must_use]
    pub fn form_fields(&self) -> &[FormField] {
        &self.form
    }

    /// Value of the first cookie called `name`.
    #[must_use]
    pub fn cookie<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        parser::lookup(&self.cookies, name).unwrap_or(default)
    }

    /// Sessions are cookie-backed; this is [`Request::cookie`] under another name.
    #[must_use]
    pub fn session<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.cookie(name, default)
    }

    /// All cookie pairs in header order.
    #[must_use]
    pub fn cookies(&self) -> &[(String, String)] {
        &self.cookies
    }

    fn form_field(&self, name: &str) -> Option<&FormField> {
        self.form.iter().find(|f| f.name == name)
    }
}

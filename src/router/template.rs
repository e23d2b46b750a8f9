use std::fmt;
use std::sync::Arc;

use regex::Regex;

use super::core::ParamVec;

/// Failure to turn a registered path template into a matcher.
#[derive(Debug)]
pub enum RouteError {
    /// Templates are absolute and must start with `/`.
    MissingLeadingSlash(String),
    /// The generated pattern was rejected by the regex engine.
    InvalidPattern { template: String, source: regex::Error },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::MissingLeadingSlash(template) => {
                write!(f, "route template must start with '/': {template:?}")
            }
            RouteError::InvalidPattern { template, source } => {
                write!(f, "route template {template:?} failed to compile: {source}")
            }
        }
    }
}

impl std::error::Error for RouteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RouteError::InvalidPattern { source, .. } => Some(source),
            RouteError::MissingLeadingSlash(_) => None,
        }
    }
}

/// A route template compiled once at registration time.
///
/// Segments of the form `name:token` declare a path parameter called `name`.
/// The token describes the expected shape of the value but is not enforced:
/// every parameter captures exactly one non-empty path segment. All other
/// segments are matched literally.
///
/// The compiled pattern is anchored to the end of the request path only, so a
/// parameterized template also matches a request path that merely ends with it
/// (`/user/name:str` matches `/api/user/miku`).
#[derive(Debug, Clone)]
pub struct PathTemplate {
    raw: Arc<str>,
    params: Vec<Arc<str>>,
    matcher: Option<Regex>,
}

impl PathTemplate {
    pub fn compile(template: &str) -> Result<Self, RouteError> {
        if !template.starts_with('/') {
            return Err(RouteError::MissingLeadingSlash(template.to_string()));
        }

        let mut params = Vec::new();
        let mut pattern = String::with_capacity(template.len() + 16);

        for (i, segment) in template.split('/').enumerate() {
            if i > 0 {
                pattern.push('/');
            }
            match param_name(segment) {
                Some(name) => {
                    params.push(Arc::from(name));
                    pattern.push_str("([^/]+)");
                }
                None => pattern.push_str(&regex::escape(segment)),
            }
        }

        let matcher = if params.is_empty() {
            None
        } else {
            pattern.push('$');
            let regex = Regex::new(&pattern).map_err(|source| RouteError::InvalidPattern {
                template: template.to_string(),
                source,
            })?;
            Some(regex)
        };

        Ok(Self {
            raw: Arc::from(template),
            params,
            matcher,
        })
    }

    /// The template exactly as registered.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// `true` when the template declares no parameters.
    #[inline]
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.matcher.is_none()
    }

    /// Declared parameter names, left to right.
    #[must_use]
    pub fn param_names(&self) -> &[Arc<str>] {
        &self.params
    }

    /// Literal comparison used by the static pass.
    #[inline]
    #[must_use]
    pub fn equals(&self, path: &str) -> bool {
        self.raw.as_ref() == path
    }

    /// Match `path` against the compiled pattern and extract one value per
    /// declared parameter in declaration order.
    ///
    /// Always `None` for static templates.
    #[must_use]
    pub fn captures(&self, path: &str) -> Option<ParamVec> {
        let caps = self.matcher.as_ref()?.captures(path)?;
        let mut out = ParamVec::new();
        for (name, value) in self.params.iter().zip(caps.iter().skip(1)) {
            out.push((Arc::clone(name), value?.as_str().to_string()));
        }
        Some(out)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// `name` of a `name:token` segment. `name` must be non-empty ASCII word characters.
fn param_name(segment: &str) -> Option<&str> {
    let (name, _token) = segment.split_once(':')?;
    let valid = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_');
    valid.then_some(name)
}

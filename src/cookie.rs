use std::fmt::{Display, Formatter};

/// `SameSite` cookie policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl Display for SameSite {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        };
        f.write_str(s)
    }
}

/// A cookie to be emitted as a `Set-Cookie` response header.
///
/// `max_age` follows the wire semantics directly: `0` (the default) expires
/// the cookie immediately, a positive value keeps it for that many seconds, and
/// a negative value omits the attribute so the cookie lives for the browser
/// session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub max_age: i64,
    pub path: Option<String>,
    pub domain: Option<String>,
    pub http_only: bool,
    pub secure: bool,
    /// Only emitted for secure cookies; defaults to `Lax` there.
    pub same_site: Option<SameSite>,
}

impl Cookie {
    /// A cookie with the given name and value that expires immediately.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    /// A cookie without `Max-Age`, kept until the browser session ends.
    pub fn session(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            max_age: -1,
            ..Self::new(name, value)
        }
    }

    #[must_use]
    pub fn with_max_age(mut self, seconds: i64) -> Self {
        self.max_age = seconds;
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    #[must_use]
    pub fn http_only(mut self) -> Self {
        self.http_only = true;
        self
    }

    #[must_use]
    pub fn secure(mut self, same_site: Option<SameSite>) -> Self {
        self.secure = true;
        self.same_site = same_site;
        self
    }

    /// Render the value of a `Set-Cookie` header.
    #[must_use]
    pub fn to_header_value(&self) -> String {
        let mut out = format!("{}={};", self.name, self.value);
        if self.max_age >= 0 {
            out.push_str(&format!(" Max-Age={};", self.max_age));
        }
        if let Some(path) = self.path.as_deref().filter(|p| !p.is_empty()) {
            out.push_str(&format!(" Path={path};"));
        }
        if let Some(domain) = self.domain.as_deref().filter(|d| !d.is_empty()) {
            out.push_str(&format!(" Domain={domain};"));
        }
        if self.http_only {
            out.push_str(" HttpOnly;");
        }
        if self.secure {
            let same_site = self.same_site.unwrap_or(SameSite::Lax);
            out.push_str(&format!(" Secure; SameSite={same_site};"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cookie_expires() {
        assert_eq!(Cookie::new("sid", "").to_header_value(), "sid=; Max-Age=0;");
    }

    #[test]
    fn test_session_cookie_has_no_max_age() {
        assert_eq!(Cookie::session("sid", "abc").to_header_value(), "sid=abc;");
    }

    #[test]
    fn test_all_attributes() {
        let cookie = Cookie::new("id", "7")
            .with_max_age(3600)
            .with_path("/")
            .with_domain("example.com")
            .http_only()
            .secure(Some(SameSite::Strict));
        assert_eq!(
            cookie.to_header_value(),
            "id=7; Max-Age=3600; Path=/; Domain=example.com; HttpOnly; Secure; SameSite=Strict;"
        );
    }

    #[test]
    fn test_secure_defaults_to_lax() {
        let cookie = Cookie::session("a", "b").secure(None);
        assert_eq!(cookie.to_header_value(), "a=b; Secure; SameSite=Lax;");
    }

    #[test]
    fn test_same_site_ignored_when_not_secure() {
        let cookie = Cookie {
            same_site: Some(SameSite::None),
            ..Cookie::session("a", "b")
        };
        assert_eq!(cookie.to_header_value(), "a=b;");
    }
}

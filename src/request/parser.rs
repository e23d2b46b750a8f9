//! Scanners for the request line, header block, query string and cookies.

use http::Method;

use super::core::SUPPORTED_METHODS;

pub(crate) type Pair = (String, String);

/// Split the first line into the method token and the raw request target.
///
/// The method must sit at the very start of the buffer. The target is the
/// first whitespace-separated token of that line beginning with `/`.
pub(crate) fn parse_request_line(text: &str) -> (Option<Method>, &str) {
    let method = SUPPORTED_METHODS
        .iter()
        .find(|m| text.starts_with(m.as_str()))
        .cloned();

    let line = first_line(text);
    let target = line
        .split_whitespace()
        .find(|token| token.starts_with('/'))
        .unwrap_or("");

    (method, target)
}

/// Collect `Name: value` lines between the request line and the first blank line.
pub(crate) fn parse_headers(text: &str) -> Vec<Pair> {
    text.split('\n')
        .skip(1)
        .map(|line| line.trim_end_matches('\r'))
        .take_while(|line| !line.is_empty())
        .filter_map(|line| {
            let (name, value) = line.split_once(':')?;
            Some((name.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Drop a trailing `; boundary=...` parameter from a header value.
///
/// At least one whitespace character must follow the `;`.
pub(crate) fn strip_boundary(value: &str) -> &str {
    let mut from = 0;
    while let Some(offset) = value[from..].find(';') {
        let at = from + offset;
        let rest = &value[at + 1..];
        let trimmed = rest.trim_start();
        if trimmed.len() < rest.len() && trimmed.starts_with("boundary") {
            return value[..at].trim_end();
        }
        from = at + 1;
    }
    value
}

/// Decode a query string (or urlencoded body) and split it into pairs.
pub(crate) fn parse_query(raw: &str) -> Vec<Pair> {
    split_pairs(&decode_form_component(raw))
}

/// Split `a=1&b=2` into pairs. Only the text between the first and second
/// `=` of a segment becomes the value; a segment without `=` has an empty
/// value.
pub(crate) fn split_pairs(decoded: &str) -> Vec<Pair> {
    decoded
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut parts = segment.split('=');
            let name = parts.next().unwrap_or_default();
            let value = parts.next().unwrap_or_default();
            (name.to_string(), value.to_string())
        })
        .collect()
}

/// Parse a `Cookie` header value into pairs, splitting each on its first `=`.
pub(crate) fn parse_cookies(header: &str) -> Vec<Pair> {
    header
        .split(';')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.split_once('=') {
            Some((name, value)) => (name.to_string(), value.to_string()),
            None => (segment.to_string(), String::new()),
        })
        .collect()
}

/// First pair whose name equals `name` exactly.
pub(crate) fn lookup<'a>(pairs: &'a [Pair], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

/// Percent-decode a path component. Escapes that do not form valid UTF-8
/// become replacement characters.
pub(crate) fn decode_component(raw: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned()
}

/// Percent-decode a query/form component, treating `+` as a space.
pub(crate) fn decode_form_component(raw: &str) -> String {
    if raw.contains('+') {
        decode_component(&raw.replace('+', " "))
    } else {
        decode_component(raw)
    }
}

fn first_line(text: &str) -> &str {
    text.split('\n').next().unwrap_or_default()
}

//! Form body decoding for urlencoded and multipart requests.

use super::core::FormField;
use super::parser;

pub(crate) const URLENCODED: &str = "application/x-www-form-urlencoded";
pub(crate) const MULTIPART: &str = "multipart/form-data";

/// The body of a urlencoded request is the last `\r\n`-separated line of the buffer.
pub(crate) fn parse_urlencoded(text: &str) -> Vec<FormField> {
    let body = text.rsplit("\r\n").next().unwrap_or_default();
    parser::parse_query(body)
        .into_iter()
        .map(|(name, value)| FormField {
            name,
            value,
            ..FormField::default()
        })
        .collect()
}

/// Decode a `multipart/form-data` body.
///
/// The body starts on the line after the `boundary=` marker. Parts are
/// separated by delimiter lines (`--<boundary>`, or any line beginning with
/// `---` when no boundary value is present). Text before the first delimiter
/// and after the closing one is ignored, and so is any part without a `name`
/// attribute. A truncated final part is still decoded.
pub(crate) fn parse_multipart(text: &str) -> Vec<FormField> {
    let Some(start) = text.find("boundary=") else {
        return Vec::new();
    };
    let rest = &text[start + "boundary=".len()..];
    let (boundary_line, body) = rest.split_once('\n').unwrap_or((rest, ""));
    let boundary = boundary_line.trim().trim_matches('"');
    let delimiter = format!("--{boundary}");

    let is_delimiter = |line: &str| {
        if boundary.is_empty() {
            line.starts_with("---")
        } else {
            line.starts_with(delimiter.as_str())
        }
    };

    let mut fields = Vec::new();
    let mut current: Option<Vec<&str>> = None;

    for line in body.split('\n') {
        let bare = line.trim_end_matches('\r');
        if is_delimiter(bare) {
            if let Some(lines) = current.take() {
                fields.extend(parse_part(&lines));
            }
            if !boundary.is_empty() && bare[delimiter.len()..].starts_with("--") {
                return fields;
            }
            current = Some(Vec::new());
            continue;
        }
        if let Some(lines) = current.as_mut() {
            lines.push(line);
        }
    }

    if let Some(lines) = current {
        fields.extend(parse_part(&lines));
    }
    fields
}

/// Decode one part given its raw lines (each may still end in `\r`).
///
/// Header lines run up to the first blank line. `name`, `filename` and the
/// part `Content-Type` come from those lines. The value is the part with its
/// `Content-*` header lines removed, trimmed of surrounding whitespace.
fn parse_part(lines: &[&str]) -> Option<FormField> {
    let header_end = lines
        .iter()
        .position(|l| l.trim().is_empty())
        .unwrap_or(lines.len());
    let (header_lines, body_lines) = lines.split_at(header_end);

    let name = header_lines
        .iter()
        .find_map(|l| quoted_attribute(l, "name"))?;
    let file_name = header_lines
        .iter()
        .find_map(|l| quoted_attribute(l, "filename"));
    let content_type = header_lines.iter().find_map(|l| {
        let (key, value) = l.split_once(':')?;
        key.trim()
            .eq_ignore_ascii_case("Content-Type")
            .then(|| value.split_whitespace().collect::<String>())
    });

    let kept = header_lines
        .iter()
        .filter(|l| !is_content_header(l))
        .chain(body_lines.iter())
        .copied()
        .collect::<Vec<_>>()
        .join("\n");

    Some(FormField {
        name: name.to_string(),
        value: kept.trim().to_string(),
        file_name: file_name.map(str::to_string),
        content_type,
    })
}

fn is_content_header(line: &str) -> bool {
    line.get(..8)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("Content-"))
}

/// Find `attr="value"` in a header line where `attr` is not the tail of a
/// longer word (so `name` does not match inside `filename`).
fn quoted_attribute<'a>(line: &'a str, attr: &str) -> Option<&'a str> {
    let needle = format!("{attr}=\"");
    let mut from = 0;
    while let Some(offset) = line[from..].find(needle.as_str()) {
        let at = from + offset;
        let standalone = line[..at]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_ascii_alphanumeric() && c != '_');
        let value_start = at + needle.len();
        if standalone {
            let value = &line[value_start..];
            return Some(value.split_once('"').map_or(value, |(v, _)| v));
        }
        from = value_start;
    }
    None
}

use http::StatusCode;

use crate::context::Context;

/// Canonical reason phrase for `status`, or `""` for unregistered codes.
#[must_use]
pub fn status_reason(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("")
}

/// Render a context as HTTP/1.1 response bytes.
///
/// Status line, `Content-Type`, every context header in insertion order, a
/// blank line, then the body verbatim. No `Content-Length` is emitted: the
/// connection is closed after the single write.
#[must_use]
pub fn serialize(ctx: &Context) -> Vec<u8> {
    let mut head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\n",
        ctx.status(),
        ctx.status_text(),
        ctx.content_type()
    );
    for (name, value) in ctx.headers() {
        head.push_str(name);
        head.push_str(": ");
        head.push_str(value);
        head.push_str("\r\n");
    }
    head.push_str("\r\n");

    let mut out = Vec::with_capacity(head.len() + ctx.body().len());
    out.extend_from_slice(head.as_bytes());
    out.extend_from_slice(ctx.body());
    out
}

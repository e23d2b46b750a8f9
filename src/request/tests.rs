use super::Request;
use http::Method;

fn multipart_request() -> String {
    [
        "POST /upload HTTP/1.1",
        "Host: localhost:8080",
        "Content-Type: multipart/form-data; boundary=------------------------d74496d66958873e",
        "Content-Length: 312",
        "",
        "--------------------------d74496d66958873e",
        "Content-Disposition: form-data; name=\"person\"",
        "",
        "anonymous",
        "--------------------------d74496d66958873e",
        "Content-Disposition: form-data; name=\"secret\"; filename=\"file.txt\"",
        "Content-Type: text/plain",
        "",
        "contents of the file",
        "second line",
        "--------------------------d74496d66958873e--",
        "",
    ]
    .join("\r\n")
}

#[test]
fn test_method_and_path() {
    let req = Request::parse(b"DELETE /items/42 HTTP/1.1\r\nHost: x\r\n\r\n");
    assert_eq!(req.method(), Some(&Method::DELETE));
    assert_eq!(req.path(), "/items/42");
}

#[test]
fn test_every_supported_method() {
    for (raw, method) in [
        ("GET", Method::GET),
        ("POST", Method::POST),
        ("PUT", Method::PUT),
        ("DELETE", Method::DELETE),
        ("OPTIONS", Method::OPTIONS),
    ] {
        let req = Request::parse(format!("{raw} / HTTP/1.1\r\n\r\n").as_bytes());
        assert_eq!(req.method(), Some(&method), "method {raw}");
    }
}

#[test]
fn test_unrecognised_method_has_no_method() {
    let req = Request::parse(b"PATCH /a HTTP/1.1\r\n\r\n");
    assert_eq!(req.method(), None);
    assert_eq!(req.path(), "/a");
}

#[test]
fn test_method_must_be_at_start() {
    let req = Request::parse(b" GET /a HTTP/1.1\r\n\r\n");
    assert_eq!(req.method(), None);
}

#[test]
fn test_garbage_degrades_to_empty() {
    let req = Request::parse(b"\x00\x01garbage");
    assert_eq!(req.method(), None);
    assert_eq!(req.path(), "");
    assert_eq!(req.header("Host", "none"), "none");
    assert!(req.query_pairs().is_empty());
    assert!(req.form_fields().is_empty());

    let empty = Request::parse(b"");
    assert_eq!(empty.path(), "");
}

#[test]
fn test_path_is_percent_decoded_and_query_stripped() {
    let req = Request::parse(b"GET /hello%20world/caf%C3%A9?x=1 HTTP/1.1\r\n\r\n");
    assert_eq!(req.path(), "/hello world/café");
    assert_eq!(req.query("x", ""), "1");
}

#[test]
fn test_query_pairs_in_order() {
    let req = Request::parse(b"GET /q?a=1&b=two&c HTTP/1.1\r\n\r\n");
    let pairs: Vec<(&str, &str)> = req
        .query_pairs()
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    assert_eq!(pairs, vec![("a", "1"), ("b", "two"), ("c", "")]);
}

#[test]
fn test_query_value_truncated_at_second_equals() {
    // Current behaviour: only the text up to the next `=` is kept.
    let req = Request::parse(b"GET /q?k=x=y HTTP/1.1\r\n\r\n");
    assert_eq!(req.query("k", "dflt"), "x");
}

#[test]
fn test_query_default_and_first_match() {
    let req = Request::parse(b"GET /q?a=1&a=2&msg=hi+there%21 HTTP/1.1\r\n\r\n");
    assert_eq!(req.query("a", ""), "1");
    assert_eq!(req.query("missing", "fallback"), "fallback");
    assert_eq!(req.query("msg", ""), "hi there!");
}

#[test]
fn test_header_lookup() {
    let req = Request::parse(
        b"GET / HTTP/1.1\r\nHost: example.com  \r\nX-Token: first\r\nX-Token: second\r\n\r\nX-Token: body\r\n",
    );
    assert_eq!(req.header("Host", ""), "example.com");
    assert_eq!(req.header("X-Token", ""), "first");
    assert_eq!(req.header("x-token", ""), "first");
    assert_eq!(req.header("Accept", "*/*"), "*/*");
}

#[test]
fn test_header_strips_boundary_marker() {
    let req = Request::parse(
        b"POST / HTTP/1.1\r\nContent-Type: multipart/form-data; boundary=----abc\r\n\r\n",
    );
    assert_eq!(req.header("Content-Type", ""), "multipart/form-data");
}

#[test]
fn test_empty_header_value_uses_default() {
    let req = Request::parse(b"GET / HTTP/1.1\r\nX-Empty:   \r\n\r\n");
    assert_eq!(req.header("X-Empty", "dflt"), "dflt");
}

#[test]
fn test_urlencoded_form() {
    let req = Request::parse(
        b"POST /login HTTP/1.1\r\nContent-Type: application/x-www-form-urlencoded\r\nContent-Length: 33\r\n\r\nuser=miku&pass=p%40ss&note=a+b&x",
    );
    assert_eq!(req.form("user", ""), "miku");
    assert_eq!(req.form("pass", ""), "p@ss");
    assert_eq!(req.form("note", ""), "a b");
    assert_eq!(req.form("x", "dflt"), "");
    assert_eq!(req.form("nope", "dflt"), "dflt");
    assert_eq!(req.form_file_name("user", "dflt"), "");
}

#[test]
fn test_other_content_type_has_no_form() {
    let req = Request::parse(
        b"POST /api HTTP/1.1\r\nContent-Type: application/json\r\n\r\n{\"a\":1}",
    );
    assert!(req.form_fields().is_empty());
    assert_eq!(req.form("a", "dflt"), "dflt");
}

#[test]
fn test_multipart_form() {
    let raw = multipart_request();
    let req = Request::parse(raw.as_bytes());

    assert_eq!(req.form_fields().len(), 2);
    assert_eq!(req.form("person", ""), "anonymous");
    assert_eq!(req.form_file_name("person", "dflt"), "");
    assert_eq!(req.form_file_content_type("person", "dflt"), "");

    assert_eq!(req.form("secret", ""), "contents of the file\r\nsecond line");
    assert_eq!(req.form_file_name("secret", ""), "file.txt");
    assert_eq!(req.form_file_content_type("secret", ""), "text/plain");

    assert_eq!(req.form_file_name("missing", "dflt"), "dflt");
}

#[test]
fn test_multipart_truncated_body_still_decodes() {
    let raw = multipart_request();
    let cut = raw.find("second line").unwrap_or(raw.len());
    let req = Request::parse(raw[..cut].as_bytes());
    assert_eq!(req.form("person", ""), "anonymous");
    assert_eq!(req.form("secret", ""), "contents of the file");
}

#[test]
fn test_cookies() {
    let req = Request::parse(b"GET / HTTP/1.1\r\nCookie: a=1; b=2;  token=x=y ; flag\r\n\r\n");
    assert_eq!(req.cookie("b", ""), "2");
    assert_eq!(req.cookie("c", "dflt"), "dflt");
    assert_eq!(req.cookie("token", ""), "x=y");
    assert_eq!(req.cookie("flag", "dflt"), "");
    assert_eq!(req.session("a", ""), "1");
}

#[test]
fn test_no_cookie_header() {
    let req = Request::parse(b"GET / HTTP/1.1\r\n\r\n");
    assert!(req.cookies().is_empty());
    assert_eq!(req.session("sid", "anon"), "anon");
}

#[test]
fn test_invalid_utf8_escape_keeps_path_and_query() {
    let req = Request::parse(b"GET /caf%E9?x=1 HTTP/1.1\r\n\r\n");
    assert_eq!(req.path(), "/caf\u{FFFD}");
    assert_eq!(req.query("x", "dflt"), "1");
}

#[test]
fn test_multipart_keeps_non_content_part_headers() {
    let raw = [
        "POST /upload HTTP/1.1",
        "Content-Type: multipart/form-data; boundary=----abc",
        "",
        "------abc",
        "Content-Disposition: form-data; name=\"a\"",
        "X-Extra: 1",
        "",
        "val",
        "------abc--",
        "",
    ]
    .join("\r\n");
    let req = Request::parse(raw.as_bytes());
    assert_eq!(req.form("a", ""), "X-Extra: 1\r\n\r\nval");
}

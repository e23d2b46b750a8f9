//! Demo application served by `brrtlite serve` and listed by `brrtlite routes`.
//!
//! | Method | Template | Response |
//! |---|---|---|
//! | GET | `/` | `index.html` template, or a text greeting without templates |
//! | GET | `/ping` | `pong` |
//! | GET | `/user/name:str/id:int` | path parameters as JSON |
//! | GET | `/echo` | method, path, query, headers and cookies as JSON |
//! | POST | `/form` | decoded form fields as JSON |
//! | GET | `/session` | current `sid` session and a fresh one |
//! | DELETE | `/session` | expires the `sid` session |
//! | GET | `/old` | redirect to `/` |
//! | OPTIONS | `/echo` | `Allow` header |

use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::context::Context;
use crate::dispatcher::Dispatcher;
use crate::ids::ConnectionId;
use crate::middleware::{DefaultHeaders, TracingMiddleware};
use crate::request::Request;
use crate::router::{RouteError, RouteTable};
use crate::runtime_config::RuntimeConfig;
use crate::static_files::StaticFiles;
use crate::templates::Templates;

pub const SESSION_COOKIE: &str = "sid";

/// Register the demo routes and static assets from `config`.
pub fn route_table(config: &RuntimeConfig) -> Result<RouteTable, RouteError> {
    let mut table = RouteTable::new();
    let security_headers = DefaultHeaders::new()
        .header("X-Content-Type-Options", "nosniff")
        .header("Cache-Control", "no-store");

    table.get("/", index)?.with(TracingMiddleware);
    table.get("/ping", ping)?;
    table.get("/user/name:str/id:int", user)?.with(TracingMiddleware);
    table.get("/echo", echo)?.with(TracingMiddleware);
    table.options("/echo", allow)?;
    table
        .post("/form", form)?
        .with(TracingMiddleware)
        .with(security_headers.clone());
    table.get("/session", session)?.with(security_headers);
    table.delete("/session", end_session)?;
    table.get("/old", |_req: &Request, ctx: &mut Context| ctx.redirect("/"))?;

    table.static_assets(StaticFiles::new(&config.static_prefix, &config.static_dir));
    Ok(table)
}

/// Dispatcher with the demo global hook and, when the template directory
/// exists, HTML templates.
pub fn dispatcher(config: &RuntimeConfig) -> Dispatcher {
    let dispatcher = Dispatcher::new().with_global_hook(server_header);
    if config.template_dir.is_dir() {
        dispatcher.with_templates(Arc::new(Templates::new(&config.template_dir)))
    } else {
        dispatcher
    }
}

fn server_header(_req: &Request, ctx: &mut Context) {
    ctx.set_header("Server", concat!("brrtlite/", env!("CARGO_PKG_VERSION")));
}

fn index(req: &Request, ctx: &mut Context) {
    let name = req.query("name", "world");
    ctx.html("index", &json!({ "name": name }));
    if ctx.body().is_empty() {
        ctx.set_content_type("text/plain");
        ctx.text(format!("Hello, {name}!"));
    }
}

fn ping(_req: &Request, ctx: &mut Context) {
    ctx.text("pong");
}

fn user(_req: &Request, ctx: &mut Context) {
    let body = json!({
        "name": ctx.param("name", ""),
        "id": ctx.param("id", ""),
    });
    ctx.json(&body);
}

fn echo(req: &Request, ctx: &mut Context) {
    ctx.json(&json!({
        "method": req.method().map(|m| m.as_str()),
        "path": req.path(),
        "query": pairs_to_object(req.query_pairs()),
        "headers": pairs_to_object(req.headers()),
        "cookies": pairs_to_object(req.cookies()),
    }));
}

fn allow(_req: &Request, ctx: &mut Context) {
    ctx.set_status(204);
    ctx.set_header("Allow", "GET, OPTIONS");
}

fn form(req: &Request, ctx: &mut Context) {
    let fields: Vec<Value> = req
        .form_fields()
        .iter()
        .map(|f| {
            json!({
                "name": f.name,
                "value": f.value,
                "file_name": f.file_name,
                "content_type": f.content_type,
            })
        })
        .collect();
    ctx.json(&json!({ "fields": fields }));
}

fn session(req: &Request, ctx: &mut Context) {
    let previous = req.session(SESSION_COOKIE, "");
    let next = ConnectionId::new().to_string();
    ctx.set_session(SESSION_COOKIE, &next);
    ctx.json(&json!({
        "previous": (!previous.is_empty()).then_some(previous),
        "session": next,
    }));
}

fn end_session(_req: &Request, ctx: &mut Context) {
    ctx.remove_session(SESSION_COOKIE);
    ctx.set_status(204);
}

/// First occurrence wins, matching the request lookup helpers.
fn pairs_to_object(pairs: &[(String, String)]) -> Value {
    let mut map = Map::new();
    for (k, v) in pairs {
        map.entry(k.clone()).or_insert_with(|| Value::String(v.clone()));
    }
    Value::Object(map)
}

use std::hint::black_box;

use brrtlite::context::Context;
use brrtlite::router::{RouteTable, Router};
use brrtlite::{Dispatcher, Request};
use criterion::{criterion_group, criterion_main, Criterion};

fn noop(_req: &Request, _ctx: &mut Context) {}

fn zoo_router() -> Router {
    let mut table = RouteTable::new();
    for template in [
        "/",
        "/zoo/animals",
        "/zoo/animals/id:int",
        "/zoo/animals/id:int/toys/toy_id:int",
        "/zoo/category:str/animals/id:int/habitats/habitat_id:int/sections/section_id:int",
        "/complex/a:x/b:x/c:x/d:x/e:x/f:x/g:x/h:x/i:x",
    ] {
        table.get(template, noop).expect("valid template");
    }
    table
        .post("/inventory/warehouse_id:int/feeds/feed_id:int/items/item_id:int/batches/batch_id:int", noop)
        .expect("valid template");
    table.freeze()
}

fn requests() -> Vec<Vec<u8>> {
    [
        "GET /zoo/animals HTTP/1.1\r\nHost: zoo\r\n\r\n",
        "GET /zoo/animals/123 HTTP/1.1\r\nHost: zoo\r\n\r\n",
        "GET /zoo/animals/123/toys/456?color=red HTTP/1.1\r\nHost: zoo\r\nCookie: sid=abc\r\n\r\n",
        "GET /zoo/cats/animals/123/habitats/88/sections/5 HTTP/1.1\r\nHost: zoo\r\n\r\n",
        "POST /inventory/1/feeds/2/items/3/batches/4 HTTP/1.1\r\nContent-Type: application/x-www-form-urlencoded\r\n\r\nqty=4&unit=kg",
        "GET /complex/1/2/3/4/5/6/7/8/9 HTTP/1.1\r\n\r\n",
    ]
    .iter()
    .map(|r| r.as_bytes().to_vec())
    .collect()
}

fn bench_parse(c: &mut Criterion) {
    let raw = requests();
    c.bench_function("request_parse", |b| {
        b.iter(|| {
            for bytes in &raw {
                black_box(Request::parse(black_box(bytes)));
            }
        })
    });
}

fn bench_route_throughput(c: &mut Criterion) {
    let router = zoo_router();
    let parsed: Vec<Request> = requests().iter().map(|r| Request::parse(r)).collect();
    c.bench_function("route_match", |b| {
        b.iter(|| {
            for req in &parsed {
                black_box(router.resolve(req));
            }
        })
    });
}

fn bench_dispatch(c: &mut Criterion) {
    let router = zoo_router();
    let dispatcher = Dispatcher::new();
    let raw = requests();
    c.bench_function("parse_and_dispatch", |b| {
        b.iter(|| {
            for bytes in &raw {
                let req = Request::parse(bytes);
                black_box(dispatcher.dispatch(&router, &req));
            }
        })
    });
}

criterion_group!(benches, bench_parse, bench_route_throughput, bench_dispatch);
criterion_main!(benches);

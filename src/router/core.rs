use std::sync::Arc;

use http::Method;
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use super::template::{PathTemplate, RouteError};
use crate::middleware::{Handler, Middleware};
use crate::request::Request;
use crate::static_files::StaticFiles;

/// Maximum number of path parameters stored inline before spilling to the heap.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Extracted path parameters in declaration order.
///
/// Names are shared with the compiled template; values are per-request.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// A registered route: method, compiled template, handler and middleware chain.
pub struct Route {
    method: Method,
    template: PathTemplate,
    handler: Arc<dyn Handler>,
    middleware: Vec<Arc<dyn Middleware>>,
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("template", &self.template.as_str())
            .field("middleware", &self.middleware.len())
            .finish()
    }
}

impl Route {
    #[inline]
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[inline]
    #[must_use]
    pub fn template(&self) -> &PathTemplate {
        &self.template
    }

    /// Append a middleware to this route's chain. Middleware run in the order added.
    pub fn with(&mut self, middleware: impl Middleware + 'static) -> &mut Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    pub(crate) fn handler(&self) -> &dyn Handler {
        self.handler.as_ref()
    }

    pub(crate) fn middleware(&self) -> &[Arc<dyn Middleware>] {
        &self.middleware
    }
}

/// Outcome of matching one request against the frozen route table.
#[derive(Debug)]
pub enum Resolution<'a> {
    /// A registered route matched; `params` is empty for static templates.
    Route { route: &'a Route, params: ParamVec },
    /// A `GET` under the static prefix found a file.
    Asset {
        body: Vec<u8>,
        content_type: Option<&'static str>,
    },
    NotFound,
}

/// Append-only route registration used during startup.
///
/// Call [`RouteTable::freeze`] to obtain the read-only [`Router`] that the
/// server matches against. Nothing can be registered after that point.
#[derive(Default)]
pub struct RouteTable {
    routes: Vec<Route>,
    assets: Option<StaticFiles>,
}

impl RouteTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `method` requests matching `template`.
    ///
    /// Returns the new route so middleware can be chained onto it.
    pub fn register(
        &mut self,
        method: Method,
        template: &str,
        handler: impl Handler + 'static,
    ) -> Result<&mut Route, RouteError> {
        let template = PathTemplate::compile(template)?;
        debug!(
            method = %method,
            template = %template,
            params = ?template.param_names(),
            "Route registered"
        );
        self.routes.push(Route {
            method,
            template,
            handler: Arc::new(handler),
            middleware: Vec::new(),
        });
        let index = self.routes.len() - 1;
        Ok(&mut self.routes[index])
    }

    pub fn get(
        &mut self,
        template: &str,
        handler: impl Handler + 'static,
    ) -> Result<&mut Route, RouteError> {
        self.register(Method::GET, template, handler)
    }

    pub fn post(
        &mut self,
        template: &str,
        handler: impl Handler + 'static,
    ) -> Result<&mut Route, RouteError> {
        self.register(Method::POST, template, handler)
    }

    pub fn put(
        &mut self,
        template: &str,
        handler: impl Handler + 'static,
    ) -> Result<&mut Route, RouteError> {
        self.register(Method::PUT, template, handler)
    }

    pub fn delete(
        &mut self,
        template: &str,
        handler: impl Handler + 'static,
    ) -> Result<&mut Route, RouteError> {
        self.register(Method::DELETE, template, handler)
    }

    pub fn options(
        &mut self,
        template: &str,
        handler: impl Handler + 'static,
    ) -> Result<&mut Route, RouteError> {
        self.register(Method::OPTIONS, template, handler)
    }

    /// Serve files for `GET` requests under the prefix of `files` when no route matches.
    pub fn static_assets(&mut self, files: StaticFiles) -> &mut Self {
        self.assets = Some(files);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Finish registration and produce the read-only router.
    #[must_use]
    pub fn freeze(self) -> Router {
        let routes_summary: Vec<String> = self
            .routes
            .iter()
            .take(10)
            .map(|r| format!("{} {}", r.method, r.template))
            .collect();
        let static_prefix = self.assets.as_ref().map(StaticFiles::url_prefix);

        info!(
            routes_count = self.routes.len(),
            routes_summary = ?routes_summary,
            static_prefix = ?static_prefix,
            "Routing table frozen"
        );

        Router {
            routes: self.routes,
            assets: self.assets,
        }
    }
}

/// Read-only route table shared by every connection.
pub struct Router {
    routes: Vec<Route>,
    assets: Option<StaticFiles>,
}

impl Router {
    /// Resolve a request to a route, a static asset or "not found".
    ///
    /// 1. Static pass: the first route, in registration order, whose template
    ///    equals the path literally and whose method matches.
    /// 2. Parameterized pass: the first route whose compiled template matches
    ///    the path and whose method matches.
    /// 3. Asset lookup for `GET` requests under the static prefix.
    /// 4. Otherwise [`Resolution::NotFound`].
    ///
    /// A request with no recognised method never matches a route.
    #[must_use]
    pub fn resolve(&self, req: &Request) -> Resolution<'_> {
        let path = req.path();
        let method = req.method();

        debug!(method = ?method, path = %path, "Route match attempt");

        if let Some(method) = method {
            if let Some(route) = self
                .routes
                .iter()
                .find(|r| r.method == *method && r.template.equals(path))
            {
                info!(
                    method = %method,
                    path = %path,
                    route_pattern = %route.template,
                    kind = "static",
                    "Route matched"
                );
                return Resolution::Route {
                    route,
                    params: ParamVec::new(),
                };
            }

            for route in self.routes.iter().filter(|r| r.method == *method) {
                if let Some(params) = route.template.captures(path) {
                    info!(
                        method = %method,
                        path = %path,
                        route_pattern = %route.template,
                        path_params = ?params,
                        kind = "parameterized",
                        "Route matched"
                    );
                    return Resolution::Route { route, params };
                }
            }

            if *method == Method::GET {
                if let Some(resolution) = self.resolve_asset(path) {
                    return resolution;
                }
            }
        }

        warn!(method = ?method, path = %path, "No route matched");
        Resolution::NotFound
    }

    fn resolve_asset(&self, path: &str) -> Option<Resolution<'_>> {
        let assets = self.assets.as_ref()?;
        let relative = assets.strip_prefix(path)?;
        match assets.load(relative) {
            Ok((body, content_type)) => {
                info!(
                    path = %path,
                    bytes = body.len(),
                    content_type = ?content_type,
                    "Static asset served"
                );
                Some(Resolution::Asset { body, content_type })
            }
            Err(e) => {
                warn!(path = %path, error = %e, "Static asset unavailable");
                None
            }
        }
    }

    /// Registered routes in registration order.
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    #[must_use]
    pub fn static_files(&self) -> Option<&StaticFiles> {
        self.assets.as_ref()
    }

    /// Print all registered routes to stdout.
    pub fn dump_routes(&self) {
        println!("[routes] count={}", self.routes.len());
        for route in &self.routes {
            println!(
                "[route] {} {} middleware={}",
                route.method,
                route.template,
                route.middleware.len()
            );
        }
        if let Some(assets) = &self.assets {
            println!(
                "[static] GET {}/* -> {}",
                assets.url_prefix(),
                assets.base_dir().display()
            );
        }
    }
}

pub mod extract;
pub mod matcher;
pub mod products;

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::extract::Request;
use axum::handler::Handler;
use axum::response::{IntoResponse, Response};
use axum::Router;
use http::Method;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;
use matcher::{PathMatcher, RouteParams};

type RouteFuture = Pin<Box<dyn Future<Output = Response> + Send>>;
type BoxedHandler = Box<dyn Fn(Request, AppState) -> RouteFuture + Send + Sync>;

pub struct Route {
    method: Method,
    matcher: PathMatcher,
    handler: BoxedHandler,
}

impl Route {
    pub fn new<H, T>(method: Method, matcher: PathMatcher, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        let handler: BoxedHandler = Box::new(move |req: Request, state: AppState| -> RouteFuture {
            Box::pin(handler.clone().call(req, state))
        });
        Self { method, matcher, handler }
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("matcher", &self.matcher)
            .finish_non_exhaustive()
    }
}

/// A route that accepted a request, with what it captured from the path.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub params: RouteParams,
}

/// Ordered routes; the first one whose method and path both match wins.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route<H, T>(mut self, method: Method, matcher: PathMatcher, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        self.routes.push(Route::new(method, matcher, handler));
        self
    }

    pub fn resolve(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        self.routes.iter().find_map(|route| {
            if route.method != *method {
                return None;
            }
            route
                .matcher
                .matches(path)
                .map(|params| RouteMatch { route, params })
        })
    }
}

#[derive(Clone)]
pub struct Dispatcher {
    table: Arc<RouteTable>,
    state: AppState,
}

impl Dispatcher {
    pub fn new(table: RouteTable, state: AppState) -> Self {
        Self { table: Arc::new(table), state }
    }

    /// Hands the request to the first matching route, or answers 404 itself.
    pub async fn dispatch(&self, mut req: Request) -> Response {
        let Some(RouteMatch { route, params }) =
            self.table.resolve(req.method(), req.uri().path())
        else {
            return AppError::RouteNotFound.into_response();
        };

        debug!(method = %route.method, pattern = %route.matcher, id = ?params.id(), "dispatching");
        req.extensions_mut().insert(params);
        (route.handler)(req, self.state.clone()).await
    }
}

pub fn create_router(state: AppState) -> Result<Router, regex::Error> {
    let dispatcher = Dispatcher::new(products::routes()?, state);

    Ok(Router::new()
        .fallback(move |req: Request| async move { dispatcher.dispatch(req).await })
        .layer(TraceLayer::new_for_http()))
}

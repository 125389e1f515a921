//! Running the middleware chain in front of a route loader.

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use tracing::debug;

use crate::error::Result;
use crate::middleware::{BoxFuture, MiddlewareContext, MiddlewareResult};
use crate::registry::MiddlewareRegistry;
use crate::request::{PathParams, Request};
use crate::response::Response;

/// What a loader or action receives.
#[derive(Debug, Clone)]
pub struct LoaderArgs {
    /// The navigation request.
    pub request: Request,
    /// Route parameters bound by the hosting router.
    pub params: PathParams,
}

impl LoaderArgs {
    /// Creates loader arguments.
    pub fn new(request: Request, params: PathParams) -> Self {
        Self { request, params }
    }
}

/// A boxed async loader (or action).
pub type Loader = Arc<dyn Fn(LoaderArgs) -> BoxFuture<'static, Result<Response>> + Send + Sync>;

/// Boxes an async closure into a [`Loader`].
pub fn loader_fn<F, Fut>(f: F) -> Loader
where
    F: Fn(LoaderArgs) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response>> + Send + 'static,
{
    Arc::new(move |args| f(args).boxed())
}

async fn run_loader(loader: Option<&Loader>, args: LoaderArgs) -> Result<Response> {
    match loader {
        Some(loader) => loader(args).await,
        None => Ok(Response::no_content()),
    }
}

/// Runs every middleware matching the request path, then the loader.
///
/// Middleware run in registration order, one at a time. A redirect returns
/// immediately; a rewrite runs the loader against the rewritten request
/// without consulting the remaining middleware. Handler errors are returned
/// to the caller as is. With no loader, the result is a `204` response.
pub async fn dispatch(
    registry: &MiddlewareRegistry,
    args: LoaderArgs,
    loader: Option<&Loader>,
) -> Result<Response> {
    let path = args.request.path().to_string();
    let chain = registry.matching(&path);
    debug!(path = %path, middleware = chain.len(), "dispatching navigation");

    if chain.is_empty() {
        return run_loader(loader, args).await;
    }

    let ctx = MiddlewareContext {
        params: args.params.clone(),
        path,
    };

    for (position, middleware) in chain.iter().enumerate() {
        match middleware.handler().handle(&args.request, &ctx).await? {
            MiddlewareResult::Continue => {}
            MiddlewareResult::Headers(headers) => {
                debug!(position, headers = headers.len(), "header directives ignored");
            }
            MiddlewareResult::Redirect(target) => {
                let response = target.into_response();
                debug!(position, location = ?response.location(), "middleware redirected");
                return Ok(response);
            }
            MiddlewareResult::Rewrite(target) => {
                debug!(position, target = %target, "middleware rewrote request");
                let request = args.request.rewrite(&target)?;
                return run_loader(loader, LoaderArgs::new(request, args.params)).await;
            }
        }
    }

    run_loader(loader, args).await
}

/// Wraps `loader` so that every invocation goes through [`dispatch`].
pub fn with_middleware(registry: Arc<MiddlewareRegistry>, loader: Option<Loader>) -> Loader {
    Arc::new(move |args| {
        let registry = Arc::clone(&registry);
        let loader = loader.clone();
        async move { dispatch(&registry, args, loader.as_ref()).await }.boxed()
    })
}

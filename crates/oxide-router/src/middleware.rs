//! Middleware run before a route's data loader.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use futures::FutureExt;
use tracing::info;

use crate::error::Result;
use crate::matcher::Matcher;
use crate::request::{PathParams, Request};
use crate::response::Response;

/// A boxed future for async middleware operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Where a short-circuiting middleware sends the navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectTarget {
    /// A path or URL, turned into a `302` response.
    Path(String),
    /// A prebuilt redirect response, returned as is.
    Response(Response),
}

impl RedirectTarget {
    /// Converts the target into the response handed to the router.
    pub fn into_response(self) -> Response {
        match self {
            Self::Path(location) => Response::redirect(location),
            Self::Response(response) => response,
        }
    }
}

/// Result of middleware processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MiddlewareResult {
    /// Continue to the next middleware, or to the loader after the last one.
    Continue,
    /// Stop and return this redirect; neither later middleware nor the
    /// loader run.
    Redirect(RedirectTarget),
    /// Stop the chain and run the loader against this URL instead.
    Rewrite(String),
    /// Header directives. Accepted but not applied; the chain continues.
    Headers(HashMap<String, String>),
}

impl MiddlewareResult {
    /// Shorthand for a redirect to a path.
    pub fn redirect(location: impl Into<String>) -> Self {
        Self::Redirect(RedirectTarget::Path(location.into()))
    }

    /// Shorthand for a rewrite.
    pub fn rewrite(target: impl Into<String>) -> Self {
        Self::Rewrite(target.into())
    }
}

/// What a middleware handler knows about the navigation besides the request.
#[derive(Debug, Clone, Default)]
pub struct MiddlewareContext {
    /// Route parameters bound by the hosting router.
    pub params: PathParams,
    /// The request path.
    pub path: String,
}

/// Trait for navigation interceptors.
///
/// Handlers run strictly one after another; each may await freely.
/// Returning [`MiddlewareResult::Continue`] hands control to the next one.
///
/// # Example
///
/// ```ignore
/// struct RequireTenant;
///
/// impl MiddlewareHandler for RequireTenant {
///     fn handle<'a>(
///         &'a self,
///         req: &'a Request,
///         _ctx: &'a MiddlewareContext,
///     ) -> BoxFuture<'a, Result<MiddlewareResult>> {
///         Box::pin(async move {
///             if req.get_header("X-Tenant").is_some() {
///                 Ok(MiddlewareResult::Continue)
///             } else {
///                 Ok(MiddlewareResult::redirect("/select-tenant"))
///             }
///         })
///     }
/// }
/// ```
pub trait MiddlewareHandler: Send + Sync {
    /// Inspects the navigation and decides how it proceeds.
    fn handle<'a>(
        &'a self,
        req: &'a Request,
        ctx: &'a MiddlewareContext,
    ) -> BoxFuture<'a, Result<MiddlewareResult>>;
}

/// Adapts an async closure taking owned arguments.
struct HandlerFn<F>(F);

impl<F, Fut> MiddlewareHandler for HandlerFn<F>
where
    F: Fn(Request, MiddlewareContext) -> Fut + Send + Sync,
    Fut: Future<Output = Result<MiddlewareResult>> + Send + 'static,
{
    fn handle<'a>(
        &'a self,
        req: &'a Request,
        ctx: &'a MiddlewareContext,
    ) -> BoxFuture<'a, Result<MiddlewareResult>> {
        (self.0)(req.clone(), ctx.clone()).boxed()
    }
}

/// A registered interceptor: an optional matcher plus its handler.
#[derive(Clone)]
pub struct Middleware {
    matcher: Option<Matcher>,
    handler: Arc<dyn MiddlewareHandler>,
}

impl Middleware {
    /// Creates a middleware that applies to every path.
    pub fn new(handler: impl MiddlewareHandler + 'static) -> Self {
        Self {
            matcher: None,
            handler: Arc::new(handler),
        }
    }

    /// Creates a middleware from an async closure.
    pub fn from_fn<F, Fut>(f: F) -> Self
    where
        F: Fn(Request, MiddlewareContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<MiddlewareResult>> + Send + 'static,
    {
        Self::new(HandlerFn(f))
    }

    /// Restricts the middleware to paths accepted by `matcher`.
    #[must_use]
    pub fn with_matcher(mut self, matcher: Matcher) -> Self {
        self.matcher = Some(matcher);
        self
    }

    /// Restricts the middleware with a string matcher (see [`Matcher::glob`]).
    pub fn matching(self, pattern: &str) -> Result<Self> {
        Ok(self.with_matcher(Matcher::glob(pattern)?))
    }

    /// Returns whether this middleware should run for `path`.
    pub fn applies_to(&self, path: &str) -> bool {
        self.matcher.as_ref().is_none_or(|m| m.matches(path))
    }

    /// The configured matcher, if any.
    pub fn matcher(&self) -> Option<&Matcher> {
        self.matcher.as_ref()
    }

    /// The handler.
    pub fn handler(&self) -> &dyn MiddlewareHandler {
        self.handler.as_ref()
    }
}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middleware")
            .field("matcher", &self.matcher)
            .finish_non_exhaustive()
    }
}

/// Middleware that logs every navigation and continues.
pub struct LoggingMiddleware;

impl MiddlewareHandler for LoggingMiddleware {
    fn handle<'a>(
        &'a self,
        req: &'a Request,
        ctx: &'a MiddlewareContext,
    ) -> BoxFuture<'a, Result<MiddlewareResult>> {
        Box::pin(async move {
            info!(method = %req.method, path = %ctx.path, params = ctx.params.len(), "navigation");
            Ok(MiddlewareResult::Continue)
        })
    }
}

//! # oxide-router
//!
//! Navigation middleware for file-based route trees.
//!
//! This crate provides:
//! - Request and response values handed to route loaders
//! - Path matchers (`*` wildcards, precompiled patterns, predicates)
//! - An ordered, append-only middleware registry
//! - A dispatcher that runs matching middleware before a loader, with
//!   short-circuit redirects and request rewrites
//! - Stock authentication redirect and logging middleware
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use oxide_router::{
//!     loader_fn, with_middleware, AuthMiddleware, LandingRedirect, Middleware,
//!     MiddlewareRegistry, Response,
//! };
//!
//! let mut registry = MiddlewareRegistry::new();
//! registry.register(Middleware::new(LandingRedirect::new("/login", "/dashboard")).matching("^/$")?);
//! registry.register(Middleware::new(AuthMiddleware::new("/login", "/dashboard")).matching(".*")?);
//!
//! let users = loader_fn(|_args| async { Ok(Response::json(&serde_json::json!([]))?) });
//! let guarded = with_middleware(Arc::new(registry), Some(users));
//! ```
//!
//! ## Middleware results
//!
//! A handler returns one of:
//! - [`MiddlewareResult::Continue`]: run the next middleware, then the loader
//! - [`MiddlewareResult::Redirect`]: stop and hand the redirect to the router
//! - [`MiddlewareResult::Rewrite`]: stop and run the loader on another URL
//! - [`MiddlewareResult::Headers`]: accepted and ignored; the chain continues

mod auth;
mod dispatch;
mod error;
mod matcher;
mod middleware;
mod registry;
mod request;
mod response;

pub use auth::{has_session_credentials, AuthMiddleware, LandingRedirect, SessionCheck};
pub use dispatch::{dispatch, loader_fn, with_middleware, Loader, LoaderArgs};
pub use error::{Result, RouterError};
pub use matcher::{Matcher, PathPredicate};
pub use middleware::{
    BoxFuture, LoggingMiddleware, Middleware, MiddlewareContext, MiddlewareHandler,
    MiddlewareResult, RedirectTarget,
};
pub use registry::MiddlewareRegistry;
pub use request::{Method, PathParams, Request};
pub use response::Response;

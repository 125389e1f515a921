//! Authentication redirects.

use std::sync::Arc;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::Result;
use crate::middleware::{BoxFuture, MiddlewareContext, MiddlewareHandler, MiddlewareResult};
use crate::request::Request;

/// Characters escaped in the `redirect` query value: everything except
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )`, the set browsers leave alone when
/// encoding a URI component.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Decides whether a request carries valid credentials.
pub type SessionCheck = Arc<dyn Fn(&Request) -> bool + Send + Sync>;

/// Default session check: an `Authorization` header, or a `Cookie` header
/// carrying `session=`.
pub fn has_session_credentials(req: &Request) -> bool {
    req.get_header("Authorization").is_some()
        || req
            .get_header("Cookie")
            .is_some_and(|c| c.contains("session="))
}

fn default_check() -> SessionCheck {
    Arc::new(has_session_credentials)
}

/// Middleware that keeps anonymous users on public pages and signed-in users
/// off them.
///
/// - anonymous request to a non-public path: redirect to
///   `login_url?redirect=<path>`
/// - authenticated request to a public path: redirect to `home_url`
/// - anything else continues
pub struct AuthMiddleware {
    /// Paths reachable without a session. A path is public when it equals
    /// one of these or lies beneath it.
    pub public_paths: Vec<String>,
    /// The login redirect URL.
    pub login_url: String,
    /// Where signed-in users land.
    pub home_url: String,
    check: SessionCheck,
}

impl AuthMiddleware {
    /// Creates new auth middleware; the login URL itself is public.
    pub fn new(login_url: impl Into<String>, home_url: impl Into<String>) -> Self {
        let login_url = login_url.into();
        Self {
            public_paths: vec![login_url.clone()],
            login_url,
            home_url: home_url.into(),
            check: default_check(),
        }
    }

    /// Adds public paths.
    #[must_use]
    pub fn public(mut self, paths: &[&str]) -> Self {
        self.public_paths
            .extend(paths.iter().map(|s| (*s).to_string()));
        self
    }

    /// Replaces the session check.
    #[must_use]
    pub fn session_check<F>(mut self, check: F) -> Self
    where
        F: Fn(&Request) -> bool + Send + Sync + 'static,
    {
        self.check = Arc::new(check);
        self
    }

    /// Checks if a path is public.
    fn is_public(&self, path: &str) -> bool {
        self.public_paths.iter().any(|public| {
            path == public
                || path
                    .strip_prefix(public.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    fn login_redirect(&self, path: &str) -> String {
        format!(
            "{}?redirect={}",
            self.login_url,
            utf8_percent_encode(path, URI_COMPONENT)
        )
    }
}

impl MiddlewareHandler for AuthMiddleware {
    fn handle<'a>(
        &'a self,
        req: &'a Request,
        ctx: &'a MiddlewareContext,
    ) -> BoxFuture<'a, Result<MiddlewareResult>> {
        Box::pin(async move {
            let public = self.is_public(&ctx.path);
            let authenticated = (self.check)(req);

            Ok(match (public, authenticated) {
                (false, false) => MiddlewareResult::redirect(self.login_redirect(&ctx.path)),
                (true, true) => MiddlewareResult::redirect(self.home_url.clone()),
                _ => MiddlewareResult::Continue,
            })
        })
    }
}

/// Middleware for the bare root path: signed-in users go home, everyone else
/// to the login page. Register it with the `^/$` matcher.
pub struct LandingRedirect {
    /// The login URL.
    pub login_url: String,
    /// Where signed-in users land.
    pub home_url: String,
    check: SessionCheck,
}

impl LandingRedirect {
    /// Creates the landing redirect.
    pub fn new(login_url: impl Into<String>, home_url: impl Into<String>) -> Self {
        Self {
            login_url: login_url.into(),
            home_url: home_url.into(),
            check: default_check(),
        }
    }

    /// Replaces the session check.
    #[must_use]
    pub fn session_check<F>(mut self, check: F) -> Self
    where
        F: Fn(&Request) -> bool + Send + Sync + 'static,
    {
        self.check = Arc::new(check);
        self
    }
}

impl MiddlewareHandler for LandingRedirect {
    fn handle<'a>(
        &'a self,
        req: &'a Request,
        _ctx: &'a MiddlewareContext,
    ) -> BoxFuture<'a, Result<MiddlewareResult>> {
        Box::pin(async move {
            let target = if (self.check)(req) {
                &self.home_url
            } else {
                &self.login_url
            };
            Ok(MiddlewareResult::redirect(target.clone()))
        })
    }
}

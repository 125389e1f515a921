//! Path matchers deciding which middleware runs for a navigation.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::error::Result;

/// A predicate over the request path.
pub type PathPredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Decides whether a middleware applies to a path.
///
/// A middleware without a matcher applies to every path.
#[derive(Clone)]
pub enum Matcher {
    /// A compiled pattern, tested unanchored against the path.
    Pattern(Regex),
    /// An arbitrary predicate.
    Predicate(PathPredicate),
}

impl Matcher {
    /// Compiles a string matcher.
    ///
    /// Every `*` expands to `.*` and the result is anchored at both ends, so
    /// `/users/*` accepts `/users/5` and `/users/5/edit` but not `/users`.
    /// Other characters keep their regex meaning: `^/$` and `.*` are valid
    /// matchers.
    ///
    /// # Example
    ///
    /// ```
    /// use oxide_router::Matcher;
    ///
    /// let matcher = Matcher::glob("/users/*").unwrap();
    /// assert!(matcher.matches("/users/5/edit"));
    /// assert!(!matcher.matches("/customers/5"));
    /// ```
    pub fn glob(pattern: &str) -> Result<Self> {
        let expanded = pattern.replace('*', ".*");
        Ok(Self::Pattern(Regex::new(&format!("^{expanded}$"))?))
    }

    /// Wraps a precompiled pattern.
    pub fn regex(regex: Regex) -> Self {
        Self::Pattern(regex)
    }

    /// Wraps a predicate.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(f))
    }

    /// Returns whether this matcher accepts `path`.
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Pattern(regex) => regex.is_match(path),
            Self::Predicate(f) => f(path),
        }
    }
}

impl From<Regex> for Matcher {
    fn from(regex: Regex) -> Self {
        Self::Pattern(regex)
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

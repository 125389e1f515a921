//! The ordered middleware registry.

use crate::middleware::Middleware;

/// Append-only, ordered list of middleware.
///
/// Populated once during start-up, then shared (usually behind an `Arc`)
/// with every wrapped loader. There is no removal.
#[derive(Debug, Clone, Default)]
pub struct MiddlewareRegistry {
    entries: Vec<Middleware>,
}

impl MiddlewareRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a middleware after all previously registered ones.
    pub fn register(&mut self, middleware: Middleware) {
        self.entries.push(middleware);
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, middleware: Middleware) -> Self {
        self.register(middleware);
        self
    }

    /// The middleware applying to `path`, in registration order.
    pub fn matching(&self, path: &str) -> Vec<&Middleware> {
        self.entries
            .iter()
            .filter(|mw| mw.applies_to(path))
            .collect()
    }

    /// Number of registered middleware.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

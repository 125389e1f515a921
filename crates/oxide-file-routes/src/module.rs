//! Page modules and the deferred references to them.

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use oxide_router::{BoxFuture, Loader, LoaderArgs, Response};

/// A renderable unit. The compiler never looks inside it.
pub type Renderable = Arc<dyn Any + Send + Sync>;

/// What a page, layout, error, not-found or loading file exports.
#[derive(Clone)]
pub struct PageModule {
    /// The default export.
    pub view: Renderable,
    /// Optional navigation data loader.
    pub loader: Option<Loader>,
    /// Optional submission handler.
    pub action: Option<Loader>,
}

impl PageModule {
    /// Creates a module exporting only a view.
    pub fn new(view: impl Any + Send + Sync) -> Self {
        Self {
            view: Arc::new(view),
            loader: None,
            action: None,
        }
    }

    /// Adds a loader export.
    #[must_use]
    pub fn with_loader(mut self, loader: Loader) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Adds an action export.
    #[must_use]
    pub fn with_action(mut self, action: Loader) -> Self {
        self.action = Some(action);
        self
    }
}

impl fmt::Debug for PageModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageModule")
            .field("loader", &self.loader.is_some())
            .field("action", &self.action.is_some())
            .finish_non_exhaustive()
    }
}

/// Deferred factory for a module, as supplied by the bundler glue.
pub type ModuleLoader =
    Arc<dyn Fn() -> BoxFuture<'static, oxide_router::Result<PageModule>> + Send + Sync>;

/// Boxes an async closure into a [`ModuleLoader`].
pub fn module_loader<F, Fut>(f: F) -> ModuleLoader
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = oxide_router::Result<PageModule>> + Send + 'static,
{
    Arc::new(move || f().boxed())
}

/// A deferred reference to a renderable: the file it comes from plus the
/// loader producing it.
#[derive(Clone)]
pub struct ViewRef {
    source: Arc<str>,
    module: ModuleLoader,
}

impl ViewRef {
    /// Creates a reference to the view exported by `source`.
    pub fn new(source: &str, module: ModuleLoader) -> Self {
        Self {
            source: Arc::from(source),
            module,
        }
    }

    /// Virtual file path of the module.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Loads the module and returns its view.
    pub async fn load(&self) -> oxide_router::Result<Renderable> {
        Ok((self.module)().await?.view)
    }
}

impl fmt::Debug for ViewRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ViewRef").field(&self.source).finish()
    }
}

/// Insertion-ordered map from virtual file path to module loader.
#[derive(Clone, Default)]
pub struct FileMap {
    entries: Vec<(String, ModuleLoader)>,
}

impl FileMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a file, replacing an earlier entry with the same path.
    pub fn insert(&mut self, path: impl Into<String>, module: ModuleLoader) {
        let path = path.into();
        match self.entries.iter_mut().find(|(p, _)| *p == path) {
            Some(entry) => entry.1 = module,
            None => self.entries.push((path, module)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, path: impl Into<String>, module: ModuleLoader) -> Self {
        self.insert(path, module);
        self
    }

    /// Looks a file up by path.
    pub fn get(&self, path: &str) -> Option<&ModuleLoader> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, module)| module)
    }

    /// Returns whether `path` is present.
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModuleLoader)> {
        self.entries.iter().map(|(p, module)| (p.as_str(), module))
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, ModuleLoader)> for FileMap {
    fn from_iter<I: IntoIterator<Item = (S, ModuleLoader)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (path, module) in iter {
            map.insert(path, module);
        }
        map
    }
}

impl fmt::Debug for FileMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(p, _)| p))
            .finish()
    }
}

/// Loader that imports the module and runs its `loader` export.
pub(crate) fn page_loader(module: ModuleLoader) -> Loader {
    Arc::new(move |args: LoaderArgs| {
        let module = Arc::clone(&module);
        async move {
            match module().await?.loader {
                Some(loader) => loader(args).await,
                None => Ok(Response::no_content()),
            }
        }
        .boxed()
    })
}

/// Action that imports the module and runs its `action` export.
pub(crate) fn page_action(module: ModuleLoader) -> Loader {
    Arc::new(move |args: LoaderArgs| {
        let module = Arc::clone(&module);
        async move {
            match module().await?.action {
                Some(action) => action(args).await,
                None => Ok(Response::no_content()),
            }
        }
        .boxed()
    })
}

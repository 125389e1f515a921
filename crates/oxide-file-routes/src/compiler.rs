//! Tree compiler: drives the page pass and both decorator passes.

use std::sync::Arc;

use oxide_router::{with_middleware, MiddlewareRegistry};
use tracing::{debug, info};

use crate::builder::create_route;
use crate::decorate::{attach_error_views, attach_not_found};
use crate::error::{Result, RouteError};
use crate::files::RouteFiles;
use crate::merge::merge_routes;
use crate::module::{page_action, page_loader, FileMap, ModuleLoader, ViewRef};
use crate::node::{LoadingFallback, PageFields, RouteDraft, RouteNode};
use crate::options::CompilerOptions;
use crate::segment::{fold_edit_segments, route_segments, split_file_name, split_root};

/// Compiles file maps into an immutable [`RouteNode`] tree.
///
/// Every page and layout loader is wrapped by the middleware dispatcher
/// of the configured registry; actions are not.
#[derive(Debug, Clone)]
pub struct RouteCompiler {
    options: CompilerOptions,
    middleware: Arc<MiddlewareRegistry>,
}

impl Default for RouteCompiler {
    fn default() -> Self {
        Self::new(CompilerOptions::default())
    }
}

impl RouteCompiler {
    /// Creates a compiler with an empty middleware registry.
    pub fn new(options: CompilerOptions) -> Self {
        Self {
            options,
            middleware: Arc::new(MiddlewareRegistry::new()),
        }
    }

    /// Sets the registry whose middleware guards every compiled loader.
    #[must_use]
    pub fn with_middleware(mut self, registry: Arc<MiddlewareRegistry>) -> Self {
        self.middleware = registry;
        self
    }

    /// Runs the page pass, then the error and not-found passes.
    pub fn compile(&self, files: &RouteFiles) -> Result<RouteNode> {
        let mut root = self.compile_pages(&files.pages, &files.loading)?;
        attach_error_views(&mut root, &files.errors, &self.options)?;
        attach_not_found(&mut root, &files.not_found, &self.options)?;

        info!(
            pages = files.pages.len(),
            errors = files.errors.len(),
            not_found = files.not_found.len(),
            middleware = self.middleware.len(),
            "Compiled route tree"
        );
        Ok(root.freeze())
    }

    fn compile_pages(&self, pages: &FileMap, loading: &FileMap) -> Result<RouteDraft> {
        let mut root = RouteDraft::structure("/");

        for (file, module) in pages.iter() {
            let segments = fold_edit_segments(route_segments(file, &self.options)?, &self.options);
            debug!(
                file,
                segments = ?segments.iter().map(|s| s.path.as_str()).collect::<Vec<_>>(),
                "Compiling route file"
            );

            let fields = self.page_fields(file, module, loading)?;
            let (first, rest) = segments
                .split_first()
                .ok_or_else(|| RouteError::MissingFileName(file.to_string()))?;
            merge_routes(&mut root, create_route(first, rest, &fields))?;
        }

        Ok(root)
    }

    fn page_fields(&self, file: &str, module: &ModuleLoader, loading: &FileMap) -> Result<PageFields> {
        let loader = with_middleware(
            Arc::clone(&self.middleware),
            Some(page_loader(Arc::clone(module))),
        );
        Ok(PageFields {
            view: ViewRef::new(file, Arc::clone(module)),
            loader: Some(loader),
            action: Some(page_action(Arc::clone(module))),
            loading: Some(self.resolve_loading(file, loading)?),
        })
    }

    /// Picks the loading view for `file`: next to it, then in the first
    /// route group on its path, then at the app root.
    fn resolve_loading(&self, file: &str, loading: &FileMap) -> Result<LoadingFallback> {
        let (prefix, rest) = split_root(file, &self.options)?;
        let (dirs, name) = rest.rsplit_once('/').unwrap_or(("", rest));
        let (_, ext) = split_file_name(name);
        let loading_name = format!("{}{ext}", self.options.loading_stem);

        let mut candidates = Vec::with_capacity(3);
        candidates.push(if dirs.is_empty() {
            format!("{prefix}{loading_name}")
        } else {
            format!("{prefix}{dirs}/{loading_name}")
        });

        let mut group_dir = String::new();
        for dir in dirs.split('/').filter(|d| !d.is_empty()) {
            group_dir.push_str(dir);
            group_dir.push('/');
            if dir.starts_with('(') && dir.ends_with(')') {
                candidates.push(format!("{prefix}{group_dir}{loading_name}"));
                break;
            }
        }

        candidates.push(format!("{prefix}{loading_name}"));

        Ok(candidates
            .iter()
            .find_map(|candidate| {
                loading
                    .get(candidate)
                    .map(|module| ViewRef::new(candidate, Arc::clone(module)))
            })
            .map_or(LoadingFallback::BuiltIn, LoadingFallback::View))
    }
}

//! File-convention route compiler.
//!
//! `oxide-file-routes` turns a flat map of virtual file paths into one
//! immutable route tree, following directory conventions:
//! - `page` and `layout` files declare routes; a page becomes the index
//!   of its route, a layout wraps everything below it
//! - `(group)` folders become optional segments, `(index)` folders vanish,
//!   `_private` folders are ignored
//! - `[id]` folders become `:id` parameters, `[...rest]` folders become `*`
//! - `edit`/`update` folders are joined onto a static parent (`users/edit`)
//!   or nested under a dynamic one (`users/:id` > `edit`)
//! - `error` files attach error views, `404` files splice in catch-all
//!   not-found routes, `loading` files provide pending views
//!
//! # Architecture
//!
//! - **Segmenter** - file path to route tokens
//! - **Builder** - route tokens to a chain of nodes
//! - **Merger** - folds each chain into the accumulating tree
//! - **Compiler** - runs the page pass, then the error and not-found passes
//!
//! Every compiled loader runs through an [`oxide_router::MiddlewareRegistry`]
//! before the page module's own loader.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use oxide_file_routes::{module_loader, FileMap, PageModule, RouteCompiler, RouteFiles};
//!
//! let files: FileMap = [
//!     ("./app/(protected)/layout.tsx", module_loader(|| async { Ok(PageModule::new(Shell)) })),
//!     ("./app/(protected)/users/page.tsx", module_loader(|| async { Ok(PageModule::new(Users)) })),
//! ]
//! .into_iter()
//! .collect();
//!
//! let tree = RouteCompiler::default()
//!     .with_middleware(Arc::new(registry))
//!     .compile(&RouteFiles::classify(&files, &Default::default()))?;
//! println!("{}", tree.manifest());
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! # Print the route tree of ./src/app
//! oxide-routes --root src
//!
//! # Print it as JSON, with debug logging
//! oxide-routes --root src --format json --verbose
//! ```

mod builder;
pub mod compiler;
mod decorate;
pub mod error;
pub mod files;
mod merge;
pub mod module;
pub mod node;
pub mod options;
pub mod segment;

use std::sync::Arc;

use oxide_router::MiddlewareRegistry;

pub use compiler::RouteCompiler;
pub use error::{Result, RouteError};
pub use files::RouteFiles;
pub use module::{module_loader, FileMap, ModuleLoader, PageModule, Renderable, ViewRef};
pub use node::{LoadingFallback, RouteManifest, RouteNode, RouteRole};
pub use options::CompilerOptions;
pub use segment::{FileKind, Segment};

/// Compiles the four file maps with the default conventions, guarding
/// every loader with `registry`.
pub fn create_routes_from_files(
    files: &RouteFiles,
    registry: Arc<MiddlewareRegistry>,
) -> Result<RouteNode> {
    RouteCompiler::default()
        .with_middleware(registry)
        .compile(files)
}

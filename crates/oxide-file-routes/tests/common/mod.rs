#![allow(dead_code)]

use oxide_file_routes::{
    module_loader, FileMap, ModuleLoader, PageModule, RouteCompiler, RouteFiles, RouteNode,
};
use oxide_router::{loader_fn, Response};

/// A module whose view is its own file path.
pub fn placeholder(source: &str) -> ModuleLoader {
    let source = source.to_string();
    module_loader(move || {
        let source = source.clone();
        async move { Ok(PageModule::new(source)) }
    })
}

/// A module exporting a loader and an action that answer with fixed text.
pub fn with_handlers(source: &str) -> ModuleLoader {
    let source = source.to_string();
    module_loader(move || {
        let source = source.clone();
        async move {
            Ok(PageModule::new(source.clone())
                .with_loader(loader_fn(|args: oxide_router::LoaderArgs| async move {
                    let id = args.params.get("id").unwrap_or("none").to_string();
                    Ok(Response::text(format!("loaded {id}")))
                }))
                .with_action(loader_fn(|_args| async { Ok(Response::text("submitted")) })))
        }
    })
}

pub fn file_map(files: &[&str]) -> FileMap {
    files.iter().map(|file| (*file, placeholder(file))).collect()
}

/// Classifies `files` with default conventions and compiles them.
pub fn compile(files: &[&str]) -> oxide_file_routes::Result<RouteNode> {
    RouteCompiler::default().compile(&RouteFiles::classify(
        &file_map(files),
        &Default::default(),
    ))
}

/// Follows non-index children by path.
pub fn find<'a>(root: &'a RouteNode, path: &[&str]) -> &'a RouteNode {
    path.iter().fold(root, |node, segment| {
        node.child(segment)
            .unwrap_or_else(|| panic!("no child '{segment}' under '{}'", node.path()))
    })
}

pub fn child_paths(node: &RouteNode) -> Vec<&str> {
    node.children().iter().map(RouteNode::path).collect()
}

pub fn index_view(node: &RouteNode) -> Option<&str> {
    node.index()
        .and_then(RouteNode::view)
        .map(oxide_file_routes::ViewRef::source)
}

pub fn view(node: &RouteNode) -> Option<&str> {
    node.view().map(oxide_file_routes::ViewRef::source)
}

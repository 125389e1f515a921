//! Error and not-found passes over the compiled page tree.
//!
//! Unlike the page pass these never create structure: every directory a
//! decorator file lives in must already be a node.

use std::cmp::Reverse;
use std::sync::Arc;

use tracing::debug;

use crate::error::{Result, RouteError};
use crate::module::{FileMap, ModuleLoader, ViewRef};
use crate::node::{PageFields, RouteDraft, RouteRole};
use crate::options::CompilerOptions;
use crate::segment::{directory_segments, fold_edit_segments, Segment};

/// Decorator files with their directory segments, deepest first.
fn ordered<'a>(
    files: &'a FileMap,
    options: &CompilerOptions,
) -> Result<Vec<(&'a str, &'a ModuleLoader, Vec<Segment>)>> {
    let mut entries = files
        .iter()
        .map(|(file, module)| -> Result<_> {
            let segments = fold_edit_segments(directory_segments(file, options)?, options);
            Ok((file, module, segments))
        })
        .collect::<Result<Vec<_>>>()?;
    entries.sort_by(|a, b| {
        Reverse(a.2.len())
            .cmp(&Reverse(b.2.len()))
            .then_with(|| a.0.cmp(b.0))
    });
    Ok(entries)
}

/// Walks from `root` along `segments`; the first segment is the root itself.
fn locate<'a>(root: &'a mut RouteDraft, segments: &[Segment]) -> Result<&'a mut RouteDraft> {
    let mut current = root;
    for segment in segments.iter().skip(1) {
        if current.children.is_empty() {
            return Err(RouteError::NoChildren {
                parent: current.path.clone(),
                segment: segment.path.clone(),
            });
        }
        let Some(pos) = current.child_position(&segment.path) else {
            return Err(RouteError::MissingSegment {
                parent: current.path.clone(),
                segment: segment.path.clone(),
            });
        };
        current = &mut current.children[pos];
    }
    Ok(current)
}

/// Attaches each error file's view to the node of its directory.
pub(crate) fn attach_error_views(
    root: &mut RouteDraft,
    errors: &FileMap,
    options: &CompilerOptions,
) -> Result<()> {
    for (file, module, segments) in ordered(errors, options)? {
        let node = locate(root, &segments)?;
        if node.error_view.is_some() {
            return Err(RouteError::DuplicateErrorView(node.path.clone()));
        }
        debug!(file, route = %node.path, "Attaching error view");
        node.error_view = Some(ViewRef::new(file, Arc::clone(module)));
    }
    Ok(())
}

/// Splices each not-found file into the node of its directory as a `*`
/// child, and as the index of every nested node left without one.
pub(crate) fn attach_not_found(
    root: &mut RouteDraft,
    not_found: &FileMap,
    options: &CompilerOptions,
) -> Result<()> {
    for (file, module, segments) in ordered(not_found, options)? {
        let node = locate(root, &segments)?;
        let view = ViewRef::new(file, Arc::clone(module));
        debug!(file, route = %node.path, "Attaching not-found view");

        if node.children.is_empty() {
            node.demote()?;
        } else {
            fill_missing_indexes(node, &view);
        }
        if node.has_catch_all() {
            debug!(
                file,
                route = %node.path,
                "Catch-all already declared, not-found view not added"
            );
        } else {
            node.add_child(RouteDraft::declared(
                "*",
                RouteRole::Structure,
                PageFields::view_only(view),
            ));
        }
    }
    Ok(())
}

/// Gives every plain nested node that has children but no index the
/// not-found view as its index.
///
/// Optional groups and joined paths are skipped: an index there would
/// shadow their parent's own index.
fn fill_missing_indexes(node: &mut RouteDraft, view: &ViewRef) {
    let eligible = !node.is_index
        && !node.path.is_empty()
        && !node.path.contains('?')
        && !node.path.contains('/')
        && !node.children.is_empty()
        && !node.has_index();
    if eligible {
        node.children.insert(
            0,
            RouteDraft::index(RouteRole::Structure, PageFields::view_only(view.clone())),
        );
    }
    for child in &mut node.children {
        fill_missing_indexes(child, view);
    }
}

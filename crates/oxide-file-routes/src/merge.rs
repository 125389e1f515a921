//! Route tree merger.
//!
//! Precedence: a layout takes over its node, a page becomes its node's
//! index child, and structural nodes merge their children by path.

use crate::error::{Result, RouteError};
use crate::node::{RouteDraft, RouteRole};

/// Merges `source` into `target`. Both must have the same path.
pub(crate) fn merge_routes(target: &mut RouteDraft, source: RouteDraft) -> Result<()> {
    if target.path != source.path {
        return Err(RouteError::PathMismatch {
            target: target.path.clone(),
            source_path: source.path,
        });
    }

    let RouteDraft {
        role,
        page,
        children,
        ..
    } = source;

    match (role, page) {
        (RouteRole::Layout, Some(page)) => match target.role {
            RouteRole::Structure => {
                target.role = RouteRole::Layout;
                target.page = Some(page);
            }
            RouteRole::Page => {
                target.demote()?;
                target.role = RouteRole::Layout;
                target.page = Some(page);
            }
            RouteRole::Layout => return Err(RouteError::DuplicateLayout(target.path.clone())),
        },
        (RouteRole::Page, Some(page)) => match target.role {
            RouteRole::Structure | RouteRole::Layout => {
                target.add_index(RouteDraft::index(RouteRole::Page, page))?;
            }
            RouteRole::Page => return Err(RouteError::DuplicateIndex(target.path.clone())),
        },
        _ => {}
    }

    if !children.is_empty() && target.role == RouteRole::Page {
        target.demote()?;
    }
    merge_children(target, children)
}

fn merge_children(target: &mut RouteDraft, children: Vec<RouteDraft>) -> Result<()> {
    for child in children {
        if child.is_index {
            target.add_index(adopt(child)?)?;
            continue;
        }
        match target.child_position(&child.path) {
            Some(pos) => merge_routes(&mut target.children[pos], child)?,
            None => target.add_child(adopt(child)?),
        }
    }
    Ok(())
}

/// Prepares a subtree for insertion: every page node hands its fields to
/// an index child, so later arrivals at the same path merge the same way
/// regardless of order.
fn adopt(mut node: RouteDraft) -> Result<RouteDraft> {
    if node.role == RouteRole::Page && !node.is_index {
        node.demote()?;
    }
    node.children = node
        .children
        .into_iter()
        .map(adopt)
        .collect::<Result<Vec<_>>>()?;
    Ok(node)
}

//! Route node builder: one segment list in, one chain of nodes out.

use crate::node::{PageFields, RouteDraft, RouteRole};
use crate::segment::{FileKind, Segment};

/// Builds the node for `segment` and, recursively, the chain for `rest`.
///
/// Only the token tagged with a [`FileKind`] receives `fields`; every other
/// token becomes a structural parent. `rest` is expected to have gone
/// through [`fold_edit_segments`](crate::segment::fold_edit_segments), so
/// edit pages are already either joined (`users/edit`) or nested under a
/// dynamic parent.
pub(crate) fn create_route(segment: &Segment, rest: &[Segment], fields: &PageFields) -> RouteDraft {
    let mut route = match segment.kind {
        Some(FileKind::Page) => RouteDraft::declared(&segment.path, RouteRole::Page, fields.clone()),
        Some(FileKind::Layout) => {
            RouteDraft::declared(&segment.path, RouteRole::Layout, fields.clone())
        }
        None => RouteDraft::structure(&segment.path),
    };

    if let Some((next, rest)) = rest.split_first() {
        route.add_child(create_route(next, rest, fields));
    }

    route
}

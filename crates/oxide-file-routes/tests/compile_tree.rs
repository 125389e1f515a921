//! Tests for compiling whole file sets into route trees.

mod common;
use common::*;

use oxide_file_routes::{LoadingFallback, RouteError, RouteNode, RouteRole};

#[test]
fn admin_app_compiles_to_expected_tree() {
    let root = compile(&[
        "app/(auth)/login/page.tsx",
        "app/(protected)/layout.tsx",
        "app/(protected)/users/page.tsx",
        "app/(protected)/users/[id]/page.tsx",
    ])
    .unwrap();

    assert_eq!(root.path(), "/");
    assert_eq!(child_paths(&root), vec!["auth?", "protected?"]);

    let auth = find(&root, &["auth?"]);
    assert_eq!(auth.role(), RouteRole::Structure);
    assert_eq!(
        index_view(find(auth, &["login"])),
        Some("app/(auth)/login/page.tsx")
    );

    let protected = find(&root, &["protected?"]);
    assert_eq!(protected.role(), RouteRole::Layout);
    assert_eq!(view(protected), Some("app/(protected)/layout.tsx"));
    assert_eq!(child_paths(protected), vec!["users/:id", "users"]);
    assert_eq!(
        index_view(find(protected, &["users"])),
        Some("app/(protected)/users/page.tsx")
    );
    assert_eq!(
        index_view(find(protected, &["users/:id"])),
        Some("app/(protected)/users/[id]/page.tsx")
    );
}

#[test]
fn layout_takes_precedence_in_either_order() {
    for files in [
        ["./app/a/page.tsx", "./app/a/layout.tsx"],
        ["./app/a/layout.tsx", "./app/a/page.tsx"],
    ] {
        let root = compile(&files).unwrap();
        let a = find(&root, &["a"]);

        assert_eq!(a.role(), RouteRole::Layout);
        assert_eq!(view(a), Some("./app/a/layout.tsx"));
        assert_eq!(a.children().iter().filter(|c| c.is_index()).count(), 1);
        assert_eq!(index_view(a), Some("./app/a/page.tsx"));
        assert_eq!(a.index().map(RouteNode::role), Some(RouteRole::Page));
    }
}

#[test]
fn edit_nests_under_dynamic_and_joins_static() {
    let root = compile(&[
        "./app/users/[id]/page.tsx",
        "./app/users/[id]/edit/page.tsx",
        "./app/customers/page.tsx",
        "./app/customers/edit/page.tsx",
    ])
    .unwrap();

    let user = find(&root, &["users/:id"]);
    assert_eq!(child_paths(user), vec!["", "edit"]);
    assert_eq!(index_view(user), Some("./app/users/[id]/page.tsx"));
    assert_eq!(
        index_view(find(user, &["edit"])),
        Some("./app/users/[id]/edit/page.tsx")
    );

    assert_eq!(
        child_paths(&root),
        vec!["users/:id", "customers", "customers/edit"]
    );
    assert_eq!(
        index_view(find(&root, &["customers/edit"])),
        Some("./app/customers/edit/page.tsx")
    );
    assert!(find(&root, &["customers"]).child("edit").is_none());
}

#[test]
fn dynamic_children_come_first() {
    let root = compile(&[
        "./app/orders/page.tsx",
        "./app/orders/new/page.tsx",
        "./app/orders/archive/page.tsx",
        "./app/orders/[id]/page.tsx",
    ])
    .unwrap();

    let orders = find(&root, &["orders"]);
    assert_eq!(child_paths(orders), vec!["", "archive", "new"]);
    assert_eq!(child_paths(&root), vec!["orders/:id", "orders"]);
}

#[test]
fn every_layout_gets_index_and_catch_all() {
    let root = compile(&[
        "./app/layout.tsx",
        "./app/page.tsx",
        "./app/404.tsx",
        "./app/(protected)/layout.tsx",
        "./app/(protected)/page.tsx",
        "./app/(protected)/404.tsx",
        "./app/(protected)/users/page.tsx",
        "./app/(protected)/users/[id]/page.tsx",
        "./app/(protected)/users/[id]/edit/page.tsx",
        "./app/(protected)/settings/layout.tsx",
        "./app/(protected)/settings/profile/page.tsx",
        "./app/(protected)/settings/404.tsx",
    ])
    .unwrap();

    fn check(node: &RouteNode, layouts: &mut usize) {
        if node.role() == RouteRole::Layout && !node.children().is_empty() {
            *layouts += 1;
            let indexes = node.children().iter().filter(|c| c.is_index()).count();
            let stars = node.children().iter().filter(|c| c.path() == "*").count();
            assert_eq!(indexes, 1, "index children of '{}'", node.path());
            assert_eq!(stars, 1, "catch-all children of '{}'", node.path());
        }
        for child in node.children() {
            check(child, layouts);
        }
    }
    let mut layouts = 0;
    check(&root, &mut layouts);
    assert_eq!(layouts, 3);

    let settings = find(&root, &["protected?", "settings"]);
    assert_eq!(index_view(settings), Some("./app/(protected)/settings/404.tsx"));
    assert_eq!(child_paths(settings), vec!["", "profile", "*"]);
    assert_eq!(
        view(find(settings, &["*"])),
        Some("./app/(protected)/settings/404.tsx")
    );
    assert_eq!(
        view(find(&root, &["protected?", "*"])),
        Some("./app/(protected)/404.tsx")
    );
}

#[test]
fn root_not_found_stays_at_root() {
    let root = compile(&[
        "./app/layout.tsx",
        "./app/404.tsx",
        "./app/(protected)/layout.tsx",
        "./app/(protected)/users/page.tsx",
        "./app/(protected)/settings/layout.tsx",
        "./app/(protected)/settings/profile/page.tsx",
    ])
    .unwrap();

    fn catch_alls(node: &RouteNode) -> usize {
        let own = node.children().iter().filter(|c| c.path() == "*").count();
        own + node.children().iter().map(catch_alls).sum::<usize>()
    }
    assert_eq!(catch_alls(&root), 1);
    assert_eq!(child_paths(&root), vec!["protected?", "*"]);
    assert_eq!(view(find(&root, &["*"])), Some("./app/404.tsx"));

    // neither the root nor the optional group gets an index
    assert!(root.index().is_none());
    let protected = find(&root, &["protected?"]);
    assert!(protected.index().is_none());
    assert_eq!(child_paths(protected), vec!["settings", "users"]);

    let settings = find(protected, &["settings"]);
    assert_eq!(child_paths(settings), vec!["", "profile"]);
    assert_eq!(index_view(settings), Some("./app/404.tsx"));
    assert_eq!(
        index_view(find(protected, &["users"])),
        Some("./app/(protected)/users/page.tsx")
    );
}

#[test]
fn error_views_attach_to_their_directory() {
    let root = compile(&[
        "./app/layout.tsx",
        "./app/error.tsx",
        "./app/(protected)/users/page.tsx",
        "./app/(protected)/users/error.tsx",
    ])
    .unwrap();

    assert_eq!(
        root.error_view().map(oxide_file_routes::ViewRef::source),
        Some("./app/error.tsx")
    );
    let users = find(&root, &["protected?", "users"]);
    assert_eq!(
        users.error_view().map(oxide_file_routes::ViewRef::source),
        Some("./app/(protected)/users/error.tsx")
    );
}

#[test]
fn decorator_for_undeclared_directory_fails() {
    let err = compile(&["./app/users/page.tsx", "./app/reports/error.tsx"]).unwrap_err();
    assert!(matches!(
        err,
        RouteError::MissingSegment { ref parent, ref segment } if parent == "/" && segment == "reports"
    ));

    let err = compile(&["./app/layout.tsx", "./app/reports/404.tsx"]).unwrap_err();
    assert!(matches!(err, RouteError::NoChildren { .. }));
}

#[test]
fn page_pass_creates_missing_structure() {
    let root = compile(&["./app/reports/2024/summary/page.tsx"]).unwrap();
    let summary = find(&root, &["reports", "2024", "summary"]);
    assert_eq!(
        index_view(summary),
        Some("./app/reports/2024/summary/page.tsx")
    );
    assert_eq!(find(&root, &["reports"]).role(), RouteRole::Structure);
}

#[test]
fn duplicate_declarations_are_rejected() {
    let err = compile(&["./app/users/page.tsx", "./app/users/page.jsx"]).unwrap_err();
    assert!(matches!(err, RouteError::DuplicateIndex(ref path) if path == "users"));

    let err = compile(&["./app/page.tsx", "./app/(index)/page.tsx"]).unwrap_err();
    assert!(matches!(err, RouteError::DuplicateIndex(ref path) if path == "/"));

    let err = compile(&["./app/(admin)/layout.tsx", "./app/(admin)/_v2/layout.tsx"]).unwrap_err();
    assert!(matches!(err, RouteError::DuplicateLayout(ref path) if path == "admin?"));
}

#[test]
fn loading_views_fall_back_outward() {
    let root = compile(&[
        "./app/loading.tsx",
        "./app/(protected)/loading.tsx",
        "./app/(protected)/users/page.tsx",
        "./app/(protected)/users/loading.tsx",
        "./app/(protected)/reports/page.tsx",
        "./app/about/page.tsx",
    ])
    .unwrap();

    let loading = |path: &[&str]| {
        find(&root, path)
            .index()
            .and_then(RouteNode::loading_view)
            .and_then(LoadingFallback::source)
            .map(str::to_string)
    };
    assert_eq!(
        loading(&["protected?", "users"]).as_deref(),
        Some("./app/(protected)/users/loading.tsx")
    );
    assert_eq!(
        loading(&["protected?", "reports"]).as_deref(),
        Some("./app/(protected)/loading.tsx")
    );
    assert_eq!(loading(&["about"]).as_deref(), Some("./app/loading.tsx"));

    let bare = compile(&["./app/about/page.tsx"]).unwrap();
    assert!(matches!(
        find(&bare, &["about"]).index().and_then(RouteNode::loading_view),
        Some(LoadingFallback::BuiltIn)
    ));
}

#[test]
fn manifest_serializes_tree() {
    let root = compile(&["./app/layout.tsx", "./app/users/page.tsx"]).unwrap();
    let json = serde_json::to_value(root.manifest()).unwrap();

    assert_eq!(json["path"], "/");
    assert_eq!(json["role"], "layout");
    assert_eq!(json["view"], "./app/layout.tsx");
    assert_eq!(json["loader"], true);
    assert_eq!(json["children"][0]["path"], "users");
    assert_eq!(json["children"][0]["children"][0]["index"], true);
    assert_eq!(json["children"][0]["children"][0]["role"], "page");
}

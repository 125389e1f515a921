//! Route nodes: the mutable draft used while compiling and the frozen tree
//! handed to the router.

use std::cmp::Ordering;
use std::fmt;

use oxide_router::Loader;
use serde::Serialize;

use crate::error::{Result, RouteError};
use crate::module::ViewRef;
use crate::segment::is_dynamic;

/// What a node was declared as. Drives merge precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteRole {
    /// Pure nesting, or a node whose page moved into its index child.
    Structure,
    /// A page declaration.
    Page,
    /// A layout declaration.
    Layout,
}

/// What is shown while a view or its loader is pending.
#[derive(Debug, Clone)]
pub enum LoadingFallback {
    /// The router's default placeholder.
    BuiltIn,
    /// A `loading` file found for the route.
    View(ViewRef),
}

impl LoadingFallback {
    /// Source file of the fallback view, if any.
    pub fn source(&self) -> Option<&str> {
        match self {
            Self::BuiltIn => None,
            Self::View(view) => Some(view.source()),
        }
    }
}

/// Everything a page or layout file contributes to its node.
#[derive(Clone)]
pub(crate) struct PageFields {
    pub view: ViewRef,
    pub loader: Option<Loader>,
    pub action: Option<Loader>,
    pub loading: Option<LoadingFallback>,
}

impl PageFields {
    /// Fields of a view-only node, such as a not-found view.
    pub fn view_only(view: ViewRef) -> Self {
        Self {
            view,
            loader: None,
            action: None,
            loading: None,
        }
    }
}

/// A node under construction. Only lives inside the compiler.
#[derive(Clone)]
pub(crate) struct RouteDraft {
    pub path: String,
    pub is_index: bool,
    pub role: RouteRole,
    pub page: Option<PageFields>,
    pub error_view: Option<ViewRef>,
    pub children: Vec<RouteDraft>,
}

impl RouteDraft {
    pub fn structure(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_index: false,
            role: RouteRole::Structure,
            page: None,
            error_view: None,
            children: Vec::new(),
        }
    }

    pub fn declared(path: impl Into<String>, role: RouteRole, page: PageFields) -> Self {
        Self {
            role,
            page: Some(page),
            ..Self::structure(path)
        }
    }

    /// An index child carrying `page`.
    pub fn index(role: RouteRole, page: PageFields) -> Self {
        Self {
            is_index: true,
            ..Self::declared("", role, page)
        }
    }

    pub fn has_index(&self) -> bool {
        self.children.iter().any(|c| c.is_index)
    }

    pub fn has_catch_all(&self) -> bool {
        self.children.iter().any(|c| !c.is_index && c.path == "*")
    }

    /// Finds the non-index child with `path`.
    pub fn child_position(&self, path: &str) -> Option<usize> {
        self.children
            .iter()
            .position(|c| !c.is_index && c.path == path)
    }

    /// Appends a child, dynamic children first.
    pub fn add_child(&mut self, child: Self) {
        if is_dynamic(&child.path) {
            self.children.insert(0, child);
        } else {
            self.children.push(child);
        }
    }

    /// Inserts `child` as this node's index.
    pub fn add_index(&mut self, child: Self) -> Result<()> {
        if self.has_index() {
            return Err(RouteError::DuplicateIndex(self.path.clone()));
        }
        self.children.insert(0, Self { is_index: true, ..child });
        Ok(())
    }

    /// Moves this node's page fields into a new index child, leaving a
    /// structural parent behind.
    pub fn demote(&mut self) -> Result<()> {
        let Some(page) = self.page.take() else {
            return Ok(());
        };
        let role = std::mem::replace(&mut self.role, RouteRole::Structure);
        self.add_index(Self::index(role, page))
    }

    /// Converts into the immutable tree, putting children in canonical
    /// order.
    pub fn freeze(self) -> RouteNode {
        let mut children: Vec<RouteNode> = self.children.into_iter().map(Self::freeze).collect();
        children.sort_by(canonical_order);

        let (view, loader, action, loading) = match self.page {
            Some(page) => (Some(page.view), page.loader, page.action, page.loading),
            None => (None, None, None, None),
        };

        RouteNode {
            path: self.path,
            is_index: self.is_index,
            role: self.role,
            view,
            loader,
            action,
            loading,
            error_view: self.error_view,
            children,
        }
    }
}

/// Index first, then dynamic, static and catch-all children.
fn canonical_order(a: &RouteNode, b: &RouteNode) -> Ordering {
    fn rank(node: &RouteNode) -> u8 {
        if node.is_index {
            0
        } else if node.path == "*" {
            3
        } else if is_dynamic(&node.path) {
            1
        } else {
            2
        }
    }
    rank(a).cmp(&rank(b)).then_with(|| a.path.cmp(&b.path))
}

/// One node of the compiled route tree.
///
/// The tree is immutable: it is built once by
/// [`RouteCompiler`](crate::RouteCompiler) and only read afterwards.
#[derive(Clone)]
pub struct RouteNode {
    path: String,
    is_index: bool,
    role: RouteRole,
    view: Option<ViewRef>,
    loader: Option<Loader>,
    action: Option<Loader>,
    loading: Option<LoadingFallback>,
    error_view: Option<ViewRef>,
    children: Vec<RouteNode>,
}

impl RouteNode {
    /// Router path; empty for index nodes.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether this is the default child of its parent.
    pub fn is_index(&self) -> bool {
        self.is_index
    }

    pub fn role(&self) -> RouteRole {
        self.role
    }

    pub fn view(&self) -> Option<&ViewRef> {
        self.view.as_ref()
    }

    /// Data loader, already wrapped by the middleware dispatcher.
    pub fn loader(&self) -> Option<&Loader> {
        self.loader.as_ref()
    }

    pub fn action(&self) -> Option<&Loader> {
        self.action.as_ref()
    }

    pub fn error_view(&self) -> Option<&ViewRef> {
        self.error_view.as_ref()
    }

    pub fn loading_view(&self) -> Option<&LoadingFallback> {
        self.loading.as_ref()
    }

    pub fn children(&self) -> &[RouteNode] {
        &self.children
    }

    /// Finds the non-index child with `path`.
    pub fn child(&self, path: &str) -> Option<&RouteNode> {
        self.children
            .iter()
            .find(|c| !c.is_index && c.path == path)
    }

    /// The index child, if any.
    pub fn index(&self) -> Option<&RouteNode> {
        self.children.iter().find(|c| c.is_index)
    }

    /// Serializable outline of the tree below this node.
    pub fn manifest(&self) -> RouteManifest {
        RouteManifest {
            path: self.path.clone(),
            index: self.is_index,
            role: self.role,
            view: self.view.as_ref().map(|v| v.source().to_string()),
            loader: self.loader.is_some(),
            action: self.action.is_some(),
            loading: self.loading.as_ref().map(|l| {
                l.source()
                    .map_or_else(|| BUILT_IN_LOADING.to_string(), str::to_string)
            }),
            error_view: self.error_view.as_ref().map(|v| v.source().to_string()),
            children: self.children.iter().map(Self::manifest).collect(),
        }
    }
}

impl fmt::Debug for RouteNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteNode")
            .field("path", &self.path)
            .field("is_index", &self.is_index)
            .field("role", &self.role)
            .field("view", &self.view)
            .field("loader", &self.loader.is_some())
            .field("action", &self.action.is_some())
            .field("loading", &self.loading)
            .field("error_view", &self.error_view)
            .field("children", &self.children)
            .finish()
    }
}

const BUILT_IN_LOADING: &str = "<built-in>";

/// Structural outline of a [`RouteNode`], with views named by source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteManifest {
    pub path: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub index: bool,
    pub role: RouteRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub loader: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub action: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loading: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_view: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteManifest>,
}

impl RouteManifest {
    fn write_outline(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let label = if self.index { "(index)" } else { self.path.as_str() };
        write!(f, "{:indent$}{label}", "", indent = depth * 2)?;
        if self.role != RouteRole::Structure {
            write!(f, " [{}]", role_name(self.role))?;
        }
        if let Some(view) = &self.view {
            write!(f, " {view}")?;
        }
        if let Some(error) = &self.error_view {
            write!(f, " !{error}")?;
        }
        writeln!(f)?;
        for child in &self.children {
            child.write_outline(f, depth + 1)?;
        }
        Ok(())
    }
}

const fn role_name(role: RouteRole) -> &'static str {
    match role {
        RouteRole::Structure => "structure",
        RouteRole::Page => "page",
        RouteRole::Layout => "layout",
    }
}

/// Indented outline, one node per line.
impl fmt::Display for RouteManifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_outline(f, 0)
    }
}

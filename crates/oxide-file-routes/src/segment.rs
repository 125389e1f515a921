//! Path segmenter: turns a virtual file path into route-path tokens.
//!
//! `./app/(protected)/users/[id]/page.tsx` becomes
//! `["/", "protected?", "users/:id"]`, the last token tagged as a page.

use crate::error::{Result, RouteError};
use crate::options::CompilerOptions;

/// What the file at the end of a segment list declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// A page: rendered as the index of its route.
    Page,
    /// A layout: wraps every route below it.
    Layout,
}

/// One route-path token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Router path of the node this token produces.
    pub path: String,
    /// Set on the last token of a page or layout file.
    pub kind: Option<FileKind>,
}

impl Segment {
    /// A token carrying no declaration.
    pub fn plain(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: None,
        }
    }

    /// Returns whether the token binds a route parameter.
    pub fn is_dynamic(&self) -> bool {
        is_dynamic(&self.path)
    }
}

/// Returns whether a route path ends in a `:param` part.
pub fn is_dynamic(path: &str) -> bool {
    path.rsplit('/')
        .next()
        .is_some_and(|part| part.starts_with(':'))
}

/// Returns whether a route path is a single plain name, the only kind of
/// node an edit segment is joined onto.
pub(crate) fn is_plain_static(path: &str) -> bool {
    !path.is_empty() && path != "/" && path != "*" && !path.ends_with('?') && !is_dynamic(path)
}

/// Splits `file` into the part up to and including `<root_dir>/` and the
/// part below it.
///
/// Accepts `./app/..`, `/app/..` and `app/..`.
pub(crate) fn split_root<'a>(file: &'a str, options: &CompilerOptions) -> Result<(&'a str, &'a str)> {
    let trimmed = file
        .strip_prefix("./")
        .or_else(|| file.strip_prefix('/'))
        .unwrap_or(file);

    let rest = trimmed
        .strip_prefix(options.root_dir.as_str())
        .and_then(|r| r.strip_prefix('/'))
        .ok_or_else(|| RouteError::OutsideRoot {
            path: file.to_string(),
            root_dir: options.root_dir.clone(),
        })?;

    Ok((&file[..file.len() - rest.len()], rest))
}

/// Splits a file name into its stem and its extension (with the dot).
pub(crate) fn split_file_name(name: &str) -> (&str, &str) {
    name.find('.').map_or((name, ""), |i| name.split_at(i))
}

/// Maps one directory name to its router token, or `None` when the
/// folder does not take part in routing.
fn parse_segment(segment: &str, options: &CompilerOptions) -> Option<String> {
    if segment.is_empty()
        || segment == options.index_group
        || segment.starts_with(options.private_prefix.as_str())
    {
        return None;
    }

    let token = if let Some(group) = segment.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        format!("{group}?")
    } else if segment.starts_with("[...") {
        "*".to_string()
    } else if let Some(param) = segment.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        format!(":{param}")
    } else {
        segment.to_string()
    };
    Some(token)
}

/// Folds directory names into route tokens, attaching each dynamic token
/// to the token before it.
fn fold_tokens<'a>(dirs: impl Iterator<Item = &'a str>, options: &CompilerOptions) -> Vec<Segment> {
    let mut segments = vec![Segment::plain("/")];

    for token in dirs.filter_map(|dir| parse_segment(dir, options)) {
        match segments.last_mut() {
            Some(prev) if token.starts_with(':') && prev.path != "/" => {
                prev.path.push('/');
                prev.path.push_str(&token);
            }
            _ => segments.push(Segment::plain(token)),
        }
    }

    segments
}

/// Segments a page or layout file into route tokens.
///
/// The last token is tagged with the file's [`FileKind`]; files with any
/// other stem produce untagged tokens.
pub fn route_segments(file: &str, options: &CompilerOptions) -> Result<Vec<Segment>> {
    let (_, rest) = split_root(file, options)?;
    let (dirs, name) = match rest.rsplit_once('/') {
        Some((dirs, name)) => (Some(dirs), name),
        None => (None, rest),
    };
    if name.is_empty() {
        return Err(RouteError::MissingFileName(file.to_string()));
    }

    let mut segments = fold_tokens(dirs.into_iter().flat_map(|d| d.split('/')), options);

    let (stem, _) = split_file_name(name);
    let kind = if stem == options.page_stem {
        Some(FileKind::Page)
    } else if stem == options.layout_stem {
        Some(FileKind::Layout)
    } else {
        None
    };
    if let Some(last) = segments.last_mut() {
        last.kind = kind;
    }

    Ok(segments)
}

/// Segments the directory of a file, ignoring what the file declares.
///
/// Used by the error and not-found passes to find the node a file
/// decorates.
pub fn directory_segments(file: &str, options: &CompilerOptions) -> Result<Vec<Segment>> {
    let mut segments = route_segments(file, options)?;
    for segment in &mut segments {
        segment.kind = None;
    }
    Ok(segments)
}

/// Applies the edit rule: an edit segment following a plain static token
/// is joined onto it (`users/edit`) instead of nesting. Under a dynamic
/// token it stays a separate, nested level.
pub fn fold_edit_segments(segments: Vec<Segment>, options: &CompilerOptions) -> Vec<Segment> {
    let mut folded: Vec<Segment> = Vec::with_capacity(segments.len());

    for segment in segments {
        match folded.last_mut() {
            Some(prev) if options.is_edit_segment(&segment.path) && is_plain_static(&prev.path) => {
                prev.path.push('/');
                prev.path.push_str(&segment.path);
                prev.kind = segment.kind;
            }
            _ => folded.push(segment),
        }
    }

    folded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(segments: &[Segment]) -> Vec<&str> {
        segments.iter().map(|s| s.path.as_str()).collect()
    }

    fn segments(file: &str) -> Vec<Segment> {
        route_segments(file, &CompilerOptions::default()).unwrap()
    }

    #[test]
    fn test_root_page() {
        let s = segments("./app/page.tsx");
        assert_eq!(paths(&s), vec!["/"]);
        assert_eq!(s[0].kind, Some(FileKind::Page));
    }

    #[test]
    fn test_groups_and_dynamic_collapse() {
        let s = segments("./app/(protected)/users/[id]/page.tsx");
        assert_eq!(paths(&s), vec!["/", "protected?", "users/:id"]);
        assert_eq!(s[2].kind, Some(FileKind::Page));
        assert_eq!(s[1].kind, None);
    }

    #[test]
    fn test_layout_kind() {
        let s = segments("./app/(protected)/layout.tsx");
        assert_eq!(paths(&s), vec!["/", "protected?"]);
        assert_eq!(s[1].kind, Some(FileKind::Layout));
    }

    #[test]
    fn test_index_group_and_private_folders_vanish() {
        let s = segments("./app/(index)/_components/reports/page.tsx");
        assert_eq!(paths(&s), vec!["/", "reports"]);
    }

    #[test]
    fn test_catch_all() {
        let s = segments("./app/docs/[...slug]/page.tsx");
        assert_eq!(paths(&s), vec!["/", "docs", "*"]);
    }

    #[test]
    fn test_dynamic_under_root_is_its_own_node() {
        let s = segments("./app/[tenant]/settings/page.tsx");
        assert_eq!(paths(&s), vec!["/", ":tenant", "settings"]);
    }

    #[test]
    fn test_consecutive_dynamic_segments() {
        let s = segments("./app/orgs/[org]/[member]/page.tsx");
        assert_eq!(paths(&s), vec!["/", "orgs/:org/:member"]);
    }

    #[test]
    fn test_accepts_prefix_variants() {
        let options = CompilerOptions::default();
        for file in ["./app/users/page.tsx", "/app/users/page.tsx", "app/users/page.tsx"] {
            let s = route_segments(file, &options).unwrap();
            assert_eq!(paths(&s), vec!["/", "users"], "{file}");
        }
    }

    #[test]
    fn test_outside_root() {
        let err = route_segments("./src/users/page.tsx", &CompilerOptions::default()).unwrap_err();
        assert!(matches!(err, RouteError::OutsideRoot { .. }));
        assert!(route_segments("./application/page.tsx", &CompilerOptions::default()).is_err());
    }

    #[test]
    fn test_missing_file_name() {
        let err = route_segments("./app/users/", &CompilerOptions::default()).unwrap_err();
        assert!(matches!(err, RouteError::MissingFileName(_)));
    }

    #[test]
    fn test_directory_segments_drop_kind() {
        let s = directory_segments("./app/(protected)/users/layout.tsx", &CompilerOptions::default())
            .unwrap();
        assert_eq!(paths(&s), vec!["/", "protected?", "users"]);
        assert!(s.iter().all(|seg| seg.kind.is_none()));
    }

    #[test]
    fn test_edit_joins_static_parent() {
        let options = CompilerOptions::default();
        let s = fold_edit_segments(segments("./app/users/edit/page.tsx"), &options);
        assert_eq!(paths(&s), vec!["/", "users/edit"]);
        assert_eq!(s[1].kind, Some(FileKind::Page));
    }

    #[test]
    fn test_edit_nests_under_dynamic_parent() {
        let options = CompilerOptions::default();
        let s = fold_edit_segments(segments("./app/users/[id]/update/page.tsx"), &options);
        assert_eq!(paths(&s), vec!["/", "users/:id", "update"]);
    }

    #[test]
    fn test_edit_under_root_or_group_stays_nested() {
        let options = CompilerOptions::default();
        let s = fold_edit_segments(segments("./app/edit/page.tsx"), &options);
        assert_eq!(paths(&s), vec!["/", "edit"]);
        let s = fold_edit_segments(segments("./app/(admin)/edit/page.tsx"), &options);
        assert_eq!(paths(&s), vec!["/", "admin?", "edit"]);
    }

    #[test]
    fn test_is_dynamic_uses_last_part() {
        assert!(is_dynamic(":id"));
        assert!(is_dynamic("users/:id"));
        assert!(!is_dynamic("users"));
        assert!(!is_dynamic("users/:id/edit"));
    }
}

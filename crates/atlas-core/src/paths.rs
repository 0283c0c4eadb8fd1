//! Lexical path helpers for document identifiers.
//!
//! Identifiers are paths relative to the scan root. They are normalized
//! purely lexically (no filesystem access): `.` components are dropped and
//! `..` components cancel the preceding normal component. A `..` that would
//! escape the root is preserved, which guarantees the result can never be a
//! member of the node set — escaping links simply resolve to nothing.

use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path, resolving `.` and `..` components.
///
/// Mirrors the usual `normpath` semantics except that an empty input stays
/// empty instead of becoming `.` — identifiers are only ever compared
/// against other normalized identifiers, so the distinction never surfaces.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                _ => out.push(component),
            },
            _ => out.push(component),
        }
    }
    out.iter().collect()
}

/// Render an identifier as a forward-slash URL, regardless of platform
/// separator.
#[must_use]
pub fn to_url(path: &Path) -> String {
    let parts: Vec<String> = path
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    parts.join("/")
}

/// True when the normalized path points above the root it is relative to.
#[must_use]
pub fn escapes_root(path: &Path) -> bool {
    matches!(path.components().next(), Some(Component::ParentDir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_drops_cur_dir() {
        assert_eq!(normalize(Path::new("./a/./b")), PathBuf::from("a/b"));
    }

    #[test]
    fn normalize_resolves_parent_dir() {
        assert_eq!(
            normalize(Path::new("a/b/../sibling/sibling.html")),
            PathBuf::from("a/sibling/sibling.html")
        );
    }

    #[test]
    fn normalize_preserves_escaping_parent() {
        assert_eq!(normalize(Path::new("a/../../x")), PathBuf::from("../x"));
        assert!(escapes_root(&normalize(Path::new("../x"))));
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize(Path::new("a/./b/../c"));
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn url_uses_forward_slashes() {
        assert_eq!(to_url(Path::new("a/b/c.html")), "a/b/c.html");
    }

    #[test]
    fn in_tree_path_does_not_escape() {
        assert!(!escapes_root(Path::new("a/b.html")));
    }
}

//! Path helpers for the slash-separated store namespace.
//!
//! All functions are pure and total. `.` and `..` are NOT resolved; they
//! are ordinary names as far as the store is concerned.

use std::borrow::Cow;

/// Check whether a path is already in normal form (starts with `/`, no
/// `//`, no trailing `/` unless root).
fn is_normalized(path: &str) -> bool {
    if !path.starts_with('/') {
        return false;
    }
    if path.len() > 1 && path.ends_with('/') {
        return false;
    }
    !path.contains("//")
}

/// Normalize a path: ensure leading `/`, collapse repeated separators,
/// strip trailing `/` (except for root). Returns the input unchanged
/// (zero-alloc) when already in normal form.
pub fn normalize(path: &str) -> Cow<'_, str> {
    if is_normalized(path) {
        return Cow::Borrowed(path);
    }
    let path_str = if path.starts_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("/{path}"))
    };
    let mut result = String::with_capacity(path_str.len());
    let mut prev_slash = false;
    for ch in path_str.chars() {
        if ch == '/' {
            if !prev_slash {
                result.push(ch);
            }
            prev_slash = true;
        } else {
            result.push(ch);
            prev_slash = false;
        }
    }
    if result.len() > 1 && result.ends_with('/') {
        result.pop();
    }
    Cow::Owned(result)
}

/// Join a base directory and a child segment into a normalized path.
pub fn join(base: &str, segment: &str) -> String {
    normalize(&format!("{base}/{segment}")).into_owned()
}

/// Parent directory of a path. The root's parent is the root.
pub fn dirname(path: &str) -> String {
    let path = normalize(path);
    if path.as_ref() == "/" {
        return "/".to_string();
    }
    match path.rfind('/') {
        Some(0) => "/".to_string(),
        Some(i) => path[..i].to_string(),
        // Unreachable after normalization, but dirname stays total.
        None => "/".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_absolute_untouched() {
        assert_eq!(normalize("/a/b"), "/a/b");
        assert!(matches!(normalize("/a/b"), Cow::Borrowed(_)));
    }

    #[test]
    fn normalize_adds_leading_slash() {
        assert_eq!(normalize("a/b"), "/a/b");
    }

    #[test]
    fn normalize_collapses_doubles() {
        assert_eq!(normalize("//a///b"), "/a/b");
    }

    #[test]
    fn normalize_strips_trailing() {
        assert_eq!(normalize("/a/b/"), "/a/b");
        assert_eq!(normalize("/"), "/");
    }

    #[test]
    fn normalize_keeps_dot_components() {
        // `.` and `..` are literal names here, by contract.
        assert_eq!(normalize("/a/../b"), "/a/../b");
        assert_eq!(normalize("/a/./b"), "/a/./b");
    }

    #[test]
    fn join_plain() {
        assert_eq!(join("/", "src"), "/src");
        assert_eq!(join("/src", "main.rs"), "/src/main.rs");
    }

    #[test]
    fn join_messy_base() {
        assert_eq!(join("/src/", "lib.rs"), "/src/lib.rs");
        assert_eq!(join("", "top"), "/top");
    }

    #[test]
    fn dirname_basic() {
        assert_eq!(dirname("/a/b/c"), "/a/b");
        assert_eq!(dirname("/a"), "/");
        assert_eq!(dirname("/"), "/");
    }

    #[test]
    fn dirname_of_messy_path() {
        assert_eq!(dirname("//a//b/"), "/a");
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn normalize_is_idempotent(path in "[/a-z0-9_.]{1,50}") {
                let once = normalize(&path).into_owned();
                let twice = normalize(&once).into_owned();
                prop_assert_eq!(once, twice);
            }

            #[test]
            fn normalize_starts_with_slash(path in "[a-z0-9_./]{0,50}") {
                prop_assert!(normalize(&path).starts_with('/'));
            }

            #[test]
            fn normalize_never_has_double_slashes(path in "[/a-z0-9_.]{1,50}") {
                prop_assert!(!normalize(&path).contains("//"));
            }

            #[test]
            fn normalize_no_trailing_slash_unless_root(path in "[/a-z0-9_.]{1,50}") {
                let normed = normalize(&path).into_owned();
                if normed != "/" {
                    prop_assert!(!normed.ends_with('/'));
                }
            }

            #[test]
            fn dirname_inverts_join(base in "(/[a-z0-9_.]{1,8}){0,4}", name in "[a-z0-9_.]{1,8}") {
                let base = if base.is_empty() { "/".to_string() } else { base };
                let joined = join(&base, &name);
                prop_assert_eq!(dirname(&joined), normalize(&base).into_owned());
            }

            #[test]
            fn join_output_is_normalized(base in "[/a-z0-9_.]{0,30}", name in "[a-z0-9_.]{1,8}") {
                let joined = join(&base, &name);
                prop_assert_eq!(normalize(&joined).into_owned(), joined.clone());
            }
        }
    }
}

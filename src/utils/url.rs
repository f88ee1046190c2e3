//! URL resolution against an optional base.

use super::query::serialize_params;
use crate::error::{Error, Result};

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;
use serde_json::Value;

static SCHEME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("scheme pattern is valid")
});

/// Whether `path` starts with a URL scheme such as `https:` or `mailto:`.
pub fn is_absolute(path: &str) -> bool {
    SCHEME.is_match(path)
}

/// Joins `base` and `path` with exactly one `/` between them.
///
/// ```rust
/// use interpose::utils::join;
///
/// assert_eq!(join("http://x/api/", "/users"), "http://x/api/users");
/// assert_eq!(join("http://x/api", "users"), "http://x/api/users");
/// ```
pub fn join(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Resolves `path` against `base` and attaches `params`.
///
/// Absolute paths ignore the base. When `params` is given the query string
/// of the resolved URL is replaced with the serialized parameters, and the
/// URL is returned in its canonical form.
pub fn resolve_url(path: &str, base: Option<&str>, params: Option<&Value>) -> Result<String> {
    let joined = match base {
        Some(base) if !is_absolute(path) => join(base, path),
        _ => path.to_string(),
    };

    let Some(params) = params else {
        return Ok(joined);
    };

    let mut url = Url::parse(&joined)
        .map_err(|e| Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", joined, e)))?;
    let query = serialize_params(params);
    if query.is_empty() {
        url.set_query(None);
    } else {
        url.set_query(Some(&query));
    }

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_absolute() {
        assert!(is_absolute("http://example.com"));
        assert!(is_absolute("svn+ssh://host/repo"));
        assert!(is_absolute("mailto:someone@example.com"));
        assert!(!is_absolute("/users"));
        assert!(!is_absolute("users/1"));
        assert!(!is_absolute("1http://nope"));
        assert!(!is_absolute("//cdn.example.com/x"));
    }

    #[test]
    fn test_join_normalizes_slashes() {
        assert_eq!(join("http://x/api", "path"), "http://x/api/path");
        assert_eq!(join("http://x/api/", "path"), "http://x/api/path");
        assert_eq!(join("http://x/api", "/path"), "http://x/api/path");
        assert_eq!(join("http://x/api///", "//path"), "http://x/api/path");
    }

    #[test]
    fn test_resolve_without_base_keeps_path() {
        assert_eq!(resolve_url("/users", None, None).unwrap(), "/users");
    }

    #[test]
    fn test_resolve_absolute_ignores_base() {
        let url = resolve_url("http://y/z", Some("http://x/api"), None).unwrap();
        assert_eq!(url, "http://y/z");
    }

    #[test]
    fn test_resolve_replaces_query() {
        let url = resolve_url(
            "users?page=1&stale=yes",
            Some("http://x/api"),
            Some(&json!({ "page": 3 })),
        )
        .unwrap();
        assert_eq!(url, "http://x/api/users?page=3");
    }

    #[test]
    fn test_resolve_empty_params_clears_query() {
        let url = resolve_url("http://x/a?old=1", None, Some(&json!({}))).unwrap();
        assert_eq!(url, "http://x/a");
    }

    #[test]
    fn test_resolve_relative_with_params_and_no_base_fails() {
        let result = resolve_url("users", None, Some(&json!({ "a": 1 })));
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }
}

//! Tests for URL resolution and query serialization.

use interpose::utils::{is_absolute, resolve_url, serialize_params};
use serde_json::json;

#[test]
fn test_resolve_joins_with_single_slash() {
    let cases = [
        ("path", "http://x/api/"),
        ("/path", "http://x/api"),
        ("path", "http://x/api"),
        ("/path", "http://x/api/"),
    ];
    for (path, base) in cases {
        assert_eq!(
            resolve_url(path, Some(base), None).unwrap(),
            "http://x/api/path",
            "resolving {path:?} against {base:?}"
        );
    }
}

#[test]
fn test_resolve_absolute_path_ignores_base() {
    assert_eq!(
        resolve_url("http://y/z", Some("http://x/api"), None).unwrap(),
        "http://y/z"
    );
}

#[test]
fn test_params_replace_existing_query() {
    let url = resolve_url(
        "http://x/search?q=old&page=9",
        None,
        Some(&json!({ "q": "new" })),
    )
    .unwrap();
    assert_eq!(url, "http://x/search?q=new");
}

#[test]
fn test_params_with_base() {
    let url = resolve_url(
        "/items",
        Some("https://api.example.com/v2/"),
        Some(&json!({ "tags": ["a", "b"], "limit": 10 })),
    )
    .unwrap();
    assert_eq!(url, "https://api.example.com/v2/items?limit=10&tags=a%2Cb");
}

#[test]
fn test_serialization_is_deterministic() {
    let params = json!({ "z": 1, "a": { "y": true, "b": null } });
    let first = serialize_params(&params);
    assert_eq!(first, serialize_params(&params));
    assert_eq!(first, "a%5Bb%5D=&a%5By%5D=true&z=1");
}

#[test]
fn test_is_absolute_scheme_characters() {
    assert!(is_absolute("git+ssh://host/repo"));
    assert!(is_absolute("x-custom.scheme:thing"));
    assert!(!is_absolute("+bad:scheme"));
    assert!(!is_absolute("relative/path:with-colon"));
}

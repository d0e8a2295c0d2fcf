use reqguard::http::canonicalize::{canonicalize, simplify_path};
use reqguard::http::request::{Method, Request, RequestBuilder};
use reqguard::http::uri::{StandardGrammar, UriError};

fn request(method: Method, target: &str) -> Request {
    RequestBuilder::new().method(method).target(target).build()
}

#[test]
fn test_dot_segments_are_resolved() {
    assert_eq!(simplify_path("/a/./b/../c"), "/a/c");
    assert_eq!(simplify_path("/a/b/../../../../c"), "/c");
}

#[test]
fn test_traversal_never_leaves_root() {
    for path in ["/../../etc/passwd", "/..", "/../", "/a/../../..", "/./../x/../../y"] {
        let simplified = simplify_path(path);
        assert!(simplified.starts_with('/'), "{} -> {}", path, simplified);
        assert!(
            !simplified.split('/').any(|s| s == ".." || s == "."),
            "{} -> {}",
            path,
            simplified
        );
    }
    assert_eq!(simplify_path("/../../etc/passwd"), "/etc/passwd");
}

#[test]
fn test_canonicalize_decodes_then_simplifies() {
    let mut req = request(Method::Get, "/docs/%2E%2E/%2e%2E/secret%2Ftoken?x=%41");
    canonicalize(&StandardGrammar, &mut req).unwrap();

    assert_eq!(req.uri.path, "/secret/token");
    assert_eq!(req.uri.query, "x=%41");
}

#[test]
fn test_canonicalize_rejects_invalid_utf8() {
    let mut req = request(Method::Get, "/%ff%fe");
    assert_eq!(
        canonicalize(&StandardGrammar, &mut req),
        Err(UriError::InvalidEncoding)
    );
}

#[test]
fn test_asterisk_requires_options() {
    let mut req = request(Method::Options, "*");
    assert!(canonicalize(&StandardGrammar, &mut req).is_ok());
    assert_eq!(req.uri.path, "*");
    assert_eq!(req.uri.orig_path, "*");

    let mut req = request(Method::Get, "*");
    assert_eq!(
        canonicalize(&StandardGrammar, &mut req),
        Err(UriError::AsteriskNotAllowed)
    );
    assert!(req.uri.orig_path.is_empty());
}

#[test]
fn test_orig_path_is_captured_once() {
    let mut req = request(Method::Get, "/first/./page?q=1");
    canonicalize(&StandardGrammar, &mut req).unwrap();
    assert_eq!(req.uri.path, "/first/page");
    assert_eq!(req.uri.orig_path, "/first/page");

    req.uri.raw = "/second".to_string();
    canonicalize(&StandardGrammar, &mut req).unwrap();

    assert_eq!(req.uri.path, "/second");
    assert_eq!(req.uri.query, "");
    assert_eq!(req.uri.orig_path, "/first/page");
}

#[test]
fn test_canonicalize_is_idempotent() {
    let mut req = request(Method::Get, "/a//b/./c?k=v");
    canonicalize(&StandardGrammar, &mut req).unwrap();
    let first = req.uri.clone();

    canonicalize(&StandardGrammar, &mut req).unwrap();
    assert_eq!(req.uri, first);
}

#[test]
fn test_failed_grammar_propagates() {
    let mut req = request(Method::Get, "mailto:someone@example.com");
    assert!(matches!(
        canonicalize(&StandardGrammar, &mut req),
        Err(UriError::UnsupportedForm(_))
    ));
}

//! Request-target canonicalization.
//!
//! Turns `uri.raw` into a decoded, dot-free path that never climbs above
//! the document root. Safe to run again on the same request after an
//! internal rewrite: `path` and `query` are rebuilt from scratch, while
//! `orig_path` keeps the value captured on the first pass.

use percent_encoding::percent_decode_str;

use crate::http::request::{Method, Request};
use crate::http::uri::{UriError, UriGrammar};

/// Canonicalizes the request URI in place.
///
/// # Errors
///
/// Returns the grammar's error for malformed targets,
/// `UriError::AsteriskNotAllowed` for `*` on anything but OPTIONS and
/// `UriError::InvalidEncoding` when the path decodes to a NUL byte or to
/// invalid UTF-8.
pub fn canonicalize<G: UriGrammar + ?Sized>(grammar: &G, req: &mut Request) -> Result<(), UriError> {
    req.uri.query.clear();
    req.uri.path.clear();

    grammar.parse_raw(&mut req.uri)?;

    if req.uri.path == "*" {
        if req.method != Method::Options {
            return Err(UriError::AsteriskNotAllowed);
        }
    } else {
        let decoded = decode_path(&req.uri.path)?;
        req.uri.path = simplify_path(&decoded);
    }

    if req.uri.orig_path.is_empty() {
        req.uri.orig_path.push_str(&req.uri.path);
    }

    Ok(())
}

/// Percent-decodes a path. Malformed escapes are kept as they are.
///
/// ```
/// # use reqguard::http::canonicalize::decode_path;
/// assert_eq!(decode_path("/a%20b/%7Euser").unwrap(), "/a b/~user");
/// assert_eq!(decode_path("/100%").unwrap(), "/100%");
/// assert!(decode_path("/nul%00").is_err());
/// ```
pub fn decode_path(path: &str) -> Result<String, UriError> {
    let bytes: Vec<u8> = percent_decode_str(path).collect();
    if bytes.contains(&0) {
        return Err(UriError::InvalidEncoding);
    }
    String::from_utf8(bytes).map_err(|_| UriError::InvalidEncoding)
}

/// Removes `.` and `..` segments and repeated slashes.
///
/// `..` at the root is dropped rather than climbing out of it. The result
/// always starts with `/`, and keeps a trailing slash when the input
/// ended in a directory reference (`/`, `/.` or `/..`).
///
/// ```
/// # use reqguard::http::canonicalize::simplify_path;
/// assert_eq!(simplify_path("/a/./b/../c"), "/a/c");
/// assert_eq!(simplify_path("/../../etc/passwd"), "/etc/passwd");
/// assert_eq!(simplify_path("//a//b/.."), "/a/");
/// ```
pub fn simplify_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    let mut trailing_slash = false;

    for segment in path.split('/') {
        trailing_slash = false;
        match segment {
            "" => trailing_slash = true,
            "." => trailing_slash = true,
            ".." => {
                segments.pop();
                trailing_slash = true;
            }
            s => segments.push(s),
        }
    }

    let mut out = String::with_capacity(path.len() + 1);
    for segment in &segments {
        out.push('/');
        out.push_str(segment);
    }
    if trailing_slash || out.is_empty() {
        out.push('/');
    }
    out
}

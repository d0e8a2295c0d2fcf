//! Request head validation.
//!
//! [`Validator::validate_header`] runs a fixed sequence of checks against a
//! tokenized request head. The first check that fails decides the status
//! the client gets; nothing after it runs. The order is observable and
//! must not change:
//!
//! ```text
//!  version ─▶ persistence ─▶ target present ─▶ Host ─▶ canonical URI
//!     ─▶ Content-Length ─▶ Expect ─▶ method/body framing
//! ```
//!
//! On success the request has a canonical path and a settled
//! `content_length`, and the connection context knows whether the
//! connection persists and whether a `100 Continue` is owed.

use crate::config::ValidationPolicy;
use crate::http::canonicalize::canonicalize;
use crate::http::context::ConnectionContext;
use crate::http::rejection::{ExpectFailure, Malformed, Rejection};
use crate::http::request::{CONTENT_LENGTH_UNSET, Method, Request, Version};
use crate::http::uri::{StandardGrammar, UriGrammar};

/// Validates request heads with a given URI grammar and policy.
#[derive(Debug, Clone, Default)]
pub struct Validator<G = StandardGrammar> {
    grammar: G,
    policy: ValidationPolicy,
}

impl Validator<StandardGrammar> {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self {
            grammar: StandardGrammar,
            policy,
        }
    }
}

impl<G: UriGrammar> Validator<G> {
    pub fn with_grammar(grammar: G, policy: ValidationPolicy) -> Self {
        Self { grammar, policy }
    }

    /// Checks a request head and settles its framing.
    ///
    /// `ctx` is updated as checks pass (`keep_alive` is decided before any
    /// check that can fail after the version gate). On `Err` the caller
    /// hands the rejection to [`ConnectionContext::reject`].
    pub fn validate_header(
        &self,
        req: &mut Request,
        ctx: &mut ConnectionContext,
    ) -> Result<(), Rejection> {
        check_version(req)?;
        apply_persistence(req, ctx);
        check_target_present(req)?;
        self.resolve_host(req)?;
        canonicalize(&self.grammar, req)
            .map_err(|e| Rejection::from(Malformed::InvalidTarget(e)))?;
        self.parse_content_length(req)?;
        negotiate_expect(req, ctx)?;
        check_method_body(req)?;
        Ok(())
    }

    fn resolve_host(&self, req: &mut Request) -> Result<(), Rejection> {
        if let Some(pos) = req.headers.find_first("host") {
            if req.headers.find_next(pos, "host").is_some() {
                return Err(Malformed::DuplicateHost.into());
            }

            req.uri.authority.clear();
            if let Some(host) = req.headers.at(pos) {
                req.uri.authority.push_str(&host.value);
            }
            self.grammar
                .parse_hostname(&mut req.uri)
                .map_err(Malformed::InvalidHost)?;
        }

        // only HTTP/1.1 makes Host mandatory
        if req.version == Version::Http11 && req.uri.host.is_empty() {
            return Err(Malformed::MissingHost.into());
        }

        Ok(())
    }

    fn parse_content_length(&self, req: &mut Request) -> Result<(), Rejection> {
        let Some(pos) = req.headers.find_first("content-length") else {
            return Ok(());
        };
        let Some(first) = req.headers.at(pos) else {
            return Ok(());
        };

        if self.policy.reject_conflicting_content_length
            && req
                .headers
                .get_all("content-length")
                .any(|v| v != first.value)
        {
            return Err(Malformed::ConflictingContentLength.into());
        }

        req.content_length = parse_content_length_value(&first.value)?;
        Ok(())
    }
}

fn check_version(req: &Request) -> Result<(), Rejection> {
    match req.version {
        Version::Unset => Err(Rejection::VersionUnsupported),
        Version::Http10 | Version::Http11 => Ok(()),
    }
}

fn apply_persistence(req: &Request, ctx: &mut ConnectionContext) {
    match req.version {
        Version::Http10 => {
            ctx.keep_alive = req.headers.has_token("connection", "keep-alive");
        }
        Version::Http11 => {
            ctx.keep_alive = !req.headers.has_token("connection", "close");
        }
        Version::Unset => {}
    }
}

fn check_target_present(req: &Request) -> Result<(), Rejection> {
    if req.uri.raw.is_empty() {
        return Err(Malformed::EmptyTarget.into());
    }
    Ok(())
}

/// Parses a Content-Length value.
///
/// Accepts optional leading whitespace, an optional `-` and one or more
/// ASCII digits. Values that overflow `i64`, or land on `i64::MAX`, are
/// too large.
///
/// ```
/// # use reqguard::http::validate::parse_content_length_value;
/// assert_eq!(parse_content_length_value("42"), Ok(42));
/// assert!(parse_content_length_value("12abc").is_err());
/// assert!(parse_content_length_value("-1").is_err());
/// ```
pub fn parse_content_length_value(value: &str) -> Result<i64, Rejection> {
    let trimmed = value.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Malformed::InvalidContentLength(value.to_string()).into());
    }

    if negative {
        return Err(Malformed::NegativeContentLength.into());
    }

    let mut n: i64 = 0;
    for b in digits.bytes() {
        n = match n
            .checked_mul(10)
            .and_then(|n| n.checked_add(i64::from(b - b'0')))
        {
            Some(n) => n,
            None => return Err(Rejection::EntityTooLarge(value.to_string())),
        };
    }

    // the boundary itself is indistinguishable from a saturated parse
    if n == i64::MAX {
        return Err(Rejection::EntityTooLarge(value.to_string()));
    }

    Ok(n)
}

fn negotiate_expect(req: &Request, ctx: &mut ConnectionContext) -> Result<(), Rejection> {
    let mut expect_100_continue = false;

    for value in req.headers.get_all("expect") {
        if !value.eq_ignore_ascii_case("100-continue") {
            return Err(ExpectFailure::Unsupported(value.to_string()).into());
        }
        expect_100_continue = true;
    }

    if expect_100_continue {
        if req.version == Version::Http10 {
            return Err(ExpectFailure::ContinueOnHttp10.into());
        }
        ctx.expect_100_continue = true;
    }

    Ok(())
}

fn check_method_body(req: &mut Request) -> Result<(), Rejection> {
    match req.method {
        Method::Get | Method::Head => {
            if req.content_length > 0 {
                return Err(Malformed::BodyNotAllowed(req.content_length).into());
            }
            req.content_length = 0;
        }
        Method::Post => {
            if req.content_length == CONTENT_LENGTH_UNSET {
                return Err(Rejection::LengthRequired);
            }
        }
        _ => {}
    }
    Ok(())
}

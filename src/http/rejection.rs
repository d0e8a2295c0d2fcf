//! Reasons a request head is refused.
//!
//! Every failed check ends in exactly one [`Rejection`]. The value carries
//! both the status the client will see and the diagnostic text for the
//! log line, so validation steps themselves stay free of side effects.

use thiserror::Error;

use crate::http::response::StatusCode;
use crate::http::uri::UriError;

/// Why a request was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("unsupported HTTP version")]
    VersionUnsupported,
    #[error("malformed request: {0}")]
    MalformedRequest(#[from] Malformed),
    #[error("content-length {0} is out of range")]
    EntityTooLarge(String),
    #[error("expectation failed: {0}")]
    ExpectationFailed(#[from] ExpectFailure),
    #[error("POST request without content-length")]
    LengthRequired,
}

/// The 400-class defects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Malformed {
    #[error("unparsable request head: {0}")]
    UnparsableHead(String),
    #[error("empty request-target")]
    EmptyTarget,
    #[error("bad request-target: {0}")]
    InvalidTarget(UriError),
    #[error("more than one Host header")]
    DuplicateHost,
    #[error("missing Host header")]
    MissingHost,
    #[error("bad Host header: {0}")]
    InvalidHost(UriError),
    #[error("content-length is not a number: {0:?}")]
    InvalidContentLength(String),
    #[error("negative content-length")]
    NegativeContentLength,
    #[error("conflicting content-length headers")]
    ConflictingContentLength,
    #[error("GET/HEAD with content-length {0}")]
    BodyNotAllowed(i64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpectFailure {
    #[error("unsupported expectation {0:?}")]
    Unsupported(String),
    #[error("100-continue from an HTTP/1.0 client")]
    ContinueOnHttp10,
}

impl Rejection {
    /// The status code sent back for this rejection.
    ///
    /// ```
    /// # use reqguard::http::rejection::Rejection;
    /// # use reqguard::http::response::StatusCode;
    /// assert_eq!(Rejection::LengthRequired.status(), StatusCode::LengthRequired);
    /// ```
    pub fn status(&self) -> StatusCode {
        match self {
            Rejection::VersionUnsupported => StatusCode::VersionNotSupported,
            Rejection::MalformedRequest(_) => StatusCode::BadRequest,
            Rejection::EntityTooLarge(_) => StatusCode::PayloadTooLarge,
            Rejection::ExpectationFailed(_) => StatusCode::ExpectationFailed,
            Rejection::LengthRequired => StatusCode::LengthRequired,
        }
    }
}

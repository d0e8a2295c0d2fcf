//! Per-connection state the validator writes into.

use crate::http::rejection::Rejection;
use crate::http::response::{Response, StatusCode};

/// Connection-level flags decided while validating a request head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionContext {
    /// Whether the connection may carry another request after this one
    pub keep_alive: bool,
    /// Client asked for `100 Continue` before sending the body
    pub expect_100_continue: bool,
    /// Status set by the last rejection, if any
    pub response_status: Option<StatusCode>,
}

impl Default for ConnectionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionContext {
    pub fn new() -> Self {
        Self {
            keep_alive: true,
            expect_100_continue: false,
            response_status: None,
        }
    }

    /// Prepares for the next request on the same connection.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Refuses the current request.
    ///
    /// The connection is marked non-persistent and the returned response
    /// must be the last thing written on it. Nothing else about the
    /// request may be processed afterwards.
    pub fn reject(&mut self, rejection: &Rejection) -> Response {
        let status = rejection.status();

        self.keep_alive = false;
        self.expect_100_continue = false;
        self.response_status = Some(status);

        tracing::warn!(
            status = status.as_u16(),
            reason = %rejection,
            "Request rejected"
        );

        Response::for_status(status).close()
    }
}

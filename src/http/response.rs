use std::collections::HashMap;

/// HTTP status codes supported by the server.
///
/// Besides the success codes, these cover every status the validator can
/// reject a request with:
/// - `BadRequest` (400): Malformed request
/// - `LengthRequired` (411): POST without Content-Length
/// - `PayloadTooLarge` (413): Content-Length out of range
/// - `ExpectationFailed` (417): Unsupported Expect header
/// - `VersionNotSupported` (505): Unknown HTTP version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 100 Continue
    Continue,
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 411 Length Required
    LengthRequired,
    /// 413 Payload Too Large
    PayloadTooLarge,
    /// 417 Expectation Failed
    ExpectationFailed,
    /// 501 Not Implemented
    NotImplemented,
    /// 505 HTTP Version Not Supported
    VersionNotSupported,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use reqguard::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::LengthRequired.as_u16(), 411);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Continue => 100,
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::LengthRequired => 411,
            StatusCode::PayloadTooLarge => 413,
            StatusCode::ExpectationFailed => 417,
            StatusCode::NotImplemented => 501,
            StatusCode::VersionNotSupported => 505,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use reqguard::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::ExpectationFailed.reason_phrase(), "Expectation Failed");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Continue => "Continue",
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::LengthRequired => "Length Required",
            StatusCode::PayloadTooLarge => "Payload Too Large",
            StatusCode::ExpectationFailed => "Expectation Failed",
            StatusCode::NotImplemented => "Not Implemented",
            StatusCode::VersionNotSupported => "HTTP Version Not Supported",
        }
    }
}

/// Represents a complete HTTP response ready to be sent to a client.
///
/// Contains the HTTP status code, headers, and response body.
#[derive(Debug)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// HTTP headers as key-value pairs
    pub headers: HashMap<String, String>,
    /// Response body as bytes
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use reqguard::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "application/json")
///     .body(b"{}".to_vec())
///     .build();
/// assert_eq!(response.headers.get("Content-Length").unwrap(), "2");
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Adds or replaces a header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Builds the final Response.
    ///
    /// Automatically adds the Content-Length header based on body size if not already present.
    pub fn build(mut self) -> Response {
        self.headers
            .entry("Content-Length".to_string())
            .or_insert_with(|| self.body.len().to_string());

        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Creates a simple 200 OK response with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", "text/plain")
            .body(body.into())
            .build()
    }

    /// Creates a plain-text response whose body is the status line, e.g.
    /// `400 Bad Request`.
    pub fn for_status(status: StatusCode) -> Self {
        let body = format!("{} {}\n", status.as_u16(), status.reason_phrase());
        ResponseBuilder::new(status)
            .header("Content-Type", "text/plain")
            .body(body.into_bytes())
            .build()
    }

    /// Marks the response as the last one on its connection.
    pub fn close(mut self) -> Self {
        self.headers
            .insert("Connection".to_string(), "close".to_string());
        self
    }
}

use crate::http::headers::HeaderMap;
use crate::http::uri::Uri;

/// Content length of a request whose framing is not yet known.
pub const CONTENT_LENGTH_UNSET: i64 = -1;

/// HTTP request methods.
///
/// Tokens the server does not know map to `Unset`; the raw token is kept
/// in [`Request::method_token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    /// No method parsed yet, or an unknown one
    #[default]
    Unset,
    /// GET - Retrieve a resource
    Get,
    /// HEAD - Like GET but without the response body
    Head,
    /// POST - Create or submit data
    Post,
    /// PUT - Replace a resource
    Put,
    /// DELETE - Delete a resource
    Delete,
    /// OPTIONS - Describe communication options
    Options,
    /// PATCH - Partial modification of a resource
    Patch,
    /// TRACE - Loop-back test
    Trace,
    /// CONNECT - Tunnel to the target
    Connect,
}

impl Method {
    /// Parses an HTTP method token. Matching is case-sensitive.
    ///
    /// # Example
    ///
    /// ```
    /// # use reqguard::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Method::Get);
    /// assert_eq!(Method::from_token("get"), Method::Unset);
    /// ```
    pub fn from_token(s: &str) -> Self {
        match s {
            "GET" => Method::Get,
            "HEAD" => Method::Head,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            "OPTIONS" => Method::Options,
            "PATCH" => Method::Patch,
            "TRACE" => Method::Trace,
            "CONNECT" => Method::Connect,
            _ => Method::Unset,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Unset => "",
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
            Method::Patch => "PATCH",
            Method::Trace => "TRACE",
            Method::Connect => "CONNECT",
        }
    }
}

/// HTTP protocol versions the server speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Version {
    #[default]
    Unset,
    Http10,
    Http11,
}

impl Version {
    /// Parses the version token of a request line, e.g. `HTTP/1.1`.
    pub fn from_token(s: &str) -> Self {
        match s {
            "HTTP/1.0" => Version::Http10,
            "HTTP/1.1" => Version::Http11,
            _ => Version::Unset,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Version::Unset => "",
            Version::Http10 => "HTTP/1.0",
            Version::Http11 => "HTTP/1.1",
        }
    }
}

/// Represents an HTTP request head as seen by the validator.
///
/// One value lives per connection slot. It is reset in place between
/// pipelined requests and cleared when the slot is torn down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The method exactly as received, kept for unknown methods too
    pub method_token: String,
    pub version: Version,
    pub uri: Uri,
    /// Request headers in receipt order
    pub headers: HeaderMap,
    /// Body length, or [`CONTENT_LENGTH_UNSET`] when not determined
    pub content_length: i64,
}

impl Default for Request {
    fn default() -> Self {
        Self::new()
    }
}

impl Request {
    pub fn new() -> Self {
        Self {
            method: Method::Unset,
            method_token: String::new(),
            version: Version::Unset,
            uri: Uri::new(),
            headers: HeaderMap::new(),
            content_length: CONTENT_LENGTH_UNSET,
        }
    }

    /// Restores the initial state, keeping buffers for the next request on
    /// the same connection.
    pub fn reset(&mut self) {
        self.method = Method::Unset;
        self.method_token.clear();
        self.version = Version::Unset;
        self.uri.reset();
        self.headers.reset();
        self.content_length = CONTENT_LENGTH_UNSET;
    }

    /// Restores the initial state and releases every buffer.
    pub fn clear(&mut self) {
        self.method = Method::Unset;
        self.method_token = String::new();
        self.version = Version::Unset;
        self.uri.clear();
        self.headers.clear();
        self.content_length = CONTENT_LENGTH_UNSET;
    }

    /// Sets both the method and its token from a received token.
    pub fn set_method(&mut self, token: &str) {
        self.method = Method::from_token(token);
        self.method_token.clear();
        self.method_token.push_str(token);
    }

    /// Retrieves the first value of a header (case-insensitive name).
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    /// Body length to read off the wire; 0 when undetermined.
    pub fn body_len(&self) -> u64 {
        u64::try_from(self.content_length).unwrap_or(0)
    }
}

/// Builder for constructing Request heads, mostly for tests and internal
/// requests.
#[derive(Default)]
pub struct RequestBuilder {
    request: Request,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            request: Request::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.request.set_method(method.as_str());
        self
    }

    /// Sets a raw method token, which may be unknown to the server.
    pub fn method_token(mut self, token: &str) -> Self {
        self.request.set_method(token);
        self
    }

    pub fn target(mut self, raw: impl Into<String>) -> Self {
        self.request.uri.raw = raw.into();
        self
    }

    pub fn version(mut self, version: Version) -> Self {
        self.request.version = version;
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.headers.append(key, value);
        self
    }

    pub fn build(self) -> Request {
        self.request
    }
}

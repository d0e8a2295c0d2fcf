//! HTTP protocol implementation.
//!
//! The heart of this module is request head validation: deciding whether a
//! tokenized request is acceptable, canonicalizing its URI, and settling
//! how its body is framed and whether the connection persists.
//!
//! # Architecture
//!
//! - **`request`**, **`headers`**, **`uri`**, **`physical`**: the request value
//!   and its lifecycle (`new` / `reset` / `clear`)
//! - **`canonicalize`**: percent-decoding and dot-segment removal
//! - **`validate`**: the ordered validation checks
//! - **`rejection`**, **`context`**: rejection reasons and the single
//!   rejection exit
//! - **`parser`**: splits raw bytes into a request head
//! - **`response`**, **`writer`**: response model and serialization
//! - **`connection`**: the per-connection loop tying it together
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Reset request slot, wait for a full head
//!        └──────┬──────┘
//!               │ Head tokenized
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Validate, read body, build response
//!        └──────┬───────────┘
//!               │ Response ready (or rejection)
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Keep-Alive → Reading (same connection)
//!               └─ Close → Closed
//! ```
//!
//! # Example
//!
//! ```
//! use reqguard::config::ValidationPolicy;
//! use reqguard::http::context::ConnectionContext;
//! use reqguard::http::request::{Method, RequestBuilder, Version};
//! use reqguard::http::validate::Validator;
//!
//! let validator = Validator::new(ValidationPolicy::default());
//! let mut ctx = ConnectionContext::new();
//! let mut req = RequestBuilder::new()
//!     .method(Method::Get)
//!     .target("/docs/./intro/../index.html")
//!     .version(Version::Http11)
//!     .header("Host", "example.com")
//!     .build();
//!
//! validator.validate_header(&mut req, &mut ctx).unwrap();
//! assert_eq!(req.uri.path, "/docs/index.html");
//! assert_eq!(req.content_length, 0);
//! assert!(ctx.keep_alive);
//! ```

pub mod canonicalize;
pub mod connection;
pub mod context;
pub mod headers;
pub mod parser;
pub mod physical;
pub mod rejection;
pub mod request;
pub mod response;
pub mod uri;
pub mod validate;
pub mod writer;

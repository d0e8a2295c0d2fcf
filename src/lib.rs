//! reqguard - HTTP/1.x request validation
//!
//! Core library: request values, URI canonicalization, header validation
//! and the rejection path, plus the small server loop that drives them.

pub mod config;
pub mod http;
pub mod server;

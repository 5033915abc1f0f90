//! Core building blocks for types-probe.
//!
//! This crate provides the pieces the npm-specific crate is assembled from:
//! - **HTTP transport**: `HttpClient`, a GET-only wrapper around `reqwest`
//! - **Memo cache**: `MemoCache`, an explicit, injectable name-keyed cache
//! - **Error types**: `CoreError` for transport-level failures

pub mod cache;
pub mod error;
pub mod http;

pub use cache::MemoCache;
pub use error::{CoreError, Result};
pub use http::{DEFAULT_USER_AGENT, HttpClient, HttpOptions, HttpResponse};

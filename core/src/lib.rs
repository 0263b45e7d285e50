//! Synchronous client core for a tenant-aware document store.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `MultiGetDataObjectRequest` bundles single-document lookups and checks,
//!   once and before anything is sent, that they share a tenant and name an
//!   index and id each.
//! - `MultiGetDataObjectResponse` returns per-item metadata in request order
//!   together with a single-pass `ContentCursor` over the raw documents, so
//!   decoding into caller types happens only on demand.
//! - `DataObjectClient` is stateless apart from its `ClientConfig`; each
//!   operation is split into `build_*` and `parse_*`.

pub mod client;
pub mod config;
pub mod cursor;
pub mod error;
pub mod http;
pub mod multi_get;
pub mod types;

pub use client::DataObjectClient;
pub use config::ClientConfig;
pub use cursor::ContentCursor;
pub use error::{ApiError, ValidationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use multi_get::{
    MultiGetDataObjectRequest, MultiGetDataObjectRequestBuilder, MultiGetDataObjectResponse,
    MultiGetDataObjectResponseBuilder,
};
pub use types::{DataObjectResponse, GetDataObjectRequest, ItemFailure, PutDataObjectRequest};

//! Batched document retrieval: the multi-get request and response aggregates.
//!
//! # Design
//! `MultiGetDataObjectRequest` owns its items and validates them as a group
//! exactly once, at construction. After that the items are only reachable
//! through a shared slice, so the invariant cannot be broken later.
//!
//! `MultiGetDataObjectResponse` pairs the per-item metadata, in request
//! order, with the `ContentCursor` over the raw payload. It performs no
//! validation: individual item failures are legitimate results.

use tracing::warn;

use crate::cursor::ContentCursor;
use crate::error::ValidationError;
use crate::types::{DataObjectResponse, GetDataObjectRequest};

/// An ordered, validated batch of single-document lookups sharing one tenant.
///
/// Duplicates are allowed. An empty batch is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiGetDataObjectRequest {
    requests: Vec<GetDataObjectRequest>,
}

impl MultiGetDataObjectRequest {
    /// Take ownership of `requests` and validate them.
    pub fn new(requests: Vec<GetDataObjectRequest>) -> Result<Self, ValidationError> {
        validate(&requests).inspect_err(|e| warn!(error = %e, "rejected multi-get request"))?;
        Ok(Self { requests })
    }

    /// Copy `requests` into a new batch; the caller keeps its own collection.
    pub fn from_slice(requests: &[GetDataObjectRequest]) -> Result<Self, ValidationError> {
        Self::new(requests.to_vec())
    }

    pub fn builder() -> MultiGetDataObjectRequestBuilder {
        MultiGetDataObjectRequestBuilder::default()
    }

    pub fn requests(&self) -> &[GetDataObjectRequest] {
        &self.requests
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GetDataObjectRequest> {
        self.requests.iter()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// The tenant shared by every item; `None` for an empty batch or an
    /// untenanted one.
    pub fn tenant_id(&self) -> Option<&str> {
        self.requests.first().and_then(GetDataObjectRequest::tenant_id)
    }
}

impl<'a> IntoIterator for &'a MultiGetDataObjectRequest {
    type Item = &'a GetDataObjectRequest;
    type IntoIter = std::slice::Iter<'a, GetDataObjectRequest>;

    fn into_iter(self) -> Self::IntoIter {
        self.requests.iter()
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Reject an item whose index or id is blank, index first. Shared by batch
/// validation and the single-document requests.
pub(crate) fn check_index_and_id(position: usize, index: &str, id: &str) -> Result<(), ValidationError> {
    if is_blank(index) {
        return Err(ValidationError::MissingIndex { position });
    }
    if is_blank(id) {
        return Err(ValidationError::MissingId { position });
    }
    Ok(())
}

/// Check tenant, index and id of each item, in that order, stopping at the
/// first violation.
fn validate(requests: &[GetDataObjectRequest]) -> Result<(), ValidationError> {
    let Some(first) = requests.first() else {
        return Ok(());
    };
    let tenant_id = first.tenant_id();
    for (position, request) in requests.iter().enumerate() {
        if request.tenant_id() != tenant_id {
            return Err(ValidationError::InconsistentTenantId {
                position,
                expected: tenant_id.map(str::to_string),
                found: request.tenant_id().map(str::to_string),
            });
        }
        check_index_and_id(position, request.index(), request.id())?;
    }
    Ok(())
}

/// Accumulates items for a `MultiGetDataObjectRequest`; validation happens
/// in `build`.
#[derive(Debug, Default)]
pub struct MultiGetDataObjectRequestBuilder {
    requests: Vec<GetDataObjectRequest>,
}

impl MultiGetDataObjectRequestBuilder {
    pub fn add(mut self, request: GetDataObjectRequest) -> Self {
        self.requests.push(request);
        self
    }

    pub fn build(self) -> Result<MultiGetDataObjectRequest, ValidationError> {
        MultiGetDataObjectRequest::new(self.requests)
    }
}

/// Per-item results of a multi-get, in request order, plus the cursor over
/// the raw documents.
///
/// The cursor is single-pass: decode each document once, in order, through
/// `parser_mut` (or `take_parser`). Nothing else reads from it.
#[derive(Debug, Default)]
pub struct MultiGetDataObjectResponse {
    responses: Vec<DataObjectResponse>,
    parser: Option<ContentCursor>,
}

impl MultiGetDataObjectResponse {
    pub fn new(responses: Vec<DataObjectResponse>, parser: Option<ContentCursor>) -> Self {
        Self { responses, parser }
    }

    pub fn builder() -> MultiGetDataObjectResponseBuilder {
        MultiGetDataObjectResponseBuilder::default()
    }

    pub fn responses(&self) -> &[DataObjectResponse] {
        &self.responses
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    /// The cursor over the raw documents, for inspection only.
    ///
    /// Decoding goes through `parser_mut` or `take_parser`, and each
    /// document must be read at most once: the cursor is single-pass and
    /// hands items over as it advances.
    pub fn parser(&self) -> Option<&ContentCursor> {
        self.parser.as_ref()
    }

    pub fn parser_mut(&mut self) -> Option<&mut ContentCursor> {
        self.parser.as_mut()
    }

    /// Move the cursor out, leaving the response without one.
    pub fn take_parser(&mut self) -> Option<ContentCursor> {
        self.parser.take()
    }

    pub fn into_parts(self) -> (Vec<DataObjectResponse>, Option<ContentCursor>) {
        (self.responses, self.parser)
    }
}

/// Accumulates items for a `MultiGetDataObjectResponse`. No validation.
#[derive(Debug, Default)]
pub struct MultiGetDataObjectResponseBuilder {
    responses: Vec<DataObjectResponse>,
    parser: Option<ContentCursor>,
}

impl MultiGetDataObjectResponseBuilder {
    pub fn response(mut self, response: DataObjectResponse) -> Self {
        self.responses.push(response);
        self
    }

    /// Set the cursor, replacing any earlier one.
    pub fn parser(mut self, parser: ContentCursor) -> Self {
        self.parser = Some(parser);
        self
    }

    pub fn build(self) -> MultiGetDataObjectResponse {
        MultiGetDataObjectResponse::new(self.responses, self.parser)
    }
}

//! Single-document request and response types.
//!
//! # Design
//! These are the per-item building blocks of a multi-get. Requests are
//! immutable once constructed and expose read-only accessors; the batch
//! aggregate in `multi_get` is responsible for validating them as a group.
//! `DataObjectResponse` carries only item metadata. Document bodies stay in
//! the raw payload until someone decodes them through a `ContentCursor`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// A lookup of one document by index and id, optionally scoped to a tenant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetDataObjectRequest {
    tenant_id: Option<String>,
    index: String,
    id: String,
}

impl GetDataObjectRequest {
    pub fn new(index: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            tenant_id: None,
            index: index.into(),
            id: id.into(),
        }
    }

    pub fn with_tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    pub fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// A document to store under index and id.
#[derive(Debug, Clone, PartialEq)]
pub struct PutDataObjectRequest {
    tenant_id: Option<String>,
    index: String,
    id: String,
    source: Value,
}

impl PutDataObjectRequest {
    pub fn new<T: Serialize>(
        index: impl Into<String>,
        id: impl Into<String>,
        source: &T,
    ) -> Result<Self, ApiError> {
        let source =
            serde_json::to_value(source).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(Self {
            tenant_id: None,
            index: index.into(),
            id: id.into(),
            source,
        })
    }

    pub fn with_tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    pub fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> &Value {
        &self.source
    }
}

/// A per-item failure reported by the store, e.g. an unknown index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFailure {
    #[serde(rename = "type")]
    pub kind: String,
    pub reason: String,
}

/// Metadata for one item of a multi-get (or a single get).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataObjectResponse {
    pub index: String,
    pub id: String,
    pub found: bool,
    pub failure: Option<ItemFailure>,
}

impl DataObjectResponse {
    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }
}

/// Metadata of one document entry as the store returns it, for both
/// `GET _doc` and each element of an `_mget` `docs` array. `_source` is
/// left in the raw payload.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ItemEnvelope {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub found: bool,
    pub error: Option<ItemFailure>,
}

impl From<&ItemEnvelope> for DataObjectResponse {
    fn from(item: &ItemEnvelope) -> Self {
        Self {
            index: item.index.clone(),
            id: item.id.clone(),
            found: item.found && item.error.is_none(),
            failure: item.error.clone(),
        }
    }
}

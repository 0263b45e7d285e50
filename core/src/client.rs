//! Stateless HTTP request builder and response parser for the document store.
//!
//! # Design
//! `DataObjectClient` holds only its `ClientConfig` and carries no mutable
//! state between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the actual HTTP round-trip.
//!
//! A multi-get answer is checked against the request that produced it: the
//! store must return exactly one item per requested document, in the same
//! order. Anything else is reported as an error instead of being paired up
//! on a best-effort basis.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::cursor::ContentCursor;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::multi_get::{check_index_and_id, MultiGetDataObjectRequest, MultiGetDataObjectResponse};
use crate::types::{DataObjectResponse, GetDataObjectRequest, ItemEnvelope, PutDataObjectRequest};

#[derive(Serialize)]
struct MultiGetDoc<'a> {
    #[serde(rename = "_index")]
    index: &'a str,
    #[serde(rename = "_id")]
    id: &'a str,
}

#[derive(Serialize)]
struct MultiGetBody<'a> {
    docs: Vec<MultiGetDoc<'a>>,
}

/// Synchronous, stateless client for the document store.
#[derive(Debug, Clone)]
pub struct DataObjectClient {
    config: ClientConfig,
}

impl DataObjectClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_config(ClientConfig {
            base_url: base_url.to_string(),
            ..ClientConfig::default()
        })
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            config: ClientConfig {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                ..config
            },
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn build_get_data_object(&self, request: &GetDataObjectRequest) -> Result<HttpRequest, ApiError> {
        check_index_and_id(0, request.index(), request.id())?;
        debug!(index = request.index(), id = request.id(), "building get request");
        Ok(HttpRequest {
            method: HttpMethod::Get,
            path: self.doc_path(request.index(), request.id()),
            headers: self.headers(request.tenant_id(), false),
            body: None,
        })
    }

    /// Decode the document of a single get. `Ok(None)` when the store
    /// answers 200 with `found: false`.
    pub fn parse_get_data_object<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<Option<T>, ApiError> {
        check_status(&response, 200)?;
        let mut body: Value =
            serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        let item = ItemEnvelope::deserialize(&body).map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        if !DataObjectResponse::from(&item).found {
            return Ok(None);
        }
        match body.get_mut("_source").map(Value::take) {
            None | Some(Value::Null) => Ok(None),
            Some(source) => serde_json::from_value(source)
                .map(Some)
                .map_err(|e| ApiError::DeserializationError(e.to_string())),
        }
    }

    pub fn build_put_data_object(&self, request: &PutDataObjectRequest) -> Result<HttpRequest, ApiError> {
        check_index_and_id(0, request.index(), request.id())?;
        let body =
            serde_json::to_string(request.source()).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.doc_path(request.index(), request.id()),
            headers: self.headers(request.tenant_id(), true),
            body: Some(body),
        })
    }

    /// Accepts 201 (created) and 200 (replaced an existing document).
    pub fn parse_put_data_object(&self, response: HttpResponse) -> Result<(), ApiError> {
        if response.status == 200 {
            return Ok(());
        }
        check_status(&response, 201)
    }

    /// Build the `_mget` request for an already validated batch.
    pub fn build_multi_get(&self, request: &MultiGetDataObjectRequest) -> Result<HttpRequest, ApiError> {
        let body = MultiGetBody {
            docs: request
                .iter()
                .map(|r| MultiGetDoc {
                    index: r.index(),
                    id: r.id(),
                })
                .collect(),
        };
        let body = serde_json::to_string(&body).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        debug!(items = request.len(), tenant_id = request.tenant_id(), "building multi-get request");
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/_mget", self.config.base_url),
            headers: self.headers(request.tenant_id(), true),
            body: Some(body),
        })
    }

    /// Read per-item metadata from a `_mget` answer and attach a cursor over
    /// the raw documents. The answer must line up with `request` one to one.
    pub fn parse_multi_get(
        &self,
        request: &MultiGetDataObjectRequest,
        response: HttpResponse,
    ) -> Result<MultiGetDataObjectResponse, ApiError> {
        check_status(&response, 200)?;
        let cursor = ContentCursor::from_body(&response.body)?;
        if cursor.len() != request.len() {
            warn!(expected = request.len(), actual = cursor.len(), "multi-get length mismatch");
            return Err(ApiError::ResponseLengthMismatch {
                expected: request.len(),
                actual: cursor.len(),
            });
        }

        let mut builder = MultiGetDataObjectResponse::builder();
        for (position, (raw, requested)) in cursor.items().iter().zip(request).enumerate() {
            let item = ItemEnvelope::deserialize(raw)
                .map_err(|e| ApiError::DeserializationError(format!("item {position}: {e}")))?;
            if item.index != requested.index() || item.id != requested.id() {
                warn!(position, index = %item.index, id = %item.id, "multi-get item out of order");
                return Err(ApiError::ResponseOrderMismatch { position });
            }
            builder = builder.response(DataObjectResponse::from(&item));
        }
        debug!(items = request.len(), "parsed multi-get response");
        Ok(builder.parser(cursor).build())
    }

    /// Index and id are percent-encoded as single path segments.
    fn doc_path(&self, index: &str, id: &str) -> String {
        format!(
            "{}/{}/_doc/{}",
            self.config.base_url,
            urlencoding::encode(index),
            urlencoding::encode(id)
        )
    }

    fn headers(&self, tenant_id: Option<&str>, json: bool) -> Vec<(String, String)> {
        let mut headers = Vec::new();
        if json {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        if let Some(tenant_id) = tenant_id {
            headers.push((self.config.tenant_header.clone(), tenant_id.to_string()));
        }
        headers
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

//! In-memory, tenant-aware document store speaking a small OpenSearch-style
//! HTTP dialect: `PUT`/`GET /{index}/_doc/{id}` and `POST /_mget`.
//!
//! Documents are partitioned by the `x-tenant-id` header; requests without
//! the header land in the untenanted partition.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, warn};

pub const TENANT_HEADER: &str = "x-tenant-id";

/// Partition key: tenant (if any) and index name.
type IndexKey = (Option<String>, String);

pub type Db = Arc<RwLock<HashMap<IndexKey, HashMap<String, Value>>>>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemError {
    #[serde(rename = "type")]
    pub kind: String,
    pub reason: String,
}

/// One entry of a get or multi-get answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocItem {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found: Option<bool>,
    #[serde(rename = "_source", skip_serializing_if = "Option::is_none")]
    pub source: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ItemError>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PutResult {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: String,
    pub result: String,
}

#[derive(Debug, Deserialize)]
pub struct MultiGetDoc {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Docs<T> {
    pub docs: Vec<T>,
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/_mget", post(multi_get))
        .route("/{index}/_doc/{id}", get(get_doc).put(put_doc))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Tenant from the header; a value that is not visible ASCII is a bad
/// request rather than a fallback to the untenanted partition.
fn tenant(headers: &HeaderMap) -> Result<Option<String>, StatusCode> {
    let Some(value) = headers.get(TENANT_HEADER) else {
        return Ok(None);
    };
    match value.to_str() {
        Ok(tenant) => Ok(Some(tenant.to_string())),
        Err(_) => {
            warn!("rejecting unreadable tenant header");
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

fn lookup(
    db: &HashMap<IndexKey, HashMap<String, Value>>,
    tenant: &Option<String>,
    index: String,
    id: String,
) -> DocItem {
    let Some(docs) = db.get(&(tenant.clone(), index.clone())) else {
        let reason = format!("no such index [{index}]");
        return DocItem {
            index,
            id,
            found: None,
            source: None,
            error: Some(ItemError {
                kind: "index_not_found_exception".to_string(),
                reason,
            }),
        };
    };
    let source = docs.get(&id).cloned();
    DocItem {
        index,
        id,
        found: Some(source.is_some()),
        source,
        error: None,
    }
}

async fn put_doc(
    State(db): State<Db>,
    headers: HeaderMap,
    Path((index, id)): Path<(String, String)>,
    Json(source): Json<Value>,
) -> Result<(StatusCode, Json<PutResult>), StatusCode> {
    let tenant = tenant(&headers)?;
    debug!(?tenant, %index, %id, "put");
    let mut db = db.write().await;
    let replaced = db
        .entry((tenant, index.clone()))
        .or_default()
        .insert(id.clone(), source)
        .is_some();
    let (status, result) = if replaced {
        (StatusCode::OK, "updated")
    } else {
        (StatusCode::CREATED, "created")
    };
    Ok((
        status,
        Json(PutResult {
            index,
            id,
            result: result.to_string(),
        }),
    ))
}

async fn get_doc(
    State(db): State<Db>,
    headers: HeaderMap,
    Path((index, id)): Path<(String, String)>,
) -> Result<(StatusCode, Json<DocItem>), StatusCode> {
    let tenant = tenant(&headers)?;
    debug!(?tenant, %index, %id, "get");
    let item = lookup(&*db.read().await, &tenant, index, id);
    let status = if item.found == Some(true) {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    Ok((status, Json(item)))
}

async fn multi_get(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<Docs<MultiGetDoc>>,
) -> Result<Json<Docs<DocItem>>, StatusCode> {
    let tenant = tenant(&headers)?;
    debug!(?tenant, items = input.docs.len(), "mget");
    let db = db.read().await;
    let docs = input
        .docs
        .into_iter()
        .map(|doc| lookup(&db, &tenant, doc.index, doc.id))
        .collect();
    Ok(Json(Docs { docs }))
}

//! Single-pass cursor over a raw multi-get payload.
//!
//! # Design
//! The store answers `_mget` with one `{"docs": [...]}` body. Item metadata
//! is read eagerly into `DataObjectResponse` values; the documents themselves
//! stay here until the caller decodes them into its own types. Reading is
//! destructive: every `next_*` call moves the cursor forward and hands the
//! item over, so each document can be decoded at most once. The cursor has a
//! single owner (the multi-get response), which keeps readers from
//! interleaving.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;

#[derive(Deserialize)]
struct DocsBody {
    docs: Vec<Value>,
}

/// Stateful, forward-only decoder over the `docs` array of a multi-get body.
///
/// Not `Clone`: a copy would be a second reader over documents that are
/// meant to be decoded once.
///
/// ```compile_fail
/// let cursor = docstore_core::ContentCursor::from_docs(Vec::new());
/// let second = cursor.clone();
/// ```
#[derive(Debug, Default)]
pub struct ContentCursor {
    docs: Vec<Value>,
    position: usize,
}

impl ContentCursor {
    /// Parse a raw `{"docs": [...]}` body and position the cursor at the first item.
    pub fn from_body(body: &str) -> Result<Self, ApiError> {
        let parsed: DocsBody =
            serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        Ok(Self::from_docs(parsed.docs))
    }

    pub fn from_docs(docs: Vec<Value>) -> Self {
        Self { docs, position: 0 }
    }

    /// All items, including already consumed ones (left as `null`).
    pub(crate) fn items(&self) -> &[Value] {
        &self.docs
    }

    /// Index of the next item to be read.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Total number of items in the payload, read or not.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.docs.len() - self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.docs.len()
    }

    /// Take the next raw item and advance.
    pub fn next_raw(&mut self) -> Result<Value, ApiError> {
        let item = self
            .docs
            .get_mut(self.position)
            .map(Value::take)
            .ok_or(ApiError::CursorExhausted)?;
        self.position += 1;
        Ok(item)
    }

    /// Advance past the next item without decoding it.
    pub fn skip(&mut self) -> Result<(), ApiError> {
        self.next_raw().map(|_| ())
    }

    /// Decode the `_source` of the next item into `T` and advance.
    ///
    /// Returns `Ok(None)` for items that carry no document (not found, or
    /// failed). The cursor advances even when decoding fails.
    pub fn next_source<T: DeserializeOwned>(&mut self) -> Result<Option<T>, ApiError> {
        let position = self.position;
        let mut item = self.next_raw()?;
        let source = match item.get_mut("_source").map(Value::take) {
            None | Some(Value::Null) => {
                debug!(position, "multi-get item has no source");
                return Ok(None);
            }
            Some(source) => source,
        };
        serde_json::from_value(source)
            .map(Some)
            .map_err(|e| ApiError::DeserializationError(format!("item {position}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Doc {
        name: String,
    }

    const BODY: &str = r#"{"docs":[
        {"_index":"docs","_id":"1","found":true,"_source":{"name":"first"}},
        {"_index":"docs","_id":"2","found":false},
        {"_index":"docs","_id":"3","found":true,"_source":{"name":"third"}}
    ]}"#;

    #[test]
    fn decodes_items_in_order() {
        let mut cursor = ContentCursor::from_body(BODY).unwrap();
        assert_eq!(cursor.len(), 3);
        assert_eq!(
            cursor.next_source::<Doc>().unwrap(),
            Some(Doc { name: "first".to_string() })
        );
        assert_eq!(cursor.next_source::<Doc>().unwrap(), None);
        assert_eq!(
            cursor.next_source::<Doc>().unwrap(),
            Some(Doc { name: "third".to_string() })
        );
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn reading_past_the_end_is_an_error() {
        let mut cursor = ContentCursor::from_body(r#"{"docs":[]}"#).unwrap();
        assert!(cursor.is_exhausted());
        let err = cursor.next_source::<Doc>().unwrap_err();
        assert!(matches!(err, ApiError::CursorExhausted));
    }

    #[test]
    fn skip_advances_without_decoding() {
        let mut cursor = ContentCursor::from_body(BODY).unwrap();
        cursor.skip().unwrap();
        cursor.skip().unwrap();
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.remaining(), 1);
        assert_eq!(
            cursor.next_source::<Doc>().unwrap().unwrap().name,
            "third"
        );
    }

    #[test]
    fn decode_failure_still_advances() {
        let mut cursor = ContentCursor::from_body(BODY).unwrap();
        let err = cursor.next_source::<u64>().unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn items_are_consumed_destructively() {
        let mut cursor = ContentCursor::from_body(BODY).unwrap();
        cursor.next_raw().unwrap();
        assert_eq!(cursor.docs[0], Value::Null);
    }

    #[test]
    fn rejects_body_without_docs() {
        let err = ContentCursor::from_body(r#"{"items":[]}"#).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}

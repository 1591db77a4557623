//! Raw document values as read from the document store.
//!
//! Values are owned by the source collaborator; inference only ever reads the
//! tag off a value (and recurses into arrays and nested documents).
pub mod ejson;

use indexmap::IndexMap;

/// One stored document: field name → raw value, in stored order, keys unique.
pub type Document = IndexMap<String, RawValue>;

#[derive(Clone, Debug, PartialEq)]
pub enum RawValue {
    Null,
    Boolean(bool),
    Int32(i32),
    Int64(i64),
    Double(f64),
    String(String),
    Binary(Vec<u8>),
    /// milliseconds since the unix epoch
    DateTime(i64),
    Timestamp { time: u32, increment: u32 },
    ObjectId([u8; 12]),
    Array(Vec<RawValue>),
    Document(Document),
    /// a stored value kind inference does not model (decimal128, regex, min/max key, ...)
    Other(String),
}

/// The closed set of value tags readable from a [`RawValue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueTag {
    Null,
    Boolean,
    Int32,
    Int64,
    Double,
    String,
    Binary,
    DateTime,
    Timestamp,
    ObjectIdLike,
    Array,
    Document,
    Other,
}

impl ValueTag {
    pub fn is_container(self) -> bool {
        matches!(self, ValueTag::Array | ValueTag::Document)
    }
}

impl RawValue {
    pub fn tag(&self) -> ValueTag {
        match self {
            RawValue::Null => ValueTag::Null,
            RawValue::Boolean(_) => ValueTag::Boolean,
            RawValue::Int32(_) => ValueTag::Int32,
            RawValue::Int64(_) => ValueTag::Int64,
            RawValue::Double(_) => ValueTag::Double,
            RawValue::String(_) => ValueTag::String,
            RawValue::Binary(_) => ValueTag::Binary,
            RawValue::DateTime(_) => ValueTag::DateTime,
            RawValue::Timestamp { .. } => ValueTag::Timestamp,
            RawValue::ObjectId(_) => ValueTag::ObjectIdLike,
            RawValue::Array(_) => ValueTag::Array,
            RawValue::Document(_) => ValueTag::Document,
            RawValue::Other(_) => ValueTag::Other,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }
}

impl From<serde_json::Value> for RawValue {
    fn from(value: serde_json::Value) -> Self {
        ejson::from_json(value)
    }
}

/// Build a [`Document`] from a JSON object; `None` for any other JSON value.
pub fn document_from_json(value: serde_json::Value) -> Option<Document> {
    match RawValue::from(value) {
        RawValue::Document(doc) => Some(doc),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tags_cover_scalars_and_containers() {
        assert_eq!(RawValue::Null.tag(), ValueTag::Null);
        assert_eq!(RawValue::Int64(7).tag(), ValueTag::Int64);
        assert_eq!(RawValue::ObjectId([0; 12]).tag(), ValueTag::ObjectIdLike);
        assert!(RawValue::Array(vec![]).tag().is_container());
        assert!(RawValue::Document(Document::new()).tag().is_container());
        assert!(!ValueTag::String.is_container());
    }

    #[test]
    fn only_objects_become_documents() {
        assert!(document_from_json(json!({"a": 1})).is_some());
        assert!(document_from_json(json!([{"a": 1}])).is_none());
        assert!(document_from_json(json!("a")).is_none());
    }

    #[test]
    fn document_keeps_stored_key_order() {
        let doc = document_from_json(json!({"z": 1, "a": 2})).unwrap();
        let keys = doc.keys().map(String::as_str).collect::<Vec<_>>();
        assert_eq!(keys, ["z", "a"]);
    }
}

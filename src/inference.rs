//! Per-document type extraction and the merge operator (⊔).
//!
//! Each document maps to a `StructType`; document types fold together with
//! [`merge`], which is total, commutative and associative, so the fold can run
//! as an unordered tree reduction and still give one answer.
//!
//! - Numbers widen `integer → long → double`.
//! - `null` widens to whatever it meets.
//! - Structs union their fields (sorted by name); arrays merge elements.
//! - `Skip` is the identity; every unresolved pair becomes `Conflict`.
pub mod arr;
pub mod num;
pub mod obj;

use crate::ir::{StructField, StructType, StructuralType};
use crate::value::{Document, RawValue};

#[cfg(test)]
pub(crate) mod strategies;

pub use arr::resolve_array;

// ------------------------------ Observe ---------------------------------- //

/// Type of one stored value.
pub fn observe_value(v: &RawValue) -> StructuralType {
    match v {
        RawValue::Null => StructuralType::Null,
        RawValue::Boolean(_) => StructuralType::Boolean,
        RawValue::Int32(_) => StructuralType::Integer,
        RawValue::Int64(_) => StructuralType::Long,
        RawValue::Double(_) => StructuralType::Double,
        RawValue::String(_) | RawValue::ObjectId(_) => StructuralType::String,
        RawValue::Binary(_) => StructuralType::Binary,
        RawValue::DateTime(_) => StructuralType::Date,
        RawValue::Timestamp { .. } => StructuralType::Timestamp,
        RawValue::Array(xs) => resolve_array(xs),
        RawValue::Document(doc) => StructuralType::Struct(observe_document(doc)),
        RawValue::Other(_) => StructuralType::Conflict,
    }
}

/// One nullable field per key, sorted by name so stored key order never matters.
pub fn observe_document(doc: &Document) -> StructType {
    let mut fields = doc
        .iter()
        .map(|(k, v)| StructField::new(k.clone(), observe_value(v), true))
        .collect::<Vec<_>>();
    fields.sort_by(|a, b| a.name.cmp(&b.name));
    StructType::new(fields)
}

// -------------------------------- Merge (⊔) ------------------------------- //

pub fn merge(a: &StructuralType, b: &StructuralType) -> StructuralType {
    use StructuralType::*;

    match (a, b) {
        // Skip first: merge(Skip, Null) must stay Null
        (Skip, other) | (other, Skip) => other.clone(),
        (Null, other) | (other, Null) => other.clone(),
        (Struct(x), Struct(y)) => Struct(obj::merge_struct(x, y)),
        (Array(x), Array(y)) => Array(arr::merge_array(x, y)),
        (x, y) => match num::widen(x, y) {
            Some(wide) => wide,
            None if x == y => x.clone(),
            None => Conflict,
        },
    }
}

/// [`merge`] restricted to structs; the aggregation fold works on these directly.
pub fn merge_structs(a: &StructType, b: &StructType) -> StructType {
    obj::merge_struct(a, b)
}

// ------------------------------- Front API -------------------------------- //

/// Streaming, single-threaded inference: observe documents one at a time, then
/// `solve` for the canonical schema.
#[derive(Debug, Default)]
pub struct Inference {
    state: StructType,
    observed: u64,
}

impl Inference {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe_document(&mut self, doc: &Document) {
        let obs = observe_document(doc);
        self.state = merge_structs(&self.state, &obs);
        self.observed += 1;
    }

    pub fn observed(&self) -> u64 {
        self.observed
    }

    /// The merged, not yet canonicalized type.
    pub fn merged(&self) -> &StructType {
        &self.state
    }

    pub fn solve(&self) -> StructType {
        crate::canonical::canonicalize_schema(&self.state)
    }
}

pub fn infer_from_documents<'a, I>(docs: I) -> StructType
where
    I: IntoIterator<Item = &'a Document>,
{
    let mut inf = Inference::new();
    for doc in docs {
        inf.observe_document(doc);
    }
    inf.solve()
}

// ------------------------------- Tests ------------------------------------ //

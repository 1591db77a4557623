//! proptest generators shared by the merge-law and canonicalizer tests.
use proptest::prelude::*;

use crate::ir::{StructField, StructType, StructuralType};
use crate::value::{Document, RawValue};

fn leaf() -> impl Strategy<Value = StructuralType> {
    prop::sample::select(vec![
        StructuralType::Null,
        StructuralType::Boolean,
        StructuralType::Integer,
        StructuralType::Long,
        StructuralType::Double,
        StructuralType::String,
        StructuralType::Binary,
        StructuralType::Date,
        StructuralType::Timestamp,
        StructuralType::Conflict,
        StructuralType::Skip,
    ])
}

/// Arbitrary types, including sentinels nested anywhere, unsorted struct
/// fields, non-nullable fields and empty names.
pub(crate) fn any_type() -> impl Strategy<Value = StructuralType> {
    leaf().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            (inner.clone(), any::<bool>()).prop_map(|(e, n)| StructuralType::array(e, n)),
            prop::collection::btree_map("[a-d]?", (inner, any::<bool>()), 0..4)
                .prop_flat_map(|fields| {
                    let fields = fields
                        .into_iter()
                        .map(|(k, (t, n))| StructField::new(k, t, n))
                        .collect::<Vec<_>>();
                    Just(fields).prop_shuffle()
                })
                .prop_map(|fields| StructuralType::Struct(StructType::new(fields))),
        ]
    })
}

pub(crate) fn any_struct() -> impl Strategy<Value = StructType> {
    any_type().prop_map(|t| match t {
        StructuralType::Struct(s) => s,
        other => StructType::new(vec![StructField::new("v", other, true)]),
    })
}

pub(crate) fn any_document() -> impl Strategy<Value = Document> {
    let scalar = prop_oneof![
        Just(RawValue::Null),
        any::<bool>().prop_map(RawValue::Boolean),
        any::<i32>().prop_map(RawValue::Int32),
        any::<i64>().prop_map(RawValue::Int64),
        (-1e6f64..1e6).prop_map(RawValue::Double),
        "[a-z]{0,3}".prop_map(RawValue::String),
        Just(RawValue::DateTime(0)),
        Just(RawValue::Other("minKey".into())),
    ];
    let value = scalar.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(RawValue::Array),
            prop::collection::vec(("[a-c]", inner), 0..4)
                .prop_map(|kvs| RawValue::Document(kvs.into_iter().collect())),
        ]
    });
    prop::collection::vec(("[a-d]?", value), 0..5)
        .prop_map(|kvs| kvs.into_iter().collect::<Document>())
}

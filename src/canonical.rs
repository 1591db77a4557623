//! Canonical form of a merged type: vacuous structure removed.
//!
//! `Skip` fields, empty-name fields and structs left without fields disappear,
//! recursively; an array whose element disappears goes with it. Only the root
//! survives empty, as `struct<>`.

use crate::ir::{ArrayType, StructField, StructType, StructuralType};

/// Canonicalize the root schema. Never fails; a vacuous sample yields `struct<>`.
pub fn canonicalize_schema(root: &StructType) -> StructType {
    canonical_struct(root).unwrap_or_else(|| {
        tracing::debug!(fields = root.len(), "schema canonicalized to an empty struct");
        StructType::empty()
    })
}

/// `None` when nothing of `ty` survives.
pub fn canonicalize(ty: &StructuralType) -> Option<StructuralType> {
    match ty {
        StructuralType::Skip => None,
        StructuralType::Array(a) => canonicalize(&a.element)
            .map(|element| StructuralType::Array(ArrayType::new(element, a.contains_null))),
        StructuralType::Struct(s) => canonical_struct(s).map(StructuralType::Struct),
        other => Some(other.clone()),
    }
}

fn canonical_struct(s: &StructType) -> Option<StructType> {
    let fields = s
        .fields()
        .iter()
        .filter_map(|f| {
            if f.name.is_empty() {
                tracing::trace!("dropping field with empty name");
                return None;
            }
            match canonicalize(&f.data_type) {
                Some(data_type) => Some(StructField::new(f.name.clone(), data_type, f.nullable)),
                None => {
                    tracing::trace!(field = %f.name, "dropping vacuous field");
                    None
                }
            }
        })
        .collect::<Vec<_>>();

    if fields.is_empty() {
        None
    } else {
        Some(StructType::new(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::strategies::{any_struct, any_type};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn st(fields: Vec<StructField>) -> StructuralType {
        StructuralType::Struct(StructType::new(fields))
    }

    fn f(name: &str, ty: StructuralType) -> StructField {
        StructField::new(name, ty, true)
    }

    #[test]
    fn drops_skip_and_empty_names() {
        let root = StructType::new(vec![
            f("", StructuralType::Integer),
            f("a", StructuralType::Skip),
            f("b", StructuralType::String),
        ]);
        assert_eq!(
            canonicalize_schema(&root),
            StructType::new(vec![f("b", StructuralType::String)])
        );
    }

    #[test]
    fn empty_nested_structs_collapse_upwards() {
        let root = StructType::new(vec![
            f("outer", st(vec![f("inner", st(vec![f("x", StructuralType::Skip)]))])),
            f("keep", StructuralType::Conflict),
        ]);
        assert_eq!(
            canonicalize_schema(&root),
            StructType::new(vec![f("keep", StructuralType::Conflict)])
        );
    }

    #[test]
    fn arrays_of_nothing_disappear() {
        let root = StructType::new(vec![
            f("a", StructuralType::array(st(vec![]), true)),
            f("b", StructuralType::array(StructuralType::array(StructuralType::Skip, true), true)),
            f("c", StructuralType::array(StructuralType::Null, false)),
        ]);
        assert_eq!(
            canonicalize_schema(&root),
            StructType::new(vec![f("c", StructuralType::array(StructuralType::Null, false))])
        );
    }

    #[test]
    fn root_is_kept_even_when_vacuous() {
        let root = StructType::new(vec![f("a", StructuralType::Skip)]);
        assert_eq!(canonicalize_schema(&root), StructType::empty());
        assert_eq!(canonicalize_schema(&StructType::empty()), StructType::empty());
    }

    #[test]
    fn leaves_and_order_are_untouched() {
        let root = StructType::new(vec![
            StructField::new("z", StructuralType::Long, false),
            f("a", StructuralType::Timestamp),
        ]);
        assert_eq!(canonicalize_schema(&root), root);
        assert_eq!(canonicalize(&StructuralType::Conflict), Some(StructuralType::Conflict));
        assert_eq!(canonicalize(&StructuralType::Skip), None);
    }

    fn is_canonical(ty: &StructuralType) -> bool {
        match ty {
            StructuralType::Skip => false,
            StructuralType::Array(a) => is_canonical(&a.element),
            StructuralType::Struct(s) => !s.is_empty() && fields_canonical(s),
            _ => true,
        }
    }

    fn fields_canonical(s: &StructType) -> bool {
        s.fields()
            .iter()
            .all(|f| !f.name.is_empty() && is_canonical(&f.data_type))
    }

    proptest! {
        #[test]
        fn output_has_no_vacuous_structure(root in any_struct()) {
            let out = canonicalize_schema(&root);
            prop_assert!(fields_canonical(&out));
        }

        #[test]
        fn canonicalization_is_idempotent(ty in any_type()) {
            if let Some(once) = canonicalize(&ty) {
                prop_assert!(is_canonical(&once));
                prop_assert_eq!(canonicalize(&once), Some(once));
            }
        }
    }
}

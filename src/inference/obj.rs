use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::ir::{StructField, StructType};

/// Field-set union. Every output field is nullable; fields seen on both sides
/// merge their types. Output is sorted by name.
pub(super) fn merge_struct(a: &StructType, b: &StructType) -> StructType {
    let mut fields: BTreeMap<&str, StructField> = BTreeMap::new();

    for f in a.fields().iter().chain(b.fields()) {
        match fields.entry(f.name.as_str()) {
            Entry::Vacant(slot) => {
                slot.insert(StructField::new(f.name.clone(), f.data_type.clone(), true));
            }
            Entry::Occupied(mut slot) => {
                let merged = super::merge(&slot.get().data_type, &f.data_type);
                *slot.get_mut() = StructField::new(f.name.clone(), merged, true);
            }
        }
    }

    StructType::new(fields.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::StructuralType;
    use pretty_assertions::assert_eq;

    fn field(name: &str, ty: StructuralType, nullable: bool) -> StructField {
        StructField::new(name, ty, nullable)
    }

    #[test]
    fn union_keeps_one_sided_fields_as_nullable_and_sorts() {
        let a = StructType::new(vec![
            field("z", StructuralType::Integer, false),
            field("m", StructuralType::String, true),
        ]);
        let b = StructType::new(vec![
            field("m", StructuralType::String, false),
            field("a", StructuralType::Boolean, false),
        ]);
        let out = merge_struct(&a, &b);
        assert_eq!(
            out,
            StructType::new(vec![
                field("a", StructuralType::Boolean, true),
                field("m", StructuralType::String, true),
                field("z", StructuralType::Integer, true),
            ])
        );
    }

    #[test]
    fn shared_fields_merge_recursively() {
        let a = StructType::new(vec![field("n", StructuralType::Integer, false)]);
        let b = StructType::new(vec![field("n", StructuralType::Double, false)]);
        assert_eq!(
            merge_struct(&a, &b),
            StructType::new(vec![field("n", StructuralType::Double, true)])
        );
    }

    #[test]
    fn duplicate_names_collapse_into_one_field() {
        let a = StructType::new(vec![
            field("x", StructuralType::Integer, true),
            field("x", StructuralType::Long, true),
        ]);
        let out = merge_struct(&a, &StructType::empty());
        assert_eq!(out, StructType::new(vec![field("x", StructuralType::Long, true)]));
    }
}

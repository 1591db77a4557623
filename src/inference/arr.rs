use std::collections::BTreeSet;

use crate::ir::{ArrayType, StructuralType};
use crate::value::{RawValue, ValueTag};

/// Element type of a raw array, or a bare sentinel:
/// - `[]` carries no information → `Skip`
/// - one primitive tag → `array<tag>`
/// - one container tag → elements must agree structurally, else `Conflict`
/// - one tag plus nulls → retried on the null elements alone
/// - anything else → `array<conflict>`
pub fn resolve_array(elements: &[RawValue]) -> StructuralType {
    let tags = elements.iter().map(RawValue::tag).collect::<BTreeSet<_>>();

    match (tags.len(), tags.first().copied()) {
        (0, _) => StructuralType::Skip,
        (1, Some(tag)) if tag.is_container() => resolve_containers(elements),
        (1, Some(_)) => StructuralType::array(super::observe_value(&elements[0]), true),
        (2, _) if tags.contains(&ValueTag::Null) => {
            let nulls = elements
                .iter()
                .filter(|v| v.is_null())
                .cloned()
                .collect::<Vec<_>>();
            resolve_array(&nulls)
        }
        _ => StructuralType::array(StructuralType::Conflict, true),
    }
}

/// Nested arrays / documents: every element must infer to the same type.
/// Stops at the first element that disagrees.
fn resolve_containers(elements: &[RawValue]) -> StructuralType {
    let mut items = elements.iter().map(super::observe_value);
    let Some(mut running) = items.next() else {
        return StructuralType::Skip;
    };
    for ty in items {
        if ty != running {
            running = StructuralType::Conflict;
            break;
        }
    }
    if running.is_sentinel() {
        running
    } else {
        StructuralType::array(running, true)
    }
}

pub(super) fn merge_array(a: &ArrayType, b: &ArrayType) -> ArrayType {
    ArrayType::new(
        super::merge(&a.element, &b.element),
        a.contains_null || b.contains_null,
    )
}

use crate::ir::StructuralType;

/// Position in the numeric promotion chain `integer < long < double`.
fn rank(t: &StructuralType) -> Option<u8> {
    match t {
        StructuralType::Integer => Some(0),
        StructuralType::Long => Some(1),
        StructuralType::Double => Some(2),
        _ => None,
    }
}

/// Tightest numeric type holding both sides; `None` unless both are numeric.
pub(super) fn widen(a: &StructuralType, b: &StructuralType) -> Option<StructuralType> {
    let (ra, rb) = (rank(a)?, rank(b)?);
    Some(if ra >= rb { a.clone() } else { b.clone() })
}

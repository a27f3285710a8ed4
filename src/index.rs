//! The reserved sentinel for index-typed reference fields.
//!
//! Cross-references between entities are plain integer indices into a
//! sibling collection. A reference field holds either [`INDEX_NONE`] or a
//! valid in-range index; the sentinel and a real index 0 are never
//! interchangeable.

/// Reserved index value meaning "no reference".
pub const INDEX_NONE: i32 = -1;

/// Serialization predicate: a reference at the sentinel is omitted from
/// the wire, and an omitted reference decodes back to the sentinel.
pub(crate) fn index_is_none(index: &i32) -> bool {
    *index == INDEX_NONE
}

//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two item names
/// with the same text are the same name. To "modify" one, build a new one.
///
/// Implementors validate on construction, so holding a value object means
/// holding a value that already satisfies its invariants.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

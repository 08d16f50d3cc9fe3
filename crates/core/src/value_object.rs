//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are compared by their attributes. In
/// this workspace the classifier output, proposed states and tag sets are
/// value objects: a preview compares them structurally, never by reference.
///
/// To "modify" a value object, build a new one. Preview items rely on this:
/// the current and proposed values they hold are never mutated after the
/// diff is computed.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

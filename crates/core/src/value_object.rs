//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**. Two value objects with the same
//! attribute values are interchangeable, and once built they never change.
//! A promotion is the canonical example here: it can be attached to any
//! number of products because nothing can mutate it after construction.

/// Marker trait for value objects.
///
/// The trait requires:
/// - **Clone**: value objects are copied or shared freely
/// - **PartialEq**: value objects are compared by their attribute values
/// - **Debug**: value objects show up in logs and test failures
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Discount {
///     percent: f64,
/// }
///
/// impl ValueObject for Discount {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Two entities are the same entity when their identifiers are equal, even if
/// their mutable state (stock, active flag, ...) differs.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Identity comparison.
    fn same_entity<O>(&self, other: &O) -> bool
    where
        O: Entity<Id = Self::Id> + ?Sized,
    {
        self.id() == other.id()
    }
}

//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// An entity is identified by its id, not by its attribute values: two
/// instances with the same id describe the same entity even when their state
/// differs. The id is assigned at construction and never reassigned.
///
/// Identifier types reject the nil UUID at construction
/// (see [`define_id!`](crate::define_id)), so a "transient" entity - one whose
/// identity has not been established yet - cannot be represented; the
/// construction path fails instead of producing an instance that could
/// accidentally compare equal to another unsaved one.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;

    /// Whether two instances describe the same entity.
    fn same_identity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

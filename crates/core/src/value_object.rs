//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined
//! entirely by their attribute values. Two value objects with the same values are
//! considered equal.

/// Marker trait for value objects.
///
/// Value objects are domain objects that are **immutable** and **compared by value**.
/// They represent concepts where identity doesn't matter - only the values matter.
///
/// ## Structural equality
///
/// Equality and hashing are derived mechanically from the type's fields in
/// declaration order (`#[derive(PartialEq, Eq, Hash)]`): two instances are equal
/// iff their fields are element-wise equal, and the hash combines the fields'
/// hashes order-sensitively. Concrete types must keep their field set stable -
/// equality must not depend on anything a derive cannot see. Two value objects of
/// different concrete types can never compare equal; the type system enforces it.
///
/// Types carrying floating-point components implement `PartialEq` only (no
/// `Eq`/`Hash`).
///
/// ## Immutability
///
/// Value objects should be **immutable** - once created, they don't change. To
/// "modify" a value object, create a new one with the new values. Constructors
/// validate their input and fail with a [`crate::DomainError`] rather than ever
/// producing a partially-built value.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: No identity (two value objects with same values are equal)
/// - **Entity**: Has identity (two entities with same ID are the same entity)
///
/// Example:
/// - `Money { amount_minor: 100, currency: Currency::Usd }` is a value object
/// - `Customer { id: CustomerId(...), .. }` is an entity
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

//! Core traits shared across layers.

/// Trait for entities with a unique identifier.
pub trait Entity {
    /// Identifier type.
    type Id: PartialEq;

    /// Returns the entity's unique identifier.
    fn id(&self) -> &Self::Id;
}

/// Trait for entities that belong to a single user.
pub trait Owned {
    /// Returns the owning user's identifier.
    fn owner_id(&self) -> &crate::UserId;
}

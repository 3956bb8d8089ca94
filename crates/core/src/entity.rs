//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Identity is assigned by the persistence layer, so an entity that has only
/// been built in memory has no identifier yet.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier, if one has been assigned.
    fn id(&self) -> Option<Self::Id>;

    /// Whether the entity has been written to the durable store.
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }

    /// Returns the identifier or a validation error naming the operation that
    /// needed it.
    fn require_id(&self, operation: &str) -> crate::DomainResult<Self::Id> {
        self.id().ok_or_else(|| {
            crate::DomainError::validation(format!("{operation} called with empty id field"))
        })
    }
}

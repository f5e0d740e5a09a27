//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the identifier, or `None` while the entity has not been persisted yet.
    ///
    /// Identifiers are assigned by the store on first save and never change afterwards.
    fn id(&self) -> Option<Self::Id>;
}

//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Every record the ledger owns is addressed by its identifier; listing,
/// selection and in-place updates all key on it.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

//! Common ID Types
//!
//! Type-safe ID wrappers for domain entities.

use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type RideId = Id<markers::Ride>;
/// ```
pub struct Id<T> {
    value: uuid::Uuid,
    _marker: PhantomData<T>,
}

// Manual impls keep `T` free of bounds; derives would require the marker
// type itself to be Clone/Eq/Hash, which it never needs to be.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> Id<T> {
    /// Create a new random ID (UUID v4)
    pub fn new() -> Self {
        Self {
            value: Uuid::new_v4(),
            _marker: PhantomData,
        }
    }

    /// Create from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            value: uuid,
            _marker: PhantomData,
        }
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.value
    }

    /// Convert to UUID
    pub fn into_uuid(self) -> Uuid {
        self.value
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<Uuid> for Id<T> {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl<T> From<Id<T>> for Uuid {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for User IDs
    pub struct User;

    /// Marker for Ride IDs
    pub struct Ride;

    /// Marker for Booking IDs
    pub struct Booking;

    /// Marker for Message IDs
    pub struct Message;
}

/// Type aliases for common IDs
pub type UserId = Id<markers::User>;
pub type RideId = Id<markers::Ride>;
pub type BookingId = Id<markers::Booking>;
pub type MessageId = Id<markers::Message>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_type_safety() {
        let ride_id: RideId = Id::new();
        let booking_id: BookingId = Id::new();

        // These are different types, cannot be mixed
        let _r: Uuid = ride_id.into_uuid();
        let _b: Uuid = booking_id.into_uuid();
    }

    #[test]
    fn test_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id: UserId = Id::from_uuid(uuid);
        assert_eq!(id.as_uuid(), &uuid);
    }

    #[test]
    fn test_id_copy_eq_hash_without_marker_bounds() {
        use std::collections::HashSet;

        let id: UserId = Id::new();
        let copy = id;
        assert_eq!(id, copy);
        assert_ne!(id, UserId::new());

        let mut seen = HashSet::new();
        assert!(seen.insert(id));
        assert!(!seen.insert(copy));
    }

    #[test]
    fn test_id_is_v4() {
        let id: MessageId = Id::new();
        assert_eq!(id.as_uuid().get_version_num(), 4);
    }
}

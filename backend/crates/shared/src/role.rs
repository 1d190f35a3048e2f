//! User Role
//!
//! Whether an account offers rides (driver) or books them (passenger).
//! Lives in the kernel because every HTTP crate gates routes on it.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum UserRole {
    #[default]
    Passenger = 0,
    Driver = 1,
}

impl UserRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            UserRole::Passenger => "passenger",
            UserRole::Driver => "driver",
        }
    }

    #[inline]
    pub const fn is_driver(&self) -> bool {
        matches!(self, UserRole::Driver)
    }

    #[inline]
    pub const fn is_passenger(&self) -> bool {
        matches!(self, UserRole::Passenger)
    }

    /// Decode from the smallint stored in the database.
    ///
    /// Unknown codes fall back to Passenger; the column is written only
    /// through this enum so this path indicates data corruption.
    #[inline]
    pub fn from_id(id: i16) -> Self {
        match id {
            0 => UserRole::Passenger,
            1 => UserRole::Driver,
            _ => {
                tracing::error!("Invalid UserRole id: {}", id);
                UserRole::Passenger
            }
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "passenger" => Some(UserRole::Passenger),
            "driver" => Some(UserRole::Driver),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ids_round_trip() {
        assert_eq!(UserRole::from_id(0), UserRole::Passenger);
        assert_eq!(UserRole::from_id(1), UserRole::Driver);
        assert_eq!(UserRole::Passenger.id(), 0);
        assert_eq!(UserRole::Driver.id(), 1);
    }

    #[test]
    fn test_role_from_code() {
        assert_eq!(UserRole::from_code("passenger"), Some(UserRole::Passenger));
        assert_eq!(UserRole::from_code("driver"), Some(UserRole::Driver));
        assert_eq!(UserRole::from_code("admin"), None);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(UserRole::Passenger.to_string(), "passenger");
        assert_eq!(UserRole::Driver.to_string(), "driver");
    }

    #[test]
    fn test_default_is_passenger() {
        assert_eq!(UserRole::default(), UserRole::Passenger);
    }
}

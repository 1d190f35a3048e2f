//! Ride Value Objects

use serde::{Deserialize, Serialize};

/// Seats offered on a ride (1..=8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct SeatCount(i32);

pub const MAX_SEATS: i32 = 8;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SeatCountError {
    #[error("A ride must offer at least one seat")]
    TooFew,
    #[error("A ride cannot offer more than {MAX_SEATS} seats")]
    TooMany,
}

impl SeatCount {
    pub fn new(value: i32) -> Result<Self, SeatCountError> {
        if value < 1 {
            return Err(SeatCountError::TooFew);
        }
        if value > MAX_SEATS {
            return Err(SeatCountError::TooMany);
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for SeatCount {
    type Error = SeatCountError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SeatCount> for i32 {
    fn from(value: SeatCount) -> Self {
        value.0
    }
}

/// Price per seat (> 0 and finite)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct PricePerSeat(f64);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PriceError {
    #[error("Price must be greater than zero")]
    NotPositive,
    #[error("Price must be a finite number")]
    NotFinite,
}

impl PricePerSeat {
    pub fn new(value: f64) -> Result<Self, PriceError> {
        if !value.is_finite() {
            return Err(PriceError::NotFinite);
        }
        if value <= 0.0 {
            return Err(PriceError::NotPositive);
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for PricePerSeat {
    type Error = PriceError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PricePerSeat> for f64 {
    fn from(value: PricePerSeat) -> Self {
        value.0
    }
}

/// Vehicle registration plate, stored uppercased
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VehiclePlate(String);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum VehiclePlateError {
    #[error("Vehicle plate is too short")]
    TooShort,
    #[error("Vehicle plate is too long (max 16 characters)")]
    TooLong,
}

impl VehiclePlate {
    pub fn new(input: &str) -> Result<Self, VehiclePlateError> {
        let normalized = input.trim().to_uppercase();
        let len = normalized.chars().count();
        if len < 2 {
            return Err(VehiclePlateError::TooShort);
        }
        if len > 16 {
            return Err(VehiclePlateError::TooLong);
        }
        Ok(Self(normalized))
    }

    /// Construct from a stored, already-normalized value
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for VehiclePlate {
    type Error = VehiclePlateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<VehiclePlate> for String {
    fn from(value: VehiclePlate) -> Self {
        value.0
    }
}

impl std::fmt::Display for VehiclePlate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_count_bounds() {
        assert!(SeatCount::new(0).is_err());
        assert!(SeatCount::new(-3).is_err());
        assert!(SeatCount::new(9).is_err());
        assert_eq!(SeatCount::new(1).unwrap().value(), 1);
        assert_eq!(SeatCount::new(8).unwrap().value(), 8);
    }

    #[test]
    fn test_price_must_be_positive_and_finite() {
        assert_eq!(PricePerSeat::new(0.0), Err(PriceError::NotPositive));
        assert_eq!(PricePerSeat::new(-1.5), Err(PriceError::NotPositive));
        assert_eq!(PricePerSeat::new(f64::NAN), Err(PriceError::NotFinite));
        assert_eq!(PricePerSeat::new(f64::INFINITY), Err(PriceError::NotFinite));
        assert_eq!(PricePerSeat::new(12.5).unwrap().value(), 12.5);
    }

    #[test]
    fn test_plate_normalization() {
        let plate = VehiclePlate::new("  ab-123c ").unwrap();
        assert_eq!(plate.as_str(), "AB-123C");
    }

    #[test]
    fn test_plate_length() {
        assert_eq!(VehiclePlate::new("A"), Err(VehiclePlateError::TooShort));
        assert_eq!(
            VehiclePlate::new("ABCDEFGHIJKLMNOPQ"),
            Err(VehiclePlateError::TooLong)
        );
        assert!(VehiclePlate::new("AB").is_ok());
    }
}

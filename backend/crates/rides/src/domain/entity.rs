//! Ride and Booking Entities

use chrono::{DateTime, Utc};

use kernel::id::{BookingId, RideId, UserId};

use crate::domain::value_object::{PricePerSeat, SeatCount, VehiclePlate};

/// A ride offered by a driver
#[derive(Debug, Clone)]
pub struct Ride {
    pub ride_id: RideId,
    pub driver_id: UserId,
    pub vehicle_type: String,
    pub vehicle_model: Option<String>,
    pub vehicle_plate: VehiclePlate,
    /// Seats still open; decremented per booking, floored at zero by the
    /// storage layer
    pub available_seats: i32,
    pub departure_location: String,
    pub destination: String,
    pub departure_time: DateTime<Utc>,
    pub price_per_seat: f64,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

impl Ride {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        driver_id: UserId,
        vehicle_type: String,
        vehicle_model: Option<String>,
        vehicle_plate: VehiclePlate,
        seats: SeatCount,
        departure_location: String,
        destination: String,
        departure_time: DateTime<Utc>,
        price_per_seat: PricePerSeat,
    ) -> Self {
        Self {
            ride_id: RideId::new(),
            driver_id,
            vehicle_type,
            vehicle_model,
            vehicle_plate,
            available_seats: seats.value(),
            departure_location,
            destination,
            departure_time,
            price_per_seat: price_per_seat.value(),
            is_available: true,
            created_at: Utc::now(),
        }
    }

    pub fn has_seats(&self) -> bool {
        self.available_seats > 0
    }

    /// A user can book iff they are not the driver, seats remain and the
    /// offer is still open
    pub fn can_be_booked_by(&self, user_id: &UserId) -> bool {
        self.driver_id != *user_id && self.is_available && self.has_seats()
    }

    pub fn take_seat(&mut self) {
        if self.available_seats > 0 {
            self.available_seats -= 1;
        }
    }
}

/// Booking lifecycle states, stored as smallint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i16)]
pub enum BookingStatus {
    #[default]
    Pending = 0,
    Confirmed = 1,
    Canceled = 2,
    Completed = 3,
}

impl BookingStatus {
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    pub fn from_id(id: i16) -> Self {
        match id {
            1 => BookingStatus::Confirmed,
            2 => BookingStatus::Canceled,
            3 => BookingStatus::Completed,
            _ => BookingStatus::Pending,
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Canceled => "canceled",
            BookingStatus::Completed => "completed",
        }
    }
}

/// A passenger's claim on one seat of a ride
#[derive(Debug, Clone)]
pub struct Booking {
    pub booking_id: BookingId,
    pub ride_id: RideId,
    pub passenger_id: UserId,
    pub seats_booked: i32,
    pub total_price: f64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// One seat at the listed price
    pub fn new(ride_id: RideId, passenger_id: UserId, price_per_seat: f64) -> Self {
        Self {
            booking_id: BookingId::new(),
            ride_id,
            passenger_id,
            seats_booked: 1,
            total_price: price_per_seat,
            status: BookingStatus::default(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ride(seats: i32) -> Ride {
        let mut r = Ride::new(
            UserId::new(),
            "Sedan".to_string(),
            Some("Corolla".to_string()),
            VehiclePlate::new("AB-123").unwrap(),
            SeatCount::new(3).unwrap(),
            "Downtown".to_string(),
            "Airport".to_string(),
            Utc::now(),
            PricePerSeat::new(10.0).unwrap(),
        );
        r.available_seats = seats;
        r
    }

    #[test]
    fn test_driver_cannot_book_own_ride() {
        let r = ride(3);
        let driver = r.driver_id.clone();
        assert!(!r.can_be_booked_by(&driver));
        assert!(r.can_be_booked_by(&UserId::new()));
    }

    #[test]
    fn test_full_ride_cannot_be_booked() {
        let r = ride(0);
        assert!(!r.can_be_booked_by(&UserId::new()));
    }

    #[test]
    fn test_unavailable_ride_cannot_be_booked() {
        let mut r = ride(3);
        r.is_available = false;
        assert!(!r.can_be_booked_by(&UserId::new()));
    }

    #[test]
    fn test_take_seat_floors_at_zero() {
        let mut r = ride(1);
        r.take_seat();
        assert_eq!(r.available_seats, 0);
        r.take_seat();
        assert_eq!(r.available_seats, 0);
    }

    #[test]
    fn test_booking_defaults() {
        let b = Booking::new(RideId::new(), UserId::new(), 12.5);
        assert_eq!(b.seats_booked, 1);
        assert_eq!(b.total_price, 12.5);
        assert_eq!(b.status, BookingStatus::Pending);
    }

    #[test]
    fn test_booking_status_round_trip() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Canceled,
            BookingStatus::Completed,
        ] {
            assert_eq!(BookingStatus::from_id(status.id()), status);
        }
        assert_eq!(BookingStatus::from_id(99), BookingStatus::Pending);
    }
}

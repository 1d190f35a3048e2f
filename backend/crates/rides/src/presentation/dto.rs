//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::Ride;
use crate::domain::repository::{BookedRide, DriverSummary, PassengerSummary};

/// New ride offer request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRideRequest {
    pub vehicle_type: String,
    pub vehicle_model: Option<String>,
    pub vehicle_plate: String,
    pub available_seats: i32,
    pub departure_location: String,
    pub destination: String,
    pub departure_time: DateTime<Utc>,
    pub price_per_seat: f64,
}

/// Destination filter for ride search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub destination: Option<String>,
}

/// A co-passenger on a booked ride
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerResponse {
    pub name: String,
    pub departure_location: String,
    pub profile_image: Option<String>,
}

impl PassengerResponse {
    fn from_summary(p: &PassengerSummary) -> Self {
        Self {
            name: p.name.clone(),
            departure_location: p.departure_location.clone(),
            profile_image: p.profile_image.as_ref().map(|f| format!("/media/{f}")),
        }
    }
}

/// Ride with driver details
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RideResponse {
    pub ride_id: String,
    pub driver_name: String,
    pub driver_profile_image: Option<String>,
    pub vehicle_type: String,
    pub vehicle_model: Option<String>,
    pub vehicle_plate: String,
    pub available_seats: i32,
    pub departure_location: String,
    pub destination: String,
    pub departure_time: DateTime<Utc>,
    pub price_per_seat: f64,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passengers: Option<Vec<PassengerResponse>>,
}

impl RideResponse {
    pub fn from_parts(ride: &Ride, driver: &DriverSummary) -> Self {
        Self {
            ride_id: ride.ride_id.to_string(),
            driver_name: driver.name.clone(),
            driver_profile_image: driver
                .profile_image
                .as_ref()
                .map(|f| format!("/media/{f}")),
            vehicle_type: ride.vehicle_type.clone(),
            vehicle_model: ride.vehicle_model.clone(),
            vehicle_plate: ride.vehicle_plate.as_str().to_string(),
            available_seats: ride.available_seats,
            departure_location: ride.departure_location.clone(),
            destination: ride.destination.clone(),
            departure_time: ride.departure_time,
            price_per_seat: ride.price_per_seat,
            is_available: ride.is_available,
            created_at: ride.created_at,
            passengers: None,
        }
    }

    pub fn from_booked(booked: &BookedRide) -> Self {
        let mut response = Self::from_parts(&booked.ride, &booked.driver);
        response.passengers = Some(
            booked
                .passengers
                .iter()
                .map(PassengerResponse::from_summary)
                .collect(),
        );
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{PricePerSeat, SeatCount, VehiclePlate};
    use kernel::id::UserId;

    fn sample_ride() -> Ride {
        Ride::new(
            UserId::new(),
            "SUV".to_string(),
            None,
            VehiclePlate::new("XY-99").unwrap(),
            SeatCount::new(4).unwrap(),
            "Downtown".to_string(),
            "Airport".to_string(),
            Utc::now(),
            PricePerSeat::new(20.0).unwrap(),
        )
    }

    #[test]
    fn test_ride_response_media_url() {
        let ride = sample_ride();
        let driver = DriverSummary {
            name: "Ada Chen".to_string(),
            profile_image: Some("abc123.png".to_string()),
        };
        let response = RideResponse::from_parts(&ride, &driver);
        assert_eq!(
            response.driver_profile_image.as_deref(),
            Some("/media/abc123.png")
        );
        assert!(response.passengers.is_none());
    }

    #[test]
    fn test_search_query_optional_destination() {
        let q: SearchQuery = serde_json::from_str("{}").unwrap();
        assert!(q.destination.is_none());
    }
}

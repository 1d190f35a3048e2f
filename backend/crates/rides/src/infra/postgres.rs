//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use kernel::id::{RideId, UserId};

use crate::domain::entity::{Booking, Ride};
use crate::domain::repository::{
    BookedRide, DriverSummary, PassengerSummary, RideRepository,
};
use crate::domain::value_object::VehiclePlate;
use crate::error::{RideError, RideResult};

/// PostgreSQL-backed ride repository
#[derive(Clone)]
pub struct PgRideRepository {
    pool: PgPool,
}

impl PgRideRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const RIDE_WITH_DRIVER_COLUMNS: &str = r#"
    r.ride_id,
    r.driver_id,
    r.vehicle_type,
    r.vehicle_model,
    r.vehicle_plate,
    r.available_seats,
    r.departure_location,
    r.destination,
    r.departure_time,
    r.price_per_seat,
    r.is_available,
    r.created_at,
    p.first_name || ' ' || p.last_name AS driver_name,
    p.profile_image AS driver_profile_image
"#;

impl RideRepository for PgRideRepository {
    async fn create_ride(&self, ride: &Ride) -> RideResult<()> {
        sqlx::query(
            r#"
            INSERT INTO rides (
                ride_id,
                driver_id,
                vehicle_type,
                vehicle_model,
                vehicle_plate,
                available_seats,
                departure_location,
                destination,
                departure_time,
                price_per_seat,
                is_available,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(ride.ride_id.as_uuid())
        .bind(ride.driver_id.as_uuid())
        .bind(&ride.vehicle_type)
        .bind(&ride.vehicle_model)
        .bind(ride.vehicle_plate.as_str())
        .bind(ride.available_seats)
        .bind(&ride.departure_location)
        .bind(&ride.destination)
        .bind(ride.departure_time)
        .bind(ride.price_per_seat)
        .bind(ride.is_available)
        .bind(ride.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                RideError::PlateTaken
            }
            _ => RideError::Database(e),
        })?;

        Ok(())
    }

    async fn find_ride(&self, ride_id: &RideId) -> RideResult<Option<Ride>> {
        let row = sqlx::query_as::<_, RideRow>(
            r#"
            SELECT
                ride_id,
                driver_id,
                vehicle_type,
                vehicle_model,
                vehicle_plate,
                available_seats,
                departure_location,
                destination,
                departure_time,
                price_per_seat,
                is_available,
                created_at
            FROM rides
            WHERE ride_id = $1
            "#,
        )
        .bind(ride_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_ride()))
    }

    async fn find_ride_with_driver(
        &self,
        ride_id: &RideId,
    ) -> RideResult<Option<(Ride, DriverSummary)>> {
        let query = format!(
            r#"
            SELECT {RIDE_WITH_DRIVER_COLUMNS}
            FROM rides r
            JOIN user_profiles p ON p.user_id = r.driver_id
            WHERE r.ride_id = $1
            "#
        );

        let row = sqlx::query_as::<_, RideWithDriverRow>(&query)
            .bind(ride_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.into_parts()))
    }

    async fn search_available(
        &self,
        destination: &str,
    ) -> RideResult<Vec<(Ride, DriverSummary)>> {
        let query = format!(
            r#"
            SELECT {RIDE_WITH_DRIVER_COLUMNS}
            FROM rides r
            JOIN user_profiles p ON p.user_id = r.driver_id
            WHERE r.destination ILIKE '%' || $1 || '%'
              AND r.available_seats > 0
              AND r.is_available
            ORDER BY r.departure_time
            "#
        );

        let rows = sqlx::query_as::<_, RideWithDriverRow>(&query)
            .bind(destination)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.into_parts()).collect())
    }

    async fn plate_exists(&self, plate: &VehiclePlate) -> RideResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM rides WHERE vehicle_plate = $1)")
                .bind(plate.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn booking_exists(&self, ride_id: &RideId, passenger_id: &UserId) -> RideResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM bookings WHERE ride_id = $1 AND passenger_id = $2)",
        )
        .bind(ride_id.as_uuid())
        .bind(passenger_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn book_seat(&self, booking: &Booking) -> RideResult<()> {
        let mut tx = self.pool.begin().await?;

        // Guard keeps the counter non-negative under concurrent bookings
        let claimed = sqlx::query(
            r#"
            UPDATE rides
            SET available_seats = available_seats - 1
            WHERE ride_id = $1 AND available_seats > 0
            "#,
        )
        .bind(booking.ride_id.as_uuid())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if claimed == 0 {
            return Err(RideError::NoSeatsLeft);
        }

        sqlx::query(
            r#"
            INSERT INTO bookings (
                booking_id,
                ride_id,
                passenger_id,
                seats_booked,
                total_price,
                status,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(booking.booking_id.as_uuid())
        .bind(booking.ride_id.as_uuid())
        .bind(booking.passenger_id.as_uuid())
        .bind(booking.seats_booked)
        .bind(booking.total_price)
        .bind(booking.status.id())
        .bind(booking.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                RideError::AlreadyBooked
            }
            _ => RideError::Database(e),
        })?;

        tx.commit().await?;
        Ok(())
    }

    async fn booked_rides(&self, passenger_id: &UserId) -> RideResult<Vec<BookedRide>> {
        let query = format!(
            r#"
            SELECT {RIDE_WITH_DRIVER_COLUMNS}
            FROM rides r
            JOIN bookings b ON b.ride_id = r.ride_id
            JOIN user_profiles p ON p.user_id = r.driver_id
            WHERE b.passenger_id = $1
            ORDER BY r.departure_time
            "#
        );

        let ride_rows = sqlx::query_as::<_, RideWithDriverRow>(&query)
            .bind(passenger_id.as_uuid())
            .fetch_all(&self.pool)
            .await?;

        if ride_rows.is_empty() {
            return Ok(Vec::new());
        }

        let ride_ids: Vec<Uuid> = ride_rows.iter().map(|r| r.ride_id).collect();

        let passenger_rows = sqlx::query_as::<_, PassengerRow>(
            r#"
            SELECT
                b.ride_id,
                p.first_name || ' ' || p.last_name AS name,
                r.departure_location,
                p.profile_image
            FROM bookings b
            JOIN user_profiles p ON p.user_id = b.passenger_id
            JOIN rides r ON r.ride_id = b.ride_id
            WHERE b.ride_id = ANY($1)
            "#,
        )
        .bind(&ride_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut result: Vec<BookedRide> = ride_rows
            .into_iter()
            .map(|row| {
                let (ride, driver) = row.into_parts();
                BookedRide {
                    ride,
                    driver,
                    passengers: Vec::new(),
                }
            })
            .collect();

        for p in passenger_rows {
            if let Some(entry) = result
                .iter_mut()
                .find(|b| *b.ride.ride_id.as_uuid() == p.ride_id)
            {
                entry.passengers.push(PassengerSummary {
                    name: p.name,
                    departure_location: p.departure_location,
                    profile_image: p.profile_image,
                });
            }
        }

        Ok(result)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct RideRow {
    ride_id: Uuid,
    driver_id: Uuid,
    vehicle_type: String,
    vehicle_model: Option<String>,
    vehicle_plate: String,
    available_seats: i32,
    departure_location: String,
    destination: String,
    departure_time: DateTime<Utc>,
    price_per_seat: f64,
    is_available: bool,
    created_at: DateTime<Utc>,
}

impl RideRow {
    fn into_ride(self) -> Ride {
        Ride {
            ride_id: RideId::from_uuid(self.ride_id),
            driver_id: UserId::from_uuid(self.driver_id),
            vehicle_type: self.vehicle_type,
            vehicle_model: self.vehicle_model,
            vehicle_plate: VehiclePlate::from_db(self.vehicle_plate),
            available_seats: self.available_seats,
            departure_location: self.departure_location,
            destination: self.destination,
            departure_time: self.departure_time,
            price_per_seat: self.price_per_seat,
            is_available: self.is_available,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RideWithDriverRow {
    ride_id: Uuid,
    driver_id: Uuid,
    vehicle_type: String,
    vehicle_model: Option<String>,
    vehicle_plate: String,
    available_seats: i32,
    departure_location: String,
    destination: String,
    departure_time: DateTime<Utc>,
    price_per_seat: f64,
    is_available: bool,
    created_at: DateTime<Utc>,
    driver_name: String,
    driver_profile_image: Option<String>,
}

impl RideWithDriverRow {
    fn into_parts(self) -> (Ride, DriverSummary) {
        let driver = DriverSummary {
            name: self.driver_name,
            profile_image: self.driver_profile_image,
        };
        let ride = Ride {
            ride_id: RideId::from_uuid(self.ride_id),
            driver_id: UserId::from_uuid(self.driver_id),
            vehicle_type: self.vehicle_type,
            vehicle_model: self.vehicle_model,
            vehicle_plate: VehiclePlate::from_db(self.vehicle_plate),
            available_seats: self.available_seats,
            departure_location: self.departure_location,
            destination: self.destination,
            departure_time: self.departure_time,
            price_per_seat: self.price_per_seat,
            is_available: self.is_available,
            created_at: self.created_at,
        };
        (ride, driver)
    }
}

#[derive(sqlx::FromRow)]
struct PassengerRow {
    ride_id: Uuid,
    name: String,
    departure_location: String,
    profile_image: Option<String>,
}

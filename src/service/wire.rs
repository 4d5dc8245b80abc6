//! JSON bodies and records exchanged with the booking service

use crate::domain::{Seat, SeatId, SeatNumber};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/users/register`
#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `POST /api/users/login`
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `POST /api/bookings`
#[derive(Debug, Serialize)]
pub(crate) struct BookingRequest {
    pub flight_id: i64,
    pub seat_id: i64,
}

/// One row of the listing returned by `GET /api/seats/{flight}/{date}`
///
/// `seat_status` is `true` while the seat is open. The service reports more
/// columns than these; serde drops the rest.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SeatRecord {
    pub seat_id: i64,
    pub seat_number: String,
    pub seat_status: bool,
}

impl From<SeatRecord> for Seat {
    fn from(record: SeatRecord) -> Self {
        Seat::new(
            SeatId::from(record.seat_id),
            SeatNumber::from(record.seat_number),
            record.seat_status,
        )
    }
}

//! Boundary with the external booking service under test
//!
//! The service is an opaque HTTP API; everything the simulator knows about it
//! is the [`BookingService`] trait. The production implementation is
//! [`HttpBookingService`]; tests substitute deterministic in-process
//! implementations to script contention scenarios.

pub mod client;
pub(crate) mod wire;

use crate::domain::{
    AuthToken, EmailAddress, FlightId, Identity, Password, Seat, SeatId, TravelDate,
};
use async_trait::async_trait;
use hyper::StatusCode;
use nutype::nutype;
#[allow(unused_imports)] // These are used by nutype derive macros
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use client::HttpBookingService;

/// Name of the response header that carries a fresh credential, and of the
/// request header that presents it back to the service
pub const AUTH_TOKEN_HEADER: &str = "auth-token";

/// Base URL of the booking service
#[nutype(
    sanitize(trim),
    validate(predicate = |url| url.starts_with("http://") || url.starts_with("https://")),
    derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TryFrom, AsRef, Display)
)]
pub struct ServiceBaseUrl(String);

/// Operations the simulator performs against the booking service
///
/// `seat_snapshot` returns the listing exactly as the service reports it;
/// availability filtering and shuffling live in the domain layer so every
/// implementation shares them.
#[async_trait]
pub trait BookingService: Send + Sync {
    /// Register a fresh identity. Success means the service answered with a
    /// success status and a usable `auth-token` header.
    async fn register(&self, identity: &Identity) -> Result<AuthToken, ServiceError>;

    /// Exchange (email, password) for a credential.
    async fn login(
        &self,
        email: &EmailAddress,
        password: &Password,
    ) -> Result<AuthToken, ServiceError>;

    /// Query the current seat listing for the targeted flight and date.
    ///
    /// `Ok` with an empty (or fully unavailable) listing means the pool is
    /// genuinely drained; `Err` means the query itself failed and the caller
    /// may retry. The two must never be conflated.
    async fn seat_snapshot(
        &self,
        token: &AuthToken,
        flight: FlightId,
        date: TravelDate,
    ) -> Result<Vec<Seat>, ServiceError>;

    /// Issue one seat-reservation request. `Ok(true)` iff the service
    /// answered with a success status; a rejection (typically 409 once the
    /// seat is taken) is `Ok(false)`, not an error.
    async fn book_seat(
        &self,
        token: &AuthToken,
        flight: FlightId,
        seat: SeatId,
    ) -> Result<bool, ServiceError>;
}

/// Errors crossing the service boundary
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Invalid request URI: {0}")]
    InvalidUri(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Request timeout after {0:?}")]
    RequestTimeout(Duration),

    #[error("Unexpected status: {0}")]
    UnexpectedStatus(StatusCode),

    #[error("Response carried no auth-token header")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    HttpError(#[from] http::Error),

    #[error("Hyper error: {0}")]
    HyperError(#[from] hyper::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

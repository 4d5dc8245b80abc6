//! Newtypes for the simulator's domain concepts
//!
//! This module provides newtypes for common domain concepts to avoid
//! primitive obsession and ensure validation at boundaries.

use chrono::{DateTime, SecondsFormat, Utc};
use nutype::nutype;
#[allow(unused_imports)] // These are used by nutype derive macros
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ========== Identity Types ==========

/// Login name of a synthetic identity
#[nutype(
    sanitize(trim),
    validate(not_empty, regex = r"^[a-z][a-z0-9._]*$"),
    derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, AsRef, Display)
)]
pub struct Username(String);

/// Email address of a synthetic identity (validated)
#[nutype(
    validate(predicate = |email| email.contains('@') && email.len() > 3),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Hash,
        Serialize,
        Deserialize,
        AsRef,
        Display
    )
)]
pub struct EmailAddress(String);

/// Password of a synthetic identity
///
/// The booking service hashes these server-side; the simulator only needs
/// them to look credentials back up by (email, password).
#[nutype(
    validate(len_char_min = 8),
    derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, AsRef)
)]
pub struct Password(String);

/// Opaque credential returned in the `auth-token` response header after a
/// successful registration or login
///
/// Deliberately has no `Display` so tokens never end up in log lines.
#[nutype(
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, AsRef)
)]
pub struct AuthToken(String);

// ========== Booking Target Types ==========

/// Identifier of the flight whose seat pool the simulation targets
#[nutype(derive(
    Clone, Copy, Debug, Display, PartialEq, Eq, Hash, Serialize, Deserialize, From, AsRef
))]
pub struct FlightId(i64);

/// Identifier of a seat as reported by the booking service
#[nutype(derive(
    Clone,
    Copy,
    Debug,
    Display,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    From,
    AsRef
))]
pub struct SeatId(i64);

/// Human-readable seat label (e.g. "12C")
#[nutype(derive(
    Clone, Debug, Display, PartialEq, Eq, Hash, Serialize, Deserialize, From, AsRef
))]
pub struct SeatNumber(String);

/// Travel date of the targeted flight, carried in the seat-listing URL
#[nutype(derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, From, AsRef))]
pub struct TravelDate(DateTime<Utc>);

impl TravelDate {
    /// Parse an RFC 3339 timestamp such as `2024-05-26T06:00:00.000Z`.
    pub fn parse(value: &str) -> Result<Self, chrono::ParseError> {
        let parsed = DateTime::parse_from_rfc3339(value)?;
        Ok(Self::from(parsed.with_timezone(&Utc)))
    }

    /// Render the date the way the seat-listing endpoint expects it in the
    /// request path (millisecond precision, `Z` suffix).
    pub fn as_path_segment(&self) -> String {
        self.into_inner()
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

// ========== Simulation Sizing Types ==========

/// Number of synthetic identities the provisioner creates
#[nutype(
    validate(greater = 0),
    derive(Clone, Copy, Debug, Display, Serialize, Deserialize, TryFrom, AsRef)
)]
pub struct IdentityCount(u32);

/// Concurrent actors spawned per provisioned identity
#[nutype(
    validate(greater = 0),
    derive(Clone, Copy, Debug, Display, Serialize, Deserialize, TryFrom, AsRef)
)]
pub struct ReplicationFactor(u32);

/// Maximum seats a single actor may successfully claim
#[nutype(
    validate(greater = 0),
    derive(Clone, Copy, Debug, Display, PartialEq, Eq, Serialize, Deserialize, TryFrom, AsRef)
)]
pub struct SeatQuota(u32);

/// Maximum inventory queries a single actor may issue before giving up
#[nutype(
    validate(greater = 0),
    derive(Clone, Copy, Debug, Display, PartialEq, Eq, Serialize, Deserialize, TryFrom, AsRef)
)]
pub struct FetchCycleBudget(u32);

// ========== Run Bookkeeping Types ==========

/// Identifier of one concurrent actor: the identity's email plus a replica
/// ordinal, since each identity is simulated several times concurrently
#[nutype(derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    From,
    AsRef
))]
pub struct ActorId(String);

impl ActorId {
    pub fn for_replica(email: &EmailAddress, replica: u32) -> Self {
        Self::from(format!("{}#{replica}", email.as_ref()))
    }
}

/// Identifier correlating all events of one simulation run
#[nutype(derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash, Serialize, Deserialize, From))]
pub struct RunId(Uuid);

impl RunId {
    pub fn generate() -> Self {
        Self::from(Uuid::now_v7())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::generate()
    }
}

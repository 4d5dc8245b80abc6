//! The contention experiment: concurrent actors racing for the same seats
//!
//! The driver fans actors out over the provisioned identities, each actor
//! runs the fetch/book loop against the shared service, and everything they
//! observe flows back as events into a [`ContentionReport`].

pub mod actor;
pub mod driver;
pub mod report;

use crate::config::Settings;
use crate::domain::{FetchCycleBudget, FlightId, ReplicationFactor, SeatQuota, TravelDate};
use crate::error::{Error, Result};
use std::time::Duration;

pub use actor::{ActorSummary, BookingActor};
pub use driver::ContentionDriver;
pub use report::ContentionReport;

/// Immutable description of one simulation run, shared by every actor
#[derive(Debug, Clone)]
pub struct SimulationPlan {
    pub flight: FlightId,
    pub date: TravelDate,
    pub quota: SeatQuota,
    pub replication: ReplicationFactor,
    pub fetch_budget: FetchCycleBudget,
    pub fetch_backoff: Duration,
}

impl SimulationPlan {
    /// Build the plan from settings, rejecting values the domain types
    /// cannot carry (zero counts, malformed dates).
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let date = TravelDate::parse(&settings.target.travel_date)
            .map_err(|e| Error::invalid_setting("target.travel_date", e))?;
        let quota = SeatQuota::try_new(settings.simulation.seat_quota)
            .map_err(|e| Error::invalid_setting("simulation.seat_quota", e))?;
        let replication = ReplicationFactor::try_new(settings.simulation.actors_per_identity)
            .map_err(|e| Error::invalid_setting("simulation.actors_per_identity", e))?;
        let fetch_budget = FetchCycleBudget::try_new(settings.simulation.fetch_cycle_budget)
            .map_err(|e| Error::invalid_setting("simulation.fetch_cycle_budget", e))?;

        Ok(Self {
            flight: FlightId::from(settings.target.flight_id),
            date,
            quota,
            replication,
            fetch_budget,
            fetch_backoff: settings.simulation.fetch_backoff(),
        })
    }
}

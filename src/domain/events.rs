//! Structured events emitted by simulation actors
//!
//! Every observable outcome of the contention loop is recorded as a
//! [`SimEvent`] on an in-memory channel instead of being eyeballed from
//! console output, so the report (and the test suite) can aggregate them.

use crate::domain::types::{ActorId, SeatId, SeatNumber};
use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Event captured during a simulation run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimEvent {
    pub actor: ActorId,
    pub at: DateTime<Utc>,
    pub kind: SimEventKind,
}

impl SimEvent {
    pub fn now(actor: ActorId, kind: SimEventKind) -> Self {
        Self {
            actor,
            at: Utc::now(),
            kind,
        }
    }
}

/// Kinds of simulation events
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum SimEventKind {
    /// The actor's (email, password) pair had no match in the credential
    /// store; the actor aborts before issuing any request.
    CredentialMissing,
    /// An inventory query succeeded but listed zero available seats.
    InventoryDrained,
    /// An inventory query itself failed; retried after a backoff, within
    /// the actor's fetch-cycle budget.
    InventoryUnavailable { detail: String },
    /// One booking attempt completed with the given outcome.
    AttemptSettled {
        seat_id: SeatId,
        seat_number: SeatNumber,
        outcome: AttemptOutcome,
    },
    /// The actor reached a terminal state.
    ActorSettled {
        terminal: ActorTerminal,
        claimed: u32,
    },
}

/// Outcome of a single booking attempt
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptOutcome {
    /// The service answered with a success status: the seat is ours.
    #[display("claimed")]
    Claimed,
    /// Any other answer, including transport failures: counted as a loss.
    #[display("rejected")]
    Rejected,
}

/// Terminal state of one actor's contention loop
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActorTerminal {
    /// Accumulated claims hit the configured seat quota.
    #[display("quota reached")]
    QuotaReached,
    /// A full pass over the shuffled seat list produced zero claims.
    #[display("no progress")]
    NoProgress,
    /// The service reported no available seats.
    #[display("pool drained")]
    PoolDrained,
    /// The fetch-cycle budget ran out before the quota was met.
    #[display("budget spent")]
    BudgetSpent,
    /// The credential lookup failed; no request was ever issued.
    #[display("credential missing")]
    CredentialMissing,
}

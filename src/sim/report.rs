//! Aggregation of simulation events into a verdict
//!
//! The report answers the two questions a run exists to ask: did any seat
//! get granted twice, and how were the claims distributed over the actors.

use crate::domain::{
    ActorId, ActorTerminal, AttemptOutcome, RunId, SeatId, SeatQuota, SimEvent, SimEventKind,
};
use crate::sim::actor::ActorSummary;
use std::collections::BTreeMap;
use tracing::{error, info};

/// Aggregated outcome of one simulation run
#[derive(Debug, Clone)]
pub struct ContentionReport {
    run_id: RunId,
    events: Vec<SimEvent>,
    summaries: Vec<ActorSummary>,
}

impl ContentionReport {
    pub fn new(run_id: RunId, events: Vec<SimEvent>, summaries: Vec<ActorSummary>) -> Self {
        Self {
            run_id,
            events,
            summaries,
        }
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn summaries(&self) -> &[ActorSummary] {
        &self.summaries
    }

    /// Successful claims across all actors.
    pub fn total_claims(&self) -> usize {
        self.attempt_count(AttemptOutcome::Claimed)
    }

    /// Attempts the service turned down.
    pub fn total_rejections(&self) -> usize {
        self.attempt_count(AttemptOutcome::Rejected)
    }

    fn attempt_count(&self, wanted: AttemptOutcome) -> usize {
        self.events
            .iter()
            .filter(|event| {
                matches!(
                    event.kind,
                    SimEventKind::AttemptSettled { outcome, .. } if outcome == wanted
                )
            })
            .count()
    }

    /// Seats each actor claimed, including actors that claimed none.
    pub fn claims_by_actor(&self) -> BTreeMap<ActorId, u32> {
        self.summaries
            .iter()
            .map(|summary| (summary.actor.clone(), summary.claimed))
            .collect()
    }

    /// Which actors were granted each seat.
    pub fn claimants_by_seat(&self) -> BTreeMap<SeatId, Vec<ActorId>> {
        let mut claimants: BTreeMap<SeatId, Vec<ActorId>> = BTreeMap::new();
        for event in &self.events {
            if let SimEventKind::AttemptSettled {
                seat_id,
                outcome: AttemptOutcome::Claimed,
                ..
            } = &event.kind
            {
                claimants
                    .entry(*seat_id)
                    .or_default()
                    .push(event.actor.clone());
            }
        }
        claimants
    }

    /// Seats granted to more than one actor. A correct service keeps this
    /// empty; every entry is an oversold seat.
    pub fn double_claimed_seats(&self) -> Vec<SeatId> {
        self.claimants_by_seat()
            .into_iter()
            .filter(|(_, claimants)| claimants.len() > 1)
            .map(|(seat, _)| seat)
            .collect()
    }

    /// How many actors ended in each terminal state.
    pub fn terminal_counts(&self) -> BTreeMap<ActorTerminal, usize> {
        let mut counts = BTreeMap::new();
        for summary in &self.summaries {
            *counts.entry(summary.terminal).or_insert(0) += 1;
        }
        counts
    }

    /// Actors whose claims exceed the quota they were configured with.
    /// Non-empty means the actor loop itself is broken, not the service.
    pub fn quota_violations(&self, quota: SeatQuota) -> Vec<(ActorId, u32)> {
        self.summaries
            .iter()
            .filter(|summary| summary.claimed > quota.into_inner())
            .map(|summary| (summary.actor.clone(), summary.claimed))
            .collect()
    }

    /// True when no seat was granted twice.
    pub fn is_clean(&self) -> bool {
        self.double_claimed_seats().is_empty()
    }

    /// Write the operator-facing summary to the log.
    pub fn log_summary(&self) {
        info!(
            "Run {}: {} actors, {} claims, {} rejections",
            self.run_id,
            self.summaries.len(),
            self.total_claims(),
            self.total_rejections()
        );
        for (terminal, count) in self.terminal_counts() {
            info!("Run {}: {} actors settled with {}", self.run_id, count, terminal);
        }

        let claimants = self.claimants_by_seat();
        let oversold = self.double_claimed_seats();
        if oversold.is_empty() {
            info!("Run {}: no seat was granted twice", self.run_id);
        }
        for seat in oversold {
            let actors: Vec<String> = claimants
                .get(&seat)
                .into_iter()
                .flatten()
                .map(ToString::to_string)
                .collect();
            error!(
                "Run {}: seat {} was granted to {} actors: {}",
                self.run_id,
                seat,
                actors.len(),
                actors.join(", ")
            );
        }
    }
}

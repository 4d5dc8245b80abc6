//! Fan-out of booking actors and collection of their results

use crate::domain::{ActorId, ProvisionedAccount, RunId, SimEvent};
use crate::service::BookingService;
use crate::sim::actor::BookingActor;
use crate::sim::report::ContentionReport;
use crate::sim::SimulationPlan;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{error, info};

/// Launches every actor of a run and gathers what they observed
pub struct ContentionDriver {
    service: Arc<dyn BookingService>,
    plan: SimulationPlan,
}

impl ContentionDriver {
    pub fn new(service: Arc<dyn BookingService>, plan: SimulationPlan) -> Self {
        Self { service, plan }
    }

    /// Spawn `identities x replication` actors at once and wait for every
    /// one of them to settle.
    ///
    /// Actors share nothing but the service itself and the read-only
    /// credential snapshot. No in-process lock mediates them; any
    /// interleaving of their requests is a valid run, which is the point
    /// of the experiment.
    pub async fn run(&self, accounts: Vec<ProvisionedAccount>) -> ContentionReport {
        let run_id = RunId::generate();
        let replication = self.plan.replication.into_inner();
        let accounts = Arc::new(accounts);

        info!(
            "Run {}: launching {} actors ({} identities x {} replicas)",
            run_id,
            accounts.len() * replication as usize,
            accounts.len(),
            replication
        );

        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let mut tasks = JoinSet::new();

        for account in accounts.iter() {
            for replica in 0..replication {
                let actor = BookingActor::new(
                    ActorId::for_replica(account.email(), replica),
                    account.email().clone(),
                    account.password().clone(),
                    Arc::clone(&accounts),
                    Arc::clone(&self.service),
                    self.plan.clone(),
                    events_tx.clone(),
                );
                tasks.spawn(actor.run());
            }
        }
        // Actors hold the remaining senders; the channel closes once the
        // last one settles.
        drop(events_tx);

        let mut summaries = Vec::new();
        while let Some(result) = tasks.join_next().await {
            match result {
                Ok(summary) => summaries.push(summary),
                Err(e) => error!("Actor task failed to join: {}", e),
            }
        }

        let mut events: Vec<SimEvent> = Vec::new();
        while let Some(event) = events_rx.recv().await {
            events.push(event);
        }

        info!("Run {}: all {} actors settled", run_id, summaries.len());
        ContentionReport::new(run_id, events, summaries)
    }
}

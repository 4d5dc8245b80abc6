//! One concurrent participant in the contention experiment
//!
//! Each actor resolves its credential from the shared snapshot, then loops:
//! fetch the seat listing, shuffle the open seats, and try to book them one
//! by one until it reaches its quota or a terminal condition. All mutable
//! state is local to the actor; seat ownership lives in the service, so two
//! actors only ever interact by racing it.

use crate::domain::{
    available_in_random_order, ActorId, ActorTerminal, AttemptOutcome, AuthToken, EmailAddress,
    Password, ProvisionedAccount, Seat, SimEvent, SimEventKind,
};
use crate::service::BookingService;
use crate::sim::SimulationPlan;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

/// What one actor accomplished, reported back to the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorSummary {
    pub actor: ActorId,
    pub claimed: u32,
    pub terminal: ActorTerminal,
}

/// A single booking actor
pub struct BookingActor {
    id: ActorId,
    email: EmailAddress,
    password: Password,
    accounts: Arc<Vec<ProvisionedAccount>>,
    service: Arc<dyn BookingService>,
    plan: SimulationPlan,
    events: UnboundedSender<SimEvent>,
}

impl BookingActor {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ActorId,
        email: EmailAddress,
        password: Password,
        accounts: Arc<Vec<ProvisionedAccount>>,
        service: Arc<dyn BookingService>,
        plan: SimulationPlan,
        events: UnboundedSender<SimEvent>,
    ) -> Self {
        Self {
            id,
            email,
            password,
            accounts,
            service,
            plan,
            events,
        }
    }

    /// Run the contention loop to a terminal state.
    ///
    /// The quota is checked before every single booking attempt and claims
    /// accumulate across fetch cycles, so an actor can never hold more seats
    /// than its quota no matter how the fetch/book interleaving goes. The
    /// fetch-cycle budget bounds the loop even against a service that fails
    /// or feeds stale listings forever.
    pub async fn run(self) -> ActorSummary {
        let Some(account) =
            ProvisionedAccount::find_by_login(&self.accounts, &self.email, &self.password)
        else {
            warn!("Actor {} has no matching credential in the snapshot", self.id);
            self.emit(SimEventKind::CredentialMissing);
            return self.settle(ActorTerminal::CredentialMissing, 0);
        };
        let token = account.token.clone();

        let quota = self.plan.quota.into_inner();
        let budget = self.plan.fetch_budget.into_inner();
        let mut claimed: u32 = 0;
        let mut fetches: u32 = 0;

        loop {
            if claimed >= quota {
                return self.settle(ActorTerminal::QuotaReached, claimed);
            }
            if fetches >= budget {
                return self.settle(ActorTerminal::BudgetSpent, claimed);
            }
            fetches += 1;

            let snapshot = match self
                .service
                .seat_snapshot(&token, self.plan.flight, self.plan.date)
                .await
            {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    debug!("Actor {} could not fetch inventory: {}", self.id, e);
                    self.emit(SimEventKind::InventoryUnavailable {
                        detail: e.to_string(),
                    });
                    tokio::time::sleep(self.plan.fetch_backoff).await;
                    continue;
                }
            };

            let open = {
                let mut rng = rand::thread_rng();
                available_in_random_order(snapshot, &mut rng)
            };
            if open.is_empty() {
                self.emit(SimEventKind::InventoryDrained);
                return self.settle(ActorTerminal::PoolDrained, claimed);
            }

            let claimed_before = claimed;
            for seat in open {
                if claimed >= quota {
                    break;
                }
                let outcome = self.attempt(&token, &seat).await;
                if outcome == AttemptOutcome::Claimed {
                    claimed += 1;
                }
            }

            // A full pass over a non-empty listing without a single claim
            // means everything we saw was stolen first.
            if claimed == claimed_before {
                return self.settle(ActorTerminal::NoProgress, claimed);
            }
        }
    }

    /// Issue one booking attempt and record its outcome. A transport error
    /// counts as a rejection; the seat is lost to this actor either way.
    async fn attempt(&self, token: &AuthToken, seat: &Seat) -> AttemptOutcome {
        let outcome = match self
            .service
            .book_seat(token, self.plan.flight, seat.id)
            .await
        {
            Ok(true) => AttemptOutcome::Claimed,
            Ok(false) => AttemptOutcome::Rejected,
            Err(e) => {
                warn!("Actor {} booking request failed: {}", self.id, e);
                AttemptOutcome::Rejected
            }
        };

        debug!("Actor {} seat {}: {}", self.id, seat.number, outcome);
        self.emit(SimEventKind::AttemptSettled {
            seat_id: seat.id,
            seat_number: seat.number.clone(),
            outcome,
        });
        outcome
    }

    fn emit(&self, kind: SimEventKind) {
        // The receiver outlives every actor; a dropped receiver means the
        // run was abandoned and losing events is fine.
        let _ = self.events.send(SimEvent::now(self.id.clone(), kind));
    }

    fn settle(&self, terminal: ActorTerminal, claimed: u32) -> ActorSummary {
        info!(
            "Actor {} settled: {} ({} claimed)",
            self.id, terminal, claimed
        );
        self.emit(SimEventKind::ActorSettled { terminal, claimed });
        ActorSummary {
            actor: self.id.clone(),
            claimed,
            terminal,
        }
    }
}

//! Provision phase: register synthetic identities and persist their credentials
//!
//! Provisioning is setup for the contention experiment, not part of it, so
//! registrations run one at a time. The service decides which registrations
//! stick; only the accepted subset reaches the credential snapshot.

pub mod synth;

use crate::domain::{IdentityCount, ProvisionedAccount};
use crate::error::Result;
use crate::service::BookingService;
use crate::store::CredentialStore;
use std::sync::Arc;
use tracing::{info, warn};

/// Registers a batch of synthetic identities and snapshots the accepted ones
pub struct Provisioner {
    service: Arc<dyn BookingService>,
    store: CredentialStore,
}

impl Provisioner {
    pub fn new(service: Arc<dyn BookingService>, store: CredentialStore) -> Self {
        Self { service, store }
    }

    /// Register `count` fresh identities, keep the subset the service
    /// accepted, and replace the credential snapshot with it.
    pub async fn run(&self, count: IdentityCount) -> Result<Vec<ProvisionedAccount>> {
        let identities = {
            let mut rng = rand::thread_rng();
            synth::identities(&mut rng, count)
        };

        let mut accounts = Vec::with_capacity(identities.len());
        for identity in identities {
            match self.service.register(&identity).await {
                Ok(token) => {
                    accounts.push(ProvisionedAccount::new(identity, token));
                }
                Err(e) => {
                    warn!("Registration of {} rejected: {}", identity.email, e);
                }
            }
        }

        self.store.write(&accounts)?;
        info!(
            "Provisioned {}/{} identities into {}",
            accounts.len(),
            count,
            self.store.path().display()
        );
        Ok(accounts)
    }
}

//! Application wiring: configuration, service client, store, and phases

use crate::config::Settings;
use crate::domain::{IdentityCount, ProvisionedAccount};
use crate::error::{Error, Result};
use crate::provision::Provisioner;
use crate::service::{BookingService, HttpBookingService};
use crate::sim::{ContentionDriver, ContentionReport, SimulationPlan};
use crate::store::CredentialStore;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Which part of the experiment to execute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Register identities and write the credential snapshot.
    Provision,
    /// Race actors over the seat pool using an existing snapshot.
    Simulate,
    /// Both, back to back, the way the reference experiment runs.
    Full,
}

impl FromStr for Phase {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "provision" => Ok(Self::Provision),
            "simulate" => Ok(Self::Simulate),
            "run" => Ok(Self::Full),
            other => Err(Error::InvalidSetting(format!(
                "unknown phase '{other}', expected provision, simulate or run"
            ))),
        }
    }
}

/// Main application struct that coordinates all components
pub struct Application {
    settings: Settings,
    service: Arc<dyn BookingService>,
    store: CredentialStore,
}

impl Application {
    pub fn new() -> Result<Self> {
        Self::from_settings(Settings::new()?)
    }

    pub fn from_settings(settings: Settings) -> Result<Self> {
        let service = Arc::new(HttpBookingService::new(&settings.service)?);
        let store = CredentialStore::from_settings(&settings.store);
        Ok(Self {
            settings,
            service,
            store,
        })
    }

    /// Provision phase: register fresh identities and snapshot the accepted
    /// ones.
    #[instrument(skip(self))]
    pub async fn provision(&self) -> Result<Vec<ProvisionedAccount>> {
        let count = IdentityCount::try_new(self.settings.provisioning.identity_count)
            .map_err(|e| Error::invalid_setting("provisioning.identity_count", e))?;

        info!(
            "Provisioning {} identities against {}",
            count, self.settings.service.base_url
        );
        let provisioner = Provisioner::new(Arc::clone(&self.service), self.store.clone());
        provisioner.run(count).await
    }

    /// Simulate phase: race replicated actors over the seat pool using the
    /// stored credentials.
    #[instrument(skip(self))]
    pub async fn simulate(&self) -> Result<ContentionReport> {
        let accounts = self.store.read_all()?;
        if accounts.is_empty() {
            return Err(Error::NoAccounts);
        }
        let plan = SimulationPlan::from_settings(&self.settings)?;

        info!(
            "Simulating contention against {}, flight {} on {}",
            self.settings.service.base_url,
            plan.flight,
            plan.date.as_path_segment()
        );
        let driver = ContentionDriver::new(Arc::clone(&self.service), plan.clone());
        let report = driver.run(accounts).await;

        report.log_summary();
        for (actor, claimed) in report.quota_violations(plan.quota) {
            warn!(
                "Actor {} claimed {} seats, above its quota of {}",
                actor, claimed, plan.quota
            );
        }
        Ok(report)
    }

    /// Both phases back to back.
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<ContentionReport> {
        self.provision().await?;
        self.simulate().await
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

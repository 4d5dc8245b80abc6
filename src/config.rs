use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub service: ServiceSettings,
    pub target: TargetSettings,
    pub provisioning: ProvisioningSettings,
    pub simulation: SimulationSettings,
    pub store: StoreSettings,
    pub logging: LoggingSettings,
}

/// Where the booking service under test lives and how long we wait on it.
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceSettings {
    pub base_url: String,
    pub request_timeout_ms: u64,
}

impl ServiceSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// The fixed flight/date the whole simulation targets.
#[derive(Debug, Deserialize, Clone)]
pub struct TargetSettings {
    pub flight_id: i64,
    pub travel_date: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProvisioningSettings {
    pub identity_count: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SimulationSettings {
    /// How many concurrent actors are spawned per provisioned identity.
    pub actors_per_identity: u32,
    /// Maximum seats a single actor may successfully claim.
    pub seat_quota: u32,
    /// Maximum inventory queries an actor may issue before giving up.
    pub fetch_cycle_budget: u32,
    /// Pause before re-querying after a failed inventory query.
    pub fetch_backoff_ms: u64,
}

impl SimulationSettings {
    pub fn fetch_backoff(&self) -> Duration {
        Duration::from_millis(self.fetch_backoff_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with default values
            .set_default("service.base_url", "http://localhost:3000")?
            .set_default("service.request_timeout_ms", 5000)?
            .set_default("target.flight_id", 14)?
            .set_default("target.travel_date", "2024-05-26T06:00:00.000Z")?
            .set_default("provisioning.identity_count", 5)?
            .set_default("simulation.actors_per_identity", 20)?
            .set_default("simulation.seat_quota", 3)?
            .set_default("simulation.fetch_cycle_budget", 10)?
            .set_default("simulation.fetch_backoff_ms", 200)?
            .set_default("store.path", "accounts.json")?
            .set_default("logging.level", "info")?
            // Add configuration file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables with prefix
            .add_source(Environment::with_prefix("OVERBOOK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

//! Durable credential snapshot shared between the provision and simulate phases
//!
//! The snapshot is a small versioned JSON document: written once at the end of
//! a provision run, read once at the start of a simulation run. Every write
//! replaces the whole file. The two phases never run concurrently, so the
//! store needs no locking.

use crate::config::StoreSettings;
use crate::domain::ProvisionedAccount;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Version stamped into every snapshot this build writes
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors raised by the credential store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported snapshot version {found}, this build reads version {SNAPSHOT_VERSION}")]
    UnsupportedVersion { found: u32 },
}

/// On-disk form of the snapshot
#[derive(Debug, Serialize, Deserialize)]
struct CredentialSnapshot {
    schema_version: u32,
    accounts: Vec<ProvisionedAccount>,
}

/// File-backed store of provisioned accounts
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_settings(settings: &StoreSettings) -> Self {
        Self::new(&settings.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the snapshot with the given accounts.
    pub fn write(&self, accounts: &[ProvisionedAccount]) -> Result<(), StoreError> {
        let snapshot = CredentialSnapshot {
            schema_version: SNAPSHOT_VERSION,
            accounts: accounts.to_vec(),
        };
        let json = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    /// Load every provisioned account from the snapshot.
    ///
    /// A snapshot written by a different schema version is rejected rather
    /// than guessed at.
    pub fn read_all(&self) -> Result<Vec<ProvisionedAccount>, StoreError> {
        let json = std::fs::read_to_string(&self.path)?;
        let snapshot: CredentialSnapshot = serde_json::from_str(&json)?;
        if snapshot.schema_version != SNAPSHOT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: snapshot.schema_version,
            });
        }
        Ok(snapshot.accounts)
    }
}

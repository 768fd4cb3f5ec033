//! Runtime settings loaded via OrthoConfig.
//!
//! Every field can be set through a `NEXUS_`-prefixed environment variable
//! or a configuration file; CLI subcommands are parsed separately.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::SessionPolicy;
use crate::outbound::transport::DEFAULT_LATENCY;

const DEFAULT_STORAGE_DIR: &str = ".nexus";

/// Settings controlling storage, the simulated backend, and login policy.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "NEXUS")]
pub struct NexusSettings {
    /// Directory holding the session record and identity ledger.
    pub storage_dir: Option<PathBuf>,
    /// Simulated backend latency in milliseconds.
    pub latency_ms: Option<u64>,
    /// Fail backend calls slower than this many milliseconds.
    pub timeout_ms: Option<u64>,
    /// Issue random codes instead of the demo code.
    #[ortho_config(default = false)]
    pub random_codes: bool,
    /// Permit signing in by email alone.
    #[ortho_config(default = true)]
    pub allow_trusted_login: bool,
    /// Make every backend call fail as unreachable.
    #[ortho_config(default = false)]
    pub offline: bool,
}

impl NexusSettings {
    /// Configured storage directory, defaulting to `.nexus`.
    pub fn storage_dir(&self) -> PathBuf {
        self.storage_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR))
    }

    /// Configured latency, defaulting to one second.
    pub fn latency(&self) -> Duration {
        self.latency_ms
            .map_or(DEFAULT_LATENCY, Duration::from_millis)
    }

    /// Configured timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Session policy derived from the settings.
    pub fn session_policy(&self) -> SessionPolicy {
        SessionPolicy {
            allow_trusted_login: self.allow_trusted_login,
        }
    }
}

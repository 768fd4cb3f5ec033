//! Wiring of adapters into the session manager and catalogue.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use camino::Utf8PathBuf;

use crate::config::NexusSettings;
use crate::domain::ports::{CatalogueSource, CodeGenerator, FixedCodeGenerator, KeyValueStore};
use crate::domain::{SessionManager, SessionManagerPorts};
use crate::outbound::catalogue::BundledCatalogue;
use crate::outbound::codes::RandomCodeGenerator;
use crate::outbound::credentials::{LedgerCredentialStore, SeedDataError};
use crate::outbound::storage::FileKeyValueStore;
use crate::outbound::transport::SimulatedTransport;

/// Failures while assembling the application.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// Storage directory path cannot be used by the file store.
    #[error("storage directory {} is not valid UTF-8", .path.display())]
    NonUtf8StorageDir {
        /// Rejected path.
        path: PathBuf,
    },
    /// Storage directory could not be created or opened.
    #[error("failed to open storage directory {path}: {source}")]
    Storage {
        /// Directory that failed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Bundled seed data is malformed.
    #[error(transparent)]
    SeedData(#[from] SeedDataError),
}

/// Assembled services.
pub struct Nexus {
    /// Owner of the signed-in identity.
    pub session: SessionManager,
    /// Job and community records.
    pub catalogue: Arc<dyn CatalogueSource>,
}

impl std::fmt::Debug for Nexus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Nexus")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

/// Build the application over file-backed storage.
pub fn build(settings: &NexusSettings) -> Result<Nexus, BootstrapError> {
    let dir = settings.storage_dir();
    let root = Utf8PathBuf::from_path_buf(dir)
        .map_err(|path| BootstrapError::NonUtf8StorageDir { path })?;
    let storage = FileKeyValueStore::open(&root)
        .map_err(|source| BootstrapError::Storage { path: root, source })?;
    build_with_storage(settings, Arc::new(storage))
}

/// Build the application over the given key-value store.
pub fn build_with_storage(
    settings: &NexusSettings,
    storage: Arc<dyn KeyValueStore>,
) -> Result<Nexus, BootstrapError> {
    let credentials = LedgerCredentialStore::bundled(Arc::clone(&storage))?;
    let transport = SimulatedTransport::new(settings.latency())
        .with_timeout(settings.timeout())
        .with_offline(settings.offline);
    let codes: Arc<dyn CodeGenerator> = if settings.random_codes {
        Arc::new(RandomCodeGenerator)
    } else {
        Arc::new(FixedCodeGenerator)
    };

    let session = SessionManager::new(
        SessionManagerPorts {
            credentials: Arc::new(credentials),
            storage,
            transport: Arc::new(transport),
            codes,
        },
        settings.session_policy(),
    );

    Ok(Nexus {
        session,
        catalogue: Arc::new(BundledCatalogue::new()),
    })
}

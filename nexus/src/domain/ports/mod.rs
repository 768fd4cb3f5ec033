//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod backend_transport;
mod catalogue_source;
mod code_generator;
mod credential_store;
mod key_value_store;

#[cfg(test)]
pub use backend_transport::MockBackendTransport;
pub use backend_transport::{BackendCall, BackendTransport, TransportError};
pub use catalogue_source::{CatalogueSource, CatalogueSourceError};
#[cfg(test)]
pub use code_generator::MockCodeGenerator;
pub use code_generator::{CodeGenerator, FixedCodeGenerator};
#[cfg(test)]
pub use credential_store::MockCredentialStore;
pub use credential_store::{CredentialStore, CredentialStoreError};
#[cfg(test)]
pub use key_value_store::MockKeyValueStore;
pub use key_value_store::{
    IDENTITY_LEDGER_KEY, KeyValueStore, KeyValueStoreError, SESSION_RECORD_KEY,
};

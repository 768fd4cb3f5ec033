//! Port for resolving identities and institute domains.
//!
//! The credential store answers two questions for the session layer: does an
//! email belong to a known identity, and does an email domain belong to a
//! known institute. It also owns the append-only ledger signup writes to.

use crate::domain::{Email, Identity, InstituteDomainRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential store adapters.
    pub enum CredentialStoreError {
        /// Backing storage could not be read or written.
        Storage {
            /// Adapter failure description.
            message: String,
        } => "credential storage failed: {message}",
        /// The identity ledger could not be encoded.
        Ledger {
            /// Encoder failure description.
            message: String,
        } => "identity ledger encoding failed: {message}",
    }
}

/// Identity and institute lookups plus the signup ledger.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialStore: Send + Sync {
    /// Exact, case-sensitive lookup by email.
    fn find_by_email(&self, email: &Email) -> Result<Option<Identity>, CredentialStoreError>;

    /// Institute whose email domain matches `email`, if any.
    fn domain_for(&self, email: &Email) -> Option<InstituteDomainRecord>;

    /// Append a newly registered identity to the durable ledger.
    ///
    /// No uniqueness check is performed here.
    fn append(&self, identity: &Identity) -> Result<(), CredentialStoreError>;
}

//! Credential store over a seeded directory and a persisted signup ledger.
//!
//! Seeded identities and institute domains are bundled with the binary and
//! never change. Identities created by signup are appended to a JSON array
//! stored under [`IDENTITY_LEDGER_KEY`]. Lookups consult the seeded
//! directory first, then the ledger in append order.

use std::sync::Arc;

use tracing::warn;

use crate::domain::ports::{
    CredentialStore, CredentialStoreError, IDENTITY_LEDGER_KEY, KeyValueStore,
};
use crate::domain::{Email, Identity, InstituteDomainRecord};

const SEEDED_IDENTITIES: &str = include_str!("../../fixtures/identities.json");
const SEEDED_INSTITUTES: &str = include_str!("../../fixtures/institutes.json");

/// Bundled seed data failed to decode.
#[derive(Debug, thiserror::Error)]
#[error("failed to decode bundled {collection}: {source}")]
pub struct SeedDataError {
    collection: &'static str,
    #[source]
    source: serde_json::Error,
}

fn decode_seed<T: serde::de::DeserializeOwned>(
    collection: &'static str,
    raw: &str,
) -> Result<Vec<T>, SeedDataError> {
    serde_json::from_str(raw).map_err(|source| SeedDataError { collection, source })
}

/// [`CredentialStore`] backed by bundled seed data and a key-value ledger.
pub struct LedgerCredentialStore {
    seeded: Vec<Identity>,
    institutes: Vec<InstituteDomainRecord>,
    storage: Arc<dyn KeyValueStore>,
}

impl LedgerCredentialStore {
    /// Store seeded with the bundled identities and institutes.
    pub fn bundled(storage: Arc<dyn KeyValueStore>) -> Result<Self, SeedDataError> {
        Ok(Self::with_directory(
            decode_seed("identities", SEEDED_IDENTITIES)?,
            decode_seed("institutes", SEEDED_INSTITUTES)?,
            storage,
        ))
    }

    /// Store seeded with explicit tables.
    pub fn with_directory(
        seeded: Vec<Identity>,
        institutes: Vec<InstituteDomainRecord>,
        storage: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            seeded,
            institutes,
            storage,
        }
    }

    /// Seeded identities in directory order.
    pub fn seeded(&self) -> &[Identity] {
        &self.seeded
    }

    /// Identities appended by signup, oldest first.
    ///
    /// An unparsable ledger reads as empty.
    pub fn ledger(&self) -> Result<Vec<Identity>, CredentialStoreError> {
        let Some(raw) = self
            .storage
            .get(IDENTITY_LEDGER_KEY)
            .map_err(|err| CredentialStoreError::storage(err.to_string()))?
        else {
            return Ok(Vec::new());
        };

        Ok(serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!(error = %err, "identity ledger unparsable; treating as empty");
            Vec::new()
        }))
    }
}

impl std::fmt::Debug for LedgerCredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerCredentialStore")
            .field("seeded", &self.seeded.len())
            .field("institutes", &self.institutes.len())
            .finish_non_exhaustive()
    }
}

impl CredentialStore for LedgerCredentialStore {
    fn find_by_email(&self, email: &Email) -> Result<Option<Identity>, CredentialStoreError> {
        if let Some(identity) = self.seeded.iter().find(|known| known.email == *email) {
            return Ok(Some(identity.clone()));
        }
        Ok(self
            .ledger()?
            .into_iter()
            .find(|registered| registered.email == *email))
    }

    fn domain_for(&self, email: &Email) -> Option<InstituteDomainRecord> {
        self.institutes
            .iter()
            .find(|record| record.covers(email))
            .cloned()
    }

    fn append(&self, identity: &Identity) -> Result<(), CredentialStoreError> {
        let mut ledger = self.ledger()?;
        ledger.push(identity.clone());
        let encoded = serde_json::to_string(&ledger)
            .map_err(|err| CredentialStoreError::ledger(err.to_string()))?;
        self.storage
            .set(IDENTITY_LEDGER_KEY, &encoded)
            .map_err(|err| CredentialStoreError::storage(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{KeyValueStoreError, MockKeyValueStore};
    use crate::domain::{Role, SignupProfile, VerificationStatus};
    use crate::outbound::storage::InMemoryKeyValueStore;
    use rstest::{fixture, rstest};

    fn email(raw: &str) -> Email {
        Email::new(raw).expect("valid email")
    }

    fn registered(address: &str, name: &str) -> Identity {
        let profile = SignupProfile::new(address, name).expect("valid profile");
        Identity::register(crate::domain::IdentityId::random(), profile, None)
    }

    struct Fixture {
        storage: Arc<InMemoryKeyValueStore>,
        store: LedgerCredentialStore,
    }

    #[fixture]
    fn fixture() -> Fixture {
        let storage = Arc::new(InMemoryKeyValueStore::default());
        let store = LedgerCredentialStore::bundled(Arc::clone(&storage) as Arc<dyn KeyValueStore>)
            .expect("seed data decodes");
        Fixture { storage, store }
    }

    #[rstest]
    fn bundled_directory_holds_the_seeded_members(fixture: Fixture) {
        let emails: Vec<_> = fixture
            .store
            .seeded()
            .iter()
            .map(|identity| identity.email.to_string())
            .collect();
        assert_eq!(
            emails,
            [
                "john.doe@iitd.ac.in",
                "jane.smith@iitb.ac.in",
                "sarah.wilson@company.com"
            ]
        );
        assert!(fixture.store.seeded().iter().all(|identity| {
            identity.is_verified && identity.verification_status == VerificationStatus::Verified
        }));
    }

    #[rstest]
    fn john_doe_is_seeded_in_full(fixture: Fixture) {
        let john = fixture
            .store
            .find_by_email(&email("john.doe@iitd.ac.in"))
            .expect("lookup")
            .expect("seeded");
        assert_eq!(john.display_name, "John Doe");
        assert_eq!(john.role, Role::Alumni);
        assert_eq!(john.phone.as_deref(), Some("+91-9876543210"));
        assert_eq!(john.graduation_year, Some(2022));
        assert_eq!(john.points, 1250);
    }

    #[rstest]
    #[case("John.Doe@iitd.ac.in")]
    #[case("john.doe@iitd.ac.in.evil")]
    #[case("ghost@iitd.ac.in")]
    fn lookup_is_exact(fixture: Fixture, #[case] address: &str) {
        assert_eq!(fixture.store.find_by_email(&email(address)), Ok(None));
    }

    #[rstest]
    #[case("anyone@iitd.ac.in", Some("IITD"))]
    #[case("anyone@iitk.ac.in", Some("IITK"))]
    #[case("anyone@cse.iitd.ac.in", None)]
    #[case("anyone@gmail.com", None)]
    #[case("no-at-sign", None)]
    #[case("a@iitm.ac.in@extra", Some("IITM"))]
    fn domain_lookup_uses_segment_after_first_at(
        fixture: Fixture,
        #[case] address: &str,
        #[case] expected: Option<&str>,
    ) {
        let code = fixture.store.domain_for(&email(address)).map(|record| record.code);
        assert_eq!(code.as_deref(), expected);
    }

    #[rstest]
    fn appended_identities_are_found_after_seeded_ones(fixture: Fixture) {
        let first = registered("new@example.com", "First");
        let second = registered("new@example.com", "Second");
        fixture.store.append(&first).expect("append first");
        fixture.store.append(&second).expect("append second");

        let found = fixture
            .store
            .find_by_email(&email("new@example.com"))
            .expect("lookup");

        assert_eq!(found, Some(first.clone()));
        assert_eq!(fixture.store.ledger(), Ok(vec![first, second]));
    }

    #[rstest]
    fn seeded_identity_shadows_ledger_duplicate(fixture: Fixture) {
        fixture
            .store
            .append(&registered("jane.smith@iitb.ac.in", "Impostor"))
            .expect("append");

        let found = fixture
            .store
            .find_by_email(&email("jane.smith@iitb.ac.in"))
            .expect("lookup")
            .expect("seeded");

        assert_eq!(found.display_name, "Jane Smith");
    }

    #[rstest]
    fn corrupt_ledger_reads_empty_and_is_replaced_on_append(fixture: Fixture) {
        fixture
            .storage
            .set(IDENTITY_LEDGER_KEY, "not json")
            .expect("corrupt ledger");
        assert_eq!(fixture.store.ledger(), Ok(Vec::new()));

        let fresh = registered("fresh@example.com", "Fresh");
        fixture.store.append(&fresh).expect("append");

        assert_eq!(fixture.store.ledger(), Ok(vec![fresh]));
    }

    #[rstest]
    fn storage_failures_surface_as_storage_errors() {
        let mut storage = MockKeyValueStore::new();
        storage
            .expect_get()
            .returning(|key| Err(KeyValueStoreError::read(key, "io")));
        let store =
            LedgerCredentialStore::with_directory(Vec::new(), Vec::new(), Arc::new(storage));

        let err = store
            .find_by_email(&email("x@example.com"))
            .expect_err("read fails");

        assert!(matches!(err, CredentialStoreError::Storage { .. }));
    }
}

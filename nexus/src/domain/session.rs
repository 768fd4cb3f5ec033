//! Session manager: the one place that knows who is signed in.
//!
//! The manager owns the current identity and the pending one-time code,
//! persists the current identity to key-value storage so it survives a
//! restart, and routes every simulated backend call through the transport
//! port before touching state. A transport failure therefore leaves the
//! session exactly as it was.
//!
//! Misses are not errors. An unknown email, a wrong code, or a failed
//! ledger write are reported as `false`; `Err` carries transport failures,
//! refused flows, and storage faults on the login path.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, warn};

use super::identity::{Email, Identity, IdentityId, SignupProfile};
use super::one_time_code::{CodeIssue, OneTimeCode, OneTimeCodeSession};
use super::ports::{
    BackendCall, BackendTransport, CodeGenerator, CredentialStore, CredentialStoreError,
    KeyValueStore, KeyValueStoreError, SESSION_RECORD_KEY, TransportError,
};
use super::Error;

fn map_transport_error(call: BackendCall, error: TransportError) -> Error {
    Error::service_unavailable(format!("{} failed: {error}", call.as_str()))
        .with_details(json!({ "call": call.as_str() }))
}

fn map_credential_error(error: CredentialStoreError) -> Error {
    Error::internal(format!("credential lookup failed: {error}"))
}

fn map_storage_error(error: KeyValueStoreError) -> Error {
    Error::internal(format!("session storage failed: {error}"))
}

/// How a caller proves who they are at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginMethod {
    /// Submit the code issued by [`SessionManager::send_code`].
    OneTimeCode(OneTimeCode),
    /// Demo shortcut: sign in as any known email without a code.
    Trusted,
}

/// Knobs that change which flows are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Permit [`LoginMethod::Trusted`].
    pub allow_trusted_login: bool,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            allow_trusted_login: true,
        }
    }
}

/// Outcome of a code request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeDispatch {
    /// A code was issued for the email.
    pub accepted: bool,
    /// The caller must submit the code to finish signing in.
    pub requires_code: bool,
}

impl CodeDispatch {
    const fn accepted() -> Self {
        Self {
            accepted: true,
            requires_code: true,
        }
    }

    const fn rejected() -> Self {
        Self {
            accepted: false,
            requires_code: false,
        }
    }
}

/// Adapters the session manager drives.
#[derive(Clone)]
pub struct SessionManagerPorts {
    /// Identity and institute lookups plus the signup ledger.
    pub credentials: Arc<dyn CredentialStore>,
    /// Durable storage for the session record.
    pub storage: Arc<dyn KeyValueStore>,
    /// Simulated backend round trips.
    pub transport: Arc<dyn BackendTransport>,
    /// One-time code source.
    pub codes: Arc<dyn CodeGenerator>,
}

/// Owner of the current identity.
pub struct SessionManager {
    credentials: Arc<dyn CredentialStore>,
    storage: Arc<dyn KeyValueStore>,
    transport: Arc<dyn BackendTransport>,
    codes: OneTimeCodeSession,
    policy: SessionPolicy,
    current: Mutex<Option<Identity>>,
}

impl SessionManager {
    /// Build a manager and restore any persisted session.
    ///
    /// Restoration never fails: an unreadable record starts the manager
    /// signed out, and an unparsable one is also removed from storage.
    pub fn new(ports: SessionManagerPorts, policy: SessionPolicy) -> Self {
        let SessionManagerPorts {
            credentials,
            storage,
            transport,
            codes,
        } = ports;
        let restored = restore(storage.as_ref());
        Self {
            codes: OneTimeCodeSession::new(Arc::clone(&credentials), codes),
            credentials,
            storage,
            transport,
            policy,
            current: Mutex::new(restored),
        }
    }

    fn current_slot(&self) -> MutexGuard<'_, Option<Identity>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether an identity is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.current_slot().is_some()
    }

    /// The signed-in identity, if any.
    pub fn current(&self) -> Option<Identity> {
        self.current_slot().clone()
    }

    /// Active policy.
    pub fn policy(&self) -> SessionPolicy {
        self.policy
    }

    /// Whether issued codes are the public demo code.
    pub fn issues_demo_codes(&self) -> bool {
        self.codes.issues_demo_codes()
    }

    /// Request a one-time code for `email`.
    pub async fn send_code(&self, email: &Email) -> Result<CodeDispatch, Error> {
        self.round_trip(BackendCall::SendCode).await?;

        match self.codes.issue(email).map_err(map_credential_error)? {
            CodeIssue::Issued(code) => {
                if self.codes.issues_demo_codes() {
                    info!(%email, code = code.as_str(), "demo one-time code issued");
                } else {
                    info!(%email, "one-time code issued");
                }
                Ok(CodeDispatch::accepted())
            }
            CodeIssue::UnknownEmail => Ok(CodeDispatch::rejected()),
        }
    }

    /// Submit a code; on a match the identity becomes current.
    ///
    /// If signing in fails after the match, the code is pending again so the
    /// caller can retry with it.
    pub async fn verify_code(&self, email: &Email, code: &OneTimeCode) -> Result<bool, Error> {
        self.round_trip(BackendCall::VerifyCode).await?;

        if !self.codes.verify(email, code) {
            debug!(%email, "one-time code rejected");
            return Ok(false);
        }
        self.sign_in(email).inspect_err(|_| self.codes.reinstate(email, code))
    }

    /// Sign in with `method`.
    ///
    /// Returns `Ok(false)` when no identity matches. A trusted login while
    /// [`SessionPolicy::allow_trusted_login`] is off is refused with
    /// [`super::ErrorCode::Unauthorized`] and changes nothing.
    pub async fn login(&self, email: &Email, method: LoginMethod) -> Result<bool, Error> {
        match method {
            LoginMethod::OneTimeCode(code) => self.verify_code(email, &code).await,
            LoginMethod::Trusted if self.policy.allow_trusted_login => self.sign_in(email),
            LoginMethod::Trusted => {
                warn!(%email, "trusted login refused by policy");
                Err(Error::unauthorized("trusted login is disabled")
                    .with_details(json!({ "method": "trusted" })))
            }
        }
    }

    /// Register a new identity and sign it in.
    ///
    /// Returns `Ok(false)` when the ledger or session record cannot be
    /// written. Emails already in use are accepted.
    pub async fn signup(&self, profile: SignupProfile) -> Result<bool, Error> {
        self.round_trip(BackendCall::Signup).await?;

        match self.credentials.find_by_email(profile.email()) {
            Ok(Some(_)) => warn!(email = %profile.email(), "signup reuses a registered email"),
            Ok(None) => {}
            Err(err) => debug!(error = %err, "duplicate check skipped"),
        }

        let institute = self.credentials.domain_for(profile.email());
        let identity = Identity::register(IdentityId::random(), profile, institute.as_ref());

        if let Err(err) = self.credentials.append(&identity) {
            warn!(error = %err, "signup ledger write failed");
            return Ok(false);
        }
        if let Err(err) = persist(self.storage.as_ref(), &identity) {
            warn!(error = %err, "signup session write failed");
            return Ok(false);
        }

        info!(
            email = %identity.email,
            verification = ?identity.verification_status,
            "identity registered"
        );
        *self.current_slot() = Some(identity);
        Ok(true)
    }

    /// Sign out and forget any pending code.
    ///
    /// In-memory state is cleared even when removing the persisted record
    /// fails; the error is still reported.
    pub fn logout(&self) -> Result<(), Error> {
        let previous = self.current_slot().take();
        self.codes.clear();
        if let Some(identity) = previous {
            info!(email = %identity.email, "signed out");
        }
        self.storage
            .remove(SESSION_RECORD_KEY)
            .map_err(map_storage_error)
    }

    async fn round_trip(&self, call: BackendCall) -> Result<(), Error> {
        self.transport
            .round_trip(call)
            .await
            .map_err(|err| map_transport_error(call, err))
    }

    fn sign_in(&self, email: &Email) -> Result<bool, Error> {
        let Some(identity) = self
            .credentials
            .find_by_email(email)
            .map_err(map_credential_error)?
        else {
            debug!(%email, "no identity for email");
            return Ok(false);
        };

        if let Err(err) = persist(self.storage.as_ref(), &identity) {
            warn!(%email, error = %err, "session record not written; staying signed out");
            return Err(err);
        }
        info!(%email, role = %identity.role, "signed in");
        *self.current_slot() = Some(identity);
        Ok(true)
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("current", &self.current_slot().as_ref().map(|id| id.email.clone()))
            .field("codes", &self.codes)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

fn persist(storage: &dyn KeyValueStore, identity: &Identity) -> Result<(), Error> {
    let encoded = serde_json::to_string(identity)
        .map_err(|err| Error::internal(format!("failed to encode session record: {err}")))?;
    storage
        .set(SESSION_RECORD_KEY, &encoded)
        .map_err(map_storage_error)
}

fn restore(storage: &dyn KeyValueStore) -> Option<Identity> {
    let raw = match storage.get(SESSION_RECORD_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            warn!(error = %err, "session record unreadable; starting signed out");
            return None;
        }
    };

    match serde_json::from_str::<Identity>(&raw) {
        Ok(identity) => {
            info!(email = %identity.email, "session restored");
            Some(identity)
        }
        Err(err) => {
            warn!(error = %err, "discarding corrupt session record");
            if let Err(remove_err) = storage.remove(SESSION_RECORD_KEY) {
                debug!(error = %remove_err, "corrupt session record not removed");
            }
            None
        }
    }
}

//! One-time-code issuance and matching.
//!
//! [`OneTimeCodeSession`] is a two-state machine: `Idle` (nothing pending)
//! and `Pending(email, code)`. Issuing a code replaces whatever was pending,
//! so at most one code is live at any time. A successful match consumes the
//! pending code; a failed match leaves it in place and reveals nothing about
//! which half of the pair was wrong.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;
use zeroize::Zeroizing;

use super::identity::Email;
use super::ports::{CodeGenerator, CredentialStore, CredentialStoreError};

/// Code issued by the demo generator.
pub const DEMO_CODE: &str = "123456";

/// Validation errors for submitted codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OneTimeCodeValidationError {
    /// The code did not have exactly [`OneTimeCode::LENGTH`] characters.
    #[error("one-time code must be {expected} digits")]
    WrongLength {
        /// Required length.
        expected: usize,
    },
    /// The code contained something other than ASCII digits.
    #[error("one-time code must contain only digits")]
    NonDigit,
}

/// Six-digit numeric code, leading zeros preserved.
///
/// The digits live in zeroizing storage and are redacted from `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct OneTimeCode(Zeroizing<String>);

impl OneTimeCode {
    /// Number of digits in a code.
    pub const LENGTH: usize = 6;

    /// Validate a submitted code.
    ///
    /// # Examples
    /// ```
    /// use nexus::domain::OneTimeCode;
    ///
    /// assert_eq!(OneTimeCode::new(" 012345 ").unwrap().as_str(), "012345");
    /// assert!(OneTimeCode::new("12a456").is_err());
    /// ```
    pub fn new(raw: &str) -> Result<Self, OneTimeCodeValidationError> {
        let trimmed = raw.trim();
        if trimmed.chars().count() != Self::LENGTH {
            return Err(OneTimeCodeValidationError::WrongLength {
                expected: Self::LENGTH,
            });
        }
        if !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(OneTimeCodeValidationError::NonDigit);
        }
        Ok(Self(Zeroizing::new(trimmed.to_owned())))
    }

    /// Largest value a code can hold.
    pub const MAX: u32 = 999_999;

    /// Build a code from a number, zero-padded to six digits.
    ///
    /// Values above [`OneTimeCode::MAX`] saturate to it.
    pub fn from_number(value: u32) -> Self {
        Self(Zeroizing::new(format!("{:06}", value.min(Self::MAX))))
    }

    /// The public demo code.
    pub fn demo() -> Self {
        Self(Zeroizing::new(DEMO_CODE.to_owned()))
    }

    /// Digits of the code.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for OneTimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OneTimeCode(******)")
    }
}

/// The single outstanding email/code pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingVerification {
    /// Email the code was issued for.
    pub email: Email,
    /// Issued code.
    pub code: OneTimeCode,
}

/// Result of an issuance attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeIssue {
    /// A code was issued and is now pending.
    Issued(OneTimeCode),
    /// The email does not belong to a known identity; nothing changed.
    UnknownEmail,
}

impl CodeIssue {
    /// Whether a code is now pending for the requested email.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Issued(_))
    }
}

/// Holder of at most one pending verification.
pub struct OneTimeCodeSession {
    credentials: Arc<dyn CredentialStore>,
    generator: Arc<dyn CodeGenerator>,
    pending: Mutex<Option<PendingVerification>>,
}

impl OneTimeCodeSession {
    /// Create an idle session.
    pub fn new(credentials: Arc<dyn CredentialStore>, generator: Arc<dyn CodeGenerator>) -> Self {
        Self {
            credentials,
            generator,
            pending: Mutex::new(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<PendingVerification>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Issue a code for `email` if it belongs to a known identity.
    ///
    /// Any previously pending code, for this or another email, is discarded.
    /// Unknown emails leave the pending state untouched.
    pub fn issue(&self, email: &Email) -> Result<CodeIssue, CredentialStoreError> {
        if self.credentials.find_by_email(email)?.is_none() {
            debug!(%email, "code requested for unknown email");
            return Ok(CodeIssue::UnknownEmail);
        }

        let code = self.generator.generate();
        *self.lock() = Some(PendingVerification {
            email: email.clone(),
            code: code.clone(),
        });
        Ok(CodeIssue::Issued(code))
    }

    /// Match `email` and `code` against the pending pair.
    ///
    /// Returns true at most once per issuance.
    pub fn verify(&self, email: &Email, code: &OneTimeCode) -> bool {
        let mut pending = self.lock();
        let matches = pending
            .as_ref()
            .is_some_and(|entry| entry.email == *email && entry.code == *code);
        if matches {
            *pending = None;
        }
        matches
    }

    /// Put a consumed pair back after the sign-in it was spent on failed.
    ///
    /// A code issued in the meantime wins; the pair is only restored when
    /// nothing is pending.
    pub fn reinstate(&self, email: &Email, code: &OneTimeCode) {
        let mut pending = self.lock();
        if pending.is_none() {
            *pending = Some(PendingVerification {
                email: email.clone(),
                code: code.clone(),
            });
        }
    }

    /// Drop any pending code.
    pub fn clear(&self) {
        *self.lock() = None;
    }

    /// Email of the pending pair, if any.
    pub fn pending_email(&self) -> Option<Email> {
        self.lock().as_ref().map(|entry| entry.email.clone())
    }

    /// Whether generated codes are demo values.
    pub fn issues_demo_codes(&self) -> bool {
        self.generator.is_demo()
    }
}

impl fmt::Debug for OneTimeCodeSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OneTimeCodeSession")
            .field("pending_email", &self.pending_email())
            .finish_non_exhaustive()
    }
}

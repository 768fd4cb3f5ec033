//! Identity data model.
//!
//! An [`Identity`] is the account record a session is bound to. Its serde
//! form is the persisted wire format for both the session record and the
//! signup ledger, so field names follow the camelCase JSON the key-value
//! store has always held.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::institute::InstituteDomainRecord;

/// Badge granted to every identity created through signup.
pub const NEW_MEMBER_BADGE: &str = "new_member";

/// Validation errors raised while constructing identity components.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityValidationError {
    /// Identifier was blank.
    #[error("identity id must not be empty")]
    EmptyId,
    /// Email was blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Display name was blank once trimmed.
    #[error("display name must not be empty")]
    EmptyDisplayName,
    /// Role string did not name a known role.
    #[error("unknown role '{value}'")]
    UnknownRole {
        /// Rejected input.
        value: String,
    },
}

/// Stable identity identifier.
///
/// Seeded identities carry short numeric ids; identities created through
/// signup receive a random UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IdentityId(String);

impl IdentityId {
    /// Validate and construct an [`IdentityId`].
    pub fn new(id: impl Into<String>) -> Result<Self, IdentityValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(IdentityValidationError::EmptyId);
        }
        Ok(Self(id))
    }

    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl AsRef<str> for IdentityId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<IdentityId> for String {
    fn from(value: IdentityId) -> Self {
        value.0
    }
}

impl TryFrom<String> for IdentityId {
    type Error = IdentityValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Email address used as the login handle.
///
/// ## Invariants
/// - Surrounding whitespace is trimmed and the remainder is non-empty.
/// - Case is preserved; lookups compare exactly as stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`].
    ///
    /// # Examples
    /// ```
    /// use nexus::domain::Email;
    ///
    /// let email = Email::new(" john.doe@iitd.ac.in ").unwrap();
    /// assert_eq!(email.as_ref(), "john.doe@iitd.ac.in");
    /// assert_eq!(email.domain(), Some("iitd.ac.in"));
    /// ```
    pub fn new(email: impl AsRef<str>) -> Result<Self, IdentityValidationError> {
        let trimmed = email.as_ref().trim();
        if trimmed.is_empty() {
            return Err(IdentityValidationError::EmptyEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Segment after the first `@`, up to any further `@`.
    pub fn domain(&self) -> Option<&str> {
        self.0.split('@').nth(1)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = IdentityValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Platform role of an identity, also the dashboard perspective.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Graduated member of an institute.
    #[default]
    Alumni,
    /// Currently enrolled student.
    Student,
    /// Recruiter or company representative.
    Employer,
    /// Institute administrator.
    Admin,
}

impl Role {
    /// Roles in role-switcher order.
    pub const ALL: [Self; 4] = [Self::Alumni, Self::Student, Self::Employer, Self::Admin];

    /// Wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Alumni => "alumni",
            Self::Student => "student",
            Self::Employer => "employer",
            Self::Admin => "admin",
        }
    }

    /// Human-facing label used by the role switcher.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Alumni => "Alumni",
            Self::Student => "Student",
            Self::Employer => "Employer",
            Self::Admin => "Institute Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = IdentityValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == value)
            .ok_or_else(|| IdentityValidationError::UnknownRole {
                value: value.to_owned(),
            })
    }
}

/// Verification progress of an identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    /// No verification evidence.
    #[default]
    Unverified,
    /// Verification requested but not yet confirmed.
    Pending,
    /// Verified, for example through an institute email domain.
    Verified,
}

/// Account record bound to a session.
///
/// ## Invariants
/// - `is_verified` is true exactly when `verification_status` is
///   [`VerificationStatus::Verified`] for identities created by
///   [`Identity::register`]; seeded records are trusted as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Stable identifier.
    pub id: IdentityId,
    /// Login email, unique among seeded identities.
    pub email: Email,
    /// Name shown to other members.
    #[serde(rename = "name")]
    pub display_name: String,
    /// Platform role.
    pub role: Role,
    /// Optional contact number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Verification flag.
    pub is_verified: bool,
    /// Verification progress.
    pub verification_status: VerificationStatus,
    /// Institute display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institute: Option<String>,
    /// Institute roll number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll_number: Option<String>,
    /// Graduation year for alumni.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graduation_year: Option<u16>,
    /// Reputation score.
    pub points: u32,
    /// Badge labels in award order.
    pub badges: Vec<String>,
}

impl Identity {
    /// Build the identity created by a signup.
    ///
    /// `institute` is the record matching the email domain, if any; a match
    /// verifies the identity and supplies the institute name when the
    /// profile did not name one.
    pub fn register(
        id: IdentityId,
        profile: SignupProfile,
        institute: Option<&InstituteDomainRecord>,
    ) -> Self {
        let SignupProfile {
            email,
            display_name,
            role,
            phone,
            institute: named_institute,
            roll_number,
            graduation_year,
        } = profile;
        let verification_status = if institute.is_some() {
            VerificationStatus::Verified
        } else {
            VerificationStatus::Unverified
        };

        Self {
            id,
            email,
            display_name,
            role,
            phone,
            is_verified: institute.is_some(),
            verification_status,
            institute: named_institute.or_else(|| institute.map(|record| record.name.clone())),
            roll_number,
            graduation_year,
            points: 0,
            badges: vec![NEW_MEMBER_BADGE.to_owned()],
        }
    }
}

/// Validated signup form.
///
/// Construction is the validation step: a profile that exists always has a
/// non-empty email and display name, so signup never persists partial data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupProfile {
    email: Email,
    display_name: String,
    role: Role,
    phone: Option<String>,
    institute: Option<String>,
    roll_number: Option<String>,
    graduation_year: Option<u16>,
}

impl SignupProfile {
    /// Validate the required fields.
    ///
    /// # Examples
    /// ```
    /// use nexus::domain::{IdentityValidationError, SignupProfile};
    ///
    /// let err = SignupProfile::new("ada@example.com", "  ").unwrap_err();
    /// assert_eq!(err, IdentityValidationError::EmptyDisplayName);
    /// ```
    pub fn new(
        email: impl AsRef<str>,
        display_name: impl AsRef<str>,
    ) -> Result<Self, IdentityValidationError> {
        let email = Email::new(email)?;
        let display_name = display_name.as_ref().trim();
        if display_name.is_empty() {
            return Err(IdentityValidationError::EmptyDisplayName);
        }

        Ok(Self {
            email,
            display_name: display_name.to_owned(),
            role: Role::default(),
            phone: None,
            institute: None,
            roll_number: None,
            graduation_year: None,
        })
    }

    /// Set the requested role (defaults to alumni).
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Attach a phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Name the institute explicitly.
    pub fn with_institute(mut self, institute: impl Into<String>) -> Self {
        self.institute = Some(institute.into());
        self
    }

    /// Attach an institute roll number.
    pub fn with_roll_number(mut self, roll_number: impl Into<String>) -> Self {
        self.roll_number = Some(roll_number.into());
        self
    }

    /// Attach a graduation year.
    pub fn with_graduation_year(mut self, year: u16) -> Self {
        self.graduation_year = Some(year);
        self
    }

    /// Email the identity will log in with.
    pub fn email(&self) -> &Email {
        &self.email
    }
}

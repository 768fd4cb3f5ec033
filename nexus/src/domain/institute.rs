//! Institute reference data used for email-domain verification.

use serde::{Deserialize, Serialize};

use super::identity::Email;

/// Institute whose email domain verifies members automatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct InstituteDomainRecord {
    /// Stable identifier.
    pub id: String,
    /// Display name, e.g. `IIT Delhi`.
    pub name: String,
    /// Email domain, e.g. `iitd.ac.in`.
    pub domain: String,
    /// Short code, e.g. `IITD`.
    pub code: String,
}

impl InstituteDomainRecord {
    /// Whether `email` belongs to this institute's domain.
    ///
    /// # Examples
    /// ```
    /// use nexus::domain::{Email, InstituteDomainRecord};
    ///
    /// let record = InstituteDomainRecord {
    ///     id: "4".into(),
    ///     name: "IIT Kanpur".into(),
    ///     domain: "iitk.ac.in".into(),
    ///     code: "IITK".into(),
    /// };
    /// assert!(record.covers(&Email::new("a@iitk.ac.in").unwrap()));
    /// assert!(!record.covers(&Email::new("a@cse.iitk.ac.in").unwrap()));
    /// ```
    pub fn covers(&self, email: &Email) -> bool {
        email.domain() == Some(self.domain.as_str())
    }
}

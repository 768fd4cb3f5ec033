//! Domain primitives, services, and the ports they depend on.
//!
//! Nothing in here performs I/O directly. Storage, the simulated backend,
//! code generation, and catalogue data all arrive through [`ports`].

pub mod catalogue;
pub mod dashboard;
pub mod error;
pub mod identity;
pub mod institute;
pub mod one_time_code;
pub mod ports;
pub mod session;

pub use self::dashboard::DashboardRole;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identity::{
    Email, Identity, IdentityId, IdentityValidationError, NEW_MEMBER_BADGE, Role, SignupProfile,
    VerificationStatus,
};
pub use self::institute::InstituteDomainRecord;
pub use self::one_time_code::{
    CodeIssue, DEMO_CODE, OneTimeCode, OneTimeCodeSession, OneTimeCodeValidationError,
    PendingVerification,
};
pub use self::session::{
    CodeDispatch, LoginMethod, SessionManager, SessionManagerPorts, SessionPolicy,
};

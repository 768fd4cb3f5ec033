//! Port modelling the round trip to a backend that does not exist yet.
//!
//! Code issuance, code verification, and signup would each be a network call
//! in a deployed system. The session layer awaits this port before touching
//! state so callers see realistic suspension and a failure path that is
//! distinct from "email not registered".

use async_trait::async_trait;

use super::define_port_error;

/// Simulated endpoint a round trip is made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendCall {
    /// Ask the backend to deliver a one-time code.
    SendCode,
    /// Submit a one-time code for verification.
    VerifyCode,
    /// Register a new identity.
    Signup,
}

impl BackendCall {
    /// Stable name for logs and error details.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SendCode => "send_code",
            Self::VerifyCode => "verify_code",
            Self::Signup => "signup",
        }
    }
}

define_port_error! {
    /// Transport failures, all of which are worth retrying.
    pub enum TransportError {
        /// The backend could not be reached.
        Unreachable {
            /// Why the backend could not be reached.
            message: String,
        } => "backend unreachable: {message}",
        /// The round trip exceeded the configured timeout.
        TimedOut {
            /// Timeout that elapsed, in milliseconds.
            millis: u64,
        } => "backend call timed out after {millis} ms",
    }
}

/// Round trip to the (simulated) backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackendTransport: Send + Sync {
    /// Complete one round trip for `call`.
    async fn round_trip(&self, call: BackendCall) -> Result<(), TransportError>;
}

//! NetworkNexus platform core.
//!
//! Email plus one-time-code sign-in, signup with institute-domain
//! verification, a persisted session, and the filter engine behind the job
//! board and communities pages.

pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod outbound;

pub use bootstrap::{BootstrapError, Nexus, build, build_with_storage};
pub use config::NexusSettings;

//! Port supplying the read-only catalogue collections.

use crate::domain::catalogue::{Community, Job};

use super::define_port_error;

define_port_error! {
    /// Errors raised while loading catalogue collections.
    pub enum CatalogueSourceError {
        /// A collection could not be decoded.
        Decode {
            /// Collection name, `jobs` or `communities`.
            collection: String,
            /// Decoder failure description.
            message: String,
        } => "failed to decode {collection} catalogue: {message}",
    }
}

/// Static job and community records.
pub trait CatalogueSource: Send + Sync {
    /// Every job posting, active or not.
    fn jobs(&self) -> Result<Vec<Job>, CatalogueSourceError>;

    /// Every community.
    fn communities(&self) -> Result<Vec<Community>, CatalogueSourceError>;
}

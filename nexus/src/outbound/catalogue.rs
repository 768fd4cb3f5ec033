//! Catalogue collections bundled with the binary.

use serde::de::DeserializeOwned;

use crate::domain::catalogue::{Community, Job};
use crate::domain::ports::{CatalogueSource, CatalogueSourceError};

const JOBS: &str = include_str!("../../fixtures/jobs.json");
const COMMUNITIES: &str = include_str!("../../fixtures/communities.json");

/// [`CatalogueSource`] over JSON fixtures.
#[derive(Debug, Clone, Copy)]
pub struct BundledCatalogue {
    jobs: &'static str,
    communities: &'static str,
}

impl BundledCatalogue {
    /// Catalogue over the fixtures compiled into the binary.
    pub const fn new() -> Self {
        Self::from_json(JOBS, COMMUNITIES)
    }

    /// Catalogue over caller-supplied JSON arrays.
    pub const fn from_json(jobs: &'static str, communities: &'static str) -> Self {
        Self { jobs, communities }
    }
}

impl Default for BundledCatalogue {
    fn default() -> Self {
        Self::new()
    }
}

fn decode<T: DeserializeOwned>(
    collection: &str,
    raw: &str,
) -> Result<Vec<T>, CatalogueSourceError> {
    serde_json::from_str(raw)
        .map_err(|err| CatalogueSourceError::decode(collection, err.to_string()))
}

impl CatalogueSource for BundledCatalogue {
    fn jobs(&self) -> Result<Vec<Job>, CatalogueSourceError> {
        decode("jobs", self.jobs)
    }

    fn communities(&self) -> Result<Vec<Community>, CatalogueSourceError> {
        decode("communities", self.communities)
    }
}

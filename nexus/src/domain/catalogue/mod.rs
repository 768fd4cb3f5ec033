//! Read-only catalogues and the filter engine shared by every collection.
//!
//! A catalogue page narrows a static record set with a free-text query and
//! one or more categorical facets. Each collection declares which fields are
//! searchable and which facets it exposes through [`CatalogueRecord`]; the
//! matching rules live here once.
//!
//! ## Matching rules
//! - The lower-cased query must be a substring of at least one lower-cased
//!   searchable field. An empty query matches everything.
//! - Every facet selection must be [`FacetSelection::All`] or equal the
//!   record's facet value exactly.
//! - Records reporting themselves inactive never match.
//!
//! Filtering preserves input order and never fails; a facet value no record
//! carries simply yields an empty result.

mod community;
mod job;

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

pub use community::{Community, CommunityFacet};
pub use job::{
    Company, Job, JobBoardStats, JobFacet, JobLocation, JobPoster, Salary, SalaryPeriod,
};

/// Record type a catalogue page can filter.
pub trait CatalogueRecord {
    /// Categorical fields exposed as drop-downs.
    type Facet: Copy;

    /// Fields the free-text query is matched against.
    fn search_fields(&self) -> Vec<&str>;

    /// Value of `facet` on this record.
    fn facet_value(&self, facet: Self::Facet) -> &str;

    /// Whether the record is listed at all.
    fn is_active(&self) -> bool {
        true
    }
}

/// Selected option of one facet drop-down.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum FacetSelection {
    /// No restriction.
    #[default]
    All,
    /// Only records whose facet equals this value.
    Only(String),
}

impl FacetSelection {
    /// Wire value of the unrestricted option.
    pub const ALL: &'static str = "all";

    /// Whether `value` satisfies the selection.
    pub fn admits(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == value,
        }
    }
}

impl From<&str> for FacetSelection {
    fn from(value: &str) -> Self {
        if value == Self::ALL {
            Self::All
        } else {
            Self::Only(value.to_owned())
        }
    }
}

impl From<Option<String>> for FacetSelection {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::All, |selected| Self::from(selected.as_str()))
    }
}

impl FromStr for FacetSelection {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(value))
    }
}

impl fmt::Display for FacetSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(Self::ALL),
            Self::Only(selected) => f.write_str(selected),
        }
    }
}

/// Query text plus facet selections for one collection.
///
/// # Examples
/// ```
/// use nexus::domain::catalogue::{CatalogueFilter, Community, CommunityFacet};
///
/// let filter = CatalogueFilter::new("ALUMNI").with_facet(CommunityFacet::Kind, "institute");
/// let communities: Vec<Community> = Vec::new();
/// assert!(filter.apply(&communities).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueFilter<F> {
    needle: String,
    facets: Vec<(F, FacetSelection)>,
}

impl<F: Copy> CatalogueFilter<F> {
    /// Filter on `query` with every facet unrestricted.
    pub fn new(query: impl AsRef<str>) -> Self {
        Self {
            needle: query.as_ref().to_lowercase(),
            facets: Vec::new(),
        }
    }

    /// Restrict `facet` to `selection`.
    pub fn with_facet(mut self, facet: F, selection: impl Into<FacetSelection>) -> Self {
        self.facets.push((facet, selection.into()));
        self
    }

    /// Whether `record` passes the query, every facet, and the active flag.
    pub fn matches<R>(&self, record: &R) -> bool
    where
        R: CatalogueRecord<Facet = F>,
    {
        record.is_active()
            && self.matches_query(record)
            && self
                .facets
                .iter()
                .all(|(facet, selection)| selection.admits(record.facet_value(*facet)))
    }

    fn matches_query<R>(&self, record: &R) -> bool
    where
        R: CatalogueRecord<Facet = F>,
    {
        self.needle.is_empty()
            || record
                .search_fields()
                .into_iter()
                .any(|field| field.to_lowercase().contains(&self.needle))
    }

    /// Matching records in input order.
    pub fn apply<'a, R, I>(&self, records: I) -> Vec<&'a R>
    where
        R: CatalogueRecord<Facet = F> + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        records
            .into_iter()
            .filter(|record| self.matches(*record))
            .collect()
    }
}

/// Filter `records` by `query` and `facets` in one call.
pub fn filter<'a, R>(
    records: &'a [R],
    query: &str,
    facets: &[(R::Facet, FacetSelection)],
) -> Vec<&'a R>
where
    R: CatalogueRecord,
{
    facets
        .iter()
        .cloned()
        .fold(CatalogueFilter::new(query), |filter, (facet, selection)| {
            filter.with_facet(facet, selection)
        })
        .apply(records)
}

/// Distinct values of `facet` in first-seen order.
///
/// Inactive records contribute too, so the options stay stable while the
/// listing changes.
pub fn facet_values<R>(records: &[R], facet: R::Facet) -> Vec<String>
where
    R: CatalogueRecord,
{
    let mut seen: Vec<String> = Vec::new();
    for record in records {
        let value = record.facet_value(facet);
        if !seen.iter().any(|known| known == value) {
            seen.push(value.to_owned());
        }
    }
    seen
}

//! Job postings.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::CatalogueRecord;

/// Hiring company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Company name, searchable.
    pub name: String,
    /// Logo URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// Where the role is based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobLocation {
    /// City, exposed as a facet.
    pub city: String,
    /// State or region.
    pub state: String,
    /// Fully remote.
    pub is_remote: bool,
    /// Mix of remote and on-site.
    pub hybrid: bool,
}

/// Pay interval of a salary band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalaryPeriod {
    /// Stipend-style monthly pay.
    Monthly,
    /// Annual package.
    Yearly,
}

/// Salary band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Salary {
    /// Lower bound.
    pub min: u64,
    /// Upper bound.
    pub max: u64,
    /// ISO currency code.
    pub currency: String,
    /// Pay interval.
    pub period: SalaryPeriod,
}

/// Who posted the job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPoster {
    /// Poster's display name.
    pub name: String,
    /// Whether the poster is an alumnus.
    pub is_alumni: bool,
}

/// A job posting on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Stable identifier.
    pub id: String,
    /// Role title, searchable.
    pub title: String,
    /// Hiring company.
    pub company: Company,
    /// Free-form description.
    pub description: String,
    /// Employment type such as `Full-time` or `Internship`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Location details.
    pub location: JobLocation,
    /// Experience requirement.
    pub experience: String,
    /// Salary band.
    pub salary: Salary,
    /// Required skills, each searchable.
    pub skills: Vec<String>,
    /// Number of applications received.
    pub applications: u32,
    /// Inactive postings are never listed.
    pub is_active: bool,
    /// Poster details.
    pub posted_by: JobPoster,
}

/// Facets on the job board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobFacet {
    /// Employment type.
    Kind,
    /// Location city.
    City,
}

impl CatalogueRecord for Job {
    type Facet = JobFacet;

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.company.name.as_str()];
        fields.extend(self.skills.iter().map(String::as_str));
        fields
    }

    fn facet_value(&self, facet: JobFacet) -> &str {
        match facet {
            JobFacet::Kind => &self.kind,
            JobFacet::City => &self.location.city,
        }
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

/// Headline figures shown above the job listing.
///
/// Computed over the whole board, not the filtered view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobBoardStats {
    /// Postings currently listed.
    pub active_jobs: usize,
    /// Distinct hiring companies.
    pub companies: usize,
    /// Applications across every posting.
    pub applications: u64,
    /// Postings made by alumni.
    pub alumni_posted: usize,
}

impl JobBoardStats {
    /// Summarise `jobs`.
    pub fn from_jobs(jobs: &[Job]) -> Self {
        let companies: HashSet<&str> = jobs.iter().map(|job| job.company.name.as_str()).collect();
        Self {
            active_jobs: jobs.iter().filter(|job| job.is_active).count(),
            companies: companies.len(),
            applications: jobs.iter().map(|job| u64::from(job.applications)).sum(),
            alumni_posted: jobs.iter().filter(|job| job.posted_by.is_alumni).count(),
        }
    }
}

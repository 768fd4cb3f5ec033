//! Behaviour tests for job board and community search over bundled records.

use std::cell::RefCell;

use nexus::domain::catalogue::{
    CatalogueFilter, Community, CommunityFacet, FacetSelection, Job, JobBoardStats, JobFacet,
};
use nexus::domain::ports::CatalogueSource;
use nexus::outbound::catalogue::BundledCatalogue;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Default)]
struct CatalogueWorld {
    jobs: RefCell<Vec<Job>>,
    communities: RefCell<Vec<Community>>,
    listed: RefCell<Vec<String>>,
}

impl CatalogueWorld {
    fn list_jobs(&self, filter: &CatalogueFilter<JobFacet>) {
        let jobs = self.jobs.borrow();
        *self.listed.borrow_mut() = filter
            .apply(jobs.iter())
            .into_iter()
            .map(|job| job.id.clone())
            .collect();
    }

    fn list_communities(&self, filter: &CatalogueFilter<CommunityFacet>) {
        let communities = self.communities.borrow();
        *self.listed.borrow_mut() = filter
            .apply(communities.iter())
            .into_iter()
            .map(|community| community.id.clone())
            .collect();
    }

    fn stats(&self) -> JobBoardStats {
        JobBoardStats::from_jobs(&self.jobs.borrow())
    }
}

fn expected_ids(ids: &str) -> Vec<String> {
    ids.split(',').map(str::to_owned).collect()
}

#[fixture]
fn world() -> CatalogueWorld {
    CatalogueWorld::default()
}

#[given("the bundled job board")]
fn the_bundled_job_board(world: &CatalogueWorld) {
    *world.jobs.borrow_mut() = BundledCatalogue::new().jobs().expect("bundled jobs decode");
}

#[given("the bundled communities")]
fn the_bundled_communities(world: &CatalogueWorld) {
    *world.communities.borrow_mut() = BundledCatalogue::new()
        .communities()
        .expect("bundled communities decode");
}

#[when("the job board is opened")]
fn the_job_board_is_opened(world: &CatalogueWorld) {
    world.list_jobs(&CatalogueFilter::new(""));
}

#[when("jobs are searched for \"{query}\"")]
fn jobs_are_searched_for(world: &CatalogueWorld, query: String) {
    world.list_jobs(&CatalogueFilter::new(query));
}

#[when("jobs are filtered by type \"{kind}\" and city \"{city}\"")]
fn jobs_are_filtered(world: &CatalogueWorld, kind: String, city: String) {
    let filter = CatalogueFilter::new("")
        .with_facet(JobFacet::Kind, FacetSelection::from(kind.as_str()))
        .with_facet(JobFacet::City, FacetSelection::from(city.as_str()));
    world.list_jobs(&filter);
}

#[when("communities are filtered by type \"{kind}\"")]
fn communities_are_filtered(world: &CatalogueWorld, kind: String) {
    let filter = CatalogueFilter::new("")
        .with_facet(CommunityFacet::Kind, FacetSelection::from(kind.as_str()));
    world.list_communities(&filter);
}

#[when("communities are searched for \"{query}\"")]
fn communities_are_searched_for(world: &CatalogueWorld, query: String) {
    world.list_communities(&CatalogueFilter::new(query));
}

#[then("the listed job ids are \"{ids}\"")]
fn the_listed_job_ids_are(world: &CatalogueWorld, ids: String) {
    assert_eq!(*world.listed.borrow(), expected_ids(&ids));
}

#[then("the listed community ids are \"{ids}\"")]
fn the_listed_community_ids_are(world: &CatalogueWorld, ids: String) {
    assert_eq!(*world.listed.borrow(), expected_ids(&ids));
}

#[then("no jobs are listed")]
fn no_jobs_are_listed(world: &CatalogueWorld) {
    assert!(world.listed.borrow().is_empty());
}

#[then("the board shows {active} active jobs from {companies} companies")]
fn the_board_shows_jobs_and_companies(world: &CatalogueWorld, active: usize, companies: usize) {
    let stats = world.stats();
    assert_eq!(stats.active_jobs, active);
    assert_eq!(stats.companies, companies);
}

#[then("the board shows {applications} applications and {alumni} alumni postings")]
fn the_board_shows_applications(world: &CatalogueWorld, applications: u64, alumni: usize) {
    let stats = world.stats();
    assert_eq!(stats.applications, applications);
    assert_eq!(stats.alumni_posted, alumni);
}

#[scenario(
    path = "tests/features/catalogue.feature",
    name = "The job board lists every active posting by default"
)]
fn job_board_lists_active_postings(world: CatalogueWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/catalogue.feature",
    name = "Job search ignores case across titles, companies, and skills"
)]
fn job_search_ignores_case(world: CatalogueWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/catalogue.feature",
    name = "Inactive postings stay hidden even when they match"
)]
fn inactive_postings_stay_hidden(world: CatalogueWorld) {
    drop(world);
}

#[scenario(path = "tests/features/catalogue.feature", name = "Job facets narrow the board")]
fn job_facets_narrow_the_board(world: CatalogueWorld) {
    drop(world);
}

#[scenario(path = "tests/features/catalogue.feature", name = "Facet values are matched exactly")]
fn facet_values_are_matched_exactly(world: CatalogueWorld) {
    drop(world);
}

#[scenario(path = "tests/features/catalogue.feature", name = "Job board headline figures")]
fn job_board_headline_figures(world: CatalogueWorld) {
    drop(world);
}

#[scenario(path = "tests/features/catalogue.feature", name = "Communities filter by type")]
fn communities_filter_by_type(world: CatalogueWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/catalogue.feature",
    name = "Community search covers descriptions"
)]
fn community_search_covers_descriptions(world: CatalogueWorld) {
    drop(world);
}

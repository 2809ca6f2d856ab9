//! Shared test fixtures for integration tests.
//!
//! # Available Fixtures
//!
//! - `directory`: a small in-memory directory covering every ranking mode
//!
//! [`FeedWorkspace`] writes any collection to a temp feed file and loads a
//! `DirectoryState` from it, for tool handler and reload tests.

use robeson_directory::config::{Config, DataConfig};
use robeson_directory::{Category, DirectoryState, OrganizationRecord};
use rstest::fixture;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Record with the fields the fixtures care about; everything else empty.
#[allow(dead_code)] // Used by some integration test crates only
pub fn org(
    id: &str,
    name: &str,
    category: Category,
    address: &str,
    services: &str,
) -> OrganizationRecord {
    let mut record = OrganizationRecord::new(id, name, category);
    record.address = address.to_string();
    record.services_offered = services.to_string();
    record
}

/// A directory small enough to reason about by hand.
#[allow(dead_code)] // Used by some integration test crates only
#[fixture]
pub fn directory() -> Vec<OrganizationRecord> {
    let mut hospital = org(
        "hospital",
        "UNC Health Southeastern Hospital",
        Category::CrisisServices,
        "300 W 27th St, Lumberton, NC 28358",
        "24/7 emergency room and inpatient care",
    );
    hospital.crisis_service = true;

    let mut lifeline = org(
        "lifeline",
        "988 Suicide & Crisis Lifeline",
        Category::CrisisServices,
        "",
        "Call or text 988 any time",
    );
    lifeline.crisis_service = true;

    let mut shelter = org(
        "shelter",
        "Safe Haven Shelter",
        Category::CrisisServices,
        "PO Box 14, Pembroke, NC",
        "Domestic violence shelter and advocacy",
    );
    shelter.crisis_service = true;

    let mut lodge = org(
        "lodge",
        "Pine Lodge Community Center",
        Category::CommunityServices,
        "",
        "Meeting space",
    );
    lodge.latitude = Some(34.6500);
    lodge.longitude = Some(-79.1000);

    vec![
        hospital,
        lifeline,
        shelter,
        org(
            "pawss",
            "PAWSS",
            Category::CommunityServices,
            "120 Main St, Pembroke, NC 28372",
            "Pet food and spay/neuter assistance",
        ),
        org(
            "rhcc",
            "Robeson Health Care Corporation",
            Category::HealthcareServices,
            "60 Commerce Rd, Pembroke, NC 28372",
            "Primary care and dental",
        ),
        org(
            "school",
            "Pembroke Elementary School",
            Category::Education,
            "1 School Dr, Pembroke, NC",
            "Kindergarten through fifth grade",
        ),
        org(
            "support",
            "Caregiver Support Group",
            Category::CommunityServices,
            "Lumberton, NC",
            "Monthly meetings for family caregivers",
        ),
        org(
            "pantry",
            "Grace Food Pantry",
            Category::FoodServices,
            "200 Elm St, Lumberton, NC",
            "Groceries for families",
        ),
        org(
            "sic",
            "Southeastern Integrated Care",
            Category::MentalHealthSubstanceUse,
            "450 Main St, Lumberton, NC",
            "Counseling, psychiatric care and depression treatment",
        ),
        org(
            "aa",
            "Robeson County Alcoholics Anonymous",
            Category::MentalHealthSubstanceUse,
            "Red Springs, NC",
            "Weekly 12-step meetings",
        ),
        org(
            "housing",
            "Lumberton Housing Authority",
            Category::HousingServices,
            "200 Elm St, Lumberton, NC",
            "Public housing and rent assistance",
        ),
        org(
            "seniors",
            "Pembroke Area Senior Center",
            Category::CommunityServices,
            "210 Union Chapel Rd, Pembroke, NC 28372",
            "Activities and lunch for older adults",
        ),
        lodge,
    ]
}

/// A temp directory holding a feed file and the state loaded from it.
#[allow(dead_code)] // Used by some integration test crates only
pub struct FeedWorkspace {
    _temp: TempDir,
    pub feed: PathBuf,
    pub state: DirectoryState,
}

#[allow(dead_code)] // Used by some integration test crates only
impl FeedWorkspace {
    /// Write `organizations` as a JSON record feed and load it.
    pub async fn new(organizations: &[OrganizationRecord]) -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let feed = temp.path().join("directory.json");
        write_feed(&feed, organizations);
        let state = DirectoryState::load(&config_for(&feed)).await;
        Self {
            _temp: temp,
            feed,
            state,
        }
    }
}

/// Default configuration pointing at `feed`.
#[allow(dead_code)] // Used by some integration test crates only
pub fn config_for(feed: &Path) -> Config {
    Config {
        data: DataConfig {
            path: feed.to_path_buf(),
        },
        ..Config::default()
    }
}

#[allow(dead_code)] // Used by some integration test crates only
pub fn write_feed(path: &Path, organizations: &[OrganizationRecord]) {
    let json = serde_json::to_string_pretty(organizations).expect("Failed to serialize feed");
    std::fs::write(path, json).expect("Failed to write feed");
}

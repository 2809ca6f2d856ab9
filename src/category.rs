//! Canonical category labels and the legacy label migration table.
//!
//! This is the single source of truth for category names. The feed loader
//! uses it to normalize incoming labels and the search keyword table is keyed
//! by [`Category`], so the two cannot drift apart.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category assigned when a label is unknown and cannot be inferred.
pub const FALLBACK_CATEGORY: Category = Category::CommunityServices;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Category {
    CrisisServices,
    FoodServices,
    HousingServices,
    HealthcareServices,
    MentalHealthSubstanceUse,
    GovernmentServices,
    TribalServices,
    CommunityServices,
    CommunityGroupsDevelopment,
    FaithBasedServices,
    LegalServices,
    LawEnforcement,
    Education,
    Pharmacy,
    CulturalInformationServices,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 15] = [
        Self::CrisisServices,
        Self::FoodServices,
        Self::HousingServices,
        Self::HealthcareServices,
        Self::MentalHealthSubstanceUse,
        Self::GovernmentServices,
        Self::TribalServices,
        Self::CommunityServices,
        Self::CommunityGroupsDevelopment,
        Self::FaithBasedServices,
        Self::LegalServices,
        Self::LawEnforcement,
        Self::Education,
        Self::Pharmacy,
        Self::CulturalInformationServices,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::CrisisServices => "Crisis Services",
            Self::FoodServices => "Food Services",
            Self::HousingServices => "Housing Services",
            Self::HealthcareServices => "Healthcare Services",
            Self::MentalHealthSubstanceUse => "Mental Health & Substance Use",
            Self::GovernmentServices => "Government Services",
            Self::TribalServices => "Tribal Services",
            Self::CommunityServices => "Community Services",
            Self::CommunityGroupsDevelopment => "Community Groups & Development",
            Self::FaithBasedServices => "Faith-Based Services",
            Self::LegalServices => "Legal Services",
            Self::LawEnforcement => "Law Enforcement",
            Self::Education => "Education",
            Self::Pharmacy => "Pharmacy",
            Self::CulturalInformationServices => "Cultural & Information Services",
        }
    }

    /// URL slug, e.g. "Mental Health & Substance Use" → "mental-health-and-substance-use".
    pub fn slug(self) -> String {
        slugify(self.label())
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        let slug = slug.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| c.slug() == slug)
    }

    /// Exact (case-insensitive) match against current labels only.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(label))
    }

    /// Resolve a label or slug typed by a user. Falls back to the migration table.
    pub fn parse_filter(input: &str) -> Option<Self> {
        Self::from_label(input)
            .or_else(|| Self::from_slug(input))
            .or_else(|| migrate_label(input))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        normalize(&label, "", "")
    }
}

impl From<Category> for &'static str {
    fn from(category: Category) -> Self {
        category.label()
    }
}

/// Legacy labels from older exports and their current replacements.
const MIGRATION_TABLE: &[(&str, Category)] = &[
    ("Healthcare/Treatment", Category::HealthcareServices),
    ("Healthcare/Medical", Category::HealthcareServices),
    ("Healthcare/Public Health", Category::HealthcareServices),
    ("Mental Health", Category::MentalHealthSubstanceUse),
    ("Mental Health & Addiction", Category::MentalHealthSubstanceUse),
    ("Government/Tribal Services", Category::GovernmentServices),
    ("Government & Tribal Services", Category::GovernmentServices),
    ("Community Organizations", Category::CommunityGroupsDevelopment),
    ("Community Development", Category::CommunityGroupsDevelopment),
    ("Faith-Based Programs", Category::FaithBasedServices),
    ("Cultural Services", Category::CulturalInformationServices),
    ("Labor Union", Category::CulturalInformationServices),
    ("Information/Referral", Category::CulturalInformationServices),
];

/// Legacy catch-all buckets whose members are redistributed by keyword.
const REDISTRIBUTED_LABELS: &[&str] = &["Free Programs", "Fee-Based Programs"];

/// Keyword hints used to redistribute catch-all buckets, checked in order.
const REDISTRIBUTION_HINTS: &[(&[&str], Category)] = &[
    (&["health"], Category::HealthcareServices),
    (&["church", "ministry"], Category::FaithBasedServices),
    (&["school", "education"], Category::Education),
    (&["housing"], Category::HousingServices),
    (&["legal"], Category::LegalServices),
    (&["food", "pantry"], Category::FoodServices),
];

/// Map a legacy label through the migration table.
pub fn migrate_label(label: &str) -> Option<Category> {
    let label = label.trim();
    MIGRATION_TABLE
        .iter()
        .find(|(legacy, _)| legacy.eq_ignore_ascii_case(label))
        .map(|(_, category)| *category)
}

/// Normalize any incoming label to a current category.
///
/// Order: current label, migration table, keyword redistribution of the
/// legacy program buckets (using the organization's name and services),
/// then [`FALLBACK_CATEGORY`]. Never fails.
pub fn normalize(label: &str, name: &str, services: &str) -> Category {
    if let Some(category) = Category::from_label(label) {
        return category;
    }
    if let Some(category) = migrate_label(label) {
        return category;
    }

    let label = label.trim();
    if REDISTRIBUTED_LABELS
        .iter()
        .any(|bucket| bucket.eq_ignore_ascii_case(label))
    {
        let name = name.to_lowercase();
        let services = services.to_lowercase();
        for (hints, category) in REDISTRIBUTION_HINTS {
            // "health" is the only hint that also looks at services, as the
            // name alone misses most clinics filed as free programs.
            let in_services = *category == Category::HealthcareServices
                && hints.iter().any(|h| services.contains(h));
            if in_services || hints.iter().any(|h| name.contains(h)) {
                return *category;
            }
        }
        return FALLBACK_CATEGORY;
    }

    tracing::debug!(
        "Unknown category '{}', using '{}'",
        label,
        FALLBACK_CATEGORY
    );
    FALLBACK_CATEGORY
}

/// Lowercase, spaces to hyphens, `&` to "and", drop everything else.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.trim().to_lowercase().chars() {
        match c {
            c if c.is_whitespace() => {
                if !slug.ends_with('-') {
                    slug.push('-');
                }
            }
            '&' => slug.push_str("and"),
            c if c.is_ascii_alphanumeric() || c == '-' => slug.push(c),
            _ => {}
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("Healthcare/Medical", Category::HealthcareServices)]
    #[case("Mental Health & Addiction", Category::MentalHealthSubstanceUse)]
    #[case("mental health", Category::MentalHealthSubstanceUse)]
    #[case("Labor Union", Category::CulturalInformationServices)]
    #[case("Faith-Based Programs", Category::FaithBasedServices)]
    fn legacy_labels_migrate(#[case] label: &str, #[case] expected: Category) {
        check!(normalize(label, "", "") == expected);
    }

    #[test]
    fn current_labels_are_kept() {
        for category in Category::ALL {
            check!(normalize(category.label(), "", "") == category);
        }
    }

    #[rstest]
    #[case("Robeson Health Outreach", "", Category::HealthcareServices)]
    #[case("Free Clinic Day", "primary health screenings", Category::HealthcareServices)]
    #[case("First Baptist Church Closet", "", Category::FaithBasedServices)]
    #[case("After School Tutoring", "", Category::Education)]
    #[case("Saturday Market", "", Category::CommunityServices)]
    fn free_programs_redistribute(
        #[case] name: &str,
        #[case] services: &str,
        #[case] expected: Category,
    ) {
        check!(normalize("Free Programs", name, services) == expected);
    }

    #[test]
    fn unknown_label_falls_back() {
        check!(normalize("Space Travel", "", "") == FALLBACK_CATEGORY);
        check!(normalize("", "", "") == FALLBACK_CATEGORY);
    }

    #[rstest]
    #[case(Category::MentalHealthSubstanceUse, "mental-health-and-substance-use")]
    #[case(Category::FaithBasedServices, "faith-based-services")]
    #[case(Category::CulturalInformationServices, "cultural-and-information-services")]
    fn slugs(#[case] category: Category, #[case] slug: &str) {
        check!(category.slug() == slug);
        check!(Category::from_slug(slug) == Some(category));
    }

    #[test]
    fn filters_accept_labels_slugs_and_legacy_names() {
        check!(Category::parse_filter("food-services") == Some(Category::FoodServices));
        check!(Category::parse_filter("PHARMACY") == Some(Category::Pharmacy));
        check!(Category::parse_filter("Mental Health") == Some(Category::MentalHealthSubstanceUse));
        check!(Category::parse_filter("nonsense").is_none());
    }

    #[test]
    fn serde_uses_labels() {
        let json = serde_json::to_string(&Category::FoodServices).unwrap();
        check!(json == "\"Food Services\"");
        let parsed: Category = serde_json::from_str("\"Healthcare/Medical\"").unwrap();
        check!(parsed == Category::HealthcareServices);
    }
}

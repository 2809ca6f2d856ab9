//! Category overview with record counts.

use crate::category::Category;
use crate::state::DirectoryState;
use crate::types::OrganizationRecord;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ListCategoriesRequest {}

/// Records counted under `category`. Crisis Services counts every
/// crisis-flagged record, wherever it is filed.
pub fn category_count(organizations: &[OrganizationRecord], category: Category) -> usize {
    organizations
        .iter()
        .filter(|org| {
            if category == Category::CrisisServices {
                org.crisis_service
            } else {
                org.category == category
            }
        })
        .count()
}

pub async fn handle_list_categories(
    state: &DirectoryState,
    _request: ListCategoriesRequest,
) -> Result<String, String> {
    let organizations = state.organizations().await;

    let mut output = format!("{} organizations in the directory:\n\n", organizations.len());
    for category in Category::ALL {
        let _ = writeln!(
            output,
            "• {} ({}): {}",
            category,
            category.slug(),
            category_count(&organizations, category)
        );
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn crisis_count_follows_the_flag() {
        let mut flagged = OrganizationRecord::new("1", "Hospital", Category::HealthcareServices);
        flagged.crisis_service = true;
        let filed = OrganizationRecord::new("2", "Hotline", Category::CrisisServices);
        let orgs = vec![flagged, filed];

        check!(category_count(&orgs, Category::CrisisServices) == 1);
        check!(category_count(&orgs, Category::HealthcareServices) == 1);
        check!(category_count(&orgs, Category::Pharmacy) == 0);
    }
}

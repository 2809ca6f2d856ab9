//! Great-circle distances and "near me" ordering.

use super::resolver::AddressResolver;
use crate::category::Category;
use crate::types::{Coordinate, OrganizationRecord};
use std::cmp::Ordering;

/// Mean earth radius in miles.
const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Haversine distance between two points, in miles.
pub fn distance_miles(from: Coordinate, to: Coordinate) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_MILES * c
}

/// Human-readable distance for listings.
pub fn format_distance(miles: f64) -> String {
    if miles < 0.1 {
        "Less than 0.1 miles".to_string()
    } else if miles < 1.0 {
        format!("{:.1} miles", miles)
    } else {
        format!("{} miles", miles.round())
    }
}

/// Filter by category (if any), fill `distance_miles` relative to `origin`,
/// and sort closest first. Records that cannot be located sort last.
///
/// Distances use the unjittered base position, so two records at the same
/// address always report the same distance.
pub fn sort_by_distance(
    organizations: &[OrganizationRecord],
    origin: Coordinate,
    category: Option<Category>,
    resolver: &AddressResolver,
) -> Vec<OrganizationRecord> {
    let mut nearby: Vec<OrganizationRecord> = organizations
        .iter()
        .filter(|org| category.is_none_or(|c| org.category == c))
        .cloned()
        .map(|mut org| {
            org.distance_miles = resolver
                .locate(&org.address, org.coordinates())
                .map(|position| distance_miles(origin, position));
            org
        })
        .collect();

    nearby.sort_by(|a, b| match (a.distance_miles, b.distance_miles) {
        (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.name.cmp(&b.name)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.name.cmp(&b.name),
    });
    nearby
}

/// Category listing without a location: crisis services first, then by name.
pub fn list_category(
    organizations: &[OrganizationRecord],
    category: Option<Category>,
) -> Vec<&OrganizationRecord> {
    let mut listed: Vec<&OrganizationRecord> = organizations
        .iter()
        .filter(|org| category.is_none_or(|c| org.category == c))
        .collect();
    listed.sort_by(|a, b| {
        b.crisis_service
            .cmp(&a.crisis_service)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.id.cmp(&b.id))
    });
    listed
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[test]
    fn lumberton_to_pembroke_is_about_twelve_miles() {
        let lumberton = Coordinate::new(34.6182, -79.0086);
        let pembroke = Coordinate::new(34.6807, -79.1953);
        let miles = distance_miles(lumberton, pembroke);
        check!(miles > 11.0);
        check!(miles < 12.5);
        check!((distance_miles(pembroke, lumberton) - miles).abs() < 1e-9);
    }

    #[test]
    fn zero_distance_to_self() {
        let point = Coordinate::new(34.5, -79.1);
        check!(distance_miles(point, point) == 0.0);
    }

    #[test]
    fn category_listing_puts_crisis_services_first() {
        let mut hotline = OrganizationRecord::new("2", "Zeta Hotline", Category::CommunityServices);
        hotline.crisis_service = true;
        let orgs = vec![
            OrganizationRecord::new("1", "alpha center", Category::CommunityServices),
            hotline,
            OrganizationRecord::new("3", "Beta Pantry", Category::FoodServices),
        ];

        let ids: Vec<&str> = list_category(&orgs, None).iter().map(|o| o.id.as_str()).collect();
        check!(ids == ["2", "1", "3"]);

        let food = list_category(&orgs, Some(Category::FoodServices));
        check!(food.len() == 1);
    }

    #[rstest]
    #[case(0.05, "Less than 0.1 miles")]
    #[case(0.44, "0.4 miles")]
    #[case(3.6, "4 miles")]
    #[case(12.2, "12 miles")]
    fn formatting(#[case] miles: f64, #[case] expected: &str) {
        check!(format_distance(miles) == expected);
    }
}

//! "Near me" listing ordered by distance from the caller.

use super::listing::{parse_category, write_organization};
use crate::geo::{format_distance, sort_by_distance};
use crate::state::DirectoryState;
use crate::types::Coordinate;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NearMeRequest {
    /// Caller latitude in decimal degrees
    pub latitude: f64,
    /// Caller longitude in decimal degrees
    pub longitude: f64,
    /// Only list organizations in this category (label or slug)
    #[serde(default)]
    pub category: Option<String>,
    /// Maximum number of results to return (default from config)
    #[serde(default)]
    pub limit: Option<usize>,
}

pub async fn handle_near_me(state: &DirectoryState, request: NearMeRequest) -> Result<String, String> {
    let origin = Coordinate::new(request.latitude, request.longitude);
    if !origin.is_finite()
        || !(-90.0..=90.0).contains(&origin.latitude)
        || !(-180.0..=180.0).contains(&origin.longitude)
    {
        return Err(format!(
            "Invalid location {}, {}: latitude must be within ±90 and longitude within ±180",
            request.latitude, request.longitude
        ));
    }
    let category = parse_category(request.category.as_deref())?;
    let limit = request.limit.unwrap_or_else(|| state.default_limit()).max(1);

    let organizations = state.organizations().await;
    let nearby = sort_by_distance(&organizations, origin, category, state.resolver());
    if nearby.is_empty() {
        return Ok(match category {
            Some(category) => format!("No organizations listed under {}.", category),
            None => "The directory is empty.".to_string(),
        });
    }

    let mut output = String::new();
    let _ = writeln!(
        output,
        "Closest {} of {} organizations to {:.4}, {:.4}:\n",
        nearby.len().min(limit),
        nearby.len(),
        origin.latitude,
        origin.longitude
    );
    for (index, org) in nearby.iter().take(limit).enumerate() {
        let distance = org
            .distance_miles
            .map_or_else(|| "distance unknown".to_string(), format_distance);
        write_organization(&mut output, index + 1, org, Some(distance.as_str()));
        output.push('\n');
    }
    Ok(output)
}

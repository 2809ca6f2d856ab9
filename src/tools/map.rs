//! Map pin placement for a selection of the directory.

use super::listing::parse_category;
use crate::geo::{AddressInput, CollisionState, PositionSource, list_category};
use crate::state::DirectoryState;
use crate::types::OrganizationRecord;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct MapPinsRequest {
    /// Only place organizations in this category (label or slug, e.g. "food-services")
    #[serde(default)]
    pub category: Option<String>,
    /// Only place organizations matching this search query
    #[serde(default)]
    pub query: Option<String>,
}

/// Resolve a map position for every selected organization.
///
/// Each call owns a fresh collision state, so pins are identical across
/// calls for the same selection.
pub async fn handle_map_pins(
    state: &DirectoryState,
    request: MapPinsRequest,
) -> Result<String, String> {
    let category = parse_category(request.category.as_deref())?;
    let organizations = state.organizations().await;

    let selected: Vec<&OrganizationRecord> = match request
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
    {
        Some(query) => state
            .engine()
            .search(query, &organizations)
            .organizations()
            .collect(),
        None => list_category(&organizations, category),
    };
    let selected: Vec<&OrganizationRecord> = selected
        .into_iter()
        .filter(|org| category.is_none_or(|c| org.category == c))
        .collect();

    let resolver = state.resolver();
    let mut collisions = CollisionState::new();
    let positions = resolver.resolve_batch(
        &mut collisions,
        selected.iter().map(|org| AddressInput::from(*org)),
    );

    let mut pins = String::new();
    let mut placed = 0usize;
    let mut skipped = 0usize;
    for (org, position) in selected.iter().zip(positions) {
        let Some(position) = position.filter(|p| resolver.in_service_area(p.position)) else {
            tracing::debug!("No map pin for '{}'", org.name);
            skipped += 1;
            continue;
        };
        placed += 1;
        let source = match position.source {
            PositionSource::Explicit => "gps".to_string(),
            PositionSource::Town(town) => format!("town: {}", town),
            PositionSource::ZipCode(town) => format!("zip: {}", town),
            PositionSource::CountyCenter => "county center".to_string(),
        };
        let _ = writeln!(
            pins,
            "• {} [{}] {:.5}, {:.5} ({})",
            org.name,
            org.category,
            position.latitude(),
            position.longitude(),
            source
        );
    }

    let mut output = format!("{} map pins", placed);
    if skipped > 0 {
        let _ = write!(output, " ({} without a usable location)", skipped);
    }
    output.push_str(":\n\n");
    output.push_str(&pins);
    Ok(output)
}

//! Relevance search handler.

use super::listing::{CRISIS_BANNER, write_organization};
use crate::state::DirectoryState;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchResourcesRequest {
    /// What the person needs, in their own words ("food pantry", "need a doctor", "pause")
    pub query: String,
    /// Maximum number of results to return (default from config, 25 unless changed)
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Rank the directory for a free-text query.
pub async fn handle_search_resources(
    state: &DirectoryState,
    request: SearchResourcesRequest,
) -> Result<String, String> {
    let organizations = state.organizations().await;
    let outcome = state.engine().search(&request.query, &organizations);
    let limit = request.limit.unwrap_or_else(|| state.default_limit()).max(1);

    let mut output = String::new();
    if outcome.emergency {
        output.push_str(CRISIS_BANNER);
        output.push_str("\n\n");
    }

    if outcome.is_empty() {
        let _ = writeln!(output, "No results found for '{}'.\n", request.query.trim());
        output.push_str("Search tips:\n");
        output.push_str("• Describe the need: 'food', 'rent help', 'counseling'\n");
        output.push_str("• Use an organization's name or acronym, like 'RHCC' or 'DSS'\n");
        output.push_str("• Use list_categories to browse by category\n");
        return Ok(output);
    }

    let _ = writeln!(
        output,
        "Results for '{}' ({} found, showing {}):\n",
        request.query.trim(),
        outcome.len(),
        outcome.len().min(limit)
    );
    for (index, hit) in outcome.hits.iter().take(limit).enumerate() {
        let note = if hit.direct { "direct match" } else { "related" };
        write_organization(&mut output, index + 1, hit.organization, Some(note));
        output.push('\n');
    }

    Ok(output)
}

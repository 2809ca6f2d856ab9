//! Re-read the directory feed.

use crate::state::DirectoryState;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ReloadDirectoryRequest {}

pub async fn handle_reload_directory(
    state: &DirectoryState,
    _request: ReloadDirectoryRequest,
) -> Result<String, String> {
    let count = state.reload().await.map_err(|e| format!("{:#}", e))?;
    Ok(format!(
        "Reloaded {} organizations from {}",
        count,
        state.source().display()
    ))
}

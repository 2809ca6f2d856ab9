//! MCP server exposing the directory tools.

use crate::config::Config;
use crate::state::DirectoryState;
use crate::tools::{
    ListCategoriesRequest, MapPinsRequest, NearMeRequest, ReloadDirectoryRequest,
    SearchResourcesRequest, handle_list_categories, handle_map_pins, handle_near_me,
    handle_reload_directory, handle_search_resources,
};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars::{self, JsonSchema, generate::SchemaSettings},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// MCP server for the Robeson County resource directory
#[derive(Clone)]
pub struct DirectoryServer {
    /// Loaded directory and the engines built from config
    state: Arc<DirectoryState>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for DirectoryServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryServer")
            .field("state", &self.state)
            .finish()
    }
}

#[tool_router]
impl DirectoryServer {
    pub fn new(state: Arc<DirectoryState>) -> Self {
        Self {
            state,
            tool_router: Self::tool_router(),
        }
    }

    /// Load the configured feed and build a server around it.
    pub async fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(DirectoryState::load(config).await))
    }

    pub fn state(&self) -> &Arc<DirectoryState> {
        &self.state
    }

    #[tool(
        description = "Search the Robeson County resource directory. Understands needs described in plain words ('need a doctor', 'food', 'rent help'), acronyms like RHCC or DSS, and common misspellings. Results mark direct matches versus related services. Queries that sound like an emergency get the 988/911 crisis banner.",
        input_schema = inline_schema_for_type::<SearchResourcesRequest>()
    )]
    async fn search_resources(
        &self,
        Parameters(request): Parameters<SearchResourcesRequest>,
    ) -> std::result::Result<String, String> {
        handle_search_resources(&self.state, request).await
    }

    #[tool(
        description = "Place organizations on the map. Optionally filter by category or search query. Organizations sharing an address are spread around it so every pin stays visible; locations outside the county are left off.",
        input_schema = inline_schema_for_type::<MapPinsRequest>()
    )]
    async fn map_pins(
        &self,
        Parameters(request): Parameters<MapPinsRequest>,
    ) -> std::result::Result<String, String> {
        handle_map_pins(&self.state, request).await
    }

    #[tool(
        description = "List organizations closest to a location, with distances in miles. Optionally filter by category.",
        input_schema = inline_schema_for_type::<NearMeRequest>()
    )]
    async fn near_me(
        &self,
        Parameters(request): Parameters<NearMeRequest>,
    ) -> std::result::Result<String, String> {
        handle_near_me(&self.state, request).await
    }

    #[tool(
        description = "List every service category with its slug and the number of organizations in it.",
        input_schema = inline_schema_for_type::<ListCategoriesRequest>()
    )]
    async fn list_categories(
        &self,
        Parameters(request): Parameters<ListCategoriesRequest>,
    ) -> std::result::Result<String, String> {
        handle_list_categories(&self.state, request).await
    }

    #[tool(
        description = "Re-read the directory feed from disk. The previous data stays loaded if the feed cannot be read.",
        input_schema = inline_schema_for_type::<ReloadDirectoryRequest>()
    )]
    async fn reload_directory(
        &self,
        Parameters(request): Parameters<ReloadDirectoryRequest>,
    ) -> std::result::Result<String, String> {
        handle_reload_directory(&self.state, request).await
    }
}

#[tool_handler]
impl ServerHandler for DirectoryServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "robeson-directory: find help near you in Robeson County, NC. \
                 Use search_resources for needs in plain words, near_me with a location, \
                 and list_categories to browse. If someone may be in danger, \
                 point them to 988 or 911 first.",
            )
    }
}

/// Generate an inline JSON schema for MCP tools
///
/// Unlike rmcp's default `schema_for_type()`, this sets `inline_subschemas = true`
/// so nested types are inlined instead of referenced through `$ref`.
pub fn inline_schema_for_type<T: JsonSchema>() -> Arc<JsonObject> {
    let mut settings = SchemaSettings::draft07();
    settings.transforms = vec![Box::new(schemars::transform::AddNullable::default())];
    settings.inline_subschemas = true;

    let generator = settings.into_generator();
    let schema = generator.into_root_schema_for::<T>();
    let object = serde_json::to_value(schema).expect("failed to serialize schema");

    let json_object = match object {
        serde_json::Value::Object(object) => object,
        _ => panic!("Schema serialization produced non-object value"),
    };

    Arc::new(json_object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn request_schemas_are_objects() {
        let schema = inline_schema_for_type::<NearMeRequest>();
        check!(schema.get("type").and_then(|t| t.as_str()) == Some("object"));
        let properties = schema.get("properties").and_then(|p| p.as_object());
        check!(properties.is_some_and(|p| p.contains_key("latitude")));
    }
}

//! Robeson County resource directory: address placement for the map,
//! relevance search with emergency detection, and a stdio MCP server
//! exposing both.

pub mod category;
pub mod config;
pub mod error;
pub mod feed;
pub mod geo;
pub mod search;
pub mod server;
pub mod state;
pub mod tools;
pub mod tracing;
pub mod types;

pub use category::Category;
pub use config::Config;
pub use error::{ConfigError, LoadError, Result};
pub use feed::{load_directory, parse_directory};
pub use geo::{AddressResolver, CollisionState, ResolvedPosition};
pub use search::{SearchEngine, SearchHit, SearchOutcome};
pub use server::DirectoryServer;
pub use state::DirectoryState;
pub use types::{Coordinate, OrganizationRecord};

//! Shared server state: the loaded directory and the engines built from config.
//!
//! Tool handlers take a snapshot of the record collection (an `Arc` clone) and
//! work on it without holding the lock, so a reload never blocks a search in
//! progress.

use crate::config::Config;
use crate::feed::load_directory;
use crate::geo::AddressResolver;
use crate::search::SearchEngine;
use crate::types::OrganizationRecord;
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// State shared by every tool call.
pub struct DirectoryState {
    /// Loaded organizations, replaced wholesale on reload
    organizations: RwLock<Arc<Vec<OrganizationRecord>>>,

    /// Feed the directory was loaded from
    source: PathBuf,

    resolver: AddressResolver,
    engine: SearchEngine,
    default_limit: usize,
}

impl std::fmt::Debug for DirectoryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryState")
            .field("source", &self.source)
            .field("default_limit", &self.default_limit)
            .finish_non_exhaustive()
    }
}

impl DirectoryState {
    /// Build state around an already loaded collection.
    pub fn new(config: &Config, organizations: Vec<OrganizationRecord>) -> Self {
        Self {
            organizations: RwLock::new(Arc::new(organizations)),
            source: config.data.path.clone(),
            resolver: AddressResolver::new(config.resolver.clone()),
            engine: SearchEngine::new(&config.search),
            default_limit: config.search.default_limit,
        }
    }

    /// Load the configured feed. A missing or broken feed is logged and the
    /// server starts with an empty directory; `reload_directory` can retry.
    pub async fn load(config: &Config) -> Self {
        let organizations = match load_directory(&config.data.path).await {
            Ok(organizations) => organizations,
            Err(e) => {
                tracing::warn!("Starting with an empty directory: {}", e);
                Vec::new()
            }
        };
        Self::new(config, organizations)
    }

    /// Current collection snapshot.
    pub async fn organizations(&self) -> Arc<Vec<OrganizationRecord>> {
        self.organizations.read().await.clone()
    }

    /// Re-read the feed and swap it in. On failure the previous collection
    /// stays loaded.
    pub async fn reload(&self) -> crate::error::Result<usize> {
        let organizations = load_directory(&self.source)
            .await
            .with_context(|| format!("Reload of {} failed", self.source.display()))?;
        let count = organizations.len();
        *self.organizations.write().await = Arc::new(organizations);
        tracing::info!("Directory reloaded: {} organizations", count);
        Ok(count)
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub const fn resolver(&self) -> &AddressResolver {
        &self.resolver
    }

    pub const fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    /// Result count used when a request gives no limit.
    pub const fn default_limit(&self) -> usize {
        self.default_limit
    }
}

//! Loader configuration
//!
//! The persistence root comes from, in order: a config injected by the host,
//! the `AssetLoaderConfig` resource, or the compiled-in default.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::assets::{Resource, ResourceDescriptor, ResourceLoader, StorageBackend};

/// Default root scanned for persistent objects
pub const DEFAULT_DONT_DESTROY_PATH: &str = "DontDestroyOnLoad";

/// Configuration consumed by the persistence pass
pub trait LoaderConfig: Send + Sync {
    /// Root path scanned for objects that survive scene changes
    fn dont_destroy_path(&self) -> &str;
}

/// Configuration stored as a resource next to the game's assets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetLoaderConfig {
    #[serde(default = "default_dont_destroy_path")]
    pub dont_destroy_path: String,
}

fn default_dont_destroy_path() -> String {
    DEFAULT_DONT_DESTROY_PATH.to_string()
}

impl Default for AssetLoaderConfig {
    fn default() -> Self {
        Self {
            dont_destroy_path: default_dont_destroy_path(),
        }
    }
}

impl AssetLoaderConfig {
    /// Config with a custom persistence root
    pub fn with_dont_destroy_path(path: impl Into<String>) -> Self {
        Self {
            dont_destroy_path: path.into(),
        }
    }
}

impl Resource for AssetLoaderConfig {
    const DESCRIPTOR: Option<ResourceDescriptor> = Some(ResourceDescriptor::named("AssetLoaderConfig"));
}

impl LoaderConfig for AssetLoaderConfig {
    fn dont_destroy_path(&self) -> &str {
        &self.dont_destroy_path
    }
}

/// Pick the active loader configuration.
///
/// An injected config always wins. Otherwise the `AssetLoaderConfig` resource
/// is loaded, and if none exists the defaults apply.
pub fn resolve_loader_config<B>(
    loader: &ResourceLoader<B>,
    injected: Option<Arc<dyn LoaderConfig>>,
) -> Arc<dyn LoaderConfig>
where
    B: StorageBackend<AssetLoaderConfig>,
{
    if let Some(config) = injected {
        log::debug!("Using injected loader config");
        return config;
    }

    match loader.try_load::<AssetLoaderConfig>(None) {
        Some(config) => Arc::new(AssetLoaderConfig::clone(&config)),
        None => {
            log::info!(
                "No AssetLoaderConfig resource found, using default path '{DEFAULT_DONT_DESTROY_PATH}'"
            );
            Arc::new(AssetLoaderConfig::default())
        }
    }
}

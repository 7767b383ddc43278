//! Core runtime module
//!
//! Contains the runtime host, its configuration, boot phases and scenes

mod boot;
mod config;
mod runtime;
mod scene;

pub use boot::{BootPhase, BootSequence};
pub use config::{AssetLoaderConfig, DEFAULT_DONT_DESTROY_PATH, LoaderConfig, resolve_loader_config};
pub use runtime::{Runtime, RuntimeBackend, RuntimeConfig};
pub use scene::{Prefab, Scene};

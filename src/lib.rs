//! Resource resolution and cross-scene persistence for an engine-hosted asset pipeline
//!
//! This crate provides:
//! - Typed resource loading with per-type descriptors and caching
//! - Storage backends over memory or a directory of RON/JSON files
//! - A persistence pass that keeps marked objects alive across scene loads
//! - A small hecs-based world and runtime host to drive it all

pub mod assets;
pub mod core;
pub mod ecs;
pub mod persistence;

// Re-exports for convenience
pub use glam;
pub use hecs;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::assets::{
        DirectoryBackend, MemoryBackend, Resource, ResourceDescriptor, ResourceHandle,
        ResourceLoader, StorageBackend,
    };
    pub use crate::core::{
        AssetLoaderConfig, BootPhase, LoaderConfig, Prefab, Runtime, RuntimeConfig, Scene,
    };
    pub use crate::ecs::{Name, PersistOnLoad, Transform, World};
    pub use crate::persistence::{PersistenceCoordinator, PersistenceHost};
    pub use glam::{Quat, Vec3};
}

//! Runtime host
//!
//! Owns the resource loader, the world and the persistence coordinator, and
//! drives the boot phases around the first scene load.

use std::sync::Arc;

use crate::assets::{ResourceError, ResourceLoader, StorageBackend};
use crate::core::boot::{BootPhase, BootSequence};
use crate::core::config::{AssetLoaderConfig, LoaderConfig, resolve_loader_config};
use crate::core::scene::{Prefab, Scene};
use crate::ecs::World;
use crate::persistence::PersistenceCoordinator;

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Name used in logs
    pub title: String,
    /// Scene loaded between the two boot phases
    pub first_scene: Option<String>,
    /// Overrides the persistence root from the `AssetLoaderConfig` resource
    pub dont_destroy_path: Option<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: String::from("Runtime"),
            first_scene: None,
            dont_destroy_path: None,
        }
    }
}

impl RuntimeConfig {
    /// Create a new config with a title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the scene loaded at boot
    pub fn with_first_scene(mut self, path: impl Into<String>) -> Self {
        self.first_scene = Some(path.into());
        self
    }

    /// Override the persistence root
    pub fn with_dont_destroy_path(mut self, path: impl Into<String>) -> Self {
        self.dont_destroy_path = Some(path.into());
        self
    }
}

/// Backends able to serve everything the runtime loads
pub trait RuntimeBackend:
    StorageBackend<Prefab> + StorageBackend<Scene> + StorageBackend<AssetLoaderConfig>
{
}

impl<B> RuntimeBackend for B where
    B: StorageBackend<Prefab> + StorageBackend<Scene> + StorageBackend<AssetLoaderConfig>
{
}

/// Main runtime struct
pub struct Runtime<B> {
    config: RuntimeConfig,
    loader: ResourceLoader<B>,
    world: World,
    coordinator: PersistenceCoordinator,
    boot: BootSequence,
}

impl<B: RuntimeBackend> Runtime<B> {
    /// Create a runtime over a storage backend
    pub fn new(config: RuntimeConfig, backend: B) -> Self {
        Self::with_loader(config, ResourceLoader::new(backend))
    }

    /// Create a runtime with a preconfigured loader
    pub fn with_loader(config: RuntimeConfig, loader: ResourceLoader<B>) -> Self {
        let injected = config.dont_destroy_path.clone().map(|path| {
            Arc::new(AssetLoaderConfig::with_dont_destroy_path(path)) as Arc<dyn LoaderConfig>
        });
        Self::with_loader_config(config, loader, injected)
    }

    /// Create a runtime with an injected loader config.
    ///
    /// `injected` takes precedence over both `RuntimeConfig::dont_destroy_path`
    /// and the `AssetLoaderConfig` resource.
    pub fn with_loader_config(
        config: RuntimeConfig,
        loader: ResourceLoader<B>,
        injected: Option<Arc<dyn LoaderConfig>>,
    ) -> Self {
        let loader_config = resolve_loader_config(&loader, injected);
        log::debug!(
            "Persistence root for {}: '{}'",
            config.title,
            loader_config.dont_destroy_path()
        );

        Self {
            config,
            loader,
            world: World::new(),
            coordinator: PersistenceCoordinator::new(loader_config),
            boot: BootSequence::new(),
        }
    }

    /// Run every boot phase, loading the first scene in between
    ///
    /// # Errors
    ///
    /// Returns an error if the configured first scene does not exist
    pub fn boot(&mut self) -> Result<(), ResourceError> {
        log::info!("Booting {}", self.config.title);

        self.run_phase(BootPhase::BeforeSceneLoad);
        if let Some(path) = self.config.first_scene.clone() {
            self.change_scene(&path)?;
        }
        self.run_phase(BootPhase::AfterSceneLoad);

        log::info!("{} booted successfully", self.config.title);
        Ok(())
    }

    /// Run the hooks for one boot phase
    ///
    /// Returns the number of objects persisted by the phase
    pub fn run_phase(&mut self, phase: BootPhase) -> usize {
        if !self.boot.begin(phase) {
            return 0;
        }

        log::debug!("Running boot phase {phase:?}");
        self.coordinator
            .make_persistent(&self.loader, &mut self.world)
    }

    /// Replace the active scene with the scene stored at `path`
    ///
    /// Returns the number of spawned entities
    ///
    /// # Errors
    ///
    /// Returns an error if no scene exists at `path`
    pub fn change_scene(&mut self, path: &str) -> Result<usize, ResourceError> {
        let scene = self.loader.resolver::<Scene>().fetch(Some(path))?;
        let spawned = self.world.load_scene(&scene);
        log::info!("Loaded scene '{}' ({} entities)", scene.name, spawned.len());
        Ok(spawned.len())
    }

    /// Resource loader
    pub fn loader(&self) -> &ResourceLoader<B> {
        &self.loader
    }

    /// ECS world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// ECS world, mutably
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Persistence coordinator
    pub fn coordinator(&self) -> &PersistenceCoordinator {
        &self.coordinator
    }

    /// Boot phase tracking
    pub fn boot_sequence(&self) -> &BootSequence {
        &self.boot
    }
}

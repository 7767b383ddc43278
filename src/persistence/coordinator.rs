//! Persistence pass

use std::sync::Arc;

use hecs::Entity;
use rustc_hash::FxHashSet;

use crate::assets::{ResourceLoader, StorageBackend};
use crate::core::{LoaderConfig, Prefab};
use crate::ecs::World;

/// Scene graph operations the persistence pass relies on
pub trait PersistenceHost {
    /// Spawn a fresh copy of `prefab`, keeping its name
    fn instantiate(&mut self, prefab: &Prefab) -> Entity;

    /// Exempt `entity` from scene teardown
    fn dont_destroy_on_load(&mut self, entity: Entity);
}

impl PersistenceHost for World {
    fn instantiate(&mut self, prefab: &Prefab) -> Entity {
        World::instantiate(self, prefab)
    }

    fn dont_destroy_on_load(&mut self, entity: Entity) {
        if World::dont_destroy_on_load(self, entity).is_err() {
            log::warn!("Cannot persist despawned entity {entity:?}");
        }
    }
}

/// Instantiates marker-bearing prefabs exactly once per process.
///
/// Names persisted by earlier passes are remembered, so the pass can run at
/// every boot phase without creating duplicates.
pub struct PersistenceCoordinator {
    config: Arc<dyn LoaderConfig>,
    persisted: FxHashSet<String>,
}

impl PersistenceCoordinator {
    /// Create a coordinator reading its root path from `config`
    pub fn new(config: Arc<dyn LoaderConfig>) -> Self {
        Self {
            config,
            persisted: FxHashSet::default(),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &dyn LoaderConfig {
        self.config.as_ref()
    }

    /// Check whether an object with this name was already persisted
    pub fn is_persisted(&self, name: &str) -> bool {
        self.persisted.contains(name)
    }

    /// Names of every persisted object
    pub fn persisted_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.persisted.iter().map(String::as_str)
    }

    /// Instantiate and persist every marker-bearing prefab under the root.
    ///
    /// Returns how many objects were newly persisted by this call.
    pub fn make_persistent<B, H>(&mut self, loader: &ResourceLoader<B>, host: &mut H) -> usize
    where
        B: StorageBackend<Prefab>,
        H: PersistenceHost + ?Sized,
    {
        let root = self.config.dont_destroy_path();
        let candidates = loader.load_all::<Prefab>(Some(root));
        if candidates.is_empty() {
            log::debug!("No persistent prefabs under '{root}'");
            return 0;
        }

        let mut created = 0;
        for prefab in &candidates {
            if !prefab.persist_on_load || self.persisted.contains(&prefab.name) {
                continue;
            }

            let entity = host.instantiate(prefab);
            host.dont_destroy_on_load(entity);
            self.persisted.insert(prefab.name.clone());
            created += 1;
        }

        if created > 0 {
            log::info!("Persisted {created} object(s) from '{root}'");
        }
        created
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MemoryBackend;
    use crate::core::AssetLoaderConfig;
    use crate::ecs::{DONT_DESTROY_ON_LOAD_SCENE, Name, PersistOnLoad};

    fn coordinator(root: &str) -> PersistenceCoordinator {
        PersistenceCoordinator::new(Arc::new(AssetLoaderConfig::with_dont_destroy_path(root)))
    }

    fn persisted_names(world: &World) -> Vec<String> {
        let mut names: Vec<String> = world
            .persistent_entities()
            .into_iter()
            .map(|entity| world.get::<Name>(entity).unwrap().0.clone())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_duplicates_by_name_collapse() {
        let mut backend = MemoryBackend::new();
        backend
            .insert("Persistent/A", Prefab::new("A").persistent())
            .insert("Persistent/Copies/A", Prefab::new("A").persistent())
            .insert("Persistent/B", Prefab::new("B").persistent());
        let loader = ResourceLoader::new(backend);
        let mut world = World::new();

        let created = coordinator("Persistent").make_persistent(&loader, &mut world);

        assert_eq!(created, 2);
        assert_eq!(persisted_names(&world), vec!["A", "B"]);
    }

    #[test]
    fn test_empty_names_collapse_like_any_other() {
        let mut backend = MemoryBackend::new();
        backend
            .insert("Persistent/First", Prefab::new("").persistent())
            .insert("Persistent/Second", Prefab::new("").persistent())
            .insert("Persistent/Named", Prefab::new("Audio").persistent());
        let loader = ResourceLoader::new(backend);
        let mut world = World::new();
        let mut coordinator = coordinator("Persistent");

        let created = coordinator.make_persistent(&loader, &mut world);

        assert_eq!(created, 2);
        assert_eq!(persisted_names(&world), vec!["", "Audio"]);
        assert!(coordinator.is_persisted(""));
        assert_eq!(coordinator.make_persistent(&loader, &mut world), 0);
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn test_unmarked_prefabs_are_skipped() {
        let mut backend = MemoryBackend::new();
        backend
            .insert("Persistent/Audio", Prefab::new("Audio").persistent())
            .insert("Persistent/Debris", Prefab::new("Debris"));
        let loader = ResourceLoader::new(backend);
        let mut world = World::new();

        coordinator("Persistent").make_persistent(&loader, &mut world);

        assert_eq!(world.len(), 1);
        assert!(world.find_by_name("Debris").is_none());
        let audio = world.find_by_name("Audio").unwrap();
        assert!(world.get::<PersistOnLoad>(audio).is_ok());
        assert_eq!(world.scene_of(audio), Some(DONT_DESTROY_ON_LOAD_SCENE));
    }

    #[test]
    fn test_repeated_passes_do_not_duplicate() {
        let mut backend = MemoryBackend::new();
        backend.insert("Persistent/Audio", Prefab::new("Audio").persistent());
        let loader = ResourceLoader::new(backend);
        let mut world = World::new();
        let mut coordinator = coordinator("Persistent");

        assert_eq!(coordinator.make_persistent(&loader, &mut world), 1);
        loader.clear_cache::<Prefab>();
        assert_eq!(coordinator.make_persistent(&loader, &mut world), 0);

        assert_eq!(world.len(), 1);
        assert!(coordinator.is_persisted("Audio"));
        assert_eq!(coordinator.persisted_names().collect::<Vec<_>>(), vec!["Audio"]);
    }

    #[test]
    fn test_empty_root_is_a_no_op() {
        let loader = ResourceLoader::new(MemoryBackend::new());
        let mut world = World::new();

        let created = coordinator("Nothing").make_persistent(&loader, &mut world);

        assert_eq!(created, 0);
        assert!(world.is_empty());
    }

    #[test]
    fn test_persisted_objects_survive_scene_changes() {
        let mut backend = MemoryBackend::new();
        backend.insert("Persistent/Audio", Prefab::new("Audio").persistent());
        let loader = ResourceLoader::new(backend);
        let mut world = World::new();

        coordinator("Persistent").make_persistent(&loader, &mut world);
        let mut level = crate::core::Scene::new("Level");
        level.add_entity(Prefab::new("Enemy"));
        world.load_scene(&level);
        world.load_scene(&crate::core::Scene::new("Menu"));

        assert!(world.find_by_name("Audio").is_some());
        assert!(world.find_by_name("Enemy").is_none());
    }
}

//! World wrapper around hecs
//!
//! Besides plain entity storage the world tracks the active scene. Loading a
//! scene tears down every entity that was not marked [`DontDestroyOnLoad`].

use hecs::Entity;

use super::components::{DontDestroyOnLoad, Name, PersistOnLoad};
use crate::core::{Prefab, Scene};

/// Name reported for entities that survive scene changes
pub const DONT_DESTROY_ON_LOAD_SCENE: &str = "DontDestroyOnLoad";

/// Game world containing all entities and components
pub struct World {
    /// The underlying hecs world
    pub inner: hecs::World,
    /// Name of the currently loaded scene
    active_scene: String,
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self {
            inner: hecs::World::new(),
            active_scene: String::new(),
        }
    }

    /// Despawn an entity
    pub fn despawn(&mut self, entity: Entity) -> Result<(), hecs::NoSuchEntity> {
        self.inner.despawn(entity)
    }

    /// Get a reference to a component
    pub fn get<T: hecs::Component>(
        &self,
        entity: Entity,
    ) -> Result<hecs::Ref<'_, T>, hecs::ComponentError> {
        self.inner.get::<&T>(entity)
    }

    /// Check if an entity exists
    pub fn contains(&self, entity: Entity) -> bool {
        self.inner.contains(entity)
    }

    /// Get the number of entities
    pub fn len(&self) -> u32 {
        self.inner.len()
    }

    /// Check if the world is empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Spawn a fresh copy of a prefab, keeping its name
    pub fn instantiate(&mut self, prefab: &Prefab) -> Entity {
        let mut builder = hecs::EntityBuilder::new();
        builder.add(Name::new(prefab.name.clone()));
        if let Some(transform) = prefab.transform {
            builder.add(transform);
        }
        if prefab.persist_on_load {
            builder.add(PersistOnLoad);
        }
        self.inner.spawn(builder.build())
    }

    /// Exempt an entity from scene teardown
    pub fn dont_destroy_on_load(&mut self, entity: Entity) -> Result<(), hecs::NoSuchEntity> {
        self.inner.insert_one(entity, DontDestroyOnLoad)
    }

    /// Check whether an entity survives scene changes
    pub fn is_persistent(&self, entity: Entity) -> bool {
        self.inner.get::<&DontDestroyOnLoad>(entity).is_ok()
    }

    /// Name of the active scene
    pub fn active_scene(&self) -> &str {
        &self.active_scene
    }

    /// Scene an entity belongs to
    pub fn scene_of(&self, entity: Entity) -> Option<&str> {
        if !self.contains(entity) {
            return None;
        }

        if self.is_persistent(entity) {
            Some(DONT_DESTROY_ON_LOAD_SCENE)
        } else {
            Some(&self.active_scene)
        }
    }

    /// Find the first entity with the given name
    pub fn find_by_name(&self, name: &str) -> Option<Entity> {
        let mut query = self.inner.query::<&Name>();
        query
            .iter()
            .find(|(_, entity_name)| entity_name.as_str() == name)
            .map(|(entity, _)| entity)
    }

    /// All entities marked to survive scene changes
    pub fn persistent_entities(&self) -> Vec<Entity> {
        let mut query = self.inner.query::<&DontDestroyOnLoad>();
        query.iter().map(|(entity, _)| entity).collect()
    }

    /// Despawn every entity that belongs to the active scene
    ///
    /// Returns the number of despawned entities
    pub fn unload_scene(&mut self) -> usize {
        let doomed: Vec<Entity> = {
            let mut query = self.inner.query::<Option<&DontDestroyOnLoad>>();
            query
                .iter()
                .filter(|(_, persistent)| persistent.is_none())
                .map(|(entity, _)| entity)
                .collect()
        };

        for &entity in &doomed {
            // Collected from a live query, so the entity exists
            let _ = self.inner.despawn(entity);
        }

        self.active_scene.clear();
        doomed.len()
    }

    /// Replace the active scene with `scene`
    ///
    /// Returns the entities spawned for the new scene
    pub fn load_scene(&mut self, scene: &Scene) -> Vec<Entity> {
        let removed = self.unload_scene();
        log::debug!("Unloaded {removed} entities before loading '{}'", scene.name);

        self.active_scene = scene.name.clone();
        scene
            .entities
            .iter()
            .map(|prefab| self.instantiate(prefab))
            .collect()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

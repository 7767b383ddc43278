//! Scene and prefab definitions
//!
//! Both types are resources, so they load through the resource loader from
//! RON (Rusty Object Notation) or JSON.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::assets::Resource;
use crate::ecs::Transform;

/// Template for a scene object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Prefab {
    /// Object name, preserved on every instance
    pub name: String,
    /// Transform component
    #[serde(default)]
    pub transform: Option<Transform>,
    /// Carries the [`PersistOnLoad`](crate::ecs::PersistOnLoad) marker
    #[serde(default)]
    pub persist_on_load: bool,
    /// Custom data as key-value pairs
    #[serde(default)]
    pub custom_data: HashMap<String, String>,
}

impl Prefab {
    /// Create a prefab with a name and default transform
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Some(Transform::default()),
            persist_on_load: false,
            custom_data: HashMap::new(),
        }
    }

    /// Attach the persistence marker
    #[must_use]
    pub fn persistent(mut self) -> Self {
        self.persist_on_load = true;
        self
    }

    /// Set the transform
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Add a custom key-value pair
    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_data.insert(key.into(), value.into());
        self
    }
}

impl Resource for Prefab {}

/// A serializable scene containing multiple objects
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    /// Scene name
    pub name: String,
    /// Scene version for compatibility
    #[serde(default = "default_version")]
    pub version: u32,
    /// All objects in the scene
    #[serde(default)]
    pub entities: Vec<Prefab>,
}

fn default_version() -> u32 {
    1
}

impl Resource for Scene {}

impl Scene {
    /// Create a new empty scene
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: default_version(),
            entities: Vec::new(),
        }
    }

    /// Add an object to the scene
    pub fn add_entity(&mut self, entity: Prefab) -> usize {
        let index = self.entities.len();
        self.entities.push(entity);
        index
    }
}

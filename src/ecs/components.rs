//! Common ECS components

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Transform component for position, rotation, and scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position in world space
    pub position: Vec3,
    /// Rotation as a quaternion
    pub rotation: Quat,
    /// Scale factor
    pub scale: Vec3,
}

impl Transform {
    /// Create a transform with just a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

/// Name component, also the identity used to deduplicate persistent objects
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Marker for objects that must be instantiated at boot and kept across scene loads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersistOnLoad;

/// Set on entities exempt from scene teardown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DontDestroyOnLoad;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_position_keeps_identity_rotation_and_scale() {
        let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));

        assert_eq!(transform.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(transform.rotation, Quat::IDENTITY);
        assert_eq!(transform.scale, Vec3::ONE);
    }
}

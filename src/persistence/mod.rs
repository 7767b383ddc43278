//! Cross-scene persistence
//!
//! At boot every prefab under the configured root that carries the
//! [`PersistOnLoad`](crate::ecs::PersistOnLoad) marker is instantiated once and
//! exempted from scene teardown.

mod coordinator;

pub use coordinator::{PersistenceCoordinator, PersistenceHost};

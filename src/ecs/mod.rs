//! Entity Component System module
//!
//! Built on top of the hecs ECS library

mod components;
mod world;

pub use components::{DontDestroyOnLoad, Name, PersistOnLoad, Transform};
pub use world::{DONT_DESTROY_ON_LOAD_SCENE, World};

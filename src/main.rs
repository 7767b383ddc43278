//! Demo host booting a runtime over a directory of assets
//!
//! Usage: `asset-loader-demo [ASSET_ROOT] [FIRST_SCENE]`
//! (defaults: `assets` and `Scenes/Main`). Run with `RUST_LOG=debug` to see
//! cache and backend traffic.

use asset_loader::prelude::*;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let root = args.next().unwrap_or_else(|| String::from("assets"));
    let first_scene = args.next().unwrap_or_else(|| String::from("Scenes/Main"));

    let config = RuntimeConfig::default()
        .with_title("Asset loader demo")
        .with_first_scene(first_scene);
    let mut runtime = Runtime::new(config, DirectoryBackend::new(&root));

    if let Err(e) = runtime.boot() {
        log::error!("Boot failed: {e}");
        std::process::exit(1);
    }

    let world = runtime.world();
    let mut query = world.inner.query::<(&Name, Option<&Transform>)>();
    for (entity, (name, transform)) in query.iter() {
        let scene = world.scene_of(entity).unwrap_or("?");
        let position = transform.map(|t| t.position).unwrap_or(Vec3::ZERO);
        println!("{:<20} {:<20} {position}", name.as_str(), scene);
    }

    let mut persisted: Vec<&str> = runtime.coordinator().persisted_names().collect();
    persisted.sort_unstable();
    println!("Persisted: {}", persisted.join(", "));
}

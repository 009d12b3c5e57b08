//! Headless demo scene: two cubes hanging off a shared node plus a ring of
//! cubes orbiting a second node, animated for a handful of frames.
//!
//! Usage: `ember-demo [config.toml] [model.gltf]`

use std::sync::Arc;

use ember::{
    PrimitiveTemplate, RuntimeConfig, Scene, cgmath::Vector3, resources::load_gltf_primitives,
};

const FRAMES: usize = 3;
const DELTA_TIME: f32 = 1.0 / 60.0;
const RING_SIZE: u32 = 500;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => RuntimeConfig::load(path).await?,
        None => RuntimeConfig::default(),
    };
    let mut scene = Scene::new(&config);

    let cube = PrimitiveTemplate::debug_cube().into_shared();

    let node = scene.add_node()?;
    {
        let node = scene.node_mut(node)?;
        node.transform.position.z = -0.5;
        node.transform.scale = Vector3::new(0.75, 0.75, 0.75);
    }

    let first = scene.instantiate(&cube)?;
    let second = scene.instantiate(&cube)?;
    {
        let instance = scene.instance_mut(first)?;
        instance.transform.scale = Vector3::new(0.25, 0.25, 0.25);
        instance.transform.rotation.x = 0.25;
        instance.transform.position.x = 1.75;
    }
    scene.set_instance_parent(first, Some(node))?;
    {
        let instance = scene.instance_mut(second)?;
        instance.transform.rotation.y = -0.25;
        instance.transform.scale.y = 0.1;
    }
    scene.set_instance_parent(second, Some(node))?;

    let ring = scene.add_node()?;
    scene.node_mut(ring)?.transform.position = Vector3::new(56.0, 56.0, 56.0);
    for i in 0..RING_SIZE {
        let id = scene.instantiate(&cube)?;
        scene.instance_mut(id)?.transform.position = Vector3::new(
            ((i * 37) % 256) as f32,
            ((i * 91) % 256) as f32,
            ((i * 53) % 256) as f32,
        );
        scene.set_instance_parent(id, Some(ring))?;
    }

    if let Some(path) = args.next() {
        let templates: Vec<Arc<PrimitiveTemplate>> = load_gltf_primitives(&path).await?;
        for template in &templates {
            scene.instantiate(template)?;
        }
        log::info!("added {} primitives from {}", templates.len(), path);
    }

    log::info!(
        "{} instances, {} / {} vertex bytes, {} / {} element bytes",
        scene.batch.len(),
        scene.batch.vertex_used(),
        scene.batch.vertex_capacity(),
        scene.batch.element_used(),
        scene.batch.element_capacity()
    );

    for frame in 0..FRAMES {
        scene.node_mut(ring)?.transform.rotation.y += DELTA_TIME * 0.1;
        for instance in scene.batch.instances_mut() {
            instance.transform.rotation.x += DELTA_TIME * 0.5;
            instance.transform.rotation.z += DELTA_TIME;
        }
        let commands = scene.draw_commands()?;
        let indices: u32 = commands.iter().map(|command| command.index_count).sum();
        log::info!(
            "frame {}: {} draw calls, {} indices",
            frame,
            commands.len(),
            indices
        );
        for command in commands.iter().take(2) {
            log::debug!(
                "  indices {:?} base vertex {} translation {:?}",
                command.indices(),
                command.base_vertex,
                command.transform.w.truncate()
            );
        }
    }

    Ok(())
}

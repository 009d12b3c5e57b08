use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::data_structures::primitive::PrimitiveTemplate;

/**
 * This module contains all logic for loading geometry from external files and for
 * handing the batch arenas to the GPU.
 */
pub mod mesh;
pub mod upload;

pub async fn load_binary(path: &Path) -> anyhow::Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))
}

/**
 * Loads every triangle-list primitive of every mesh in a `.gltf` or `.glb` file.
 *
 * Buffers may be the embedded GLB blob, base64 data URIs or files next to the
 * asset. Any failure yields an error and no templates at all; primitives that
 * are merely unsupported (see `mesh::to_template`) are skipped with a warning.
 */
pub async fn load_gltf_primitives(
    path: impl AsRef<Path>,
) -> anyhow::Result<Vec<Arc<PrimitiveTemplate>>> {
    let path = path.as_ref();
    let bytes = load_binary(path).await?;
    let gltf::Gltf { document, blob } = gltf::Gltf::from_slice(&bytes)
        .with_context(|| format!("parsing {}", path.display()))?;
    let buffers = gltf::import_buffers(&document, path.parent(), blob)
        .with_context(|| format!("loading buffers of {}", path.display()))?;

    let mut templates = Vec::new();
    for mesh in document.meshes() {
        let mesh_name = mesh.name().unwrap_or("unknown_mesh");
        for primitive in mesh.primitives() {
            if let Some(template) = mesh::to_template(&primitive, &buffers, mesh_name)
                .with_context(|| format!("mesh {} in {}", mesh_name, path.display()))?
            {
                templates.push(template.into_shared());
            }
        }
    }
    log::debug!(
        "loaded {} primitive templates from {}",
        templates.len(),
        path.display()
    );
    Ok(templates)
}

/// Loads several assets concurrently. Fails if any of them fails.
pub async fn load_gltf_primitives_all<P: AsRef<Path>>(
    paths: &[P],
) -> anyhow::Result<Vec<Vec<Arc<PrimitiveTemplate>>>> {
    futures::future::join_all(paths.iter().map(|path| load_gltf_primitives(path)))
        .await
        .into_iter()
        .collect()
}

use log::warn;

use crate::data_structures::primitive::{PrimitiveTemplate, PrimitiveVertex};

/**
 * Converts one glTF primitive into a template.
 *
 * Every vertex is widened to the fixed 11-float layout: attributes the primitive
 * doesn't provide stay zero. Primitives without an index accessor are drawn as
 * a plain triangle list, so they get sequential indices.
 *
 * Returns `Ok(None)` for primitives that can't become a triangle-list template
 * (other topologies, no positions); those are skipped by the caller.
 */
pub fn to_template(
    primitive: &gltf::Primitive,
    buffers: &[gltf::buffer::Data],
    mesh_name: &str,
) -> anyhow::Result<Option<PrimitiveTemplate>> {
    if primitive.mode() != gltf::mesh::Mode::Triangles {
        warn!(
            "Skipping primitive {} of mesh {}: mode {:?} is not a triangle list.",
            primitive.index(),
            mesh_name,
            primitive.mode()
        );
        return Ok(None);
    }
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));

    let Some(positions) = reader.read_positions() else {
        warn!(
            "Skipping primitive {} of mesh {}: no POSITION attribute.",
            primitive.index(),
            mesh_name
        );
        return Ok(None);
    };
    let mut vertices: Vec<PrimitiveVertex> = positions
        .map(|position| PrimitiveVertex {
            position,
            ..Default::default()
        })
        .collect();

    let mut use_vertex_colors = false;
    if let Some(colors) = reader.read_colors(0) {
        use_vertex_colors = true;
        vertices
            .iter_mut()
            .zip(colors.into_rgb_f32())
            .for_each(|(vertex, color)| vertex.color = color);
    }
    let mut use_uv = false;
    if let Some(tex_coords) = reader.read_tex_coords(0) {
        use_uv = true;
        vertices
            .iter_mut()
            .zip(tex_coords.into_f32())
            .for_each(|(vertex, uv)| vertex.uv = uv);
    }
    if let Some(normals) = reader.read_normals() {
        vertices
            .iter_mut()
            .zip(normals)
            .for_each(|(vertex, normal)| vertex.normal = normal);
    }

    let indices = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..u32::try_from(vertices.len())?).collect(),
    };

    let template = PrimitiveTemplate::new(vertices, indices, use_vertex_colors, use_uv)?;
    Ok(Some(template))
}

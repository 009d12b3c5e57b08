//! Primitive instances and their GPU-side transform record.
//!
//! An instance is one placement of a [`PrimitiveTemplate`]: its own copy of
//! the geometry inside the batch arenas, a local transform and an optional
//! parent node it inherits from.

use std::{mem, sync::Arc};

use cgmath::{Matrix, Matrix3, Matrix4, SquareMatrix};

use crate::{
    data_structures::{
        arena::ArenaRange,
        node::{NodeId, NodePool},
        primitive::{INDEX_BYTES, PrimitiveTemplate, VERTEX_STRIDE_BYTES},
        transform::Transform,
    },
    error::{ArenaKind, EmberError, Result},
};

/// Index of an instance inside its batch handler. Stays valid when the
/// instance storage grows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InstanceId(pub(crate) usize);

impl InstanceId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
pub struct PrimitiveInstance {
    template: Arc<PrimitiveTemplate>,
    vertex_range: ArenaRange,
    element_range: ArenaRange,
    draw: DrawOffsets,
    pub transform: Transform,
    pub parent: Option<NodeId>,
}

impl PrimitiveInstance {
    pub(crate) fn new(
        template: Arc<PrimitiveTemplate>,
        vertex_range: ArenaRange,
        element_range: ArenaRange,
        draw: DrawOffsets,
    ) -> Self {
        Self {
            template,
            vertex_range,
            element_range,
            draw,
            transform: Transform::new(),
            parent: None,
        }
    }

    pub fn template(&self) -> &Arc<PrimitiveTemplate> {
        &self.template
    }

    pub fn vertex_range(&self) -> ArenaRange {
        self.vertex_range
    }

    pub fn element_range(&self) -> ArenaRange {
        self.element_range
    }

    /// Number of `u32` indices this instance draws.
    pub fn index_count(&self) -> u32 {
        self.draw.index_count
    }

    /// Position of the first index in the element buffer, in indices.
    pub fn first_index(&self) -> u32 {
        self.draw.first_index
    }

    /// Position of the first vertex in the vertex buffer, in vertices.
    pub fn base_vertex(&self) -> i32 {
        self.draw.base_vertex
    }

    /// World transform: the local transform pre-multiplied by the parent's
    /// world transform when the parent is active.
    pub fn get_transform(&self, nodes: &NodePool) -> Result<Matrix4<f32>> {
        nodes.compose(self.parent, self.transform.to_matrix())
    }

    pub fn to_raw(&self, nodes: &NodePool) -> Result<InstanceRaw> {
        self.get_transform(nodes).map(InstanceRaw::from_world)
    }
}

/// Offsets of an instance in the units `draw_indexed` takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct DrawOffsets {
    pub first_index: u32,
    pub index_count: u32,
    pub base_vertex: i32,
}

impl DrawOffsets {
    /// Offsets for `template` placed at the current high-water marks.
    ///
    /// Fails unless every index position fits a `u32` and every vertex
    /// position fits the signed base vertex, so later draws never truncate.
    pub fn new(
        vertices_used: usize,
        elements_used: usize,
        template: &PrimitiveTemplate,
    ) -> Result<Self> {
        let base_vertex = vertices_used / VERTEX_STRIDE_BYTES;
        let first_index = elements_used / INDEX_BYTES;
        let index_count = template.indices().len();
        draw_param::<i32>(ArenaKind::Vertex, base_vertex + template.vertices().len())?;
        draw_param::<u32>(ArenaKind::Element, first_index + index_count)?;
        Ok(Self {
            first_index: draw_param(ArenaKind::Element, first_index)?,
            index_count: draw_param(ArenaKind::Element, index_count)?,
            base_vertex: draw_param(ArenaKind::Vertex, base_vertex)?,
        })
    }
}

pub(crate) fn draw_param<T: TryFrom<usize>>(arena: ArenaKind, offset: usize) -> Result<T> {
    T::try_from(offset).map_err(|_| EmberError::OffsetOverflow { arena, offset })
}

/**
 * The raw instance is the actual data stored on the GPU
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 3]; 3],
    pub handedness: f32,
}

impl InstanceRaw {
    /// Packs a world matrix with its normal matrix (inverse transpose of the
    /// upper 3x3). Degenerate scales fall back to the plain upper 3x3.
    pub fn from_world(world: Matrix4<f32>) -> Self {
        let linear = Matrix3::from_cols(world.x.truncate(), world.y.truncate(), world.z.truncate());
        let normal = linear
            .invert()
            .map(|inverse| inverse.transpose())
            .unwrap_or(linear);
        InstanceRaw {
            model: world.into(),
            normal: normal.into(),
            handedness: linear.determinant().signum(),
        }
    }

    const ATTRIBUTES: [wgpu::VertexAttribute; 8] = {
        let model = mem::offset_of!(InstanceRaw, model);
        let normal = mem::offset_of!(InstanceRaw, normal);
        let column4 = mem::size_of::<[f32; 4]>();
        let column3 = mem::size_of::<[f32; 3]>();
        [
            attribute(model, 5, wgpu::VertexFormat::Float32x4),
            attribute(model + column4, 6, wgpu::VertexFormat::Float32x4),
            attribute(model + 2 * column4, 7, wgpu::VertexFormat::Float32x4),
            attribute(model + 3 * column4, 8, wgpu::VertexFormat::Float32x4),
            attribute(normal, 9, wgpu::VertexFormat::Float32x3),
            attribute(normal + column3, 10, wgpu::VertexFormat::Float32x3),
            attribute(normal + 2 * column3, 11, wgpu::VertexFormat::Float32x3),
            attribute(
                mem::offset_of!(InstanceRaw, handedness),
                12,
                wgpu::VertexFormat::Float32,
            ),
        ]
    };

    /**
     * Layout when instance records are bound as a per-instance vertex buffer:
     * four vec4 columns for the model matrix, three vec3 columns for the normal
     * matrix, then the handedness scalar. Locations continue after the vertex
     * attributes of `PrimitiveVertex::desc`.
     */
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

const fn attribute(
    offset: usize,
    shader_location: u32,
    format: wgpu::VertexFormat,
) -> wgpu::VertexAttribute {
    wgpu::VertexAttribute {
        offset: offset as wgpu::BufferAddress,
        shader_location,
        format,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_reject_offsets_beyond_draw_parameters() {
        let cube = PrimitiveTemplate::debug_cube();
        let vertex_limit = i32::MAX as usize * VERTEX_STRIDE_BYTES;
        assert!(matches!(
            DrawOffsets::new(vertex_limit, 0, &cube),
            Err(EmberError::OffsetOverflow {
                arena: ArenaKind::Vertex,
                ..
            })
        ));

        let element_limit = u32::MAX as usize * INDEX_BYTES;
        assert!(matches!(
            DrawOffsets::new(0, element_limit, &cube),
            Err(EmberError::OffsetOverflow {
                arena: ArenaKind::Element,
                ..
            })
        ));
    }

    #[test]
    fn should_convert_offsets_into_draw_units() {
        let cube = PrimitiveTemplate::debug_cube();
        let draw = DrawOffsets::new(2 * cube.vb_len(), 3 * cube.eb_len(), &cube).unwrap();
        assert_eq!(draw.base_vertex, 16);
        assert_eq!(draw.first_index, 108);
        assert_eq!(draw.index_count, 36);
    }
}

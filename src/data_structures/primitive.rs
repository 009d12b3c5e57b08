//! Immutable geometry templates.
//!
//! A template is the single source copy of a primitive's vertices and
//! indices. The batch handler copies it into its arenas once per instance, so
//! the template itself is shared through an `Arc` and never mutated.

use std::{mem, sync::Arc};

use crate::error::{EmberError, Result};

/// Floats per vertex: position(3) + color(3) + uv(2) + normal(3).
pub const VERTEX_STRIDE: usize = 11;
pub const VERTEX_STRIDE_BYTES: usize = VERTEX_STRIDE * mem::size_of::<f32>();
pub const INDEX_BYTES: usize = mem::size_of::<u32>();

/// One vertex as laid out in the vertex arena. Attributes a template does
/// not carry stay zero.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PrimitiveVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub uv: [f32; 2],
    pub normal: [f32; 3],
}

impl PrimitiveVertex {
    pub const fn new(position: [f32; 3], color: [f32; 3], uv: [f32; 2], normal: [f32; 3]) -> Self {
        Self {
            position,
            color,
            uv,
            normal,
        }
    }

    const ATTRIBUTES: [wgpu::VertexAttribute; 4] = [
        wgpu::VertexAttribute {
            offset: mem::offset_of!(PrimitiveVertex, position) as wgpu::BufferAddress,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        },
        wgpu::VertexAttribute {
            offset: mem::offset_of!(PrimitiveVertex, color) as wgpu::BufferAddress,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x3,
        },
        wgpu::VertexAttribute {
            offset: mem::offset_of!(PrimitiveVertex, uv) as wgpu::BufferAddress,
            shader_location: 2,
            format: wgpu::VertexFormat::Float32x2,
        },
        wgpu::VertexAttribute {
            offset: mem::offset_of!(PrimitiveVertex, normal) as wgpu::BufferAddress,
            shader_location: 3,
            format: wgpu::VertexFormat::Float32x3,
        },
    ];

    /// Vertex buffer layout matching the arena contents, locations 0 to 3.
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: VERTEX_STRIDE_BYTES as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PrimitiveTemplate {
    vertices: Vec<PrimitiveVertex>,
    indices: Vec<u32>,
    use_vertex_colors: bool,
    use_uv: bool,
}

impl PrimitiveTemplate {
    /// Builds a template from a triangle list.
    ///
    /// Rejects index lists that are not a whole number of triangles or that
    /// reference a vertex past the end, so a half-loaded asset never becomes
    /// a template.
    pub fn new(
        vertices: Vec<PrimitiveVertex>,
        indices: Vec<u32>,
        use_vertex_colors: bool,
        use_uv: bool,
    ) -> Result<Self> {
        if indices.len() % 3 != 0 {
            return Err(EmberError::InvalidTemplate(format!(
                "{} indices do not form whole triangles",
                indices.len()
            )));
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(EmberError::InvalidTemplate(format!(
                "index {} references past {} vertices",
                index,
                vertices.len()
            )));
        }
        Ok(Self {
            vertices,
            indices,
            use_vertex_colors,
            use_uv,
        })
    }

    /// The colored unit cube used for debugging, centred on the origin.
    pub fn debug_cube() -> Self {
        Self {
            vertices: DEBUG_CUBE_VERTICES.to_vec(),
            indices: DEBUG_CUBE_INDICES.to_vec(),
            use_vertex_colors: true,
            use_uv: false,
        }
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn vertices(&self) -> &[PrimitiveVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Vertex data length in bytes.
    pub fn vb_len(&self) -> usize {
        self.vertices.len() * VERTEX_STRIDE_BYTES
    }

    /// Index data length in bytes.
    pub fn eb_len(&self) -> usize {
        self.indices.len() * INDEX_BYTES
    }

    pub fn use_vertex_colors(&self) -> bool {
        self.use_vertex_colors
    }

    pub fn use_uv(&self) -> bool {
        self.use_uv
    }
}

const DEBUG_CUBE_VERTICES: [PrimitiveVertex; 8] = [
    PrimitiveVertex::new([-0.5, -0.5, -0.5], [1.2, 0.2, 0.2], [0.0, 0.0], [-0.5773, -0.5773, -0.5773]),
    PrimitiveVertex::new([0.5, -0.5, -0.5], [0.2, 1.2, 0.2], [0.0, 0.0], [0.5773, -0.5773, -0.5773]),
    PrimitiveVertex::new([-0.5, 0.5, -0.5], [0.2, 0.2, 1.2], [0.0, 0.0], [-0.5773, 0.5773, -0.5773]),
    PrimitiveVertex::new([0.5, 0.5, -0.5], [1.2, 0.2, 0.2], [0.0, 0.0], [0.5773, 0.5773, -0.5773]),
    PrimitiveVertex::new([-0.5, -0.5, 0.5], [0.2, 0.2, 0.2], [0.0, 0.0], [-0.5773, -0.5773, 0.5773]),
    PrimitiveVertex::new([0.5, -0.5, 0.5], [0.2, 0.2, 0.2], [0.0, 0.0], [0.5773, -0.5773, 0.5773]),
    PrimitiveVertex::new([-0.5, 0.5, 0.5], [0.2, 0.2, 0.2], [0.0, 0.0], [-0.5773, 0.5773, 0.5773]),
    PrimitiveVertex::new([0.5, 0.5, 0.5], [0.2, 0.2, 0.2], [0.0, 0.0], [0.5773, 0.5773, 0.5773]),
];

#[rustfmt::skip]
const DEBUG_CUBE_INDICES: [u32; 36] = [
    1, 0, 2,  1, 2, 3, // front
    0, 5, 4,  0, 1, 5, // top
    7, 3, 2,  7, 2, 6,
    1, 3, 7,  1, 7, 5,
    0, 4, 2,  2, 4, 6,
    4, 5, 6,  6, 5, 7,
];

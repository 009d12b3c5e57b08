//! Render boundary.
//!
//! The runtime does not record draw calls itself. Each frame it hands the
//! render loop one [`DrawCommand`] per instance: a composed world matrix plus
//! the offsets needed for a single indexed draw against the uploaded arenas.

use std::ops::Range;

use cgmath::Matrix4;

use crate::{
    config::IndexMode,
    data_structures::{instance::PrimitiveInstance, node::NodePool},
    error::Result,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCommand {
    pub transform: Matrix4<f32>,
    /// Byte offset of the first index in the element buffer.
    pub element_offset: u64,
    pub first_index: u32,
    pub index_count: u32,
    /// Value to pass as the base vertex of the indexed draw. Zero when
    /// indices were rebased at copy time.
    pub base_vertex: i32,
}

impl DrawCommand {
    pub fn new(
        instance: &PrimitiveInstance,
        nodes: &NodePool,
        index_mode: IndexMode,
    ) -> Result<Self> {
        let base_vertex = match index_mode {
            IndexMode::Verbatim => instance.base_vertex(),
            IndexMode::Rebase => 0,
        };
        Ok(Self {
            transform: instance.get_transform(nodes)?,
            element_offset: instance.element_range().offset as u64,
            first_index: instance.first_index(),
            index_count: instance.index_count(),
            base_vertex,
        })
    }

    /// Index range in the shape `wgpu::RenderPass::draw_indexed` expects.
    pub fn indices(&self) -> Range<u32> {
        self.first_index..self.first_index + self.index_count
    }
}

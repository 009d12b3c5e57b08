//! Batch handler: bump allocation of primitive instances into two shared
//! arenas.
//!
//! All instances live in one vertex arena and one element arena, which are
//! uploaded to the device as a single vertex buffer and a single index buffer.
//! Each instance gets its own copy of its template's data. Regions are
//! append-only for the lifetime of the handler.

use std::sync::Arc;

use log::{debug, warn};

use crate::{
    config::{IndexMode, RuntimeConfig},
    data_structures::{
        arena::{Arena, ArenaRange},
        instance::{DrawOffsets, InstanceId, PrimitiveInstance},
        node::NodePool,
        primitive::PrimitiveTemplate,
        vector::GrowVec,
    },
    error::{ArenaKind, Result},
    render::DrawCommand,
};

pub struct BatchHandler {
    vertices: Arena,
    elements: Arena,
    instances: GrowVec<PrimitiveInstance>,
    index_mode: IndexMode,
}

impl BatchHandler {
    pub fn new(vb_capacity: usize, eb_capacity: usize) -> Self {
        Self {
            vertices: Arena::new(ArenaKind::Vertex, vb_capacity),
            elements: Arena::new(ArenaKind::Element, eb_capacity),
            instances: GrowVec::with_capacity(16),
            index_mode: IndexMode::Verbatim,
        }
    }

    pub fn with_index_mode(mut self, index_mode: IndexMode) -> Self {
        self.index_mode = index_mode;
        self
    }

    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self::new(config.vertex_arena_bytes, config.element_arena_bytes)
            .with_index_mode(config.index_mode)
    }

    pub fn index_mode(&self) -> IndexMode {
        self.index_mode
    }

    /// Copies `template` into fresh arena regions and registers a new
    /// instance with an identity transform and no parent.
    ///
    /// Both arenas and the resulting draw offsets are checked before either
    /// arena is written, so a failure leaves the handler untouched.
    pub fn instantiate(&mut self, template: &Arc<PrimitiveTemplate>) -> Result<InstanceId> {
        let draw = self
            .vertices
            .check(template.vb_len())
            .and_then(|_| self.elements.check(template.eb_len()))
            .and_then(|_| {
                DrawOffsets::new(self.vertices.used(), self.elements.used(), template)
            })
            .inspect_err(|e| warn!("instantiate failed: {}", e))?;
        let base_vertex = draw.base_vertex.unsigned_abs();
        let vertex_range = self.vertices.push(template.vertex_bytes())?;
        let element_range = match self.index_mode {
            IndexMode::Verbatim => self.elements.push(template.index_bytes())?,
            IndexMode::Rebase => {
                let rebased: Vec<u32> = template
                    .indices()
                    .iter()
                    .map(|index| index + base_vertex)
                    .collect();
                self.elements.push(bytemuck::cast_slice(&rebased))?
            }
        };

        let index = self.instances.push(PrimitiveInstance::new(
            template.clone(),
            vertex_range,
            element_range,
            draw,
        ));
        debug!(
            "instance {} at vertices {:?}, elements {:?}",
            index, vertex_range, element_range
        );
        Ok(InstanceId(index))
    }

    pub fn instance(&self, id: InstanceId) -> Result<&PrimitiveInstance> {
        self.instances.get(id.0)
    }

    pub fn instance_mut(&mut self, id: InstanceId) -> Result<&mut PrimitiveInstance> {
        self.instances.get_mut(id.0)
    }

    pub fn instances(&self) -> impl Iterator<Item = (InstanceId, &PrimitiveInstance)> {
        self.instances
            .iter()
            .enumerate()
            .map(|(index, instance)| (InstanceId(index), instance))
    }

    pub fn instances_mut(&mut self) -> impl Iterator<Item = &mut PrimitiveInstance> {
        self.instances.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Written part of the vertex arena.
    pub fn vertex_bytes(&self) -> &[u8] {
        self.vertices.bytes()
    }

    /// Written part of the element arena.
    pub fn element_bytes(&self) -> &[u8] {
        self.elements.bytes()
    }

    pub fn vertex_slice(&self, range: ArenaRange) -> Option<&[u8]> {
        self.vertices.slice(range)
    }

    pub fn element_slice(&self, range: ArenaRange) -> Option<&[u8]> {
        self.elements.slice(range)
    }

    pub fn vertex_capacity(&self) -> usize {
        self.vertices.capacity()
    }

    pub fn element_capacity(&self) -> usize {
        self.elements.capacity()
    }

    pub fn vertex_used(&self) -> usize {
        self.vertices.used()
    }

    pub fn element_used(&self) -> usize {
        self.elements.used()
    }

    /// One draw command per instance, in creation order.
    pub fn draw_commands(&self, nodes: &NodePool) -> Result<Vec<DrawCommand>> {
        self.instances
            .iter()
            .map(|instance| DrawCommand::new(instance, nodes, self.index_mode))
            .collect()
    }
}

//! A node pool and a batch handler that live and die together.
//!
//! Instances only hold [`NodeId`]s, so keeping both halves in one owner is
//! what guarantees the pool outlives every instance that refers to it.

use std::sync::Arc;

use cgmath::Matrix4;

use crate::{
    batch::BatchHandler,
    config::RuntimeConfig,
    data_structures::{
        instance::{InstanceId, PrimitiveInstance},
        node::{Node, NodeId, NodePool},
        primitive::PrimitiveTemplate,
    },
    error::{EmberError, Result},
    render::DrawCommand,
};

pub struct Scene {
    pub nodes: NodePool,
    pub batch: BatchHandler,
}

impl Scene {
    pub fn new(config: &RuntimeConfig) -> Self {
        let mut nodes = NodePool::new(config.node_capacity);
        if let Some(max_depth) = config.max_parent_depth {
            nodes = nodes.with_max_depth(max_depth);
        }
        log::debug!("scene created with {:?}", config);
        Self {
            nodes,
            batch: BatchHandler::from_config(config),
        }
    }

    pub fn add_node(&mut self) -> Result<NodeId> {
        self.nodes.add_node()
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.node_mut(id).ok_or(EmberError::UnknownNode(id))
    }

    pub fn instantiate(&mut self, template: &Arc<PrimitiveTemplate>) -> Result<InstanceId> {
        self.batch.instantiate(template)
    }

    pub fn instance_mut(&mut self, id: InstanceId) -> Result<&mut PrimitiveInstance> {
        self.batch.instance_mut(id)
    }

    /// Attaches an instance to a live node, or detaches it with `None`.
    pub fn set_instance_parent(&mut self, id: InstanceId, parent: Option<NodeId>) -> Result<()> {
        if let Some(parent) = parent {
            if self.nodes.node(parent).is_none() {
                return Err(EmberError::UnknownNode(parent));
            }
        }
        self.batch.instance_mut(id)?.parent = parent;
        Ok(())
    }

    pub fn instance_transform(&self, id: InstanceId) -> Result<Matrix4<f32>> {
        self.batch.instance(id)?.get_transform(&self.nodes)
    }

    /// This frame's draw commands, once local transforms have been updated.
    pub fn draw_commands(&self) -> Result<Vec<DrawCommand>> {
        self.batch.draw_commands(&self.nodes)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(&RuntimeConfig::default())
    }
}

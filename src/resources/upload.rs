//! One-time upload of the batch arenas plus the per-frame instance buffer.

use wgpu::util::DeviceExt;

use crate::{
    batch::BatchHandler,
    data_structures::{instance::InstanceRaw, node::NodePool},
    error::Result,
};

/// Device-side copies of a batch: the vertex arena, the element arena and one
/// `InstanceRaw` per instance.
pub struct GpuBatch {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub instance_buffer: wgpu::Buffer,
    instance_count: usize,
}

impl GpuBatch {
    /// Uploads the written part of both arenas. Instances created afterwards
    /// are not visible to the device until the batch is uploaded again.
    pub fn upload(device: &wgpu::Device, batch: &BatchHandler, nodes: &NodePool) -> Result<Self> {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Batch Vertex Buffer"),
            contents: batch.vertex_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Batch Index Buffer"),
            contents: batch.element_bytes(),
            usage: wgpu::BufferUsages::INDEX,
        });
        let raw_instances = raw_instances(batch, nodes)?;
        let instance_buffer = create_instance_buffer(device, &raw_instances);
        log::debug!(
            "uploaded {} vertex bytes, {} index bytes, {} instances",
            batch.vertex_used(),
            batch.element_used(),
            raw_instances.len()
        );
        Ok(Self {
            vertex_buffer,
            index_buffer,
            instance_buffer,
            instance_count: raw_instances.len(),
        })
    }

    /// Writes this frame's world transforms. The instance buffer is recreated
    /// when the instance count changed since the last write.
    pub fn write_transforms(
        &mut self,
        queue: &wgpu::Queue,
        device: &wgpu::Device,
        batch: &BatchHandler,
        nodes: &NodePool,
    ) -> Result<()> {
        let raw_instances = raw_instances(batch, nodes)?;
        if raw_instances.len() != self.instance_count {
            self.instance_buffer = create_instance_buffer(device, &raw_instances);
            self.instance_count = raw_instances.len();
        } else {
            queue.write_buffer(
                &self.instance_buffer,
                0,
                bytemuck::cast_slice(&raw_instances),
            );
        }
        Ok(())
    }

    pub fn instance_count(&self) -> usize {
        self.instance_count
    }
}

fn raw_instances(batch: &BatchHandler, nodes: &NodePool) -> Result<Vec<InstanceRaw>> {
    batch
        .instances()
        .map(|(_, instance)| instance.to_raw(nodes))
        .collect()
}

fn create_instance_buffer(device: &wgpu::Device, raw_instances: &[InstanceRaw]) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Instance Buffer"),
        contents: bytemuck::cast_slice(raw_instances),
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
    })
}

//! ember
//!
//! A minimal real-time rendering runtime. It keeps a pooled hierarchy of
//! transform nodes, packs primitive instances into one vertex arena and one
//! element arena that can be uploaded to the GPU as-is, and composes
//! per-instance world transforms every frame.
//!
//! High-level modules
//! - `batch`: the batch handler bump-allocating instances into the arenas
//! - `config`: pool/arena sizing and index handling, loadable from TOML
//! - `data_structures`: nodes, templates, instances, arenas and the growable vector
//! - `error`: the error taxonomy shared by the core
//! - `render`: per-instance draw commands handed to the render loop
//! - `resources`: glTF loading and GPU upload of the arenas
//! - `scene`: a node pool and batch handler owned together
//!

pub mod batch;
pub mod config;
pub mod data_structures;
pub mod error;
pub mod render;
pub mod resources;
pub mod scene;

// Re-exports commonly used types for convenience in downstream code.
pub use batch::BatchHandler;
pub use cgmath;
pub use config::{IndexMode, RuntimeConfig};
pub use data_structures::{
    instance::{InstanceId, PrimitiveInstance},
    node::{NodeId, NodePool},
    primitive::PrimitiveTemplate,
    transform::Transform,
};
pub use error::{EmberError, Result};
pub use render::DrawCommand;
pub use scene::Scene;

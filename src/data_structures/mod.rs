//! Engine data structures: nodes, geometry templates, instances and storage.
//!
//! - `vector` is the growable array backing node and instance storage
//! - `arena` is the fixed-capacity byte arena regions are bump-allocated from
//! - `transform` holds the local position/scale/rotation shared by nodes and instances
//! - `node` is the pool of hierarchical transform nodes
//! - `primitive` contains immutable geometry templates and the vertex layout
//! - `instance` holds per-placement data and the GPU instance record

pub mod arena;
pub mod instance;
pub mod node;
pub mod primitive;
pub mod transform;
pub mod vector;

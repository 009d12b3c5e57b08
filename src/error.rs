//! Error taxonomy shared by the node pool, the batch handler and the
//! growable vector.
//!
//! Every variant is a local, recoverable condition reported to the immediate
//! caller. Asset and config loading sit at the IO boundary and use
//! `anyhow::Result` instead.

use std::fmt;

use crate::data_structures::node::NodeId;

pub type Result<T> = std::result::Result<T, EmberError>;

/// Which of the two batch arenas an allocation was made from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArenaKind {
    Vertex,
    Element,
}

impl fmt::Display for ArenaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArenaKind::Vertex => write!(f, "vertex"),
            ArenaKind::Element => write!(f, "element"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmberError {
    /// No free node slot is left in the pool.
    #[error("node pool exhausted (capacity {capacity})")]
    PoolExhausted { capacity: usize },

    /// An arena lacks room for the requested region. Nothing was written.
    #[error("{arena} arena exhausted: requested {requested} bytes, {remaining} remaining")]
    ArenaExhausted {
        arena: ArenaKind,
        requested: usize,
        remaining: usize,
    },

    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },

    /// The handle is stale or was never issued by this pool.
    #[error("unknown or released node {0:?}")]
    UnknownNode(NodeId),

    /// The parent chain of this node loops back on itself.
    #[error("parent cycle detected at node {0:?}")]
    ParentCycle(NodeId),

    /// Linking the node would put some node more than `max_depth` levels below
    /// a root.
    #[error("node {node:?} would exceed the parent depth limit of {max_depth}")]
    DepthExceeded { node: NodeId, max_depth: usize },

    /// An arena offset no longer fits a 32-bit draw parameter.
    #[error("{arena} offset {offset} does not fit a draw parameter")]
    OffsetOverflow { arena: ArenaKind, offset: usize },

    #[error("invalid primitive template: {0}")]
    InvalidTemplate(String),
}

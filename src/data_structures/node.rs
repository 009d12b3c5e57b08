//! Pool of hierarchical transform nodes.
//!
//! The pool owns every node. Nodes and primitive instances refer to a parent
//! by [`NodeId`] only, so a parent link never keeps a node alive and never
//! dangles: a handle to a released slot simply stops resolving.

use cgmath::Matrix4;
use log::{debug, warn};

use crate::{
    data_structures::{transform::Transform, vector::GrowVec},
    error::{EmberError, Result},
};

/// Generational handle to a node slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeState {
    /// Slot not allocated. Contributes identity to any transform walk.
    #[default]
    None,
    Active,
}

#[derive(Clone, Debug, Default)]
pub struct Node {
    pub transform: Transform,
    state: NodeState,
    parent: Option<NodeId>,
    generation: u32,
}

impl Node {
    pub fn state(&self) -> NodeState {
        self.state
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_active(&self) -> bool {
        self.state == NodeState::Active
    }
}

pub struct NodePool {
    nodes: GrowVec<Node>,
    free: Vec<u32>,
    next_unused: usize,
    active: usize,
    max_depth: usize,
}

impl NodePool {
    /// Allocates `capacity` empty slots. The capacity never changes.
    pub fn new(capacity: usize) -> Self {
        let mut nodes = GrowVec::with_capacity(capacity);
        for _ in 0..capacity {
            nodes.push(Node::default());
        }
        Self {
            nodes,
            free: Vec::new(),
            next_unused: 0,
            active: 0,
            max_depth: capacity,
        }
    }

    /// Caps how many ancestors any node may have. `set_parent` rejects links
    /// that break the cap and transform walks stop at it.
    ///
    /// The default equals the capacity, which no chain in this pool can reach.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    /// Number of active nodes.
    pub fn len(&self) -> usize {
        self.active
    }

    pub fn is_empty(&self) -> bool {
        self.active == 0
    }

    /// Takes a free slot, marks it active and resets it to identity with no
    /// parent. Released slots are reused before untouched ones.
    pub fn add_node(&mut self) -> Result<NodeId> {
        let index = match self.free.pop() {
            Some(index) => index as usize,
            None if self.next_unused < self.capacity() => {
                self.next_unused += 1;
                self.next_unused - 1
            }
            None => {
                warn!("node pool exhausted at capacity {}", self.capacity());
                return Err(EmberError::PoolExhausted {
                    capacity: self.capacity(),
                });
            }
        };
        let node = self.nodes.get_mut(index)?;
        node.state = NodeState::Active;
        node.parent = None;
        node.transform.reset();
        self.active += 1;
        Ok(NodeId {
            index: index as u32,
            generation: node.generation,
        })
    }

    /// Returns the slot to the pool. Outstanding handles to it stop resolving
    /// and children that pointed at it inherit identity from now on.
    pub fn release_node(&mut self, id: NodeId) -> Result<()> {
        if self.node(id).is_none() {
            return Err(EmberError::UnknownNode(id));
        }
        let node = self.nodes.get_mut(id.index())?;
        node.state = NodeState::None;
        node.parent = None;
        node.transform.reset();
        node.generation = node.generation.wrapping_add(1);
        self.free.push(id.index);
        self.active -= 1;
        debug!("released node slot {}", id.index);
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .get(id.index())
            .ok()
            .filter(|node| node.is_active() && node.generation == id.generation)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes
            .get_mut(id.index())
            .ok()
            .filter(|node| node.is_active() && node.generation == id.generation)
    }

    /// Attaches `child` below `parent`, or detaches it when `parent` is `None`.
    ///
    /// Fails with `ParentCycle` if `child` would become its own ancestor, and
    /// with `DepthExceeded` if `child` or any of its descendants would end up
    /// more than `max_depth` levels below a root.
    pub fn set_parent(&mut self, child: NodeId, parent: Option<NodeId>) -> Result<()> {
        if self.node(child).is_none() {
            return Err(EmberError::UnknownNode(child));
        }
        if let Some(parent) = parent {
            if self.node(parent).is_none() {
                return Err(EmberError::UnknownNode(parent));
            }
            let mut ancestors = 0;
            let mut next = Some(parent);
            while let Some(id) = next {
                if id == child || ancestors == self.capacity() {
                    return Err(EmberError::ParentCycle(child));
                }
                let Some(node) = self.node(id) else {
                    break;
                };
                ancestors += 1;
                next = node.parent;
            }
            if ancestors + self.subtree_height(child) > self.max_depth {
                warn!(
                    "linking node {} would exceed parent depth {}",
                    child.index, self.max_depth
                );
                return Err(EmberError::DepthExceeded {
                    node: child,
                    max_depth: self.max_depth,
                });
            }
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = parent;
        }
        Ok(())
    }

    /// Levels between `root` and its deepest active descendant.
    fn subtree_height(&self, root: NodeId) -> usize {
        self.iter()
            .filter_map(|(id, _)| self.levels_below(id, root))
            .max()
            .unwrap_or(0)
    }

    fn levels_below(&self, id: NodeId, ancestor: NodeId) -> Option<usize> {
        let mut current = id;
        for levels in 0..self.capacity() {
            if current == ancestor {
                return Some(levels);
            }
            current = self.node(current)?.parent?;
        }
        None
    }

    /// World transform of `id`: its local matrix pre-multiplied by every active
    /// ancestor's local matrix.
    pub fn get_transform(&self, id: NodeId) -> Result<Matrix4<f32>> {
        let node = self.node(id).ok_or(EmberError::UnknownNode(id))?;
        self.compose(node.parent, node.transform.to_matrix())
            .map_err(|e| match e {
                EmberError::DepthExceeded { max_depth, .. } => {
                    EmberError::DepthExceeded { node: id, max_depth }
                }
                other => other,
            })
    }

    /// Pre-multiplies `local` by the world transform of `parent`.
    ///
    /// A missing, released or inactive parent contributes identity and ends
    /// the walk. Visiting more than `max_depth` ancestors fails with
    /// `DepthExceeded` naming `parent`.
    pub fn compose(&self, parent: Option<NodeId>, local: Matrix4<f32>) -> Result<Matrix4<f32>> {
        let mut world = local;
        let mut next = parent;
        let mut depth = 0;
        while let Some(id) = next {
            let Some(node) = self.node(id) else {
                break;
            };
            if depth == self.max_depth {
                return Err(EmberError::DepthExceeded {
                    node: parent.unwrap_or(id),
                    max_depth: self.max_depth,
                });
            }
            depth += 1;
            world = node.transform.to_matrix() * world;
            next = node.parent;
        }
        Ok(world)
    }

    /// Active nodes and their handles, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_active())
            .map(|(index, node)| {
                (
                    NodeId {
                        index: index as u32,
                        generation: node.generation,
                    },
                    node,
                )
            })
    }
}

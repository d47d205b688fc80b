//! Detached pre-order snapshots of the node set, for renderers.

use super::{Aabb, CellKey, NodeState, Tree};

/// How a renderer should classify a node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum NodeKind {
  /// Subdivided node.
  Internal,
  /// Leaf not overlapped by any volume.
  Free,
  /// Max-level leaf overlapped by a volume.
  Occupied,
}

/// One node as seen at snapshot time.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct NodeSnapshot<const D: usize> {
  pub key: CellKey<D>,
  pub bounds: Aabb<D>,
  pub occupied: bool,
  pub is_leaf: bool,
}

impl<const D: usize> NodeSnapshot<D> {
  pub fn kind(&self) -> NodeKind {
    match (self.is_leaf, self.occupied) {
      (false, _) => NodeKind::Internal,
      (true, false) => NodeKind::Free,
      (true, true) => NodeKind::Occupied,
    }
  }
}

impl<const D: usize> Tree<D> {
  /// Every node in pre-order: a node, then its children's subtrees in offset
  /// order `0..2^D`.
  ///
  /// The result owns its data and does not follow later inserts.
  pub fn all_nodes(&self) -> Vec<NodeSnapshot<D>> {
    let mut out = Vec::with_capacity(self.node_count());
    let mut stack = vec![CellKey::root()];
    while let Some(key) = stack.pop() {
      let Some(state) = self.state(&key) else {
        continue;
      };
      let (is_leaf, occupied) = match state {
        NodeState::Leaf { occupied } => (true, occupied),
        NodeState::Internal => (false, false),
      };
      out.push(NodeSnapshot {
        key,
        bounds: self.config().cell_bounds(&key),
        occupied,
        is_leaf,
      });
      if !is_leaf {
        stack.extend((0..CellKey::<D>::CHILD_COUNT).rev().map(|offset| key.child(offset)));
      }
    }
    out
  }
}

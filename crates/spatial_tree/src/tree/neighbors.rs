//! Face-neighbor search across cells of differing depth.
//!
//! For each face of a query node the same-level cell across it is examined:
//!
//! - present leaf: it is the neighbor
//! - absent: the region is coarser there, the deepest materialized ancestor
//!   (always a leaf) is the neighbor
//! - present but internal: the region is finer there, every leaf of its
//!   subtree that lies against the shared face is a neighbor
//!
//! Cells outside the root contribute nothing.

use smallvec::{smallvec, SmallVec};

use super::{CellKey, Face, NodeRef, NodeState, Tree};

impl<const D: usize> Tree<D> {
  /// All leaves sharing a full face with `node`, at whatever depth the tree
  /// reached across each face.
  ///
  /// Ordered by face (`-x, +x, -y, +y, ...`), without duplicates.
  pub fn neighbors(&self, node: &NodeRef<D>) -> Vec<NodeRef<D>> {
    let mut out: Vec<NodeRef<D>> = Vec::with_capacity(2 * D);
    for face in Face::all::<D>() {
      for neighbor in self.face_neighbors(node, face) {
        if !out.contains(&neighbor) {
          out.push(neighbor);
        }
      }
    }
    out
  }

  /// Leaves across a single face of `node`.
  pub fn face_neighbors(&self, node: &NodeRef<D>, face: Face) -> SmallVec<[NodeRef<D>; 4]> {
    self.check_owner(node);
    debug_assert!(face.axis < D, "face axis out of range");

    let Some(candidate) = node.key().step(face) else {
      return SmallVec::new();
    };

    match self.state(&candidate) {
      Some(NodeState::Leaf { .. }) => smallvec![self.handle(candidate)],
      None => smallvec![self.handle(self.existing_ancestor(candidate))],
      Some(NodeState::Internal) => {
        let mut out = SmallVec::new();
        self.collect_face_leaves(candidate, face.opposite(), &mut out);
        out
      }
    }
  }

  /// Collect the leaves of the subtree at `key` that lie against `face` of
  /// `key`'s cell.
  fn collect_face_leaves(
    &self,
    key: CellKey<D>,
    face: Face,
    out: &mut SmallVec<[NodeRef<D>; 4]>,
  ) {
    let mut stack = vec![key];
    while let Some(key) = stack.pop() {
      match self.state(&key) {
        Some(NodeState::Leaf { .. }) => out.push(self.handle(key)),
        Some(NodeState::Internal) => {
          // Reverse so leaves come out in offset order
          for offset in (0..CellKey::<D>::CHILD_COUNT).rev() {
            if face.contains_child(offset) {
              stack.push(key.child(offset));
            }
          }
        }
        // Children of an internal node always exist
        None => {}
      }
    }
  }
}

#[cfg(test)]
#[path = "neighbors_test.rs"]
mod neighbors_test;

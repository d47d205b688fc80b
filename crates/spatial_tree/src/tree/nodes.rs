//! Tree - sparse node map with lazy subdivision and point localization.
//!
//! Nodes are values keyed by [`CellKey`]. Children of an internal node are
//! never stored as references: they are the `2^D` keys derived by coordinate
//! math, all present in the map once the parent is subdivided.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use smallvec::SmallVec;

use super::{Aabb, CellKey, GeometrySource, TreeConfig, TreeError, TreeResult};

// =============================================================================
// TreeId - unique identifier
// =============================================================================

/// Atomic counter for generating unique TreeIds.
static TREE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Opaque tree identifier.
///
/// Generated atomically - guaranteed unique within process lifetime. Every
/// [`NodeRef`] carries the id of the tree that issued it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TreeId(u64);

impl TreeId {
  fn next() -> Self {
    Self(TREE_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
  }

  /// Get the raw ID value.
  pub fn raw(&self) -> u64 {
    self.0
  }
}

// =============================================================================
// Node state and handles
// =============================================================================

/// Stored state of a materialized node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NodeState {
  /// No children. `occupied` is only ever set at the max level.
  Leaf { occupied: bool },
  /// Subdivided: all `2^D` children exist.
  Internal,
}

/// Handle to a materialized node of one specific tree.
///
/// Cheap to copy and hash; used as the element type of flood-fill sets.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeRef<const D: usize> {
  tree: TreeId,
  key: CellKey<D>,
}

impl<const D: usize> NodeRef<D> {
  /// Identity of the node within its tree.
  #[inline]
  pub fn key(&self) -> CellKey<D> {
    self.key
  }

  /// Grid coordinates at the node's level.
  #[inline]
  pub fn coords(&self) -> [u32; D] {
    self.key.coords
  }

  /// Subdivision depth.
  #[inline]
  pub fn level(&self) -> u8 {
    self.key.level
  }

  /// Tree that issued this handle.
  #[inline]
  pub fn tree_id(&self) -> TreeId {
    self.tree
  }
}

/// Counters from one or more insert calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InsertStats {
  /// Number of leaves split into `2^D` children.
  pub subdivisions: usize,
  /// Number of max-level leaves that went from free to occupied.
  pub newly_occupied: usize,
}

impl InsertStats {
  /// True if the insert changed nothing.
  #[inline]
  pub fn is_noop(&self) -> bool {
    self.subdivisions == 0 && self.newly_occupied == 0
  }
}

impl std::ops::AddAssign for InsertStats {
  fn add_assign(&mut self, other: Self) {
    self.subdivisions += other.subdivisions;
    self.newly_occupied += other.newly_occupied;
  }
}

// =============================================================================
// Tree
// =============================================================================

/// Sparse, adaptively subdivided occupancy tree over a `D`-dimensional box.
pub struct Tree<const D: usize> {
  id: TreeId,
  config: TreeConfig<D>,
  nodes: HashMap<CellKey<D>, NodeState>,
}

/// Two-dimensional tree.
pub type QuadTree = Tree<2>;

/// Three-dimensional tree.
pub type Octree = Tree<3>;

impl<const D: usize> Tree<D> {
  /// Create a tree holding only the (free) root leaf.
  pub fn new(config: TreeConfig<D>) -> TreeResult<Self> {
    const { assert!(D == 2 || D == 3, "trees are two- or three-dimensional") };
    config.validate()?;

    let mut nodes = HashMap::new();
    nodes.insert(CellKey::root(), NodeState::Leaf { occupied: false });

    let id = TreeId::next();
    tracing::debug!(
      tree = id.raw(),
      max_level = config.max_level,
      bounds = ?config.bounds,
      "created tree"
    );

    Ok(Self { id, config, nodes })
  }

  /// Create a tree and insert every volume of `source`.
  #[tracing::instrument(level = "debug", skip_all, name = "tree::build")]
  pub fn build<S>(config: TreeConfig<D>, source: &S) -> TreeResult<Self>
  where
    S: GeometrySource<D> + ?Sized,
  {
    let mut tree = Self::new(config)?;
    let mut stats = InsertStats::default();
    let mut volumes = 0usize;
    source.visit_volumes(&mut |volume| {
      stats += tree.insert(volume);
      volumes += 1;
    });
    tracing::debug!(
      tree = tree.id.raw(),
      volumes,
      nodes = tree.node_count(),
      subdivisions = stats.subdivisions,
      occupied = stats.newly_occupied,
      "built tree from geometry source"
    );
    Ok(tree)
  }

  /// Unique id of this tree instance.
  #[inline]
  pub fn id(&self) -> TreeId {
    self.id
  }

  /// Configuration the tree was built with.
  #[inline]
  pub fn config(&self) -> &TreeConfig<D> {
    &self.config
  }

  /// Finest level.
  #[inline]
  pub fn max_level(&self) -> u8 {
    self.config.max_level
  }

  /// Region covered by the root.
  #[inline]
  pub fn root_bounds(&self) -> Aabb<D> {
    self.config.bounds
  }

  /// Handle to the root node.
  #[inline]
  pub fn root(&self) -> NodeRef<D> {
    self.handle(CellKey::root())
  }

  /// Handle to the node at `key`, if it was materialized.
  pub fn get(&self, key: &CellKey<D>) -> Option<NodeRef<D>> {
    self.nodes.contains_key(key).then(|| self.handle(*key))
  }

  /// Number of materialized nodes.
  #[inline]
  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  /// Number of leaves.
  pub fn leaf_count(&self) -> usize {
    self
      .nodes
      .values()
      .filter(|state| matches!(state, NodeState::Leaf { .. }))
      .count()
  }

  /// Iterate over leaves (unordered).
  pub fn leaves(&self) -> impl Iterator<Item = NodeRef<D>> + '_ {
    self
      .nodes
      .iter()
      .filter(|(_, state)| matches!(state, NodeState::Leaf { .. }))
      .map(|(key, _)| self.handle(*key))
  }

  // ---------------------------------------------------------------------------
  // Insertion
  // ---------------------------------------------------------------------------

  /// Insert a bounding volume.
  ///
  /// Descends from the root into every cell the volume overlaps, splitting
  /// leaves on the way, and marks the max-level leaves it reaches occupied.
  /// Re-inserting a volume changes nothing.
  #[tracing::instrument(level = "trace", skip_all, name = "tree::insert")]
  pub fn insert(&mut self, volume: Aabb<D>) -> InsertStats {
    let mut stats = InsertStats::default();

    if !volume.is_finite() || !volume.is_ordered() {
      tracing::warn!(tree = self.id.raw(), ?volume, "ignoring malformed volume");
      return stats;
    }

    let max_level = self.config.max_level;
    let mut stack = vec![CellKey::root()];
    while let Some(key) = stack.pop() {
      let cell = self.config.cell_bounds(&key);
      if !self.volume_overlaps_cell(&volume, &cell) {
        continue;
      }

      if key.level == max_level {
        if let Some(NodeState::Leaf { occupied }) = self.nodes.get_mut(&key) {
          if !*occupied {
            *occupied = true;
            stats.newly_occupied += 1;
          }
        }
        continue;
      }

      if let Some(NodeState::Leaf { .. }) = self.nodes.get(&key) {
        self.subdivide(key);
        stats.subdivisions += 1;
      }
      stack.extend(key.children());
    }

    tracing::trace!(
      tree = self.id.raw(),
      ?volume,
      subdivisions = stats.subdivisions,
      occupied = stats.newly_occupied,
      "inserted volume"
    );
    stats
  }

  /// Insert every volume, returning the summed stats.
  pub fn insert_all<I>(&mut self, volumes: I) -> InsertStats
  where
    I: IntoIterator<Item = Aabb<D>>,
  {
    let mut stats = InsertStats::default();
    for volume in volumes {
      stats += self.insert(volume);
    }
    stats
  }

  /// Replace a leaf by its `2^D` free children in one step.
  fn subdivide(&mut self, key: CellKey<D>) {
    debug_assert!(key.level < self.config.max_level, "cannot split a max-level leaf");
    self.nodes.insert(key, NodeState::Internal);
    for child in key.children() {
      self.nodes.insert(child, NodeState::Leaf { occupied: false });
    }
    tracing::trace!(tree = self.id.raw(), ?key, "subdivided");
  }

  /// Overlap test used by insertion.
  ///
  /// Per axis: a volume with positive extent must overlap the cell's open
  /// interval; a zero-extent axis is a coordinate that must fall in the
  /// cell's half-open interval, with the root's upper face closed.
  fn volume_overlaps_cell(&self, volume: &Aabb<D>, cell: &Aabb<D>) -> bool {
    let root = &self.config.bounds;
    (0..D).all(|axis| {
      let (v_min, v_max) = (volume.min[axis], volume.max[axis]);
      if v_min < v_max {
        v_min < cell.max[axis] && cell.min[axis] < v_max
      } else {
        cell.min[axis] <= v_min
          && (v_min < cell.max[axis] || (v_min == root.max[axis] && cell.max[axis] == root.max[axis]))
      }
    })
  }

  // ---------------------------------------------------------------------------
  // Localization
  // ---------------------------------------------------------------------------

  /// Find the leaf containing `point`.
  ///
  /// Computes the max-level cell of the point and walks up to the deepest
  /// materialized ancestor, which is always a leaf.
  pub fn locate(&self, point: impl Into<[f64; D]>) -> TreeResult<NodeRef<D>> {
    self.locate_at_level(point, self.config.max_level)
  }

  /// Find the deepest materialized node at or above `level` containing `point`.
  ///
  /// Unlike [`Tree::locate`] the result may be internal when `level` is
  /// shallower than the subdivision reached there.
  pub fn locate_at_level(&self, point: impl Into<[f64; D]>, level: u8) -> TreeResult<NodeRef<D>> {
    let point = point.into();
    if level > self.config.max_level {
      return Err(TreeError::LevelOutOfRange {
        level,
        max_level: self.config.max_level,
      });
    }

    let Some(coords) = self.config.grid_coords(&point, level) else {
      tracing::debug!(tree = self.id.raw(), ?point, "point outside root bounds");
      return Err(TreeError::OutOfBounds {
        point: point.to_vec(),
      });
    };

    Ok(self.handle(self.existing_ancestor(CellKey::new(coords, level))))
  }

  /// Walk up from `key` to the first materialized node.
  pub(crate) fn existing_ancestor(&self, key: CellKey<D>) -> CellKey<D> {
    let mut key = key;
    loop {
      if self.nodes.contains_key(&key) {
        return key;
      }
      match key.parent() {
        Some(parent) => key = parent,
        // The root is always present; reaching here means `key` was the root.
        None => return key,
      }
    }
  }

  // ---------------------------------------------------------------------------
  // Node queries
  // ---------------------------------------------------------------------------

  /// True for a leaf overlapped by an inserted volume at the max level.
  pub fn is_occupied(&self, node: &NodeRef<D>) -> bool {
    matches!(self.state_of(node), NodeState::Leaf { occupied: true })
  }

  /// True until the node is subdivided.
  pub fn is_leaf(&self, node: &NodeRef<D>) -> bool {
    matches!(self.state_of(node), NodeState::Leaf { .. })
  }

  /// Stored state of the node.
  pub fn state_of(&self, node: &NodeRef<D>) -> NodeState {
    self.check_owner(node);
    match self.nodes.get(&node.key) {
      Some(state) => *state,
      None => panic!("node {:?} is not materialized in tree {}", node.key, self.id.raw()),
    }
  }

  /// World-space box of the node.
  pub fn bounds(&self, node: &NodeRef<D>) -> Aabb<D> {
    self.check_owner(node);
    self.config.cell_bounds(&node.key)
  }

  /// The `2^D` children of an internal node in offset order, or None for a
  /// leaf.
  pub fn children(&self, node: &NodeRef<D>) -> Option<SmallVec<[NodeRef<D>; 8]>> {
    match self.state_of(node) {
      NodeState::Leaf { .. } => None,
      NodeState::Internal => Some(node.key.children().map(|key| self.handle(key)).collect()),
    }
  }

  /// Parent of the node, or None for the root.
  pub fn parent(&self, node: &NodeRef<D>) -> Option<NodeRef<D>> {
    self.check_owner(node);
    node.key.parent().map(|key| self.handle(key))
  }

  /// Raw state lookup by key.
  #[inline]
  pub(crate) fn state(&self, key: &CellKey<D>) -> Option<NodeState> {
    self.nodes.get(key).copied()
  }

  #[inline]
  pub(crate) fn handle(&self, key: CellKey<D>) -> NodeRef<D> {
    NodeRef { tree: self.id, key }
  }

  /// Handles are only meaningful for the tree that issued them.
  #[inline]
  pub(crate) fn check_owner(&self, node: &NodeRef<D>) {
    assert!(
      node.tree == self.id,
      "node {:?} belongs to tree {}, queried on tree {}",
      node.key,
      node.tree.raw(),
      self.id.raw()
    );
  }
}

#[cfg(test)]
#[path = "nodes_test.rs"]
mod nodes_test;

//! Tree statistics for drivers, debug overlays and logs.
//!
//! # Usage
//!
//! ```ignore
//! use spatial_tree::metrics::TreeMetrics;
//!
//! let metrics = TreeMetrics::from_tree(&tree);
//! println!("{} leaves, {:.1}% occupied", metrics.total_leaves(), metrics.occupied_fraction() * 100.0);
//! ```

use crate::tree::{NodeState, Tree};

/// Per-level node statistics, taken at call time.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeMetrics {
  /// Count of leaves at each level (index = level).
  pub leaves_per_level: Vec<u32>,
  /// Count of occupied leaves at each level. Only the max level is non-zero.
  pub occupied_per_level: Vec<u32>,
  /// Count of subdivided nodes.
  pub internal_nodes: u32,
  /// Spatial dimension of the tree.
  pub dimensions: usize,
}

impl TreeMetrics {
  /// Gather statistics from a tree.
  pub fn from_tree<const D: usize>(tree: &Tree<D>) -> Self {
    let levels = usize::from(tree.max_level()) + 1;
    let mut metrics = Self {
      leaves_per_level: vec![0; levels],
      occupied_per_level: vec![0; levels],
      internal_nodes: 0,
      dimensions: D,
    };

    for snapshot in tree.all_nodes() {
      let level = usize::from(snapshot.key.level);
      match (snapshot.is_leaf, snapshot.occupied) {
        (false, _) => metrics.internal_nodes += 1,
        (true, occupied) => {
          metrics.leaves_per_level[level] += 1;
          if occupied {
            metrics.occupied_per_level[level] += 1;
          }
        }
      }
    }

    tracing::trace!(
      tree = tree.id().raw(),
      leaves = metrics.total_leaves(),
      occupied = metrics.total_occupied(),
      "collected tree metrics"
    );
    metrics
  }

  /// Get the total leaf count across all levels.
  pub fn total_leaves(&self) -> u32 {
    self.leaves_per_level.iter().sum()
  }

  /// Get the total occupied leaf count.
  pub fn total_occupied(&self) -> u32 {
    self.occupied_per_level.iter().sum()
  }

  /// Total materialized nodes (leaves + internal).
  pub fn total_nodes(&self) -> u32 {
    self.total_leaves() + self.internal_nodes
  }

  /// Fraction of the root volume covered by occupied leaves.
  pub fn occupied_fraction(&self) -> f64 {
    self
      .occupied_per_level
      .iter()
      .enumerate()
      .map(|(level, &count)| f64::from(count) * self.level_fraction(level))
      .sum()
  }

  /// Fraction of the root volume covered by one cell at `level`.
  fn level_fraction(&self, level: usize) -> f64 {
    0.5f64.powi((level * self.dimensions) as i32)
  }

  /// Deepest level holding any leaf.
  pub fn deepest_leaf_level(&self) -> Option<usize> {
    self.leaves_per_level.iter().rposition(|&count| count > 0)
  }
}

/// Count leaves directly from the node map, for callers that only need the
/// total without a per-level breakdown.
pub fn count_leaves<const D: usize>(tree: &Tree<D>) -> (usize, usize) {
  let mut free = 0;
  let mut occupied = 0;
  for leaf in tree.leaves() {
    match tree.state_of(&leaf) {
      NodeState::Leaf { occupied: true } => occupied += 1,
      _ => free += 1,
    }
  }
  (free, occupied)
}

//! spatial_tree - Sparse quadtree/octree occupancy index
//!
//! Partitions a fixed root box into cells that subdivide only where inserted
//! bounding volumes reach, down to a configured max level. Max-level leaves
//! touched by a volume are marked occupied.
//!
//! # Features
//!
//! - **Adaptive subdivision**: one `Tree<D>` for quadtrees (`D = 2`) and
//!   octrees (`D = 3`)
//! - **Localization**: point → containing leaf in `O(depth)` map lookups
//! - **Face neighbors**: leaves sharing a full face, across differing depths
//! - **Flood fill**: step-driven breadth-first expansion over free leaves
//!
//! # Example
//!
//! ```ignore
//! use spatial_tree::{Aabb, FloodFill, QuadTree, TreeConfig};
//!
//! let mut tree = QuadTree::new(TreeConfig::new(Aabb::unit(), 4))?;
//! tree.insert(Aabb::new([0.4, 0.0], [0.6, 0.8]));
//!
//! let mut fill = FloodFill::new(&tree, [0.1, 0.1])?;
//! while !fill.is_complete() {
//!   fill.step();
//! }
//! println!("reached {} free leaves", fill.visited().len());
//! ```

pub mod flood;
pub mod metrics;
pub mod tree;

// Re-export commonly used items
pub use flood::{FloodFill, FloodPhase};
pub use metrics::TreeMetrics;
pub use tree::{
  Aabb, CellKey, Face, GeometrySource, InsertStats, NodeKind, NodeRef, NodeSnapshot, NodeState,
  Octree, QuadTree, Side, Tree, TreeConfig, TreeError, TreeId, TreeResult, DEFAULT_MAX_LEVEL,
  MAX_LEVEL,
};

//! Sparse quadtree / octree over a fixed root box.
//!
//! The tree is a map from [`CellKey`] to [`NodeState`]. Parent/child
//! relationships are computed via coordinate math, so nodes never reference
//! each other and a node handle ([`NodeRef`]) is a plain value.
//!
//! # Level Convention
//!
//! Level 0 = the root (coarsest), `max_level` = finest.
//!
//! ```text
//! Cells per axis = 2^level
//! Cell size      = root_size / 2^level
//! ```
//!
//! # Module Structure
//!
//! - [`bounds`]: `Aabb` - D-dimensional box
//! - [`key`]: `CellKey`, `Face` - identity and coordinate math
//! - [`config`]: `TreeConfig` - root box, depth, grid ↔ world mapping
//! - [`nodes`]: `Tree` - node map, insertion, localization, queries
//! - [`neighbors`]: face-neighbor search across depths
//! - [`snapshot`]: pre-order node snapshots for renderers
//! - [`source`]: `GeometrySource` - volume supplier for rebuilds

pub mod bounds;
pub mod config;
pub mod error;
pub mod key;
pub mod neighbors;
pub mod nodes;
pub mod snapshot;
pub mod source;

// Re-exports
pub use bounds::Aabb;
pub use config::{TreeConfig, DEFAULT_MAX_LEVEL, MAX_LEVEL};
pub use error::{TreeError, TreeResult};
pub use key::{CellKey, Face, Side};
pub use nodes::{InsertStats, NodeRef, NodeState, Octree, QuadTree, Tree, TreeId};
pub use snapshot::{NodeKind, NodeSnapshot};
pub use source::GeometrySource;

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

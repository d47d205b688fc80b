//! Error types for tree construction and queries.

/// Result alias for fallible tree operations.
pub type TreeResult<T> = Result<T, TreeError>;

/// Recoverable failures reported by the tree and the flood fill.
///
/// Passing a node handle from one tree to another is a contract violation
/// and panics instead of returning an error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TreeError {
  /// A query point lies outside the root bounds (or is not finite).
  #[error("point {point:?} lies outside the root bounds")]
  OutOfBounds { point: Vec<f64> },

  /// The root bounds or max level cannot form a tree.
  #[error("invalid tree configuration: {0}")]
  InvalidConfiguration(String),

  /// A level-limited query asked for a level deeper than the tree allows.
  #[error("level {level} exceeds the tree's max level {max_level}")]
  LevelOutOfRange { level: u8, max_level: u8 },
}

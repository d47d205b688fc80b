//! TreeConfig - root region, depth limit and the grid ↔ world mapping.

use super::{Aabb, CellKey, TreeError, TreeResult};

/// Deepest level a tree may be configured with.
///
/// Keeps `2^level` grid coordinates (plus one step) inside `u32`.
pub const MAX_LEVEL: u8 = 30;

/// Default depth: an 8×8 (or 8×8×8) finest grid.
pub const DEFAULT_MAX_LEVEL: u8 = 3;

/// Configuration for tree construction and world coordinate mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeConfig<const D: usize> {
  /// World-space region covered by the root cell.
  pub bounds: Aabb<D>,

  /// Finest level (highest detail). Leaves at this level carry occupancy.
  pub max_level: u8,
}

impl<const D: usize> TreeConfig<D> {
  /// Create a configuration. Call [`TreeConfig::validate`] (or
  /// [`super::Tree::new`]) before use.
  pub fn new(bounds: Aabb<D>, max_level: u8) -> Self {
    Self { bounds, max_level }
  }

  /// Reject depths beyond [`MAX_LEVEL`] and degenerate or non-finite roots.
  pub fn validate(&self) -> TreeResult<()> {
    if self.max_level > MAX_LEVEL {
      return Err(TreeError::InvalidConfiguration(format!(
        "max_level {} exceeds the supported maximum {}",
        self.max_level, MAX_LEVEL
      )));
    }
    if !self.bounds.is_finite() {
      return Err(TreeError::InvalidConfiguration(format!(
        "root bounds {:?} are not finite",
        self.bounds
      )));
    }
    if !self.bounds.has_volume() {
      return Err(TreeError::InvalidConfiguration(format!(
        "root bounds {:?} have zero or negative extent",
        self.bounds
      )));
    }
    Ok(())
  }

  /// Cell size at given level.
  /// cell_size = root_size / 2^level
  #[inline]
  pub fn cell_size(&self, level: u8) -> [f64; D] {
    let cells = CellKey::<D>::grid_size(level) as f64;
    self.bounds.size().map(|size| size / cells)
  }

  /// World-space coordinate of grid line `index` on `axis` at `level`.
  ///
  /// Lines are computed from the exact fraction `index / 2^level`, so the
  /// same boundary evaluates to the same value at every level.
  #[inline]
  fn grid_line(&self, axis: usize, index: u64, level: u8) -> f64 {
    let cells = CellKey::<D>::grid_size(level);
    if index >= cells {
      return self.bounds.max[axis];
    }
    let t = index as f64 / cells as f64;
    self.bounds.min[axis] + (self.bounds.max[axis] - self.bounds.min[axis]) * t
  }

  /// World-space box of a cell.
  pub fn cell_bounds(&self, key: &CellKey<D>) -> Aabb<D> {
    Aabb {
      min: std::array::from_fn(|axis| self.grid_line(axis, u64::from(key.coords[axis]), key.level)),
      max: std::array::from_fn(|axis| {
        self.grid_line(axis, u64::from(key.coords[axis]) + 1, key.level)
      }),
    }
  }

  /// World-space center of a cell.
  #[inline]
  pub fn cell_center(&self, key: &CellKey<D>) -> [f64; D] {
    self.cell_bounds(key).center()
  }

  /// Grid coordinates of the cell containing `point` at `level`.
  ///
  /// Cells are half-open `[min, max)` except along the root's upper faces,
  /// which belong to the last cell. Returns None for points outside the root
  /// bounds or with non-finite coordinates.
  pub fn grid_coords(&self, point: &[f64; D], level: u8) -> Option<[u32; D]> {
    if !self.bounds.contains_point(*point) {
      return None;
    }

    let cells = CellKey::<D>::grid_size(level);
    let mut coords = [0u32; D];
    for axis in 0..D {
      let p = point[axis];
      let t = (p - self.bounds.min[axis]) / (self.bounds.max[axis] - self.bounds.min[axis]);
      let mut index = ((t * cells as f64).floor() as u64).min(cells - 1);

      // Settle rounding at cell boundaries against the grid lines themselves
      while index > 0 && p < self.grid_line(axis, index, level) {
        index -= 1;
      }
      while index + 1 < cells && p >= self.grid_line(axis, index + 1, level) {
        index += 1;
      }
      coords[axis] = index as u32;
    }
    Some(coords)
  }
}

impl<const D: usize> Default for TreeConfig<D> {
  fn default() -> Self {
    Self {
      bounds: Aabb::unit(),
      max_level: DEFAULT_MAX_LEVEL,
    }
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

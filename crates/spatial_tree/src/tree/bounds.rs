//! Axis-aligned bounding box with double precision, generic over dimension.

use glam::{DVec2, DVec3};

/// Double-precision axis-aligned box in `D` dimensions.
///
/// Used both for the root region of a tree and for the volumes inserted into
/// it. Cell boxes handed out by the tree are derived from the root box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb<const D: usize> {
  /// Minimum corner (inclusive).
  pub min: [f64; D],
  /// Maximum corner.
  pub max: [f64; D],
}

impl<const D: usize> Aabb<D> {
  /// Create a new box from min and max corners.
  ///
  /// # Panics
  /// Debug-asserts that min <= max on all axes.
  pub fn new(min: [f64; D], max: [f64; D]) -> Self {
    debug_assert!(
      (0..D).all(|axis| min[axis] <= max[axis]),
      "Aabb min must be <= max on all axes"
    );
    Self { min, max }
  }

  /// The unit box `[0, 1]^D`.
  pub fn unit() -> Self {
    Self {
      min: [0.0; D],
      max: [1.0; D],
    }
  }

  /// Create a box from center and half-extents.
  pub fn from_center_half_extents(center: [f64; D], half_extents: [f64; D]) -> Self {
    Self {
      min: std::array::from_fn(|axis| center[axis] - half_extents[axis]),
      max: std::array::from_fn(|axis| center[axis] + half_extents[axis]),
    }
  }

  /// A zero-extent box at `point`.
  pub fn point(point: [f64; D]) -> Self {
    Self {
      min: point,
      max: point,
    }
  }

  /// All coordinates are finite.
  #[inline]
  pub fn is_finite(&self) -> bool {
    self.min.iter().chain(self.max.iter()).all(|v| v.is_finite())
  }

  /// `min <= max` on every axis.
  #[inline]
  pub fn is_ordered(&self) -> bool {
    (0..D).all(|axis| self.min[axis] <= self.max[axis])
  }

  /// Strictly positive extent on every axis.
  #[inline]
  pub fn has_volume(&self) -> bool {
    (0..D).all(|axis| self.min[axis] < self.max[axis])
  }

  /// Check if the interiors of two boxes intersect.
  ///
  /// Boxes that only touch along a boundary do not intersect.
  #[inline]
  pub fn intersects(&self, other: &Self) -> bool {
    (0..D).all(|axis| self.min[axis] < other.max[axis] && other.min[axis] < self.max[axis])
  }

  /// Check if this box contains a point (boundary included).
  #[inline]
  pub fn contains_point(&self, point: [f64; D]) -> bool {
    (0..D).all(|axis| point[axis] >= self.min[axis] && point[axis] <= self.max[axis])
  }

  /// Check if two boxes share a full `(D-1)`-dimensional face.
  ///
  /// True when they touch on exactly one axis and their extents overlap with
  /// positive length on every other axis. Corner or edge contact is not a face.
  pub fn shares_face(&self, other: &Self) -> bool {
    let mut touching_axes = 0;
    for axis in 0..D {
      if self.max[axis] == other.min[axis] || other.max[axis] == self.min[axis] {
        touching_axes += 1;
      } else if !(self.min[axis] < other.max[axis] && other.min[axis] < self.max[axis]) {
        return false;
      }
    }
    touching_axes == 1
  }

  /// Get the size of the box (max - min).
  #[inline]
  pub fn size(&self) -> [f64; D] {
    std::array::from_fn(|axis| self.max[axis] - self.min[axis])
  }

  /// Get the center of the box.
  #[inline]
  pub fn center(&self) -> [f64; D] {
    std::array::from_fn(|axis| (self.min[axis] + self.max[axis]) * 0.5)
  }
}

impl From<(DVec2, DVec2)> for Aabb<2> {
  fn from((min, max): (DVec2, DVec2)) -> Self {
    Self::new(min.to_array(), max.to_array())
  }
}

impl From<(DVec3, DVec3)> for Aabb<3> {
  fn from((min, max): (DVec3, DVec3)) -> Self {
    Self::new(min.to_array(), max.to_array())
  }
}

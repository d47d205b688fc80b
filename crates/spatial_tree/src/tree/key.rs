//! CellKey - immutable value type naming a cell of the tree.
//!
//! Cells are identified by their grid coordinates at their own level.
//! Level 0 = the root (coarsest), each level doubles the per-axis resolution.

/// Cell identity: grid coordinates plus subdivision level.
///
/// Grid coordinates are at the cell's own level, so a cell at level `l` has
/// coordinates in `[0, 2^l)` on every axis.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CellKey<const D: usize> {
  /// Grid position at this cell's level.
  pub coords: [u32; D],
  /// Subdivision depth (0 = root).
  pub level: u8,
}

impl<const D: usize> CellKey<D> {
  /// Number of children produced by one subdivision.
  pub const CHILD_COUNT: usize = 1 << D;

  /// Create a new key at the given position and level.
  pub fn new(coords: [u32; D], level: u8) -> Self {
    Self { coords, level }
  }

  /// The root cell.
  pub fn root() -> Self {
    Self {
      coords: [0; D],
      level: 0,
    }
  }

  /// Cells per axis at `level`.
  #[inline]
  pub fn grid_size(level: u8) -> u64 {
    1u64 << level
  }

  /// True when every coordinate lies in `[0, 2^level)`.
  #[inline]
  pub fn is_in_grid(&self) -> bool {
    let size = Self::grid_size(self.level);
    self.coords.iter().all(|&c| u64::from(c) < size)
  }

  /// Get child key (finer: level + 1).
  ///
  /// Offset: `0..2^D` where bit `a` selects the low (0) or high (1) half of
  /// axis `a`.
  pub fn child(&self, offset: usize) -> Self {
    debug_assert!(offset < Self::CHILD_COUNT, "child offset out of range");
    Self {
      coords: std::array::from_fn(|axis| self.coords[axis] * 2 + ((offset >> axis) & 1) as u32),
      level: self.level + 1,
    }
  }

  /// All `2^D` children in offset order.
  pub fn children(&self) -> impl Iterator<Item = Self> + '_ {
    (0..Self::CHILD_COUNT).map(move |offset| self.child(offset))
  }

  /// Get parent key (coarser: level - 1).
  ///
  /// Returns None for the root.
  pub fn parent(&self) -> Option<Self> {
    if self.level == 0 {
      return None;
    }
    Some(Self {
      coords: self.coords.map(|c| c / 2),
      level: self.level - 1,
    })
  }

  /// Offset of this key inside its parent (inverse of [`CellKey::child`]).
  pub fn offset_in_parent(&self) -> usize {
    self
      .coords
      .iter()
      .enumerate()
      .fold(0, |offset, (axis, &c)| offset | (((c & 1) as usize) << axis))
  }

  /// Ancestor at `level`, or None if `level` is deeper than this key.
  pub fn ancestor_at(&self, level: u8) -> Option<Self> {
    if level > self.level {
      return None;
    }
    let shift = self.level - level;
    Some(Self {
      coords: self.coords.map(|c| c >> shift),
      level,
    })
  }

  /// True if `other` lies strictly below this key.
  pub fn is_ancestor_of(&self, other: &Self) -> bool {
    other.level > self.level && other.ancestor_at(self.level) == Some(*self)
  }

  /// Same-level key one step across `face`.
  ///
  /// Returns None if the step leaves the grid.
  pub fn step(&self, face: Face) -> Option<Self> {
    let mut coords = self.coords;
    let c = coords[face.axis];
    coords[face.axis] = match face.side {
      Side::Low => c.checked_sub(1)?,
      Side::High => {
        let next = c + 1;
        if u64::from(next) >= Self::grid_size(self.level) {
          return None;
        }
        next
      }
    };
    Some(Self {
      coords,
      level: self.level,
    })
  }
}

/// Which end of an axis a face lies on.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Side {
  /// Toward decreasing coordinates.
  Low,
  /// Toward increasing coordinates.
  High,
}

impl Side {
  /// The other side.
  #[inline]
  pub fn flip(self) -> Self {
    match self {
      Side::Low => Side::High,
      Side::High => Side::Low,
    }
  }

  /// Child offset bit selecting the half of a cell on this side.
  #[inline]
  pub fn bit(self) -> usize {
    match self {
      Side::Low => 0,
      Side::High => 1,
    }
  }
}

/// One of the `2·D` faces of a cell (equivalently, a unit step direction).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Face {
  /// Axis index (0 = x, 1 = y, 2 = z).
  pub axis: usize,
  /// Low (-) or high (+) end of the axis.
  pub side: Side,
}

impl Face {
  /// Create a face.
  pub fn new(axis: usize, side: Side) -> Self {
    Self { axis, side }
  }

  /// All faces in the order `-x, +x, -y, +y, ...`.
  pub fn all<const D: usize>() -> impl Iterator<Item = Face> {
    (0..D).flat_map(|axis| [Side::Low, Side::High].map(|side| Face { axis, side }))
  }

  /// The face on the other end of the same axis.
  #[inline]
  pub fn opposite(self) -> Self {
    Self {
      axis: self.axis,
      side: self.side.flip(),
    }
  }

  /// True if child `offset` of a cell lies against this face of the cell.
  #[inline]
  pub fn contains_child(self, offset: usize) -> bool {
    (offset >> self.axis) & 1 == self.side.bit()
  }
}

#[cfg(test)]
#[path = "key_test.rs"]
mod key_test;

//! GeometrySource - supplier of volumes for a tree rebuild.

use super::Aabb;

/// Anything that can enumerate the bounding volumes to insert into a tree.
///
/// Engine bridges implement this over their collider or entity queries; the
/// tree only ever sees the resulting boxes.
pub trait GeometrySource<const D: usize> {
  /// Call `visitor` once per volume.
  fn visit_volumes(&self, visitor: &mut dyn FnMut(Aabb<D>));
}

impl<const D: usize> GeometrySource<D> for [Aabb<D>] {
  fn visit_volumes(&self, visitor: &mut dyn FnMut(Aabb<D>)) {
    self.iter().copied().for_each(visitor);
  }
}

impl<const D: usize> GeometrySource<D> for Vec<Aabb<D>> {
  fn visit_volumes(&self, visitor: &mut dyn FnMut(Aabb<D>)) {
    self.as_slice().visit_volumes(visitor);
  }
}

impl<const D: usize, const N: usize> GeometrySource<D> for [Aabb<D>; N] {
  fn visit_volumes(&self, visitor: &mut dyn FnMut(Aabb<D>)) {
    self.as_slice().visit_volumes(visitor);
  }
}

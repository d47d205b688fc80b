use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use super::*;

// =========================================================================
// CellKey identity
// =========================================================================

/// Two keys with same coords and level should be equal.
#[test]
fn test_key_equality() {
  let a = CellKey::new([1, 2, 3], 5);
  let b = CellKey::new([1, 2, 3], 5);
  let c = CellKey::new([1, 2, 3], 6);

  assert_eq!(a, b);
  assert_ne!(a, c);
}

/// Equal keys must produce equal hashes (HashMap invariant).
#[test]
fn test_key_hash_consistency() {
  let hash = |key: &CellKey<2>| {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
  };

  assert_eq!(hash(&CellKey::new([10, 20], 4)), hash(&CellKey::new([10, 20], 4)));
}

// =========================================================================
// Parent / child coordinate math
// =========================================================================

/// All 2^D offsets produce children at level + 1 with coords*2 + bit.
#[test]
fn test_child_all_offsets_3d() {
  let parent = CellKey::new([3, 4, 5], 3);

  for offset in 0..8 {
    let child = parent.child(offset);
    assert_eq!(child.level, 4, "offset {} level", offset);
    assert_eq!(child.coords[0], 6 + (offset & 1) as u32);
    assert_eq!(child.coords[1], 8 + ((offset >> 1) & 1) as u32);
    assert_eq!(child.coords[2], 10 + ((offset >> 2) & 1) as u32);
  }
}

#[test]
fn test_children_count_and_uniqueness() {
  let quad: HashSet<_> = CellKey::<2>::root().children().collect();
  assert_eq!(quad.len(), 4);
  assert_eq!(CellKey::<2>::CHILD_COUNT, 4);

  let oct: HashSet<_> = CellKey::<3>::root().children().collect();
  assert_eq!(oct.len(), 8);
  assert_eq!(CellKey::<3>::CHILD_COUNT, 8);
}

/// The root has no parent.
#[test]
fn test_root_has_no_parent() {
  assert!(CellKey::<3>::root().parent().is_none());
}

/// parent(child(key, offset)) == key, and the offset is recoverable.
#[test]
fn test_child_parent_roundtrip() {
  let original = CellKey::new([7, 8, 9], 6);

  for offset in 0..8 {
    let child = original.child(offset);
    assert_eq!(child.parent(), Some(original), "offset {}", offset);
    assert_eq!(child.offset_in_parent(), offset);
  }
}

#[test]
fn test_ancestor_at() {
  let key = CellKey::new([13, 6], 4);

  assert_eq!(key.ancestor_at(4), Some(key));
  assert_eq!(key.ancestor_at(3), Some(CellKey::new([6, 3], 3)));
  assert_eq!(key.ancestor_at(1), Some(CellKey::new([1, 0], 1)));
  assert_eq!(key.ancestor_at(0), Some(CellKey::root()));
  assert_eq!(key.ancestor_at(5), None);

  assert!(CellKey::new([1, 0], 1).is_ancestor_of(&key));
  assert!(!key.is_ancestor_of(&key));
  assert!(!CellKey::new([0, 0], 1).is_ancestor_of(&key));
}

// =========================================================================
// Face steps
// =========================================================================

#[test]
fn test_faces_order() {
  let faces: Vec<_> = Face::all::<3>().collect();
  assert_eq!(faces.len(), 6);
  assert_eq!(faces[0], Face::new(0, Side::Low));
  assert_eq!(faces[1], Face::new(0, Side::High));
  assert_eq!(faces[4], Face::new(2, Side::Low));
  assert_eq!(faces[5], Face::new(2, Side::High));

  assert_eq!(Face::all::<2>().count(), 4);
}

#[test]
fn test_step_inside_grid() {
  let key = CellKey::new([1, 2], 2);

  assert_eq!(key.step(Face::new(0, Side::Low)), Some(CellKey::new([0, 2], 2)));
  assert_eq!(key.step(Face::new(0, Side::High)), Some(CellKey::new([2, 2], 2)));
  assert_eq!(key.step(Face::new(1, Side::High)), Some(CellKey::new([1, 3], 2)));
}

#[test]
fn test_step_leaving_grid() {
  let corner = CellKey::new([0, 3], 2);

  assert_eq!(corner.step(Face::new(0, Side::Low)), None);
  assert_eq!(corner.step(Face::new(1, Side::High)), None);

  for face in Face::all::<2>() {
    assert_eq!(CellKey::<2>::root().step(face), None, "root has no same-level neighbors");
  }
}

#[test]
fn test_face_child_selection() {
  // +x face of a quad cell holds offsets 1 (x=1,y=0) and 3 (x=1,y=1)
  let high_x = Face::new(0, Side::High);
  let selected: Vec<_> = (0..4).filter(|&o| high_x.contains_child(o)).collect();
  assert_eq!(selected, vec![1, 3]);

  // -z face of an oct cell holds the four offsets with bit 2 clear
  let low_z = Face::new(2, Side::Low);
  let selected: Vec<_> = (0..8).filter(|&o| low_z.contains_child(o)).collect();
  assert_eq!(selected, vec![0, 1, 2, 3]);

  assert_eq!(high_x.opposite(), Face::new(0, Side::Low));
}

#[test]
fn test_is_in_grid() {
  assert!(CellKey::new([3, 3], 2).is_in_grid());
  assert!(!CellKey::new([4, 0], 2).is_in_grid());
  assert!(CellKey::<3>::root().is_in_grid());
}

use super::*;

// =========================================================================
// Snapshots
// =========================================================================

/// all_nodes lists a node before its subtree, children in offset order.
#[test]
fn test_all_nodes_pre_order() {
  let mut tree = QuadTree::new(TreeConfig::new(Aabb::unit(), 2)).unwrap();
  tree.insert(Aabb::new([0.6, 0.6], [0.7, 0.7]));

  let order: Vec<_> = tree
    .all_nodes()
    .iter()
    .map(|node| (node.key.coords, node.key.level, node.kind()))
    .collect();

  assert_eq!(
    order,
    vec![
      ([0, 0], 0, NodeKind::Internal),
      ([0, 0], 1, NodeKind::Free),
      ([1, 0], 1, NodeKind::Free),
      ([0, 1], 1, NodeKind::Free),
      ([1, 1], 1, NodeKind::Internal),
      ([2, 2], 2, NodeKind::Occupied),
      ([3, 2], 2, NodeKind::Free),
      ([2, 3], 2, NodeKind::Free),
      ([3, 3], 2, NodeKind::Free),
    ]
  );
}

/// Snapshot bounds match the tree's own cell bounds.
#[test]
fn test_all_nodes_bounds() {
  let bounds = Aabb::new([10.0, -4.0, 0.0], [12.0, 0.0, 1.0]);
  let mut tree = Octree::new(TreeConfig::new(bounds, 2)).unwrap();
  tree.insert(Aabb::point([11.9, -0.1, 0.9]));

  let snapshots = tree.all_nodes();
  assert_eq!(snapshots.len(), tree.node_count());
  assert_eq!(snapshots[0].bounds, bounds);
  for snapshot in &snapshots {
    let node = tree.get(&snapshot.key).unwrap();
    assert_eq!(snapshot.bounds, tree.bounds(&node));
    assert_eq!(snapshot.is_leaf, tree.is_leaf(&node));
  }
}

/// Snapshots do not follow later inserts.
#[test]
fn test_snapshot_is_detached() {
  let mut tree = QuadTree::new(TreeConfig::default()).unwrap();
  let before = tree.all_nodes();
  tree.insert(Aabb::new([0.0, 0.0], [0.2, 0.2]));

  assert_eq!(before.len(), 1);
  assert_eq!(before[0].kind(), NodeKind::Free);
  assert!(tree.all_nodes().len() > 1);
}

// =========================================================================
// End to end
// =========================================================================

/// A wall through the middle of the root splits the free leaves into two
/// regions that never neighbor each other.
#[test]
fn test_wall_separates_regions() {
  let mut tree = QuadTree::new(TreeConfig::new(Aabb::unit(), 3)).unwrap();
  tree.insert(Aabb::new([0.45, 0.0], [0.55, 1.0]));

  let center = |node: &NodeRef<2>| tree.config().cell_center(&node.key());
  for leaf in tree.leaves().filter(|leaf| !tree.is_occupied(leaf)) {
    let left = center(&leaf)[0] < 0.5;
    for neighbor in tree.neighbors(&leaf) {
      if !tree.is_occupied(&neighbor) {
        assert_eq!(
          center(&neighbor)[0] < 0.5,
          left,
          "free leaves {:?} and {:?} straddle the wall",
          leaf.key(),
          neighbor.key()
        );
      }
    }
  }
}

/// Every point of the root lands in a leaf whose bounds contain it.
#[test]
fn test_locate_agrees_with_bounds() {
  let mut tree = Octree::new(TreeConfig::new(Aabb::unit(), 3)).unwrap();
  tree.insert_all([
    Aabb::new([0.0, 0.0, 0.0], [0.3, 0.3, 0.3]),
    Aabb::new([0.7, 0.2, 0.5], [0.8, 0.9, 0.55]),
  ]);

  for i in 0..10 {
    for j in 0..10 {
      for k in 0..10 {
        let point = [
          (i as f64 + 0.5) / 10.0,
          (j as f64 + 0.5) / 10.0,
          (k as f64 + 0.5) / 10.0,
        ];
        let leaf = tree.locate(point).unwrap();
        assert!(tree.is_leaf(&leaf));
        assert!(tree.bounds(&leaf).contains_point(point));
      }
    }
  }
}

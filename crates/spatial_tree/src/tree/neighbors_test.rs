use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::tree::{Aabb, Side, TreeConfig};

fn scenario_tree() -> Tree<2> {
  let mut tree = Tree::new(TreeConfig::new(Aabb::unit(), 2)).unwrap();
  tree.insert(Aabb::new([0.6, 0.6], [0.7, 0.7]));
  tree
}

fn keys<const D: usize>(nodes: &[NodeRef<D>]) -> Vec<([u32; D], u8)> {
  nodes.iter().map(|node| (node.coords(), node.level())).collect()
}

/// Leaves whose boxes share a full face with `node`, found by scanning all
/// leaves.
fn brute_force_neighbors<const D: usize>(tree: &Tree<D>, node: &NodeRef<D>) -> HashSet<NodeRef<D>> {
  let bounds = tree.bounds(node);
  tree
    .leaves()
    .filter(|leaf| leaf != node && bounds.shares_face(&tree.bounds(leaf)))
    .collect()
}

fn random_tree<const D: usize>(rng: &mut StdRng, max_level: u8, volumes: usize) -> Tree<D> {
  let root = Aabb::new([-3.5; D], [1.25; D]);
  let mut tree = Tree::new(TreeConfig::new(root, max_level)).unwrap();
  for _ in 0..volumes {
    let center: [f64; D] = std::array::from_fn(|_| rng.random_range(-3.5..1.25));
    let half: [f64; D] = std::array::from_fn(|_| rng.random_range(0.0..0.3));
    tree.insert(Aabb::from_center_half_extents(center, half));
  }
  tree
}

// =========================================================================
// Fixed layouts
// =========================================================================

/// Cell (2,2) of the 4×4 example grid: same-level leaves where the tree is
/// deep, coarser leaves where it is not.
#[test]
fn test_neighbors_of_occupied_cell() {
  let tree = scenario_tree();
  let cell = tree.locate([0.65, 0.65]).unwrap();

  assert_eq!(
    keys(&tree.neighbors(&cell)),
    vec![([0, 1], 1), ([3, 2], 2), ([1, 0], 1), ([2, 3], 2)]
  );
}

/// Once the surrounding cells reach the same depth, all four neighbors are
/// level-2 cells.
#[test]
fn test_neighbors_uniform_depth() {
  let mut tree = scenario_tree();
  tree.insert(Aabb::point([0.375, 0.625]));
  tree.insert(Aabb::point([0.625, 0.375]));
  let cell = tree.locate([0.65, 0.65]).unwrap();

  assert_eq!(
    keys(&tree.neighbors(&cell)),
    vec![([1, 2], 2), ([3, 2], 2), ([2, 1], 2), ([2, 3], 2)]
  );
}

/// A coarse leaf next to a subdivided region sees every fine leaf along the
/// shared face.
#[test]
fn test_neighbors_of_coarse_cell() {
  let tree = scenario_tree();
  let coarse = tree.locate([0.1, 0.9]).unwrap();
  assert_eq!(coarse.key(), CellKey::new([0, 1], 1));

  assert_eq!(
    keys(&tree.neighbors(&coarse)),
    vec![([2, 2], 2), ([2, 3], 2), ([0, 0], 1)]
  );
}

#[test]
fn test_face_neighbors_single_face() {
  let tree = scenario_tree();
  let cell = tree.locate([0.65, 0.65]).unwrap();

  let west = tree.face_neighbors(&cell, Face::new(0, Side::Low));
  assert_eq!(keys(&west), vec![([0, 1], 1)]);

  // (3,2) lies on the root's +x face
  let east_edge = tree.locate([0.9, 0.6]).unwrap();
  assert!(tree.face_neighbors(&east_edge, Face::new(0, Side::High)).is_empty());
}

/// The lone root of a fresh tree has no neighbors.
#[test]
fn test_root_has_no_neighbors() {
  let tree = Tree::new(TreeConfig::<3>::default()).unwrap();
  assert!(tree.neighbors(&tree.root()).is_empty());
}

/// Neighbors of an internal node are the leaves across its faces.
#[test]
fn test_neighbors_of_internal_node() {
  let tree = scenario_tree();
  let quadrant = tree.get(&CellKey::new([1, 1], 1)).unwrap();
  assert!(!tree.is_leaf(&quadrant));

  assert_eq!(keys(&tree.neighbors(&quadrant)), vec![([0, 1], 1), ([1, 0], 1)]);
}

/// 3D: a max-level cell in a corner of an octree.
#[test]
fn test_neighbors_3d() {
  let mut tree = Tree::new(TreeConfig::new(Aabb::<3>::unit(), 2)).unwrap();
  tree.insert(Aabb::point([0.1, 0.1, 0.1]));
  let corner = tree.locate([0.1, 0.1, 0.1]).unwrap();

  assert_eq!(
    keys(&tree.neighbors(&corner)),
    vec![([1, 0, 0], 2), ([0, 1, 0], 2), ([0, 0, 1], 2)]
  );
}

// =========================================================================
// Randomized agreement with geometry
// =========================================================================

fn check_against_geometry<const D: usize>(seed: u64) {
  let mut rng = StdRng::seed_from_u64(seed);
  let tree: Tree<D> = random_tree(&mut rng, 4, 12);

  for leaf in tree.leaves() {
    let found = tree.neighbors(&leaf);
    let unique: HashSet<_> = found.iter().copied().collect();
    assert_eq!(unique.len(), found.len(), "duplicate neighbor of {:?}", leaf.key());

    for neighbor in &found {
      assert!(tree.is_leaf(neighbor));
      assert!(!tree.bounds(neighbor).intersects(&tree.bounds(&leaf)));
      assert!(
        tree.neighbors(neighbor).contains(&leaf),
        "neighbor relation not symmetric for {:?} / {:?}",
        leaf.key(),
        neighbor.key()
      );
    }

    assert_eq!(
      unique,
      brute_force_neighbors(&tree, &leaf),
      "wrong neighbors of {:?}",
      leaf.key()
    );
  }
}

#[test]
fn test_neighbors_match_geometry_2d() {
  for seed in 0..8 {
    check_against_geometry::<2>(seed);
  }
}

#[test]
fn test_neighbors_match_geometry_3d() {
  for seed in 0..4 {
    check_against_geometry::<3>(seed);
  }
}

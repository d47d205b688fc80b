//! FloodFill - breadth-first expansion over free leaves, one wave per step.
//!
//! The fill borrows its tree, so rebuilding the tree requires a new fill.
//!
//! ```text
//! step 1: frontier = { locate(seed) }
//! step n: visited += frontier
//!         frontier = free neighbors of the absorbed wave, not yet visited
//! ```

use std::collections::HashSet;

use crate::tree::{NodeRef, Tree, TreeResult};

/// Where the fill is in its lifecycle.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FloodPhase {
  /// No step taken yet.
  Unseeded,
  /// The last step produced a non-empty frontier.
  Expanding,
  /// Fixed point reached; further steps are no-ops.
  Exhausted,
}

/// Step-driven flood fill over the unoccupied leaves of a tree.
pub struct FloodFill<'t, const D: usize> {
  tree: &'t Tree<D>,
  seed: NodeRef<D>,
  frontier: HashSet<NodeRef<D>>,
  visited: HashSet<NodeRef<D>>,
  phase: FloodPhase,
  steps: usize,
}

impl<'t, const D: usize> FloodFill<'t, D> {
  /// Prepare a fill starting at the leaf containing `seed_point`.
  ///
  /// Fails with `OutOfBounds` if the point is outside the root.
  pub fn new(tree: &'t Tree<D>, seed_point: impl Into<[f64; D]>) -> TreeResult<Self> {
    let seed = tree.locate(seed_point)?;
    Ok(Self {
      tree,
      seed,
      frontier: HashSet::new(),
      visited: HashSet::new(),
      phase: FloodPhase::Unseeded,
      steps: 0,
    })
  }

  /// Advance one wave and return the new frontier.
  ///
  /// The first call seeds the frontier with the seed leaf (left empty if that
  /// leaf is occupied). Each later call absorbs the frontier into the
  /// visited set and replaces it with the free, unvisited neighbors of the
  /// absorbed cells.
  #[tracing::instrument(level = "trace", skip_all, name = "flood::step")]
  pub fn step(&mut self) -> &HashSet<NodeRef<D>> {
    match self.phase {
      FloodPhase::Exhausted => return &self.frontier,
      FloodPhase::Unseeded => {
        if self.tree.is_occupied(&self.seed) {
          self.phase = FloodPhase::Exhausted;
        } else {
          self.frontier.insert(self.seed);
          self.phase = FloodPhase::Expanding;
        }
      }
      FloodPhase::Expanding => {
        let wave = std::mem::take(&mut self.frontier);
        self.visited.extend(wave.iter().copied());

        let mut next = HashSet::new();
        for cell in &wave {
          for neighbor in self.tree.neighbors(cell) {
            if !self.visited.contains(&neighbor)
              && self.tree.is_leaf(&neighbor)
              && !self.tree.is_occupied(&neighbor)
            {
              next.insert(neighbor);
            }
          }
        }

        if next.is_empty() {
          self.phase = FloodPhase::Exhausted;
        }
        self.frontier = next;
      }
    }

    self.steps += 1;
    tracing::debug!(
      tree = self.tree.id().raw(),
      step = self.steps,
      frontier = self.frontier.len(),
      visited = self.visited.len(),
      phase = ?self.phase,
      "flood fill step"
    );
    &self.frontier
  }

  /// Cells added by the most recent step.
  #[inline]
  pub fn frontier(&self) -> &HashSet<NodeRef<D>> {
    &self.frontier
  }

  /// All cells absorbed so far.
  #[inline]
  pub fn visited(&self) -> &HashSet<NodeRef<D>> {
    &self.visited
  }

  #[inline]
  pub fn phase(&self) -> FloodPhase {
    self.phase
  }

  /// True once a step has produced no new cells.
  #[inline]
  pub fn is_complete(&self) -> bool {
    self.phase == FloodPhase::Exhausted
  }

  /// Number of steps that did work (no-op steps after exhaustion excluded).
  #[inline]
  pub fn steps_taken(&self) -> usize {
    self.steps
  }

  /// Leaf containing the seed point.
  #[inline]
  pub fn seed(&self) -> NodeRef<D> {
    self.seed
  }

  /// Tree being filled.
  #[inline]
  pub fn tree(&self) -> &'t Tree<D> {
    self.tree
  }
}

#[cfg(test)]
#[path = "flood_test.rs"]
mod flood_test;

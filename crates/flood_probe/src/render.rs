//! ASCII map of a flood fill over the x/y plane.
//!
//! ```text
//! # occupied   o visited   * frontier   . free
//! ```
//!
//! Octrees are drawn as the slice through the seed point.

use spatial_tree::FloodFill;

/// Columns per axis are capped at `2^MAX_RENDER_LEVEL`.
pub const MAX_RENDER_LEVEL: u8 = 6;

/// Draw the fill state, top row = highest y.
pub fn render<const D: usize>(fill: &FloodFill<'_, D>, slice: [f64; D]) -> String {
  let tree = fill.tree();
  let bounds = tree.root_bounds();
  let level = tree.max_level().min(MAX_RENDER_LEVEL);
  let cells = 1usize << level;
  let size = bounds.size();

  let mut out = String::with_capacity((cells + 1) * cells);
  for row in (0..cells).rev() {
    for col in 0..cells {
      let mut point = slice;
      point[0] = bounds.min[0] + (col as f64 + 0.5) * size[0] / cells as f64;
      point[1] = bounds.min[1] + (row as f64 + 0.5) * size[1] / cells as f64;

      let glyph = match tree.locate(point) {
        Ok(leaf) if tree.is_occupied(&leaf) => '#',
        Ok(leaf) if fill.frontier().contains(&leaf) => '*',
        Ok(leaf) if fill.visited().contains(&leaf) => 'o',
        Ok(_) => '.',
        Err(_) => ' ',
      };
      out.push(glyph);
    }
    out.push('\n');
  }
  out
}

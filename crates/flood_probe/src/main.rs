//! Headless flood fill probe.
//!
//! Loads a scene file, builds a quadtree or octree from its volumes and steps
//! a flood fill from the seed point, logging each wave.
//!
//! ```text
//! RUST_LOG=flood_probe=info flood_probe --scene scenes/corridor.toml --render
//! ```

mod render;
mod scene;

use anyhow::{Context, Result};
use clap::Parser;
use spatial_tree::{FloodFill, Tree, TreeMetrics};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use scene::Scene;

/// Flood fill probe for spatial trees.
#[derive(Parser, Debug)]
#[command(name = "flood_probe")]
#[command(about = "Builds a quadtree/octree from a scene and steps a flood fill through it")]
struct Args {
  /// Path to the scene TOML file.
  #[arg(short, long)]
  scene: PathBuf,

  /// Stop after this many steps (default: until the fill is exhausted).
  #[arg(short = 'n', long)]
  steps: Option<usize>,

  /// Print an ASCII map of the x/y plane through the seed after the run.
  #[arg(short, long)]
  render: bool,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let args = Args::parse();
  let scene = Scene::load(&args.scene)?;

  match scene.dimensions {
    2 => run::<2>(&scene, &args),
    3 => run::<3>(&scene, &args),
    other => anyhow::bail!("unsupported dimension count {other}"),
  }
}

fn run<const D: usize>(scene: &Scene, args: &Args) -> Result<()> {
  let config = scene.tree_config::<D>()?;
  let volumes = scene.volumes::<D>()?;
  let tree = Tree::build(config, &volumes).context("Failed to build tree")?;

  let metrics = TreeMetrics::from_tree(&tree);
  println!(
    "Built {}D tree: {} nodes, {} leaves ({} occupied, {:.1}% of volume), {} volumes",
    D,
    metrics.total_nodes(),
    metrics.total_leaves(),
    metrics.total_occupied(),
    metrics.occupied_fraction() * 100.0,
    volumes.len()
  );

  let seed = scene.seed::<D>()?;
  let mut fill = FloodFill::new(&tree, seed).context("Seed point is not inside the tree")?;

  let limit = args.steps.unwrap_or(usize::MAX);
  while !fill.is_complete() && fill.steps_taken() < limit {
    let frontier = fill.step().len();
    tracing::info!(
      step = fill.steps_taken(),
      frontier,
      visited = fill.visited().len(),
      "flood step"
    );
  }

  println!(
    "{} after {} steps: {} visited, {} on frontier",
    if fill.is_complete() { "Exhausted" } else { "Stopped" },
    fill.steps_taken(),
    fill.visited().len(),
    fill.frontier().len()
  );

  if args.render {
    if tree.max_level() > render::MAX_RENDER_LEVEL {
      tracing::warn!(
        max_level = tree.max_level(),
        "map is sampled at level {}",
        render::MAX_RENDER_LEVEL
      );
    }
    print!("{}", render::render(&fill, seed));
  }

  Ok(())
}

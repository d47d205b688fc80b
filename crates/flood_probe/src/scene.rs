//! Scene file parsing for the flood probe.
//!
//! ```toml
//! dimensions = 2
//! max_level = 4
//! seed = [0.1, 0.1]
//! bounds = { min = [0.0, 0.0], max = [1.0, 1.0] }
//!
//! [[volumes]]
//! min = [0.4, 0.0]
//! max = [0.6, 0.8]
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use spatial_tree::{Aabb, TreeConfig, DEFAULT_MAX_LEVEL};
use std::path::Path;

/// Root of a scene file.
#[derive(Debug, Deserialize)]
pub struct Scene {
  /// 2 for a quadtree, 3 for an octree.
  pub dimensions: usize,
  /// Finest subdivision level.
  #[serde(default = "default_max_level")]
  pub max_level: u8,
  /// Region covered by the tree root.
  pub bounds: BoxConfig,
  /// Flood fill start point.
  pub seed: Vec<f64>,
  /// Obstacles inserted into the tree.
  #[serde(default)]
  pub volumes: Vec<BoxConfig>,
}

/// Axis-aligned box given by its corners.
#[derive(Debug, Clone, Deserialize)]
pub struct BoxConfig {
  pub min: Vec<f64>,
  pub max: Vec<f64>,
}

fn default_max_level() -> u8 {
  DEFAULT_MAX_LEVEL
}

impl Scene {
  /// Load a scene from a TOML file.
  pub fn load(path: &Path) -> Result<Self> {
    let content = std::fs::read_to_string(path)
      .with_context(|| format!("Failed to read scene file: {}", path.display()))?;
    Self::parse(&content).with_context(|| format!("Invalid scene: {}", path.display()))
  }

  /// Parse and validate scene TOML.
  pub fn parse(content: &str) -> Result<Self> {
    let scene: Scene = toml::from_str(content).context("Failed to parse scene TOML")?;

    if scene.dimensions != 2 && scene.dimensions != 3 {
      anyhow::bail!("dimensions must be 2 or 3, got {}", scene.dimensions);
    }
    scene.bounds.check(scene.dimensions).context("bounds")?;
    if scene.seed.len() != scene.dimensions {
      anyhow::bail!(
        "seed has {} coordinates, expected {}",
        scene.seed.len(),
        scene.dimensions
      );
    }
    for (index, volume) in scene.volumes.iter().enumerate() {
      volume
        .check(scene.dimensions)
        .with_context(|| format!("volume #{index}"))?;
    }

    Ok(scene)
  }

  /// Tree configuration for a `D`-dimensional run.
  pub fn tree_config<const D: usize>(&self) -> Result<TreeConfig<D>> {
    Ok(TreeConfig::new(self.bounds.to_aabb::<D>()?, self.max_level))
  }

  /// Obstacles as boxes.
  pub fn volumes<const D: usize>(&self) -> Result<Vec<Aabb<D>>> {
    self.volumes.iter().map(|volume| volume.to_aabb::<D>()).collect()
  }

  /// Seed point.
  pub fn seed<const D: usize>(&self) -> Result<[f64; D]> {
    <[f64; D]>::try_from(self.seed.as_slice())
      .with_context(|| format!("seed must have {D} coordinates"))
  }
}

impl BoxConfig {
  fn check(&self, dimensions: usize) -> Result<()> {
    if self.min.len() != dimensions || self.max.len() != dimensions {
      anyhow::bail!(
        "corners have {} and {} coordinates, expected {}",
        self.min.len(),
        self.max.len(),
        dimensions
      );
    }
    if self.min.iter().zip(&self.max).any(|(min, max)| min > max) {
      anyhow::bail!("min {:?} exceeds max {:?}", self.min, self.max);
    }
    Ok(())
  }

  fn to_aabb<const D: usize>(&self) -> Result<Aabb<D>> {
    let min = <[f64; D]>::try_from(self.min.as_slice())
      .with_context(|| format!("min must have {D} coordinates"))?;
    let max = <[f64; D]>::try_from(self.max.as_slice())
      .with_context(|| format!("max must have {D} coordinates"))?;
    Ok(Aabb { min, max })
  }
}

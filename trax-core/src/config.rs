//! Solver configuration
//!
//! Level 4 - Utilities and configuration

use crate::notation::Move;
use crate::tiles::Shape;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Move selection strategy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Close own small loops, block the opponent's, otherwise random
    #[default]
    Patterns,
    /// Uniform random legal move
    Random,
}

/// Configuration for one solver
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub strategy: Strategy,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
    /// Move played on the first turn
    pub opening: Move,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Patterns,
            seed: None,
            opening: Move::new(0, 0, Shape::Straight),
        }
    }
}

impl SolverConfig {
    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_opening(mut self, opening: Move) -> Self {
        self.opening = opening;
        self
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("writing config {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_opening() {
        let config = SolverConfig::default();
        assert_eq!(config.opening.to_string(), "@0+");
        assert_eq!(config.strategy, Strategy::Patterns);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_builders() {
        let config = SolverConfig::default()
            .with_seed(9)
            .with_strategy(Strategy::Random)
            .with_opening(Move::new(0, 0, Shape::NorthWest));
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.strategy, Strategy::Random);
        assert_eq!(config.opening.shape, Shape::NorthWest);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SolverConfig = serde_json::from_str(r#"{"strategy": "random"}"#).unwrap();
        assert_eq!(config.strategy, Strategy::Random);
        assert_eq!(config.opening, SolverConfig::default().opening);

        let config: SolverConfig = serde_json::from_str(r#"{"opening": "@0/", "seed": 3}"#).unwrap();
        assert_eq!(config.opening, Move::new(0, 0, Shape::NorthWest));
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn test_save_load() {
        let path = std::env::temp_dir().join(format!("trax-config-{}.json", std::process::id()));
        let config = SolverConfig::default().with_seed(42);
        config.save(&path).unwrap();
        let loaded = SolverConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}

//! Configuration settings for the sparse Game of Life driver

use crate::game_of_life::{PatternFormat, Position};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub input: InputConfig,
    pub evolution: EvolutionConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    pub pattern_file: PathBuf,
    /// Lattice position of the first character of a plain-text pattern
    pub origin: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionConfig {
    pub parallel: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: PatternFormat,
    pub file: Option<PathBuf>,
    pub alive_char: char,
    pub dead_char: char,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: InputConfig {
                pattern_file: PathBuf::from("patterns/glider.txt"),
                origin: Position::new(0, 0),
            },
            evolution: EvolutionConfig { parallel: false },
            output: OutputConfig {
                format: PatternFormat::Text,
                file: None,
                alive_char: '█',
                dead_char: '·',
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if !self.input.pattern_file.exists() {
            anyhow::bail!(
                "Pattern file does not exist: {}",
                self.input.pattern_file.display()
            );
        }

        if self.output.alive_char == self.output.dead_char {
            anyhow::bail!(
                "Alive and dead cells must render differently (both are '{}')",
                self.output.alive_char
            );
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref pattern_file) = cli_overrides.pattern_file {
            self.input.pattern_file = pattern_file.clone();
        }
        if let Some(origin) = cli_overrides.origin {
            self.input.origin = origin;
        }
        if let Some(ref output_file) = cli_overrides.output_file {
            self.output.file = Some(output_file.clone());
            self.output.format = PatternFormat::from_path(output_file);
        }
        if cli_overrides.parallel {
            self.evolution.parallel = true;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub pattern_file: Option<PathBuf>,
    pub origin: Option<Position>,
    pub output_file: Option<PathBuf>,
    pub parallel: bool,
}

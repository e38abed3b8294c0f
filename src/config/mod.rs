//! Configuration management for the sparse Game of Life driver

pub mod settings;

pub use settings::{CliOverrides, EvolutionConfig, InputConfig, OutputConfig, Settings};

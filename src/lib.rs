//! Sparse Game of Life
//!
//! Conway's Game of Life on an unbounded integer lattice. Only live cells are
//! stored, so memory and work follow the population rather than any board size.

pub mod config;
pub mod game_of_life;
pub mod utils;

pub use config::Settings;
pub use game_of_life::{Grid, Position};

use anyhow::Result;

/// Load the configured pattern and advance it one generation
pub fn step_pattern(settings: &Settings) -> Result<Grid> {
    let grid = game_of_life::load_grid_from_file(&settings.input.pattern_file, settings.input.origin)?;
    Ok(advance(&grid, settings))
}

/// Advance one generation, honouring the configured evaluation strategy
pub fn advance(grid: &Grid, settings: &Settings) -> Grid {
    if settings.evolution.parallel {
        grid.par_next_grid()
    } else {
        grid.next_grid()
    }
}

//! Game of Life core functionality

pub mod position;
pub mod rules;
pub mod grid;
pub mod io;

pub use position::Position;
pub use rules::LifeRules;
pub use grid::{Bounds, Grid};
pub use io::{
    create_example_patterns, grid_to_string, load_grid_from_file, parse_grid_from_string,
    save_grid_to_file, PatternError, PatternFormat,
};

//! Display and output formatting utilities

use crate::config::OutputConfig;
use crate::game_of_life::{Grid, Position};

/// Renders single generations as text
pub struct GridFormatter;

impl GridFormatter {
    /// Format the bounding box of the live cells, one character per cell.
    ///
    /// Boxes too large to draw fall back to a list of the live cells.
    pub fn format_grid_compact(grid: &Grid, alive: char, dead: char) -> String {
        grid.render(alive, dead).unwrap_or_else(|| Self::format_living_cells(grid))
    }

    /// Same as [`GridFormatter::format_grid_compact`] using the configured characters
    pub fn format_grid(grid: &Grid, output: &OutputConfig) -> String {
        Self::format_grid_compact(grid, output.alive_char, output.dead_char)
    }

    /// Format a grid with coordinates along both edges
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let Some(bounds) = grid.bounds() else {
            return String::from("(no living cells)\n");
        };
        let Some(body) = grid.render('█', '·') else {
            return Self::format_living_cells(grid);
        };

        let mut output = String::new();
        output.push_str(&format!("x from {} to {}\n", bounds.xs.start(), bounds.xs.end()));

        // Header with the last digit of each column
        output.push_str("      ");
        for x in bounds.xs.clone() {
            output.push_str(&format!("{:2}", x.rem_euclid(10)));
        }
        output.push('\n');

        for (y, row) in bounds.ys.clone().zip(body.lines()) {
            output.push_str(&format!("{:5} ", y));
            for cell in row.chars() {
                output.push(cell);
                output.push(cell);
            }
            output.push('\n');
        }

        output
    }

    /// One line per live cell, for grids too spread out to draw
    pub fn format_living_cells(grid: &Grid) -> String {
        let mut output = format!("{} living cells, too far apart to draw:\n", grid.living_count());
        for position in grid.living_cells() {
            output.push_str(&format!("  {}\n", position));
        }
        output
    }

    /// Summary lines describing one generation
    pub fn format_statistics(grid: &Grid) -> String {
        let mut output = String::new();
        output.push_str(&format!("Living cells: {}\n", grid.living_count()));
        match grid.bounds() {
            Some(bounds) => {
                output.push_str(&format!(
                    "Bounding box: {}x{} from ({}, {}) to ({}, {})\n",
                    bounds.width(),
                    bounds.height(),
                    bounds.xs.start(),
                    bounds.ys.start(),
                    bounds.xs.end(),
                    bounds.ys.end()
                ));
            }
            None => output.push_str("Bounding box: empty\n"),
        }
        output
    }

    /// Describe a single cell the way `query` reports it
    pub fn format_cell(grid: &Grid, position: &Position) -> String {
        format!(
            "Cell {}: {} ({} live neighbours, next generation: {})",
            position,
            if grid.read(position) { "alive" } else { "dead" },
            grid.alive_neighbours_count(position),
            if grid.next_cell_state(position) { "alive" } else { "dead" },
        )
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && std::env::var("TERM").unwrap_or_default() != "dumb"
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
